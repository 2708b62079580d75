//! Error types for amount conversion

use thiserror::Error;

/// Errors raised by the conversion and display functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Negative decimals, negative raw amount, or a human value that cannot be scaled
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] InvalidAmount),
}

/// What made an amount invalid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidAmount {
    /// A raw amount below zero
    #[error("raw amount {0} is negative")]
    NegativeRaw(String),

    /// A decimals count below zero
    #[error("decimals {0} is negative")]
    NegativeDecimals(i64),

    /// A decimals count that does not fit a mint's `u8` field
    #[error("decimals {0} exceeds {max}", max = u8::MAX)]
    DecimalsOutOfRange(i64),

    /// NaN or an infinity
    #[error("human value {0} is not finite")]
    NonFinite(String),

    /// A human value below zero cannot map to a raw amount
    #[error("human value {0} is negative")]
    NegativeHuman(String),

    /// Text that is not a base-10 integer or plain decimal
    #[error("'{0}' is not a valid number")]
    Malformed(String),
}

impl AmountError {
    pub fn kind(&self) -> &InvalidAmount {
        match self {
            AmountError::InvalidAmount(kind) => kind,
        }
    }
}

impl From<AmountError> for String {
    fn from(e: AmountError) -> Self {
        e.to_string()
    }
}
