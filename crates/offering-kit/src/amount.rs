//! Value types for token amounts.
//!
//! A [`RawAmount`] counts the smallest indivisible units of a token. The
//! [`Decimals`] of its mint say how many of those digits sit behind the
//! decimal point once the amount is shown to a person.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::MAX_SAFE_INTEGER_BIG;
use crate::errors::{AmountError, InvalidAmount};

/// Number of fractional digits implied by a mint's raw-unit scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimals(u8);

impl Decimals {
    pub const fn new(decimals: u8) -> Self {
        Decimals(decimals)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// `10^decimals`, exact
    pub fn scale(self) -> BigUint {
        BigUint::from(10u32).pow(self.0 as u32)
    }

    /// `10^decimals` as the nearest `f64`; `powi` drifts past 10^22
    pub fn scale_f64(self) -> f64 {
        f64::from_str(&format!("1e{}", self.0)).unwrap_or(f64::INFINITY)
    }
}

impl From<u8> for Decimals {
    fn from(decimals: u8) -> Self {
        Decimals(decimals)
    }
}

impl TryFrom<i64> for Decimals {
    type Error = AmountError;

    fn try_from(decimals: i64) -> Result<Self, Self::Error> {
        if decimals < 0 {
            return Err(InvalidAmount::NegativeDecimals(decimals).into());
        }
        u8::try_from(decimals)
            .map(Decimals)
            .map_err(|_| InvalidAmount::DecimalsOutOfRange(decimals).into())
    }
}

impl fmt::Display for Decimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A token quantity in its smallest on-chain unit.
///
/// Always non-negative: the fallible constructors reject anything below zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RawAmount(BigUint);

impl RawAmount {
    pub fn new(value: BigUint) -> Self {
        RawAmount(value)
    }

    pub fn zero() -> Self {
        RawAmount(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// True when the amount cannot be held exactly by an `f64`.
    pub fn exceeds_safe_integer(&self) -> bool {
        self.0 > *MAX_SAFE_INTEGER_BIG
    }
}

impl From<BigUint> for RawAmount {
    fn from(value: BigUint) -> Self {
        RawAmount(value)
    }
}

impl From<u64> for RawAmount {
    fn from(value: u64) -> Self {
        RawAmount(BigUint::from(value))
    }
}

impl From<u128> for RawAmount {
    fn from(value: u128) -> Self {
        RawAmount(BigUint::from(value))
    }
}

impl TryFrom<i64> for RawAmount {
    type Error = AmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(RawAmount::from)
            .map_err(|_| InvalidAmount::NegativeRaw(value.to_string()).into())
    }
}

impl TryFrom<i128> for RawAmount {
    type Error = AmountError;

    fn try_from(value: i128) -> Result<Self, Self::Error> {
        u128::try_from(value)
            .map(RawAmount::from)
            .map_err(|_| InvalidAmount::NegativeRaw(value.to_string()).into())
    }
}

impl FromStr for RawAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix('-') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(InvalidAmount::NegativeRaw(s.to_string()).into());
            }
            return Err(InvalidAmount::Malformed(s.to_string()).into());
        }
        // BigUint accepts a leading '+' and '_' separators, raw amounts don't
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidAmount::Malformed(s.to_string()).into());
        }
        BigUint::from_str(s)
            .map(RawAmount)
            .map_err(|_| InvalidAmount::Malformed(s.to_string()).into())
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RawAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Integer(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
            Repr::Integer(n) => Ok(RawAmount::from(n)),
        }
    }
}

/// Either an amount already in raw units, or a human value still to be scaled
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Raw(RawAmount),
    Human(f64),
}

impl From<RawAmount> for AmountInput {
    fn from(raw: RawAmount) -> Self {
        AmountInput::Raw(raw)
    }
}

impl From<f64> for AmountInput {
    fn from(human: f64) -> Self {
        AmountInput::Human(human)
    }
}
