//! Mint descriptors.
//!
//! Conversions accept either an explicit decimals count or any record that
//! carries one, so callers can hand over whatever mint shape they already
//! hold: a decoded SPL `Mint`, an RPC `jsonParsed` mint, or a token balance.

use solana_account_decoder_client_types::token::UiTokenAmount;
use spl_token_interface::state::Mint;

use crate::amount::{Decimals, RawAmount};
use crate::errors::AmountError;

/// Anything that knows how many fractional digits its raw amounts carry
pub trait DecimalsSource {
    fn decimals(&self) -> Decimals;
}

/// A mint-like descriptor: decimals plus the outstanding supply
pub trait MintLike: DecimalsSource {
    fn supply(&self) -> RawAmount;
}

impl DecimalsSource for Decimals {
    fn decimals(&self) -> Decimals {
        *self
    }
}

impl DecimalsSource for u8 {
    fn decimals(&self) -> Decimals {
        Decimals::new(*self)
    }
}

impl<T: DecimalsSource + ?Sized> DecimalsSource for &T {
    fn decimals(&self) -> Decimals {
        (**self).decimals()
    }
}

impl<T: MintLike + ?Sized> MintLike for &T {
    fn supply(&self) -> RawAmount {
        (**self).supply()
    }
}

/// Mint fields as reported by the RPC `jsonParsed` encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintInfo {
    pub supply: RawAmount,
    pub decimals: Decimals,
}

impl MintInfo {
    pub fn new(supply: impl Into<RawAmount>, decimals: u8) -> Self {
        MintInfo { supply: supply.into(), decimals: Decimals::new(decimals) }
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Failed to parse mint: {}", e))
    }
}

impl DecimalsSource for MintInfo {
    fn decimals(&self) -> Decimals {
        self.decimals
    }
}

impl MintLike for MintInfo {
    fn supply(&self) -> RawAmount {
        self.supply.clone()
    }
}

impl From<&Mint> for MintInfo {
    fn from(mint: &Mint) -> Self {
        MintInfo::new(mint.supply, mint.decimals)
    }
}

impl DecimalsSource for Mint {
    fn decimals(&self) -> Decimals {
        Decimals::new(self.decimals)
    }
}

impl MintLike for Mint {
    fn supply(&self) -> RawAmount {
        RawAmount::from(self.supply)
    }
}

impl DecimalsSource for UiTokenAmount {
    fn decimals(&self) -> Decimals {
        Decimals::new(self.decimals)
    }
}

impl TryFrom<&UiTokenAmount> for RawAmount {
    type Error = AmountError;

    fn try_from(balance: &UiTokenAmount) -> Result<Self, Self::Error> {
        balance.amount.parse()
    }
}
