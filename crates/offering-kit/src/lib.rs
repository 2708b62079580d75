#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate lazy_static;

pub mod amount;
pub mod constants;
pub mod convert;
pub mod display;
pub mod errors;
pub mod mint;
pub mod status;

pub use amount::{AmountInput, Decimals, RawAmount};
pub use convert::{parse_human, supply_as_human, to_human, to_number, to_scaled};
pub use display::{format_display, human_readable, round_display, AmountFormatter, RoundingPolicy};
pub use errors::{AmountError, InvalidAmount};
pub use mint::{DecimalsSource, MintInfo, MintLike};
pub use status::{OfferingStatus, OfferingWindow};

pub use num_bigint;
