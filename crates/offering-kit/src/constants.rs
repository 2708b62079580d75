use num_bigint::BigUint;

/// Fractional digits shown when the caller does not pick a cap.
pub const DEFAULT_DISPLAY_DIGITS: u8 = 4;

pub const THOUSANDS_SEPARATOR: char = ',';
pub const DECIMAL_POINT: char = '.';

/// Largest integer an `f64` holds without gaps (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

lazy_static! {
    pub static ref MAX_SAFE_INTEGER_BIG: BigUint = BigUint::from(MAX_SAFE_INTEGER);
}
