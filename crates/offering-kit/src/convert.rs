//! Conversion between raw token amounts and human values.
//!
//! `to_human` returns the float nearest to the exact quotient. Amounts above
//! 2^53 still lose precision and are reported at debug level.
//!
//! Going the other way always rounds up to a whole raw unit, so an amount
//! handed to an on-chain instruction never falls short of what the user
//! typed.

use std::str::FromStr;

use log::debug;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::amount::{AmountInput, Decimals, RawAmount};
use crate::errors::{AmountError, InvalidAmount};
use crate::mint::{DecimalsSource, MintLike};

/// Nearest `f64` to `raw / 10^decimals`. Amounts past `f64::MAX` clamp to it.
pub fn to_human(raw: &RawAmount, decimals: impl DecimalsSource) -> f64 {
    let decimals = decimals.decimals();
    let (integer_part, remainder) = raw.value().div_rem(&decimals.scale());

    if raw.exceeds_safe_integer() {
        debug!("raw amount {} with {} decimals exceeds f64 precision", raw, decimals);
    }

    // float parsing rounds correctly, summing two floats does not
    let text = match decimals.get() {
        0 => integer_part.to_string(),
        width => {
            let fraction = remainder.to_string();
            format!("{}.{:0>width$}", integer_part, fraction, width = width as usize)
        }
    };
    match f64::from_str(&text) {
        Ok(human) if human.is_finite() => human,
        _ => {
            debug!("raw amount {} with {} decimals clamped to f64::MAX", raw, decimals);
            f64::MAX
        }
    }
}

pub fn to_scaled(
    input: impl Into<AmountInput>,
    decimals: impl DecimalsSource,
) -> Result<RawAmount, AmountError> {
    match input.into() {
        AmountInput::Raw(raw) => Ok(raw),
        AmountInput::Human(human) => {
            if !human.is_finite() {
                return Err(InvalidAmount::NonFinite(human.to_string()).into());
            }
            if human < 0.0 {
                return Err(InvalidAmount::NegativeHuman(human.to_string()).into());
            }
            if human == 0.0 {
                // also catches -0.0, which would print a sign
                return Ok(RawAmount::zero());
            }
            let decimals = decimals.decimals();
            if spacing_in_raw_units(human, decimals) >= 1.0 {
                return Ok(ceil_exact(human, decimals));
            }
            // f64's Display never switches to exponent notation, and prints
            // the shortest digits that read back as the same float
            let fixed = format!("{}", human);
            ceil_shift(&fixed, decimals.get() as usize)
                .ok_or_else(|| InvalidAmount::Malformed(fixed).into())
        }
    }
}

/// Gap between `human` and the next float up, measured in raw units.
///
/// Below one unit, every decimal that reads back as `human` lies within one
/// raw unit of it, so shifting the shortest text cannot land below the raw
/// amount it came from. At one unit or more the shortest text may pick a
/// neighbouring integer, and only the exact binary value is safe to round up.
fn spacing_in_raw_units(human: f64, decimals: Decimals) -> f64 {
    let next_up = f64::from_bits(human.to_bits() + 1);
    (next_up - human) * decimals.scale_f64()
}

/// Ceiling of the exact binary value of a positive finite `human`, scaled.
fn ceil_exact(human: f64, decimals: Decimals) -> RawAmount {
    let bits = human.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & 0x000f_ffff_ffff_ffff;
    let (mantissa, exponent) = match biased_exponent {
        0 => (fraction, -1074),
        _ => (fraction | (1 << 52), biased_exponent - 1075),
    };

    let numerator = BigUint::from(mantissa) * decimals.scale();
    if exponent >= 0 {
        return RawAmount::new(numerator << exponent as usize);
    }
    let denominator = BigUint::one() << exponent.unsigned_abs() as usize;
    let (quotient, remainder) = numerator.div_rem(&denominator);
    if remainder.is_zero() {
        RawAmount::new(quotient)
    } else {
        RawAmount::new(quotient + BigUint::one())
    }
}

/// Raw amounts become human values, human values pass through.
pub fn to_number(input: impl Into<AmountInput>, decimals: impl DecimalsSource) -> f64 {
    match input.into() {
        AmountInput::Raw(raw) => to_human(&raw, decimals),
        AmountInput::Human(human) => human,
    }
}

pub fn supply_as_human(mint: impl MintLike) -> f64 {
    to_human(&mint.supply(), &mint)
}

/// Scales a decimal typed by a user ("12.5") without going through `f64`.
///
/// Digits past the mint's decimals round the result up by one raw unit.
pub fn parse_human(text: &str, decimals: impl DecimalsSource) -> Result<RawAmount, AmountError> {
    let text = text.trim();
    ceil_shift(text, decimals.decimals().get() as usize)
        .ok_or_else(|| InvalidAmount::Malformed(text.to_string()).into())
}

/// Moves the decimal point of `text` right by `decimals` places and takes the
/// ceiling. Returns `None` unless `text` is a plain unsigned decimal.
fn ceil_shift(text: &str, decimals: usize) -> Option<RawAmount> {
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (text, ""),
    };
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !is_digits(integer) || !is_digits(fraction)
    {
        return None;
    }

    let (kept, dropped) = fraction.split_at(fraction.len().min(decimals));
    let digits = format!("{integer}{kept:0<width$}", width = decimals);
    let digits = digits.trim_start_matches('0');

    let mut value =
        if digits.is_empty() { BigUint::default() } else { BigUint::from_str(digits).ok()? };
    if dropped.bytes().any(|b| b != b'0') {
        value += BigUint::one();
    }
    Some(RawAmount::new(value))
}
