//! Display formatting for human amounts.
//!
//! Output is locale independent: `,` groups thousands and `.` separates the
//! fraction, whatever the host locale says. Fractions are truncated, never
//! rounded to nearest, so a displayed balance is never more than what is held.

use std::str::FromStr;

use crate::amount::RawAmount;
use crate::constants::{DECIMAL_POINT, DEFAULT_DISPLAY_DIGITS, THOUSANDS_SEPARATOR};
use crate::convert::to_human;
use crate::errors::{AmountError, InvalidAmount};
use crate::mint::DecimalsSource;

/// How `human_readable` reconciles the mint's decimals with the display cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Truncate once, to the smaller of the mint decimals and the display cap
    #[default]
    Single,
    /// Truncate to the mint decimals, then again to the display cap
    Parity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountFormatter {
    pub display_digits: u8,
    pub policy: RoundingPolicy,
}

impl Default for AmountFormatter {
    fn default() -> Self {
        AmountFormatter { display_digits: DEFAULT_DISPLAY_DIGITS, policy: RoundingPolicy::default() }
    }
}

impl AmountFormatter {
    pub fn new(display_digits: u8) -> Self {
        AmountFormatter { display_digits, ..Self::default() }
    }

    pub fn with_policy(mut self, policy: RoundingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn format(&self, value: f64) -> Result<String, AmountError> {
        format_display(value, self.display_digits)
    }

    pub fn human_readable(
        &self,
        raw: &RawAmount,
        mint: impl DecimalsSource,
    ) -> Result<String, AmountError> {
        let decimals = mint.decimals().get();
        let human = to_human(raw, decimals);
        match self.policy {
            RoundingPolicy::Single => format_display(human, decimals.min(self.display_digits)),
            RoundingPolicy::Parity => {
                format_display(round_display(human, decimals)?, self.display_digits)
            }
        }
    }
}

/// Truncates `value` toward zero to at most `digits` fractional digits.
///
/// Truncation applies to the shortest decimal that reads back as `value`,
/// not to its binary expansion: `0.29` keeps two digits as `0.29` even though
/// the float sits just below it.
pub fn round_display(value: f64, digits: u8) -> Result<f64, AmountError> {
    if !value.is_finite() {
        return Err(InvalidAmount::NonFinite(value.to_string()).into());
    }
    let text = value.to_string();
    let truncated = match text.split_once('.') {
        Some((integer, _)) if digits == 0 => integer.to_string(),
        Some((integer, fraction)) if fraction.len() > digits as usize => {
            format!("{}.{}", integer, &fraction[..digits as usize])
        }
        _ => return Ok(value),
    };
    f64::from_str(&truncated).map_err(|_| InvalidAmount::Malformed(truncated.clone()).into())
}

/// Truncates to `digits` fractional digits and renders with thousands
/// grouping. Trailing zeros in the fraction are dropped.
pub fn format_display(value: f64, digits: u8) -> Result<String, AmountError> {
    let truncated = round_display(value, digits)?;
    let rendered = format!("{:.*}", digits as usize, truncated);

    let (negative, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rendered.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let fraction = fraction.trim_end_matches('0');

    let mut display = String::with_capacity(rendered.len() + integer.len() / 3);
    if negative && !(integer.bytes().all(|b| b == b'0') && fraction.is_empty()) {
        display.push('-');
    }
    display.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        display.push(DECIMAL_POINT);
        display.push_str(fraction);
    }
    Ok(display)
}

/// Formats a raw amount for display with the default formatter.
pub fn human_readable(raw: &RawAmount, mint: impl DecimalsSource) -> Result<String, AmountError> {
    AmountFormatter::default().human_readable(raw, mint)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}
