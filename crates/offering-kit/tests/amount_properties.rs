use offering_kit::{
    format_display, human_readable, round_display, supply_as_human, to_human, to_scaled,
    AmountError, Decimals, InvalidAmount, MintInfo, RawAmount,
};
use test_case::test_case;

const DECIMALS: [u8; 8] = [0, 1, 2, 6, 9, 12, 13, 18];

const RAW_AMOUNTS: [u64; 13] = [
    0,
    1,
    7,
    999,
    1_000_000,
    123_456_789,
    1_000_000_001,
    987_654_321_012,
    123_456_789_012_345,
    4_503_599_627_370_497,
    7_650_194_819_554_992,
    8_999_999_999_999_999,
    9_007_199_254_740_991,
];

const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// xorshift64, so every run walks the same amounts
struct Amounts(u64);

impl Iterator for Amounts {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        // spread samples over every magnitude, not just the top bits
        let bits = x % 54;
        Some((x >> 10) & ((1u64 << bits) - 1) & MAX_SAFE_INTEGER)
    }
}

#[test]
fn scaling_a_human_value_never_undercounts() {
    for decimals in DECIMALS {
        for raw in RAW_AMOUNTS {
            let raw = RawAmount::from(raw);
            let human = to_human(&raw, decimals);
            let back = to_scaled(human, decimals).unwrap();
            assert!(back >= raw, "{} with {} decimals came back as {}", raw, decimals, back);
        }
    }
}

#[test_case(0x9e37_79b9_7f4a_7c15; "seed one")]
#[test_case(0x2545_f491_4f6c_dd1d; "seed two")]
#[test_case(0xdead_beef_cafe_f00d; "seed three")]
fn scaling_never_undercounts_across_the_safe_range(seed: u64) {
    for raw in Amounts(seed).take(2_000) {
        for decimals in 0..=18u8 {
            let raw = RawAmount::from(raw);
            let back = to_scaled(to_human(&raw, decimals), decimals).unwrap();
            assert!(back >= raw, "{} with {} decimals came back as {}", raw, decimals, back);
        }
    }
}

#[test]
fn zero_is_zero_at_every_scale() {
    for decimals in DECIMALS {
        assert_eq!(to_human(&RawAmount::zero(), decimals), 0.0);
    }
}

#[test]
fn zero_decimals_is_identity() {
    for raw in RAW_AMOUNTS.into_iter().chain([9_007_199_254_740_991]) {
        assert_eq!(to_human(&RawAmount::from(raw), 0u8), raw as f64);
    }
}

#[test]
fn nine_decimal_round_trip_is_exact() {
    let raw = RawAmount::from(1_000_000_001u64);
    let human = to_human(&raw, 9u8);
    assert_eq!(human, 1.000000001);
    assert_eq!(to_scaled(human, 9u8).unwrap(), raw);
}

#[test]
fn raw_input_passes_through() {
    let raw = RawAmount::from(500u64);
    assert_eq!(to_scaled(raw.clone(), 9u8).unwrap(), raw);
}

#[test]
fn display_truncates_and_groups() {
    assert_eq!(round_display(1.23456, 4).unwrap(), 1.2345);
    assert_eq!(format_display(1234567.891, 2).unwrap(), "1,234,567.89");
}

#[test]
fn mint_views_agree() {
    let mint: MintInfo =
        serde_json::from_str(r#"{"supply": "5000000000000000", "decimals": 9}"#).unwrap();
    assert_eq!(supply_as_human(&mint), 5_000_000.0);
    assert_eq!(human_readable(&mint.supply, &mint).unwrap(), "5,000,000");
}

fn assert_invalid(result: Result<impl std::fmt::Debug, AmountError>) {
    let err = result.unwrap_err();
    assert!(matches!(
        err.kind(),
        InvalidAmount::NegativeRaw(_) | InvalidAmount::NegativeDecimals(_)
    ));
}

#[test_case(-1; "minus one")]
#[test_case(-18; "minus eighteen")]
#[test_case(i64::MIN; "minimum")]
fn negative_decimals_are_rejected(decimals: i64) {
    assert_invalid(Decimals::try_from(decimals));
}

#[test_case("-1"; "minus one")]
#[test_case("-1000000000000000000000000"; "beyond u64")]
fn negative_raw_amounts_are_rejected(raw: &str) {
    assert_invalid(raw.parse::<RawAmount>());
    assert_invalid(RawAmount::try_from(-1i128));
}

#[test]
fn negative_supply_in_a_mint_is_rejected() {
    let parsed = serde_json::from_str::<MintInfo>(r#"{"supply": "-10", "decimals": 2}"#);
    assert!(parsed.is_err());
}
