//! Shared primitive types used across the aggregation layer.

use serde::{Deserialize, Deserializer};

/// Lifetime revenue in cents (dollars × 100). Kept as fixed-point so
/// per-status sums are exact; rounding happens once, at display time.
pub type Cents = i64;

/// Parse a decimal revenue cell ("5432.1", "0.25", "10") into cents.
///
/// Digits beyond the second decimal place are rounded half-to-even, the
/// same rule the revenue display uses. Negative values are rejected: the
/// data model defines lifetime revenue as non-negative.
pub fn parse_cents(raw: &str) -> Result<Cents, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("empty revenue value".into());
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(format!("malformed revenue value '{raw}'"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("malformed revenue value '{raw}'"));
    }

    let dollars: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| format!("revenue value '{raw}' out of range"))?
    };

    let frac_bytes = frac.as_bytes();
    let digit = |i: usize| frac_bytes.get(i).map_or(0, |b| i64::from(b - b'0'));

    let mut cents = dollars
        .checked_mul(100)
        .and_then(|c| c.checked_add(digit(0) * 10 + digit(1)))
        .ok_or_else(|| format!("revenue value '{raw}' out of range"))?;

    // Half-to-even on the sub-cent digits.
    if frac_bytes.len() > 2 {
        let first = digit(2);
        let tail_nonzero = frac_bytes[3..].iter().any(|&b| b != b'0');
        let round_up = first > 5 || (first == 5 && (tail_nonzero || cents % 2 == 1));
        if round_up {
            cents += 1;
        }
    }

    Ok(cents)
}

/// serde adapter so `CustomerRecord` can deserialize `total_revenue`
/// straight from the CSV cell.
pub(crate) fn cents_from_csv<'de, D>(de: D) -> Result<Cents, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    parse_cents(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dollar_amounts() {
        assert_eq!(parse_cents("1000000"), Ok(100_000_000));
        assert_eq!(parse_cents("0"), Ok(0));
    }

    #[test]
    fn parses_one_and_two_decimal_places() {
        assert_eq!(parse_cents("5432.1"), Ok(543_210));
        assert_eq!(parse_cents("5432.18"), Ok(543_218));
        assert_eq!(parse_cents(".25"), Ok(25));
    }

    #[test]
    fn sub_cent_digits_round_half_to_even() {
        assert_eq!(parse_cents("10.005"), Ok(1_000)); // 1000 is even, stays
        assert_eq!(parse_cents("10.015"), Ok(1_002)); // 1001 is odd, rounds up
        assert_eq!(parse_cents("10.0051"), Ok(1_001)); // past halfway, always up
        assert_eq!(parse_cents("10.004"), Ok(1_000));
    }

    #[test]
    fn rejects_garbage_and_negatives() {
        assert!(parse_cents("").is_err());
        assert!(parse_cents("-5").is_err());
        assert!(parse_cents("12a.3").is_err());
        assert!(parse_cents(".").is_err());
    }
}
