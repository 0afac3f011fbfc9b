use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use rust_decimal::Decimal;
use tracing::warn;

const MAX_DIGITS: usize = 28;

/// Scales a raw integer token balance by `10^-decimals`.
///
/// Works on the digit string so balances larger than any machine integer are
/// still exact as long as their whole part fits in a `Decimal`. Fractional
/// digits past the available precision are truncated. A whole part too large
/// for a `Decimal` saturates at `Decimal::MAX`.
pub fn normalize_balance(raw: &str, decimals: u32) -> Result<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        bail!("Invalid raw balance {:?}", raw);
    }

    let digits = raw.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let decimals = decimals as usize;
    // first significant digit lies past the last representable place
    if decimals >= digits.len() + MAX_DIGITS {
        return Ok(Decimal::ZERO);
    }

    let (whole, fraction) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (&digits[..split], digits[split..].to_string())
    } else {
        ("", format!("{}{}", "0".repeat(decimals - digits.len()), digits))
    };

    if whole.len() > MAX_DIGITS {
        warn!(
            "Balance {} with {} decimals exceeds {}, capped",
            raw,
            decimals,
            Decimal::MAX
        );
        return Ok(Decimal::MAX);
    }

    let keep = fraction.len().min(MAX_DIGITS - whole.len());
    let fraction = &fraction[..keep];

    let text = match (whole.is_empty(), fraction.is_empty()) {
        (true, true) => return Ok(Decimal::ZERO),
        (false, true) => whole.to_string(),
        (true, false) => format!("0.{}", fraction),
        (false, false) => format!("{}.{}", whole, fraction),
    };

    Decimal::from_str(&text).map_err(|e| anyhow!("Invalid decimal {}: {}", text, e))
}
