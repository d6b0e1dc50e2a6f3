use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with midpoints going away from zero (half-up).
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as `$1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round_currency(value);
    rounded.rescale(2);
    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// Formats a rate fraction as a percentage with at most two decimals,
/// keeping at least one (`0.05` -> `5.0`, `0.0589` -> `5.89`).
pub fn format_percent(fraction: Decimal) -> String {
    let percent = (fraction * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if percent.scale() == 0 {
        format!("{percent}.0")
    } else {
        percent.to_string()
    }
}
