pub const MIN_PERCENT: u32 = 0;
pub const MAX_PERCENT: u32 = 100;

pub fn clamp_percent(value: i64) -> u32 {
    value.clamp(i64::from(MIN_PERCENT), i64::from(MAX_PERCENT)) as u32
}

/// Reads an optional sign and the longest run of ASCII digits at the start of
/// `raw`, ignoring surrounding whitespace. Digit runs that overflow saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

pub fn coerce_percent_text(raw: &str) -> u32 {
    parse_leading_int(raw).map(clamp_percent).unwrap_or(MIN_PERCENT)
}

pub fn coerce_percent_number(value: f64) -> u32 {
    if !value.is_finite() {
        return MIN_PERCENT;
    }
    // Truncation toward zero matches the text path ("3.9" -> 3).
    let truncated = value.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    clamp_percent(truncated)
}
