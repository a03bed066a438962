/// Parses a human-entered decimal: every whitespace character (including
/// non-breaking spaces used as thousand separators) is dropped and a comma
/// is accepted as the decimal separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a path or form identifier.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}
