//! String conversion utilities used by form normalization.

/// Converts a blank string (empty or whitespace only) to `None`, otherwise
/// returns the trimmed value.
///
/// # Examples
///
/// ```
/// use pokedex_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank(" https://img/1.png "), Some("https://img/1.png"));
/// assert_eq!(none_if_blank(""), None);
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Splits a comma-delimited list, trimming each element and dropping empty ones.
///
/// # Examples
///
/// ```
/// use pokedex_domain::common::split_delimited;
///
/// assert_eq!(split_delimited("grass, poison"), vec!["grass", "poison"]);
/// assert_eq!(split_delimited(" , fire,,"), vec!["fire"]);
/// assert!(split_delimited("").is_empty());
/// ```
pub fn split_delimited(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter_map(none_if_blank)
        .map(str::to_string)
        .collect()
}

/// Reads the integer at the start of `value`, ignoring leading whitespace.
///
/// Mirrors lenient form parsing: `"12cm"` reads as `12`, `"7.9"` as `7`, and
/// anything without leading digits yields `None`.
pub fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Overlong digit runs saturate instead of failing.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
