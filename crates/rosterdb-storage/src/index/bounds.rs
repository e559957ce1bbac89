//! Key bounds for prefix ranges.

/// Returns the smallest string that is greater than every string starting
/// with `prefix`, for use as an exclusive upper bound.
///
/// Trailing characters that have no successor are dropped before bumping.
/// Returns `None` when no such bound exists (the empty prefix, or a prefix
/// made only of `char::MAX`), meaning the range is unbounded above.
pub fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = next_char(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

/// Next scalar value in code point order, skipping the surrogate gap.
fn next_char(c: char) -> Option<char> {
    match c {
        '\u{D7FF}' => Some('\u{E000}'),
        char::MAX => None,
        _ => char::from_u32(c as u32 + 1),
    }
}
