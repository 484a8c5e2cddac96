//! Value-cell cleansing.
//!
//! Rendered statement cells carry display formatting: a leading currency
//! symbol, thousands separators, and enclosing parentheses for negative
//! values. Cleansing strips the formatting down to a plain numeric string,
//! mapping the empty string to an explicit missing value (not zero).
//! The transform is idempotent: cleansing an already-clean cell is a no-op.

/// Cleanse one value cell. `None` is the explicit missing-value marker.
pub fn cleanse_value(raw: &str) -> Option<String> {
    let mut text = trim(raw);
    if text.is_empty() {
        return None;
    }

    // One leading currency symbol
    if let Some(rest) = text.strip_prefix('$') {
        text = trim(rest);
    }

    // Enclosing parentheses denote a negative value
    let negative = text.len() >= 2 && text.starts_with('(') && text.ends_with(')');
    if negative {
        text = trim(&text[1..text.len() - 1]);
    }

    let digits: String = text.chars().filter(|&c| c != ',').collect();
    if digits.is_empty() {
        return None;
    }

    if negative {
        Some(format!("-{}", digits))
    } else {
        Some(digits)
    }
}

/// Cleanse every value cell of a grid row, leaving the label alone.
pub fn cleanse_cells(cells: &[String]) -> Vec<Option<String>> {
    cells.iter().map(|c| cleanse_value(c)).collect()
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{a0}')
}
