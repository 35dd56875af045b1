//! Numeric-token extraction from scanned text.

/// Derive the canonical number carried by a scanned payload.
///
/// An all-digit input is returned unchanged. Otherwise the longest run of
/// ASCII digits is returned; among runs of equal length the first one wins.
/// Returns `None` when the input holds no digit at all.
pub fn extract_number(content: &str) -> Option<&str> {
    if content.is_empty() {
        return None;
    }
    if content.bytes().all(|b| b.is_ascii_digit()) {
        return Some(content);
    }

    let mut best: Option<&str> = None;
    for run in content.split(|c: char| !c.is_ascii_digit()) {
        if run.is_empty() {
            continue;
        }
        // Strictly longer only, so the earliest run keeps a tie.
        if best.is_none_or(|b| run.len() > b.len()) {
            best = Some(run);
        }
    }
    best
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_digits_returned_unchanged() {
        assert_eq!(extract_number("12345"), Some("12345"));
        assert_eq!(extract_number("007"), Some("007"));
    }

    #[test]
    fn longest_run_wins() {
        assert_eq!(extract_number("ABC-123-XY-4567"), Some("4567"));
        assert_eq!(extract_number("9 apples and 1000 pears"), Some("1000"));
    }

    #[test]
    fn tie_keeps_first_run() {
        assert_eq!(extract_number("ab12cd34"), Some("12"));
        assert_eq!(extract_number("x99y00z"), Some("99"));
    }

    #[test]
    fn no_digits_yields_none() {
        assert_eq!(extract_number("no-digits-here"), None);
        assert_eq!(extract_number(""), None);
        assert_eq!(extract_number("   "), None);
    }

    #[test]
    fn non_ascii_digits_are_ignored() {
        // Arabic-Indic digits are not ASCII, only "42" counts.
        assert_eq!(extract_number("\u{0661}\u{0662}\u{0663}-42"), Some("42"));
        assert_eq!(extract_number("\u{0661}\u{0662}\u{0663}"), None);
    }

    #[test]
    fn leading_zeros_preserved() {
        assert_eq!(extract_number("TAG-000123"), Some("000123"));
    }

    #[test]
    fn url_payload() {
        assert_eq!(
            extract_number("https://example.com/asset?id=884211&v=2"),
            Some("884211")
        );
    }
}
