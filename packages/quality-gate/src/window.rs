//! The opening window every structural analyzer looks at.

/// Characters of a draft treated as its opening.
pub const OPENING_WINDOW_CHARS: usize = 200;

/// First `n` characters of `text`, after leading whitespace.
pub fn opening_window(text: &str, n: usize) -> &str {
    let text = text.trim_start();
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Character count used for every length rule.
pub fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_window_counts_characters() {
        let text = "  あいうえおかきくけこ";
        assert_eq!(opening_window(text, 5), "あいうえお");
        assert_eq!(opening_window(text, 50), "あいうえおかきくけこ");
        assert_eq!(opening_window("", 5), "");
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len(" これは短すぎるレターです。\n"), 13);
    }
}
