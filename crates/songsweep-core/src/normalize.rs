//! Text normalization for identity matching.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a title or artist string into its matching form.
///
/// Applies NFKC folding, lower-cases, replaces every character that is not
/// a letter, digit, `_`, whitespace, `-` or `.` with a space, then collapses
/// whitespace runs to a single space and trims. The result is only ever used
/// as a grouping key.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let folded: String = text.nfkc().collect::<String>().to_lowercase();

    let cleaned: String = folded
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    for word in cleaned.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Letters, digits, whitespace and `_-.`. Combining marks count as
/// alphabetic for `char::is_alphanumeric` but are not letters, and keeping
/// them would let a second NFKC pass recompose them.
fn is_kept(c: char) -> bool {
    (c.is_alphanumeric() && !is_combining_mark(c))
        || c.is_whitespace()
        || matches!(c, '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
        assert_eq!(normalize_text("!!!"), "");
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize_text("  Hello   World  "), "hello world");
        assert_eq!(normalize_text("Tab\tand\nnewline"), "tab and newline");
    }

    #[test]
    fn test_symbols_become_spaces() {
        assert_eq!(normalize_text("Rock & Roll"), "rock roll");
        assert_eq!(normalize_text("What's Up?"), "what s up");
        assert_eq!(normalize_text("(Live)"), "live");
    }

    #[test]
    fn test_kept_punctuation() {
        assert_eq!(normalize_text("Mr._Brightside-2.0"), "mr._brightside-2.0");
    }

    #[test]
    fn test_fullwidth_folds_to_ascii() {
        assert_eq!(normalize_text("ＳＯＮＧ　Ａ"), "song a");
        assert_eq!(normalize_text("ﬁnal"), "final");
    }

    #[test]
    fn test_combining_marks_become_spaces() {
        // U+0345 is Alphabetic but a mark; left in place it recomposes.
        assert_eq!(normalize_text("\u{1fbc}\u{301}"), "\u{3ac}");
        assert_eq!(normalize_text("\u{1fcc}\u{301}"), "\u{3ae}");
        assert_eq!(normalize_text("का"), "क");
        assert_eq!(normalize_text("İstanbul"), "i stanbul");
    }

    #[test]
    fn test_combining_mark_inputs_are_idempotent() {
        for input in ["\u{1fbc}\u{301}", "\u{1fcc}\u{301}", "\u{1ffc}\u{301}", "a\u{345}\u{301}", "कि", "İ"] {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_cjk_letters_kept() {
        assert_eq!(normalize_text("晴天 - 周杰伦"), "晴天 - 周杰伦");
    }
}
