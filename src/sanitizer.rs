// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Plain-text sanitization of raw form input.
//!
//! Input is rendered as the escaped text a browser serializes for a text
//! node, so markup can never be interpreted downstream. Only `&`, `<`, `>`
//! and the no-break space are escaped; quotes pass through unchanged.
//!
//! Lengths are measured in UTF-16 code units, the unit browsers use for
//! form values.

/// Maximum UTF-16 code units kept from any single field.
pub const MAX_FIELD_UNITS: usize = 1000;

/// Escape, truncate to [`MAX_FIELD_UNITS`], then trim.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let escaped = escape_text(raw);
    truncate_utf16(&escaped, MAX_FIELD_UNITS).trim().to_string()
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Longest prefix of `text` that fits in `max_units` UTF-16 code units.
/// A surrogate pair straddling the limit is dropped whole.
fn truncate_utf16(text: &str, max_units: usize) -> &str {
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            return &text[..idx];
        }
    }
    text
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize("  สมชาย ใจดี  "), "สมชาย ใจดี");
        assert_eq!(sanitize("Say \"hi\" it's fine"), "Say \"hi\" it's fine");
    }

    #[test]
    fn test_markup_neutralized() {
        let out = sanitize("<script>alert('x')</script> & more");
        assert_eq!(out, "&lt;script&gt;alert('x')&lt;/script&gt; &amp; more");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_truncates_by_utf16_units() {
        let thai = "ก".repeat(1500);
        let out = sanitize(&thai);
        assert_eq!(out.chars().count(), MAX_FIELD_UNITS);

        // Escaping happens before the cap, so entities count toward it.
        let out = sanitize(&"<".repeat(400));
        assert!(utf16_len(&out) <= MAX_FIELD_UNITS);
        assert!(!out.contains('<'));
    }

    #[test]
    fn test_astral_chars_count_double() {
        let out = sanitize(&"🙏".repeat(600));
        assert_eq!(out.chars().count(), 500);
        assert_eq!(utf16_len(&out), MAX_FIELD_UNITS);

        // A pair that would straddle the cap is dropped whole.
        let mut raw = "a".repeat(MAX_FIELD_UNITS - 1);
        raw.push('🙏');
        assert_eq!(sanitize(&raw), "a".repeat(MAX_FIELD_UNITS - 1));
    }

    #[test]
    fn test_trims_after_truncation() {
        let mut raw = "a".repeat(MAX_FIELD_UNITS - 1);
        raw.push(' ');
        raw.push_str("tail");
        assert_eq!(sanitize(&raw), "a".repeat(MAX_FIELD_UNITS - 1));
    }

    #[test]
    fn test_no_break_space_escaped() {
        assert_eq!(sanitize("a\u{a0}b"), "a&nbsp;b");
    }
}
