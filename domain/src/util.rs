//! Shared utility functions.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Decode raw process output as text, keeping at most `max_bytes`.
///
/// Invalid UTF-8 is replaced. The flag reports whether anything was cut.
pub fn lossy_text_capped(bytes: &[u8], max_bytes: usize) -> (String, bool) {
    let text = String::from_utf8_lossy(bytes);
    let kept = truncate_str(&text, max_bytes);
    let truncated = kept.len() < text.len();
    (kept.to_string(), truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'é' is 2 bytes
        let s = "café au lait";
        assert_eq!(truncate_str(s, 4), "caf");
        assert_eq!(truncate_str(s, 5), "café");
    }

    #[test]
    fn capped_reports_truncation() {
        let (text, truncated) = lossy_text_capped(b"diff --git a/x b/x\n", 4);
        assert_eq!(text, "diff");
        assert!(truncated);

        let (text, truncated) = lossy_text_capped(b"short", 100);
        assert_eq!(text, "short");
        assert!(!truncated);
    }

    #[test]
    fn capped_replaces_invalid_utf8() {
        let (text, truncated) = lossy_text_capped(&[b'a', 0xff, b'b'], 100);
        assert_eq!(text, "a\u{fffd}b");
        assert!(!truncated);
    }
}
