const MAX_ERROR_LENGTH: usize = 500;

/// Cut `value` to at most `max_chars` characters.
pub fn truncate_preview(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Shorten an error message for status lines and reports.
pub fn truncate_error(error: &str) -> String {
    let cut = truncate_preview(error, MAX_ERROR_LENGTH);
    if cut.len() == error.len() {
        error.to_string()
    } else {
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_value_unchanged() {
        assert_eq!(truncate_preview("MetaMask/11.0", 50), "MetaMask/11.0");
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(truncate_preview("钱包钱包钱包", 2), "钱包");
        assert_eq!(truncate_preview("abcdef", 3), "abc");
        assert_eq!(truncate_preview("abc", 3), "abc");
    }

    #[test]
    fn test_truncate_error_marks_cut() {
        let long = "x".repeat(MAX_ERROR_LENGTH + 10);
        let cut = truncate_error(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.len(), MAX_ERROR_LENGTH + 3);
        assert_eq!(truncate_error("timeout"), "timeout");
    }
}
