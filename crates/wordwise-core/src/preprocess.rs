use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;

pub const MAX_WORD_CHARS: usize = 50;

/// Canonical lookup key: NFKC, trimmed, lowercase, 1..=50 chars
pub fn normalize_word(raw: &str) -> Result<String, CoreError> {
    let word: String = raw.nfkc().collect::<String>().trim().to_lowercase();

    let len = word.chars().count();
    if len == 0 || len > MAX_WORD_CHARS {
        return Err(CoreError::InvalidWord(raw.to_string()));
    }

    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(normalize_word("  Ephemeral\n").unwrap(), "ephemeral");
    }

    #[test]
    fn test_folds_compatibility_forms() {
        // fullwidth latin letters
        assert_eq!(normalize_word("ＷＯＲＤ").unwrap(), "word");
    }

    #[test]
    fn test_rejects_empty_and_overlong() {
        assert!(matches!(normalize_word("   "), Err(CoreError::InvalidWord(_))));
        let long = "a".repeat(MAX_WORD_CHARS + 1);
        assert!(matches!(normalize_word(&long), Err(CoreError::InvalidWord(_))));
        assert!(normalize_word(&"a".repeat(MAX_WORD_CHARS)).is_ok());
    }
}
