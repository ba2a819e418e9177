/*!
 * Tests for language utility functions
 */

use subflash::language_utils::{get_language_name, language_codes_match, normalize_to_part2t};

/// Test normalization of language codes to ISO 639-2/T format
#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("eng").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");

    // Case insensitivity
    assert_eq!(normalize_to_part2t("EN").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("FRE").unwrap(), "fra");

    // Whitespace
    assert_eq!(normalize_to_part2t(" en ").unwrap(), "eng");
}

/// Test that malformed codes are rejected
#[test]
fn test_normalize_to_part2t_withInvalidCodes_shouldFail() {
    assert!(normalize_to_part2t("").is_err());
    assert!(normalize_to_part2t("e").is_err());
    assert!(normalize_to_part2t("123").is_err());
    assert!(normalize_to_part2t("english").is_err());
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withMatchingCodes_shouldReturnTrue() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("eng", "en"));
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("de", "ger"));
}

/// Test that different or invalid codes never match
#[test]
fn test_language_codes_match_withDifferentCodes_shouldReturnFalse() {
    assert!(!language_codes_match("en", "ru"));
    assert!(!language_codes_match("", ""));
    assert!(!language_codes_match("en", "e"));
}

/// Test language names come back in English
#[test]
fn test_get_language_name_withValidCodes_shouldReturnName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("rus").unwrap(), "Russian");
    assert!(get_language_name("").is_err());
}
