//! String normalization and per-field similarity.

use rapidfuzz::distance::levenshtein;

/// Normalize a string for comparison.
///
/// - Trims whitespace
/// - Converts to lowercase
/// - Collapses internal whitespace runs to a single space
pub fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized edit-distance similarity in `[0, 1]`.
///
/// Two empty strings are identical (1.0); one empty string against a
/// non-empty one never matches (0.0). Otherwise the Levenshtein distance
/// with unit costs is scaled by the longer string's length in characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let distance = levenshtein::distance(a.chars(), b.chars());
    let longest = a.chars().count().max(b.chars().count());

    (1.0 - distance as f64 / longest as f64).clamp(0.0, 1.0)
}

/// Sex codes compare equal after normalization.
pub fn sex_matches(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Birth dates compare as raw strings, exactly as each source supplied them.
pub fn birth_date_matches(a: &str, b: &str) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_case_and_whitespace() {
        assert_eq!(normalize("  JUAN  "), "juan");
        assert_eq!(normalize("Dela \t  Cruz"), "dela cruz");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn empty_strings() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", "  "), 0.0);
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(similarity("  JUAN  ", "juan"), 1.0);
    }

    #[test]
    fn single_edit_over_nine_characters() {
        let sim = similarity("Delacruz", "Dela Cruz");
        assert!((sim - 8.0 / 9.0).abs() < 1e-9, "got {sim}");
        assert!(sim < 0.9);
    }

    #[test]
    fn completely_different_strings() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // One substitution over four characters, despite the multi-byte 'ñ'.
        assert!((similarity("pena", "peña") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn sex_codes_normalize() {
        assert!(sex_matches(" m", "M"));
        assert!(!sex_matches("M", "Male"));
    }

    #[test]
    fn birth_dates_compare_raw() {
        assert!(birth_date_matches("1990-01-01", "1990-01-01"));
        assert!(!birth_date_matches("1990-01-01", "1990-1-1"));
        assert!(!birth_date_matches("1990-01-01 ", "1990-01-01"));
    }
}
