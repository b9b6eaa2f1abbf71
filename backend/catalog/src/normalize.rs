//! # Identifier Normalization
//!
//! Roll numbers arrive from spreadsheet exports in whatever shape the exporting
//! tool felt like: numbers stored as text, floats with a spurious `.0`, large
//! values in scientific notation, stray padding. Everything stored in the
//! catalog goes through [`normalize`] first.
//!
//! ## Steps
//! 1. Absent or blank input is not an identifier.
//! 2. A trailing `.0` is dropped.
//! 3. Scientific notation (`e+`, any case) is re-rendered as a plain integer.
//!    Values that fail to parse are passed through untouched.
//! 4. Surrounding whitespace is trimmed again.
//! 5. Only non-empty ASCII digit strings survive.

/// A non-empty string of ASCII digits.
pub type Identifier = String;

const FLOAT_SUFFIX: &str = ".0";
const EXPONENT_MARKER: &str = "e+";

/// Canonicalizes a raw cell into an [`Identifier`], or `None` if it is not one.
pub fn normalize(raw: Option<&str>) -> Option<Identifier> {
    let trimmed = raw?.trim();

    if trimmed.is_empty() {
        return None;
    }

    let value = trimmed.strip_suffix(FLOAT_SUFFIX).unwrap_or(trimmed);
    let value = expand_exponent(value);
    let value = value.trim();

    if is_identifier(value) {
        Some(value.to_string())
    } else {
        None
    }
}

/// True when `value` is non-empty and made of ASCII digits only.
pub fn is_identifier(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn expand_exponent(value: &str) -> String {
    if !value.to_ascii_lowercase().contains(EXPONENT_MARKER) {
        return value.to_string();
    }

    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => format!("{:.0}", parsed.trunc()),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{is_identifier, normalize};

    #[test]
    fn test_digits_unchanged() {
        for value in ["0", "7", "123", "2301104001", "000123"] {
            assert_eq!(normalize(Some(value)).as_deref(), Some(value));
        }
    }

    #[test]
    fn test_float_suffix() {
        assert_eq!(normalize(Some("123.0")).as_deref(), Some("123"));
        assert_eq!(normalize(Some("  123.0  ")).as_deref(), Some("123"));
    }

    #[test]
    fn test_only_trailing_suffix_removed() {
        assert_eq!(normalize(Some("10.05")), None);
        assert_eq!(normalize(Some("12.00")), None);
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(
            normalize(Some("1.23e+11")).as_deref(),
            Some("123000000000")
        );
        assert_eq!(
            normalize(Some("2.301104001E+09")).as_deref(),
            Some("2301104001")
        );
    }

    #[test]
    fn test_unparsable_exponent_passes_through() {
        assert_eq!(normalize(Some("12e+x")), None);
    }

    #[test]
    fn test_not_identifiers() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("    ")), None);
        assert_eq!(normalize(Some("abc")), None);
        assert_eq!(normalize(Some("12 34")), None);
        assert_eq!(normalize(Some("-12")), None);
        assert_eq!(normalize(Some("१२३")), None);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("0042"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("42a"));
    }
}
