/// Pull a number out of free text such as `"389 kcal"` or `"12.5g protein"`
///
/// Every ASCII digit and `.` is kept in order and everything else is dropped.
/// Returns `None` when nothing numeric is left or the leftovers do not form a
/// valid float (e.g. `"1.2.3"`).
pub fn extract_number(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_with_units() {
        assert_eq!(extract_number("389 kcal"), Some(389.0));
        assert_eq!(extract_number("12.5g protein"), Some(12.5));
        assert_eq!(extract_number("  7 g"), Some(7.0));
    }

    #[test]
    fn test_extract_without_digits() {
        assert_eq!(extract_number(""), None);
        assert_eq!(extract_number("abc"), None);
        assert_eq!(extract_number("kcal"), None);
    }

    #[test]
    fn test_extract_malformed_number() {
        assert_eq!(extract_number("1.2.3 g"), None);
        assert_eq!(extract_number("."), None);
    }

    #[test]
    fn test_extract_concatenates_scattered_digits() {
        // Lossy by nature: separated digit groups are joined
        assert_eq!(extract_number("1 to 2 cups"), Some(12.0));
        assert_eq!(extract_number("1,200 kcal"), Some(1200.0));
    }

    #[test]
    fn test_extract_ignores_non_ascii_digits() {
        assert_eq!(extract_number("٣٨٩ kcal"), None);
    }
}
