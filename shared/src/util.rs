//! Shared utility functions

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Exactly ten ASCII digits. Used for store contact and payment phone numbers.
pub fn is_ten_digits(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly fifteen characters from [0-9A-Z]. Used for GST registration numbers.
pub fn is_gst_number(s: &str) -> bool {
    s.len() == 15
        && s.bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}

/// `YYYY-MM-DD` with a real calendar date behind it.
pub fn is_ymd_date(s: &str) -> bool {
    s.len() == 10 && chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ten_digits() {
        assert!(is_ten_digits("9876543210"));
        assert!(!is_ten_digits("12345"));
        assert!(!is_ten_digits("98765432101"));
        assert!(!is_ten_digits("987654321a"));
        assert!(!is_ten_digits("98765 4321"));
        assert!(!is_ten_digits(""));
    }

    #[test]
    fn test_is_gst_number() {
        assert!(is_gst_number("12ABCDE1234ABCZ"));
        assert!(is_gst_number("000000000000000"));
        assert!(!is_gst_number("abc"));
        assert!(!is_gst_number("12abcde1234abcz")); // lowercase rejected
        assert!(!is_gst_number("12ABCDE1234ABC")); // 14 chars
        assert!(!is_gst_number("12ABCDE1234ABCZZ")); // 16 chars
    }

    #[test]
    fn test_is_ymd_date() {
        assert!(is_ymd_date("2025-01-31"));
        assert!(is_ymd_date("2024-02-29")); // leap year
        assert!(!is_ymd_date("2025-02-29"));
        assert!(!is_ymd_date("2025-13-01"));
        assert!(!is_ymd_date("2025-1-31"));
        assert!(!is_ymd_date("31-01-2025"));
        assert!(!is_ymd_date(""));
    }
}
