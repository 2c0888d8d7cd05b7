// Helper functions for safe logging

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// use peakperform::common::safe_email_log;
/// assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        match (parts.len(), parts[0].chars().next()) {
            (2, Some(first)) => format!("{}***@{}", first, parts[1]),
            _ => "***@***.***".to_string(),
        }
    } else {
        "***@***.***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log() {
        assert_eq!(safe_email_log("a@x.com"), "a***@x.com");
        assert_eq!(safe_email_log("runner@peak.io"), "r***@peak.io");
        assert_eq!(safe_email_log("abc"), "***@***.***");
        assert_eq!(safe_email_log("@nouser.com"), "***@***.***");
        assert_eq!(safe_email_log("not-an-email"), "***@***.***");
    }
}
