//! Email address syntax check.

/// Check an address against the basic `local@domain.tld` shape.
///
/// The address must contain no whitespace, exactly one `@` with a non-empty
/// local part, and a domain holding a `.` with at least one character on
/// each side. No RFC 5322 parsing and no DNS lookup.
///
/// # Examples
///
/// ```
/// use mail_relay::mail::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email("a@b"));
/// ```
pub fn is_valid_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Some dot must have text on both sides.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
