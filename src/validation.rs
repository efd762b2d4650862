// Lockbox — Input validation
//
// Bounds for caller-supplied credential fields, enforced at the CLI
// boundary before any key material is touched.

/// Max allowed length for the tail of a credential.
pub const TAIL_MAX_LENGTH: usize = 30;

/// Max allowed length for the scopes of a credential.
pub const SCOPES_MAX_LENGTH: usize = 50;

/// Minimum allowed password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum allowed password length.
pub const PASSWORD_MAX_LENGTH: usize = 32;

/// A tail must be non-blank and within its length bound.
pub fn tail_is_valid(tail: &str) -> bool {
    !tail.trim().is_empty() && tail.chars().count() <= TAIL_MAX_LENGTH
}

/// Scopes are optional; when present they must be within their bound.
pub fn scopes_are_valid(scopes: Option<&str>) -> bool {
    match scopes {
        None => true,
        Some(scopes) => scopes.chars().count() <= SCOPES_MAX_LENGTH,
    }
}

/// Whether a requested password length is within the allowed range.
pub fn password_length_valid(length: usize) -> bool {
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length)
}

/// An externally supplied password must be non-blank and within the
/// same bounds as a generated one.
pub fn password_is_valid(password: &str) -> bool {
    !password.trim().is_empty() && password_length_valid(password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_bounds() {
        assert!(tail_is_valid("mail-account"));
        assert!(tail_is_valid(&"t".repeat(TAIL_MAX_LENGTH)));
        assert!(!tail_is_valid(&"t".repeat(TAIL_MAX_LENGTH + 1)));
        assert!(!tail_is_valid(""));
        assert!(!tail_is_valid("   "));
    }

    #[test]
    fn test_scopes_bounds() {
        assert!(scopes_are_valid(None));
        assert!(scopes_are_valid(Some("mail.com")));
        assert!(scopes_are_valid(Some(&"s".repeat(SCOPES_MAX_LENGTH))));
        assert!(!scopes_are_valid(Some(&"s".repeat(SCOPES_MAX_LENGTH + 1))));
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(!password_length_valid(PASSWORD_MIN_LENGTH - 1));
        assert!(password_length_valid(PASSWORD_MIN_LENGTH));
        assert!(password_length_valid(PASSWORD_MAX_LENGTH));
        assert!(!password_length_valid(PASSWORD_MAX_LENGTH + 1));
    }

    #[test]
    fn test_password_value_bounds() {
        assert!(password_is_valid("Gk9!xQ2Lmz"));
        assert!(!password_is_valid("short"));
        assert!(!password_is_valid(&" ".repeat(PASSWORD_MIN_LENGTH)));
    }
}
