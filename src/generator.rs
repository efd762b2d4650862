// Lockbox — Password Generator
//
// Produces a password of the requested length from a fixed 94-character
// universe, honoring three inclusion flags. Each enabled class is
// guaranteed at least one character; the remaining positions are filled
// by rejection sampling and the result is shuffled so the guaranteed
// characters are not pinned to the front.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;

// ─── Character universe ──────────────────────────────────────────────────────

/// The candidate characters, ordered as four contiguous classes:
/// lowercase letters, digits, uppercase letters, special characters.
const CHARACTERS: [char; 94] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '-', '_', '=', '+', '[', ']', '{', '}',
    '|', ';', ':', '\'', '"', ',', '.', '<', '>', '?', '/', '\\', '`', '~',
];

const LOWERCASE_COUNT: usize = 26;
const DIGIT_COUNT: usize = 10;
const UPPERCASE_COUNT: usize = 26;
const SPECIAL_COUNT: usize = 32;

const DIGITS_OFFSET: usize = LOWERCASE_COUNT;
const UPPERCASE_OFFSET: usize = DIGITS_OFFSET + DIGIT_COUNT;
const SPECIAL_OFFSET: usize = UPPERCASE_OFFSET + UPPERCASE_COUNT;

/// Whether a character belongs to the special class of the universe.
pub fn is_special(c: char) -> bool {
    CHARACTERS[SPECIAL_OFFSET..].contains(&c)
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Generate a password of `length` characters from a secure random
/// source, containing at least one character of every enabled class and
/// none of any disabled class.
///
/// Each enabled class contributes its guaranteed character even when
/// `length` is smaller than the number of enabled flags; in that case
/// the guarantees win and the result is longer than requested. Outputs
/// are never reproducible and never logged.
pub fn generate_password(
    length: usize,
    include_digits: bool,
    include_uppercase: bool,
    include_special: bool,
) -> String {
    let mut rng = OsRng;
    let mut password: Vec<char> = Vec::with_capacity(length.max(3));

    // One guaranteed character per enabled class, drawn from that class
    // alone, independent of the fill pass below.
    if include_digits {
        password.push(CHARACTERS[DIGITS_OFFSET + rng.gen_range(0..DIGIT_COUNT)]);
    }
    if include_uppercase {
        password.push(CHARACTERS[UPPERCASE_OFFSET + rng.gen_range(0..UPPERCASE_COUNT)]);
    }
    if include_special {
        password.push(CHARACTERS[SPECIAL_OFFSET + rng.gen_range(0..SPECIAL_COUNT)]);
    }

    // Rejection-sample the full universe for the remaining positions.
    // Lowercase letters are unconditionally eligible, so the eligible
    // union is never empty and this loop always terminates.
    while password.len() < length {
        let candidate = CHARACTERS[rng.gen_range(0..CHARACTERS.len())];
        if class_allowed(candidate, include_digits, include_uppercase, include_special) {
            password.push(candidate);
        }
    }

    password.shuffle(&mut rng);
    password.into_iter().collect()
}

/// Whether a sampled character belongs only to enabled classes.
/// Lowercase letters are never rejected.
fn class_allowed(
    c: char,
    include_digits: bool,
    include_uppercase: bool,
    include_special: bool,
) -> bool {
    if c.is_ascii_digit() && !include_digits {
        return false;
    }
    if c.is_ascii_uppercase() && !include_uppercase {
        return false;
    }
    !is_special(c) || include_special
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_partitions_into_four_classes() {
        assert_eq!(
            LOWERCASE_COUNT + DIGIT_COUNT + UPPERCASE_COUNT + SPECIAL_COUNT,
            CHARACTERS.len()
        );
        assert!(CHARACTERS[..DIGITS_OFFSET].iter().all(|c| c.is_ascii_lowercase()));
        assert!(CHARACTERS[DIGITS_OFFSET..UPPERCASE_OFFSET].iter().all(|c| c.is_ascii_digit()));
        assert!(CHARACTERS[UPPERCASE_OFFSET..SPECIAL_OFFSET].iter().all(|c| c.is_ascii_uppercase()));
        assert!(CHARACTERS[SPECIAL_OFFSET..].iter().all(|c| !c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_exact_length_when_length_covers_flags() {
        for length in [3, 8, 12, 32] {
            let password = generate_password(length, true, true, true);
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn test_zero_length_without_flags_is_empty() {
        assert!(generate_password(0, false, false, false).is_empty());
    }

    #[test]
    fn test_guarantees_win_over_short_length() {
        // One requested character but three guaranteed classes.
        let password = generate_password(1, true, true, true);
        assert_eq!(
            password.chars().count(),
            3,
            "Guaranteed class characters must be kept even past the requested length"
        );
    }

    #[test]
    fn test_enabled_classes_are_always_present() {
        for _ in 0..50 {
            let password = generate_password(12, true, true, true);
            assert!(password.chars().any(|c| c.is_ascii_digit()), "Missing digit: {}", password);
            assert!(
                password.chars().any(|c| c.is_ascii_uppercase()),
                "Missing uppercase: {}",
                password
            );
            assert!(password.chars().any(is_special), "Missing special: {}", password);
        }
    }

    #[test]
    fn test_disabled_classes_never_appear() {
        for _ in 0..50 {
            let password = generate_password(32, false, false, false);
            assert!(
                password.chars().all(|c| c.is_ascii_lowercase()),
                "Only lowercase characters allowed, got: {}",
                password
            );
        }
    }

    #[test]
    fn test_single_disabled_class_is_excluded() {
        for _ in 0..50 {
            let password = generate_password(32, true, true, false);
            assert!(
                !password.chars().any(is_special),
                "Special characters are disabled, got: {}",
                password
            );
        }
    }

    #[test]
    fn test_successive_calls_produce_different_passwords() {
        let first = generate_password(16, true, true, true);
        let second = generate_password(16, true, true, true);
        assert_ne!(first, second, "Outputs must not be reproducible");
    }

    #[test]
    fn test_generation_scenario() {
        let password = generate_password(12, true, true, true);
        assert_eq!(password.chars().count(), 12);
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(is_special));
        assert!(password.chars().all(|c| CHARACTERS.contains(&c)));
    }
}
