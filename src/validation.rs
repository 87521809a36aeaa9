//! Input validation for usernames and free-text fields.
//!
//! Usernames are validated at creation to keep the permanent username
//! index clean:
//! - Length: 3-32 characters
//! - First character: ASCII letter
//! - Remaining characters: ASCII letters, digits, underscores
//! - Case-sensitive; `Alice` and `alice` are distinct names
//! - Examples: alice, Bob_42, rust_smith

use soroban_sdk::{Bytes, String};

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: u32 = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: u32 = 32;

/// Maximum byte length for a primary skill.
pub const MAX_SKILL_LENGTH: u32 = 64;

/// Maximum byte length for achievement and goal titles.
pub const MAX_TITLE_LENGTH: u32 = 64;

/// Maximum byte length for descriptions.
pub const MAX_DESCRIPTION_LENGTH: u32 = 256;

/// Validate a username.
///
/// Returns true if the username is valid, false otherwise.
pub fn validate_username(username: &Bytes) -> bool {
    let len = username.len();

    if len < MIN_USERNAME_LENGTH || len > MAX_USERNAME_LENGTH {
        return false;
    }

    for i in 0..len {
        let b = match username.get(i) {
            Some(b) => b,
            None => return false,
        };
        let valid = if i == 0 {
            is_letter(b)
        } else {
            is_letter(b) || is_digit(b) || b == b'_'
        };
        if !valid {
            return false;
        }
    }

    true
}

/// Validate a required free-text field: non-empty and within `max` bytes.
pub fn validate_text(text: &String, max: u32) -> bool {
    let len = text.len();
    len > 0 && len <= max
}

/// Validate an optional free-text field: within `max` bytes, may be empty.
pub fn validate_optional_text(text: &String, max: u32) -> bool {
    text.len() <= max
}

/// Check if a byte is an ASCII letter (a-z, A-Z).
#[inline]
fn is_letter(b: u8) -> bool {
    (b >= b'a' && b <= b'z') || (b >= b'A' && b <= b'Z')
}

/// Check if a byte is an ASCII digit (0-9).
#[inline]
fn is_digit(b: u8) -> bool {
    b >= b'0' && b <= b'9'
}
