//! Format rules for registration fields and composed messages.
//!
//! Every check here is a pure function of its input. Uniqueness of a
//! username is not a format concern and is enforced by the account store.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::constants::{
    MESSAGE_ID_LEN, PASSWORD_MIN_LEN, PASSWORD_SPECIAL_CHARS, PHONE_PREFIX,
    PHONE_SUBSCRIBER_DIGITS, USERNAME_MAX_LEN,
};
use crate::error::ComposeError;

const USERNAME_OK: &str = "Username is correctly formatted.";
const USERNAME_BAD: &str = "Username is not correctly formatted, please ensure that your username contains an underscore and is no more than five characters in length.";
const PASSWORD_OK: &str = "Password is correctly formatted.";
const PASSWORD_BAD: &str = "Password is not correctly formatted, please ensure that the password contains at least eight characters, a capital letter, a number, and a special character.";
const PHONE_OK: &str = "Cell number successfully captured.";
const PHONE_BAD: &str = "Cell number is incorrectly formatted or does not contain an international code, please correct the number and try again";
const SUMMARY_OK: &str = "User registered successfully.";
const SUMMARY_BAD: &str = "Fix the errors above and try again.";

static USERNAME_CHARS: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
static UPPERCASE: OnceLock<Option<Regex>> = OnceLock::new();
static DIGIT: OnceLock<Option<Regex>> = OnceLock::new();
static SPECIAL: OnceLock<Option<Regex>> = OnceLock::new();

/// Compile `pattern` on first use and test `text` against it.
fn matches_pattern(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: impl FnOnce() -> String,
    text: &str,
) -> bool {
    cell.get_or_init(|| match Regex::new(&pattern()) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(error = %e, "failed to compile validation pattern");
            None
        }
    })
    .as_ref()
    .is_some_and(|re| re.is_match(text))
}

/// Non-empty, at most five characters, contains `_`, and only ASCII
/// letters, digits or `_`.
pub fn is_valid_username(username: &str) -> bool {
    username.chars().count() <= USERNAME_MAX_LEN
        && username.contains('_')
        && matches_pattern(&USERNAME_CHARS, || r"^[A-Za-z0-9_]+$".to_owned(), username)
}

/// At least eight characters with an uppercase letter, a digit and one of
/// `!@#_$%^&*()`. Length is counted in `char`s.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && matches_pattern(&UPPERCASE, || "[A-Z]".to_owned(), password)
        && matches_pattern(&DIGIT, || "[0-9]".to_owned(), password)
        && matches_pattern(
            &SPECIAL,
            || format!("[{}]", regex::escape(PASSWORD_SPECIAL_CHARS)),
            password,
        )
}

/// `+27` followed by exactly nine digits, nothing before or after.
pub fn is_valid_phone_number(number: &str) -> bool {
    matches_pattern(
        &PHONE_NUMBER,
        || {
            format!(
                "^{}[0-9]{{{}}}$",
                regex::escape(PHONE_PREFIX),
                PHONE_SUBSCRIBER_DIGITS
            )
        },
        number,
    )
}

/// Recipients follow the same format as account cellphone numbers.
pub fn is_valid_recipient(recipient: &str) -> bool {
    is_valid_phone_number(recipient)
}

/// A well-formed message identifier is exactly ten decimal digits.
pub fn is_valid_message_id(id: &str) -> bool {
    id.len() == MESSAGE_ID_LEN && id.bytes().all(|b| b.is_ascii_digit())
}

/// Reject message text longer than `max` characters.
pub fn check_message_length(text: &str, max: usize) -> Result<(), ComposeError> {
    let len = text.chars().count();
    if len > max {
        return Err(ComposeError::MessageTooLong { len, max });
    }
    Ok(())
}

/// Outcome of checking the three registration fields.
///
/// The [`Display`](fmt::Display) impl renders the per-field diagnostics one
/// per line followed by the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationReport {
    pub username_valid: bool,
    pub password_valid: bool,
    pub phone_valid: bool,
}

impl RegistrationReport {
    pub fn evaluate(username: &str, password: &str, cellphone_number: &str) -> Self {
        Self {
            username_valid: is_valid_username(username),
            password_valid: is_valid_password(password),
            phone_valid: is_valid_phone_number(cellphone_number),
        }
    }

    /// True only when every field passed.
    pub fn accepted(&self) -> bool {
        self.username_valid && self.password_valid && self.phone_valid
    }

    pub fn username_message(&self) -> &'static str {
        if self.username_valid {
            USERNAME_OK
        } else {
            USERNAME_BAD
        }
    }

    pub fn password_message(&self) -> &'static str {
        if self.password_valid {
            PASSWORD_OK
        } else {
            PASSWORD_BAD
        }
    }

    pub fn phone_message(&self) -> &'static str {
        if self.phone_valid {
            PHONE_OK
        } else {
            PHONE_BAD
        }
    }
}

impl fmt::Display for RegistrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.username_message())?;
        writeln!(f, "{}", self.password_message())?;
        writeln!(f, "{}", self.phone_message())?;
        if self.accepted() {
            write!(f, "{SUMMARY_OK}")
        } else {
            // blank line separates the failures from the summary
            write!(f, "\n{SUMMARY_BAD}")
        }
    }
}
