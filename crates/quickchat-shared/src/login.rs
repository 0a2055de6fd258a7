use std::collections::HashMap;

use tracing::debug;

use crate::types::Account;

const STATUS_UNKNOWN_USERNAME: &str = "Username does not exist.";
const STATUS_INCORRECT_PASSWORD: &str = "Incorrect password.";

/// Result of a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome<'a> {
    Success(&'a Account),
    UnknownUsername,
    IncorrectPassword,
}

impl<'a> LoginOutcome<'a> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn account(&self) -> Option<&'a Account> {
        match self {
            Self::Success(account) => Some(account),
            _ => None,
        }
    }
}

/// Checks credentials against a set of accounts and remembers the status
/// line of the most recent attempt.
#[derive(Debug, Default, Clone)]
pub struct Validator {
    last_status: String,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look `username` up exactly and compare `password` byte for byte.
    ///
    /// An absent username is treated like one that is not registered.
    pub fn attempt_login<'a>(
        &mut self,
        username: Option<&str>,
        password: &str,
        accounts: &'a HashMap<String, Account>,
    ) -> LoginOutcome<'a> {
        let Some(account) = username.and_then(|name| accounts.get(name)) else {
            debug!(username = ?username, "login rejected: unknown username");
            self.last_status = STATUS_UNKNOWN_USERNAME.to_string();
            return LoginOutcome::UnknownUsername;
        };

        if account.password != password {
            debug!(username = %account.username, "login rejected: wrong password");
            self.last_status = STATUS_INCORRECT_PASSWORD.to_string();
            return LoginOutcome::IncorrectPassword;
        }

        self.last_status = format!("Login successful. Welcome, {}!", account.name);
        LoginOutcome::Success(account)
    }

    /// Status line of the last attempt; empty before the first one.
    pub fn login_status(&self) -> &str {
        &self.last_status
    }
}
