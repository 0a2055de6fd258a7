use serde::{Deserialize, Serialize};

/// A registered user. The username is the primary key of the accounts file.
///
/// Field names are serialized in camelCase so the accounts file reads
/// `{"name", "surname", "username", "password", "cellphoneNumber"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: String,
    pub surname: String,
    pub username: String,
    // Plain text; no hashing is applied anywhere.
    pub password: String,
    pub cellphone_number: String,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        cellphone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            username: username.into(),
            password: password.into(),
            cellphone_number: cellphone_number.into(),
        }
    }
}

/// What the user decided to do with a composed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    Send,
    Store,
    Disregard,
}

impl MessageAction {
    /// Parse a menu answer. Anything unrecognised disregards the message.
    pub fn from_choice(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "send" => Self::Send,
            "2" | "store" => Self::Store,
            _ => Self::Disregard,
        }
    }

    /// Whether this action appends the message to the record store.
    pub fn keeps_message(self) -> bool {
        matches!(self, Self::Send | Self::Store)
    }

    /// Past-tense label shown in the status line.
    pub fn status_label(self) -> &'static str {
        match self {
            Self::Send => "Sent",
            Self::Store => "Stored",
            Self::Disregard => "Disregarded",
        }
    }
}
