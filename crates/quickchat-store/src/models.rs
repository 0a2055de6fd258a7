//! Records persisted in the messages file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One accepted message, as written to the messages file.
///
/// The JSON keys are PascalCase (`MessageID`, `MessageHash`, `Recipient`,
/// `Message`) to stay readable by files produced by earlier releases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRecord {
    #[serde(rename = "MessageID")]
    pub id: String,
    #[serde(rename = "MessageHash")]
    pub hash: String,
    #[serde(rename = "Recipient")]
    pub recipient: String,
    #[serde(rename = "Message")]
    pub text: String,
}

impl MessageRecord {
    pub fn new(
        id: impl Into<String>,
        hash: impl Into<String>,
        recipient: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            hash: hash.into(),
            recipient: recipient.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Hash: {}", self.hash)?;
        writeln!(f, "Recipient: {}", self.recipient)?;
        write!(f, "Message: {}", self.text)
    }
}
