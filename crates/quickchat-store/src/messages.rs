//! The record store for sent messages.
//!
//! Records are kept in insertion order alongside a running total. The total
//! always equals the number of records: it is reset to the loaded length on
//! [`MessageStore::load`] and bumped by exactly one per append.

use rand::Rng;
use tracing::{debug, info, warn};

use quickchat_shared::constants::MESSAGE_ID_LEN;

use crate::error::Result;
use crate::models::MessageRecord;
use crate::storage::Storage;

/// Ten random decimal digits. Leading zeros are allowed and nothing checks
/// the result against identifiers already in the store.
pub fn next_message_id() -> String {
    next_message_id_with(&mut rand::thread_rng())
}

pub fn next_message_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..MESSAGE_ID_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// `XX:N:FIRSTLAST`, upper-cased.
///
/// `XX` is the first two characters of `id`, `N` the sequence number, and
/// `FIRSTLAST` the first and last words of `text`. A single word is used
/// twice; blank text leaves the last segment empty.
///
/// Hashes already on disk depend on the word rules: every character up to
/// U+0020 is trimmed from both ends, and words are split on runs of ASCII
/// whitespace only.
pub fn compute_hash(id: &str, sequence_number: usize, text: &str) -> String {
    let prefix: String = id.chars().take(2).collect();

    let mut words = text
        .trim_matches(|c: char| c <= ' ')
        .split(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r'))
        .filter(|word| !word.is_empty());
    let first = words.next().unwrap_or("");
    let last = words.last().unwrap_or(first);

    format!("{prefix}:{sequence_number}:{first}{last}").to_uppercase()
}

/// A composed message with its derived identifier and hash, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub id: String,
    pub hash: String,
    pub recipient: String,
    pub text: String,
}

impl MessageDraft {
    pub fn into_record(self) -> MessageRecord {
        MessageRecord::new(self.id, self.hash, self.recipient, self.text)
    }
}

/// Ordered message records persisted as a JSON array.
pub struct MessageStore<S> {
    storage: S,
    records: Vec<MessageRecord>,
    total: usize,
}

impl<S: Storage> MessageStore<S> {
    /// Open the store and load whatever `storage` already holds.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            records: Vec::new(),
            total: 0,
        };
        store.load();
        store
    }

    /// Replace the in-memory records with the persisted ones.
    ///
    /// A missing, unreadable or malformed document leaves the store empty;
    /// that is the normal first-run state, not an error.
    pub fn load(&mut self) {
        self.records = match self.read_records() {
            Ok(Some(records)) => {
                debug!(count = records.len(), "loaded messages");
                records
            }
            Ok(None) => {
                debug!("no saved messages, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not load messages, starting empty");
                Vec::new()
            }
        };
        self.total = self.records.len();
    }

    fn read_records(&self) -> Result<Option<Vec<MessageRecord>>> {
        let Some(contents) = self.storage.read()? else {
            return Ok(None);
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        // a literal `null` document counts as empty
        Ok(serde_json::from_str::<Option<Vec<MessageRecord>>>(&contents)?)
    }

    /// Append a record and rewrite the whole document.
    ///
    /// If the write fails the record stays in memory and the error is
    /// returned; [`save`](Self::save) can be retried later.
    pub fn append(
        &mut self,
        id: impl Into<String>,
        hash: impl Into<String>,
        recipient: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<()> {
        let record = MessageRecord::new(id, hash, recipient, text);
        info!(id = %record.id, recipient = %record.recipient, "message recorded");

        self.records.push(record);
        self.total += 1;
        self.save()
    }

    /// Rewrite the persisted array from memory.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        self.storage.write(&json)
    }

    /// Derive a fresh identifier and hash for `text` addressed to `recipient`.
    pub fn compose(&self, recipient: impl Into<String>, text: impl Into<String>) -> MessageDraft {
        self.compose_with(&mut rand::thread_rng(), recipient, text)
    }

    pub fn compose_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        recipient: impl Into<String>,
        text: impl Into<String>,
    ) -> MessageDraft {
        let id = next_message_id_with(rng);
        let text = text.into();
        let hash = compute_hash(&id, self.next_sequence_number(), &text);
        MessageDraft {
            id,
            hash,
            recipient: recipient.into(),
            text,
        }
    }

    /// Store a composed draft.
    pub fn commit(&mut self, draft: MessageDraft) -> Result<()> {
        let MessageDraft {
            id,
            hash,
            recipient,
            text,
        } = draft;
        self.append(id, hash, recipient, text)
    }

    /// Sequence number the next message's hash is built with.
    pub fn next_sequence_number(&self) -> usize {
        self.total + 1
    }

    pub fn total_count(&self) -> usize {
        self.total
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
