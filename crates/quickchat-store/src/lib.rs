//! # quickchat-store
//!
//! JSON-backed local storage for Quick Chat.
//!
//! Two independent stores each own one document: [`AccountStore`] keeps the
//! username → [`Account`](quickchat_shared::Account) map and the current
//! session, [`MessageStore`] keeps the ordered list of sent messages. Both
//! load their document once when opened and rewrite it in full after every
//! mutation, through the [`Storage`] port.

pub mod accounts;
pub mod messages;
pub mod models;
pub mod paths;
pub mod storage;

mod error;

pub use accounts::AccountStore;
pub use error::{Result, StoreError};
pub use messages::{compute_hash, next_message_id, MessageDraft, MessageStore};
pub use models::MessageRecord;
pub use storage::{FileStorage, MemoryStorage, Storage};
