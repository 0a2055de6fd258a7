//! # quickchat-shared
//!
//! Types and rules shared by every Quick Chat crate: the [`Account`] model,
//! the format checks applied to usernames, passwords and cellphone numbers,
//! and the login [`Validator`] that remembers the outcome of the last attempt.

pub mod constants;
pub mod error;
pub mod login;
pub mod types;
pub mod validation;

pub use error::ComposeError;
pub use login::{LoginOutcome, Validator};
pub use types::{Account, MessageAction};
pub use validation::RegistrationReport;
