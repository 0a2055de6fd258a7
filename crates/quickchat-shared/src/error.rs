use thiserror::Error;

/// Rejections raised while composing a message, before anything is stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Invalid Recipient Number. Must start with +27 and be followed by 9 digits.")]
    InvalidRecipient,

    #[error("Please enter a message of no more than {max} characters.")]
    MessageTooLong { len: usize, max: usize },
}
