//! # quickchat
//!
//! Terminal front end for Quick Chat: register, log in, and compose
//! messages that are recorded to local JSON files.

fn main() -> anyhow::Result<()> {
    quickchat_cli::run()
}
