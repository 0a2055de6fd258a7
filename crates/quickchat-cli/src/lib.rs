pub mod config;
pub mod controller;

use std::io;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use quickchat_store::paths::default_data_dir;
use quickchat_store::{AccountStore, FileStorage, MessageStore};

use crate::config::CliConfig;
use crate::controller::Controller;

/// Entry point of the `quickchat` binary.
pub fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quickchat_cli=info,quickchat_store=info,warn"));

    // Logs go to stderr so they never interleave with the prompts on stdout.
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting Quick Chat v{}", env!("CARGO_PKG_VERSION"));

    let config = CliConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let data_dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir().context("could not resolve a data directory")?,
    };

    let accounts_path = config.accounts_path(&data_dir);
    let messages_path = config.messages_path(&data_dir);
    tracing::info!(
        accounts = %accounts_path.display(),
        messages = %messages_path.display(),
        "Opening stores"
    );

    let accounts = AccountStore::open(FileStorage::new(accounts_path));
    let messages = MessageStore::open(FileStorage::new(messages_path));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = Controller::new(stdin.lock(), stdout.lock(), accounts, messages, &config);
    controller.run().context("terminal I/O failed")?;

    tracing::info!(
        total_messages = controller.messages().total_count(),
        "Quick Chat exiting"
    );
    Ok(())
}
