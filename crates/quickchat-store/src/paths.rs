//! Location of the store files.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{Result, StoreError};

/// Platform data directory for Quick Chat, created if missing.
///
/// - Linux:   `~/.local/share/quickchat`
/// - macOS:   `~/Library/Application Support/com.quickchat.quickchat`
/// - Windows: `{FOLDERID_RoamingAppData}\quickchat\quickchat\data`
pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("com", "quickchat", "quickchat").ok_or(StoreError::NoDataDir)?;

    let data_dir = project_dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    tracing::debug!(path = %data_dir.display(), "resolved data directory");
    Ok(data_dir)
}
