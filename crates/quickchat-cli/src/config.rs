//! Configuration loaded from environment variables.
//!
//! Every setting has a default, so the app starts with zero configuration.

use std::path::{Path, PathBuf};

use quickchat_shared::constants::{
    ACCOUNTS_FILE_NAME, DEFAULT_LOGIN_ATTEMPTS, DEFAULT_MAX_MESSAGE_LEN, MESSAGES_FILE_NAME,
};

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding both store files.
    /// Env: `QUICKCHAT_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Accounts file, relative to `data_dir` unless absolute.
    /// Env: `QUICKCHAT_ACCOUNTS_FILE`
    /// Default: `users.json`
    pub accounts_file: PathBuf,

    /// Messages file, relative to `data_dir` unless absolute.
    /// Env: `QUICKCHAT_MESSAGES_FILE`
    /// Default: `messages.json`
    pub messages_file: PathBuf,

    /// Longest message text accepted when composing, in characters.
    /// Env: `QUICKCHAT_MAX_MESSAGE_LEN`
    /// Default: `50`
    pub max_message_len: usize,

    /// Login attempts allowed before returning to the main menu.
    /// Env: `QUICKCHAT_LOGIN_ATTEMPTS`
    /// Default: `3`
    pub login_attempts: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            accounts_file: PathBuf::from(ACCOUNTS_FILE_NAME),
            messages_file: PathBuf::from(MESSAGES_FILE_NAME),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            login_attempts: DEFAULT_LOGIN_ATTEMPTS,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("QUICKCHAT_DATA_DIR").filter(|d| !d.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(file) = lookup("QUICKCHAT_ACCOUNTS_FILE").filter(|f| !f.is_empty()) {
            config.accounts_file = PathBuf::from(file);
        }

        if let Some(file) = lookup("QUICKCHAT_MESSAGES_FILE").filter(|f| !f.is_empty()) {
            config.messages_file = PathBuf::from(file);
        }

        if let Some(val) = lookup("QUICKCHAT_MAX_MESSAGE_LEN") {
            match val.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_message_len = n,
                _ => {
                    tracing::warn!(value = %val, "Invalid QUICKCHAT_MAX_MESSAGE_LEN, using default");
                }
            }
        }

        if let Some(val) = lookup("QUICKCHAT_LOGIN_ATTEMPTS") {
            match val.trim().parse::<u32>() {
                Ok(n) if n > 0 => config.login_attempts = n,
                _ => {
                    tracing::warn!(value = %val, "Invalid QUICKCHAT_LOGIN_ATTEMPTS, using default");
                }
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }

    pub fn accounts_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.accounts_file)
    }

    pub fn messages_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.messages_file)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> CliConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.data_dir, None);
        assert_eq!(config.accounts_file, PathBuf::from("users.json"));
        assert_eq!(config.messages_file, PathBuf::from("messages.json"));
        assert_eq!(config.max_message_len, 50);
        assert_eq!(config.login_attempts, 3);
    }

    #[test]
    fn test_no_vars_is_default() {
        assert_eq!(from_map(&[]), CliConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("QUICKCHAT_DATA_DIR", "/tmp/qc"),
            ("QUICKCHAT_ACCOUNTS_FILE", "accounts.json"),
            ("QUICKCHAT_MAX_MESSAGE_LEN", "250"),
            ("QUICKCHAT_LOGIN_ATTEMPTS", "5"),
        ]);

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/qc")));
        assert_eq!(config.max_message_len, 250);
        assert_eq!(config.login_attempts, 5);
        assert_eq!(
            config.accounts_path(Path::new("/tmp/qc")),
            PathBuf::from("/tmp/qc/accounts.json")
        );
        assert_eq!(
            config.messages_path(Path::new("/tmp/qc")),
            PathBuf::from("/tmp/qc/messages.json")
        );
    }

    #[test]
    fn test_invalid_numbers_keep_defaults() {
        let config = from_map(&[
            ("QUICKCHAT_MAX_MESSAGE_LEN", "lots"),
            ("QUICKCHAT_LOGIN_ATTEMPTS", "0"),
        ]);

        assert_eq!(config.max_message_len, 50);
        assert_eq!(config.login_attempts, 3);
    }

    #[test]
    fn test_absolute_file_ignores_data_dir() {
        let config = from_map(&[("QUICKCHAT_MESSAGES_FILE", "/var/lib/qc/msgs.json")]);
        assert_eq!(
            config.messages_path(Path::new("/home/user/.local/share/quickchat")),
            PathBuf::from("/var/lib/qc/msgs.json")
        );
    }
}
