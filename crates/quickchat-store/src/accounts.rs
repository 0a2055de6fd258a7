//! The account store: registered users keyed by username, plus the single
//! session pointer.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use quickchat_shared::{Account, LoginOutcome, Validator};

use crate::error::{Result, StoreError};
use crate::storage::Storage;

/// Registered accounts persisted as one JSON object keyed by username.
pub struct AccountStore<S> {
    storage: S,
    accounts: HashMap<String, Account>,
    validator: Validator,
    /// Username of the logged-in account, if any.
    session: Option<String>,
}

impl<S: Storage> AccountStore<S> {
    /// Open the store and load whatever `storage` already holds.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            accounts: HashMap::new(),
            validator: Validator::new(),
            session: None,
        };
        store.load();
        store
    }

    /// Replace the in-memory map with the persisted one.
    ///
    /// No document yet is the first-run state and is silent. Any other
    /// failure is logged and also leaves the map empty.
    pub fn load(&mut self) {
        self.accounts = match self.read_accounts() {
            Ok(Some(accounts)) => {
                debug!(count = accounts.len(), "loaded accounts");
                accounts
            }
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!(error = %e, "Error loading user data, starting with no accounts");
                HashMap::new()
            }
        };
    }

    fn read_accounts(&self) -> Result<Option<HashMap<String, Account>>> {
        let Some(contents) = self.storage.read()? else {
            return Ok(None);
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str::<Option<HashMap<String, Account>>>(&contents)?)
    }

    /// Add a new account and rewrite the accounts file.
    ///
    /// A taken username is rejected without touching anything. If only the
    /// write fails, the account stays registered in memory and the error is
    /// returned so the caller can report it and retry [`save`](Self::save).
    pub fn register(&mut self, account: Account) -> Result<()> {
        if self.accounts.contains_key(&account.username) {
            debug!(username = %account.username, "registration rejected: duplicate username");
            return Err(StoreError::DuplicateUsername(account.username));
        }

        info!(username = %account.username, "registering account");
        self.accounts.insert(account.username.clone(), account);
        self.save()
    }

    /// Rewrite the persisted object from memory.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.accounts)?;
        self.storage.write(&json)
    }

    /// Check credentials and, on success, make that account the session.
    ///
    /// Bounding the number of attempts is up to the caller.
    pub fn authenticate(&mut self, username: Option<&str>, password: &str) -> LoginOutcome<'_> {
        let outcome = self
            .validator
            .attempt_login(username, password, &self.accounts);

        if let LoginOutcome::Success(account) = outcome {
            info!(username = %account.username, "logged in");
            self.session = Some(account.username.clone());
        }
        outcome
    }

    /// Status line of the last [`authenticate`](Self::authenticate) call.
    pub fn login_status(&self) -> &str {
        self.validator.login_status()
    }

    /// Log out, returning the account that was logged in.
    ///
    /// `None` means nobody was logged in; that is not an error.
    pub fn end_session(&mut self) -> Option<Account> {
        let Some(username) = self.session.take() else {
            info!("logout requested but not logged in");
            return None;
        };
        info!(username = %username, "logged out");
        self.accounts.get(&username).cloned()
    }

    pub fn current_session(&self) -> Option<&Account> {
        self.session
            .as_deref()
            .and_then(|username| self.accounts.get(username))
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
