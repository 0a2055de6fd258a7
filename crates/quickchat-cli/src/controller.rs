//! Line-based menu loop driving the account and message stores.
//!
//! The controller owns both stores for the lifetime of the program. It reads
//! one answer per line from `input` and writes prompts and results to
//! `output`, so it runs equally against a terminal or in-memory buffers.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use quickchat_shared::constants::APP_NAME;
use quickchat_shared::validation::{check_message_length, is_valid_recipient};
use quickchat_shared::{Account, ComposeError, MessageAction, RegistrationReport};
use quickchat_store::{AccountStore, MessageStore, Storage, StoreError};

use crate::config::CliConfig;

const SESSION_MENU: &str = "Choose an option:\n\
                            1) Send Messages\n\
                            2) Show recently sent messages\n\
                            3) View your Profile\n\
                            4) Log out\n\
                            5) Quit";

/// How a logged-in session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionExit {
    Logout,
    Quit,
}

pub struct Controller<R, W, A, M> {
    input: R,
    output: W,
    accounts: AccountStore<A>,
    messages: MessageStore<M>,
    max_message_len: usize,
    login_attempts: u32,
}

impl<R, W, A, M> Controller<R, W, A, M>
where
    R: BufRead,
    W: Write,
    A: Storage,
    M: Storage,
{
    pub fn new(
        input: R,
        output: W,
        accounts: AccountStore<A>,
        messages: MessageStore<M>,
        config: &CliConfig,
    ) -> Self {
        Self {
            input,
            output,
            accounts,
            messages,
            max_message_len: config.max_message_len,
            login_attempts: config.login_attempts,
        }
    }

    pub fn accounts(&self) -> &AccountStore<A> {
        &self.accounts
    }

    pub fn messages(&self) -> &MessageStore<M> {
        &self.messages
    }

    /// Run menus until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.accounts.is_logged_in() {
                match self.session()? {
                    SessionExit::Logout => continue,
                    SessionExit::Quit => return Ok(()),
                }
            }

            let menu = format!("Welcome to {APP_NAME}\n1. Register\n2. Login\n3. Exit\nChoose option:");
            let Some(choice) = self.prompt(&menu)? else {
                return Ok(());
            };

            match choice.trim() {
                "1" => self.register()?,
                "2" => self.login()?,
                "3" => {
                    self.say("Goodbye!")?;
                    return Ok(());
                }
                _ => self.say("Invalid choice. Try again.")?,
            }
        }
    }

    fn register(&mut self) -> io::Result<()> {
        let Some(username) = self.prompt("Enter username:")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Enter password:")? else {
            return Ok(());
        };
        let Some(name) = self.prompt("Enter name:")? else {
            return Ok(());
        };
        let Some(surname) = self.prompt("Enter surname:")? else {
            return Ok(());
        };
        let Some(cellphone) = self.prompt("Enter cellphone (+27XXXXXXXXX):")? else {
            return Ok(());
        };

        let report = RegistrationReport::evaluate(&username, &password, &cellphone);
        if !report.accepted() {
            return self.say(format!("Registration failed:\n{report}"));
        }

        let account = Account::new(name, surname, username, password, cellphone);
        match self.accounts.register(account) {
            Ok(()) => self.say("Registration successful!"),
            Err(StoreError::DuplicateUsername(_)) => self.say("Username already exists."),
            Err(e) => {
                warn!(error = %e, "failed to save accounts");
                self.say(format!("Error saving data: {e}"))
            }
        }
    }

    fn login(&mut self) -> io::Result<()> {
        let mut attempts_left = self.login_attempts;

        while attempts_left > 0 {
            let Some(username) = self.prompt("Enter username:")? else {
                return Ok(());
            };
            let Some(password) = self.prompt("Enter password:")? else {
                return Ok(());
            };

            if self.accounts.authenticate(Some(username.as_str()), &password).is_success() {
                let status = self.accounts.login_status().to_string();
                return self.say(status);
            }

            attempts_left -= 1;
            self.say(format!(
                "Incorrect credentials. Attempts left: {attempts_left}"
            ))?;
        }

        info!("login attempts exhausted");
        self.say("Login failed. Returning to main menu.")
    }

    fn session(&mut self) -> io::Result<SessionExit> {
        let Some(limit) = self.ask_message_limit()? else {
            return Ok(SessionExit::Quit);
        };
        let mut kept = 0usize;

        loop {
            let Some(choice) = self.prompt(SESSION_MENU)? else {
                return Ok(SessionExit::Quit);
            };

            match choice.trim() {
                "1" => {
                    if kept >= limit {
                        self.say("Message limit reached.")?;
                        continue;
                    }
                    match self.send_message()? {
                        Some(true) => kept += 1,
                        Some(false) => {}
                        None => return Ok(SessionExit::Quit),
                    }
                }
                "2" => self.show_messages()?,
                "3" => self.show_profile()?,
                "4" => {
                    if let Some(account) = self.accounts.end_session() {
                        self.say(format!("{} logged out.", account.name))?;
                    }
                    return Ok(SessionExit::Logout);
                }
                "5" => {
                    let total = self.messages.total_count();
                    self.say(format!("You sent {total} message(s). Goodbye!"))?;
                    return Ok(SessionExit::Quit);
                }
                _ => self.say("Invalid option.")?,
            }
        }
    }

    /// `None` when input ended before a number was given.
    fn ask_message_limit(&mut self) -> io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.prompt("How many messages would you like to send?")? else {
                return Ok(None);
            };
            match answer.trim().parse::<usize>() {
                Ok(limit) => return Ok(Some(limit)),
                Err(_) => self.say("Please enter a whole number.")?,
            }
        }
    }

    /// Compose one message. Returns whether it was kept, or `None` on end of
    /// input.
    fn send_message(&mut self) -> io::Result<Option<bool>> {
        let Some(recipient) = self.prompt("Enter Recipient Cell Number (e.g. +27831234567):")? else {
            return Ok(None);
        };
        if !is_valid_recipient(&recipient) {
            self.say(ComposeError::InvalidRecipient)?;
            return Ok(Some(false));
        }

        let max = self.max_message_len;
        let Some(text) = self.prompt(&format!("Enter your message (max {max} characters):"))? else {
            return Ok(None);
        };
        if let Err(e) = check_message_length(&text, max) {
            self.say(e)?;
            return Ok(Some(false));
        }
        self.say("Message sent.")?;

        let draft = self.messages.compose(recipient, text);

        let Some(choice) = self.prompt(
            "What would you like to do with the message?\n1) Send\n2) Store\n3) Disregard",
        )?
        else {
            return Ok(None);
        };
        let action = MessageAction::from_choice(&choice);
        if !action.keeps_message() {
            self.say("Message was disregarded.")?;
            return Ok(Some(false));
        }

        let summary = format!(
            "Message ID: {}\nMessage Hash: {}\nRecipient: {}\nMessage: {}\nStatus: Message {} Successfully",
            draft.id,
            draft.hash,
            draft.recipient,
            draft.text,
            action.status_label()
        );

        let mut saved = self.messages.commit(draft);
        while let Err(e) = saved {
            warn!(error = %e, "failed to save messages");
            self.say(format!("Error saving data: {e}"))?;
            let Some(answer) = self.prompt("Try saving again? (y/n)")? else {
                return Ok(None);
            };
            if !answer.trim().eq_ignore_ascii_case("y") {
                self.say("Message kept for this session but not written to disk.")?;
                return Ok(Some(false));
            }
            saved = self.messages.save();
        }

        self.say(summary)?;
        Ok(Some(true))
    }

    fn show_messages(&mut self) -> io::Result<()> {
        if self.messages.is_empty() {
            return self.say("No messages have been sent yet.");
        }

        let listing = self
            .messages
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| format!("Message #{}:\n{record}\n", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        self.say(listing)
    }

    fn show_profile(&mut self) -> io::Result<()> {
        let profile = match self.accounts.current_session() {
            Some(account) => format!(
                "--- User Profile ---\nName: {}\nSurname: {}\nUsername: {}\nCellphone: {}",
                account.name, account.surname, account.username, account.cellphone_number
            ),
            None => "You are not logged in.".to_string(),
        };
        self.say(profile)
    }

    /// Print `question` and read one line. `None` on end of input.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim_end_matches(&['\r', '\n'][..]).to_string();
        Ok(Some(answer))
    }

    fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use quickchat_store::MemoryStorage;

    use super::*;

    const KYLE: &str = "kyl_1\nCh&&sec@ke99!\nKyle\nSmith\n+27838968976\n";
    const KYLE_LOGIN: &str = "kyl_1\nCh&&sec@ke99!\n";

    struct Harness {
        accounts: MemoryStorage,
        messages: MemoryStorage,
        config: CliConfig,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                accounts: MemoryStorage::new(),
                messages: MemoryStorage::new(),
                config: CliConfig::default(),
            }
        }

        /// Run a full session on `script` and return everything printed.
        fn run(&self, script: &str) -> String {
            let mut out = Vec::new();
            {
                let mut controller = Controller::new(
                    Cursor::new(script.as_bytes()),
                    &mut out,
                    AccountStore::open(self.accounts.clone()),
                    MessageStore::open(self.messages.clone()),
                    &self.config,
                );
                controller.run().unwrap();
            }
            String::from_utf8(out).unwrap()
        }

        fn message_count(&self) -> usize {
            MessageStore::open(self.messages.clone()).total_count()
        }
    }

    #[test]
    fn test_exit_immediately() {
        let out = Harness::new().run("3\n");
        assert!(out.contains("Welcome to Quick Chat"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_stops_cleanly() {
        let out = Harness::new().run("");
        assert!(out.contains("Choose option:"));
    }

    #[test]
    fn test_invalid_main_choice() {
        let out = Harness::new().run("9\n3\n");
        assert!(out.contains("Invalid choice. Try again."));
    }

    #[test]
    fn test_register_persists_account() {
        let harness = Harness::new();
        let out = harness.run(&format!("1\n{KYLE}3\n"));

        assert!(out.contains("Registration successful!"));
        let store = AccountStore::open(harness.accounts.clone());
        assert_eq!(store.get("kyl_1").map(|a| a.surname.as_str()), Some("Smith"));
    }

    #[test]
    fn test_register_reports_format_errors() {
        let harness = Harness::new();
        let out = harness.run("1\nkyle!!!!!!!\npassword\nKyle\nSmith\n08966553\n3\n");

        assert!(out.contains("Registration failed:"));
        assert!(out.contains("Username is not correctly formatted"));
        assert!(out.contains("Password is not correctly formatted"));
        assert!(out.contains("Cell number is incorrectly formatted"));
        assert!(out.contains("Fix the errors above and try again."));
        assert!(AccountStore::open(harness.accounts.clone()).is_empty());
    }

    #[test]
    fn test_register_duplicate_username() {
        let harness = Harness::new();
        let out = harness.run(&format!("1\n{KYLE}1\n{KYLE}3\n"));

        assert!(out.contains("Username already exists."));
        assert_eq!(AccountStore::open(harness.accounts.clone()).len(), 1);
    }

    #[test]
    fn test_register_write_failure_is_reported() {
        let harness = Harness::new();
        harness.accounts.set_fail_writes(true);

        let out = harness.run(&format!("1\n{KYLE}3\n"));

        assert!(out.contains("Error saving data:"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_login_attempts_exhausted() {
        let harness = Harness::new();
        let out = harness.run(&format!("1\n{KYLE}2\nkyl_1\nx\nkyl_1\ny\nnobody\nz\n3\n"));

        assert!(out.contains("Incorrect credentials. Attempts left: 2"));
        assert!(out.contains("Incorrect credentials. Attempts left: 1"));
        assert!(out.contains("Incorrect credentials. Attempts left: 0"));
        assert!(out.contains("Login failed. Returning to main menu."));
    }

    #[test]
    fn test_login_then_quit() {
        let harness = Harness::new();
        let out = harness.run(&format!("1\n{KYLE}2\n{KYLE_LOGIN}2\n5\n"));

        assert!(out.contains("Login successful. Welcome, Kyle!"));
        assert!(out.contains("You sent 0 message(s). Goodbye!"));
    }

    #[test]
    fn test_send_and_store_messages() {
        let harness = Harness::new();
        let script = format!(
            "1\n{KYLE}2\n{KYLE_LOGIN}3\n\
             1\n+27718693002\nHi Mike, can you join us for dinner tonight\n1\n\
             1\n+27575975889\nHi Keegan, did you receive the payment?\n2\n\
             2\n5\n"
        );
        let out = harness.run(&script);

        assert_eq!(out.matches("Message sent.").count(), 2);
        assert!(out.contains("Status: Message Sent Successfully"));
        assert!(out.contains("Status: Message Stored Successfully"));
        assert!(out.contains("Message #1:"));
        assert!(out.contains("Message #2:"));
        assert!(out.contains(":1:HITONIGHT"));
        assert!(out.contains(":2:HIPAYMENT?"));
        assert!(out.contains("You sent 2 message(s). Goodbye!"));
        assert_eq!(harness.message_count(), 2);
    }

    #[test]
    fn test_disregarded_message_is_not_stored() {
        let harness = Harness::new();
        let script = format!("1\n{KYLE}2\n{KYLE_LOGIN}1\n1\n+27718693002\nNever mind\n3\n5\n");
        let out = harness.run(&script);

        assert!(out.contains("Message was disregarded."));
        assert!(out.contains("You sent 0 message(s). Goodbye!"));
        assert_eq!(harness.message_count(), 0);
    }

    #[test]
    fn test_message_limit_reached() {
        let harness = Harness::new();
        let script = format!("1\n{KYLE}2\n{KYLE_LOGIN}1\n1\n+27718693002\nHello\n1\n1\n5\n");
        let out = harness.run(&script);

        assert!(out.contains("Message limit reached."));
        assert_eq!(harness.message_count(), 1);
    }

    #[test]
    fn test_message_write_failure_is_not_reported_as_sent() {
        let harness = Harness::new();
        harness.messages.set_fail_writes(true);
        let script = format!(
            "1\n{KYLE}2\n{KYLE_LOGIN}1\n\
             1\n+27718693002\nHello\n1\nn\n\
             1\n+27718693002\nAgain\n1\ny\nn\n\
             5\n"
        );
        let out = harness.run(&script);

        assert_eq!(out.matches("Error saving data: IO error: write refused").count(), 3);
        assert_eq!(out.matches("Try saving again? (y/n)").count(), 3);
        assert_eq!(
            out.matches("Message kept for this session but not written to disk.").count(),
            2
        );
        assert!(!out.contains("Successfully"));
        assert!(!out.contains("Message limit reached."));
        assert_eq!(harness.message_count(), 0);
    }

    #[test]
    fn test_end_of_input_at_save_retry_quits() {
        let harness = Harness::new();
        harness.messages.set_fail_writes(true);
        let script = format!("1\n{KYLE}2\n{KYLE_LOGIN}1\n1\n+27718693002\nHello\n1\n");
        let out = harness.run(&script);

        assert!(out.contains("Error saving data:"));
        assert!(out.trim_end().ends_with("Try saving again? (y/n)"));
        assert!(!out.contains("Successfully"));
        assert_eq!(harness.message_count(), 0);
    }

    #[test]
    fn test_invalid_recipient_and_long_text_rejected() {
        let harness = Harness::new();
        let long = "x".repeat(51);
        let script = format!(
            "1\n{KYLE}2\n{KYLE_LOGIN}2\n1\n0718693002\n1\n+27718693002\n{long}\n5\n"
        );
        let out = harness.run(&script);

        assert!(out.contains("Invalid Recipient Number. Must start with +27 and be followed by 9 digits."));
        assert!(out.contains("Please enter a message of no more than 50 characters."));
        assert_eq!(harness.message_count(), 0);
    }

    #[test]
    fn test_configured_message_cap() {
        let mut harness = Harness::new();
        harness.config.max_message_len = 250;
        let text = "y".repeat(120);
        let script = format!("1\n{KYLE}2\n{KYLE_LOGIN}1\n1\n+27718693002\n{text}\n2\n5\n");

        harness.run(&script);

        assert_eq!(harness.message_count(), 1);
    }

    #[test]
    fn test_non_numeric_limit_reprompts() {
        let harness = Harness::new();
        let out = harness.run(&format!("1\n{KYLE}2\n{KYLE_LOGIN}many\n2\n5\n"));

        assert!(out.contains("Please enter a whole number."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_profile_and_logout() {
        let harness = Harness::new();
        let out = harness.run(&format!("1\n{KYLE}2\n{KYLE_LOGIN}1\n3\n4\n3\n"));

        assert!(out.contains("--- User Profile ---"));
        assert!(out.contains("Name: Kyle"));
        assert!(out.contains("Surname: Smith"));
        assert!(out.contains("Cellphone: +27838968976"));
        assert!(out.contains("Kyle logged out."));
        // back at the main menu after logout
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_messages_survive_restart() {
        let harness = Harness::new();
        harness.run(&format!(
            "1\n{KYLE}2\n{KYLE_LOGIN}1\n1\n+27718693002\nFirst one\n1\n5\n"
        ));

        let out = harness.run(&format!("2\n{KYLE_LOGIN}1\n2\n5\n"));

        assert!(out.contains("Message: First one"));
        assert!(out.contains("You sent 1 message(s). Goodbye!"));
    }

    #[test]
    fn test_empty_message_list() {
        let harness = Harness::new();
        let out = harness.run(&format!("1\n{KYLE}2\n{KYLE_LOGIN}1\n2\n5\n"));
        assert!(out.contains("No messages have been sent yet."));
    }
}
