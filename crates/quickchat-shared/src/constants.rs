/// Application name
pub const APP_NAME: &str = "Quick Chat";

/// Longest accepted username, in characters
pub const USERNAME_MAX_LEN: usize = 5;

/// Shortest accepted password, in characters
pub const PASSWORD_MIN_LEN: usize = 8;

/// Characters that satisfy the password "special character" rule
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#_$%^&*()";

/// International prefix every cellphone number must start with
pub const PHONE_PREFIX: &str = "+27";

/// Number of digits following [`PHONE_PREFIX`]
pub const PHONE_SUBSCRIBER_DIGITS: usize = 9;

/// Length of a generated message identifier
pub const MESSAGE_ID_LEN: usize = 10;

/// Default cap on composed message text, in characters
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 50;

/// Default number of login attempts before returning to the main menu
pub const DEFAULT_LOGIN_ATTEMPTS: u32 = 3;

/// Default file names inside the data directory
pub const ACCOUNTS_FILE_NAME: &str = "users.json";
pub const MESSAGES_FILE_NAME: &str = "messages.json";
