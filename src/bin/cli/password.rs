//! Password handling for CLI operations.

use rpassword::prompt_password;
use rotoxor::Password;

/// Gets a password from the provided option or prompts the user.
pub fn get_password(provided: Option<String>) -> Option<Password> {
    if let Some(pwd) = provided {
        return Some(Password::new(pwd));
    }

    match prompt_password("Enter password: ") {
        Ok(pwd) if !pwd.is_empty() => Some(Password::new(pwd)),
        _ => None,
    }
}
