//! Subcommand implementations.

use std::path::{Path, PathBuf};

use rotoxor::{Error, Password};

use crate::exit_codes::{self, ExitCode};
use crate::progress::CliProgress;

/// Runs `rotoxor hash <password> [cost] [salt]`.
///
/// Prints `Hash: <value>` on success, matching the original tool's
/// output format verbatim.
pub fn hash(password: String, cost: u32, salt: Option<String>) -> ExitCode {
    let salt_bytes = salt.map(String::into_bytes);
    let hash = rotoxor::hash_password(password.as_bytes(), cost, salt_bytes.as_deref());
    println!("Hash: {}", String::from_utf8_lossy(&hash));
    ExitCode::Success
}

/// Runs `rotoxor encrypt <filepath> <password> [output_file]`.
///
/// Cost is not a caller-supplied argument: the reference tool always
/// hashes with [`rotoxor::DEFAULT_COST`] at encrypt time.
pub fn encrypt(filepath: &Path, password: Password, output: Option<PathBuf>, quiet: bool) -> ExitCode {
    let output_path = output.unwrap_or_else(|| default_output_path(filepath, "enc"));
    let progress = CliProgress::new(&format!("Encrypting {}", filepath.display()), quiet);

    let result = rotoxor::encrypt_file(filepath, password, &output_path);

    match result {
        Ok(()) => {
            progress.finish(&format!("Wrote {}", output_path.display()));
            ExitCode::Success
        }
        Err(e) => {
            progress.abandon();
            report_error(&e)
        }
    }
}

/// Runs `rotoxor decrypt <filepath> <password> [output_file]`.
pub fn decrypt(filepath: &Path, password: Password, output: Option<PathBuf>, quiet: bool) -> ExitCode {
    let output_path = output.unwrap_or_else(|| default_output_path(filepath, "dec"));
    let progress = CliProgress::new(&format!("Decrypting {}", filepath.display()), quiet);

    let result = rotoxor::decrypt_file(filepath, password, &output_path);

    match result {
        Ok(()) => {
            progress.finish(&format!("Wrote {}", output_path.display()));
            ExitCode::Success
        }
        Err(e) => {
            progress.abandon();
            report_error(&e)
        }
    }
}

fn report_error(error: &Error) -> ExitCode {
    match error {
        Error::WrongPassword => eprintln!("Wrong password"),
        other => eprintln!("Error: {other}"),
    }
    exit_codes::error_to_exit_code(error)
}

fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
