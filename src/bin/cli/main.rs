//! CLI tool for rotoxor file encryption.

mod commands;
mod exit_codes;
mod password;
mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Password-based file encryption via an iterated custom hash and a
/// keyed rotate-XOR chunk cipher
#[derive(Parser)]
#[command(name = "rotoxor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the password hasher's output for a given password
    Hash {
        /// Password to hash
        password: String,

        /// Cost (the hasher runs 2^cost rounds)
        #[arg(default_value = "10")]
        cost: u32,

        /// Fixed salt to hash with (random if omitted)
        salt: Option<String>,
    },

    /// Encrypt a file
    Encrypt {
        /// File to encrypt
        filepath: PathBuf,

        /// Password (will prompt if omitted)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Output container path (default: `<filepath>.enc`)
        output: Option<PathBuf>,
    },

    /// Decrypt a file
    Decrypt {
        /// Container to decrypt
        filepath: PathBuf,

        /// Password (will prompt if omitted)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Output path (default: `<filepath>.dec`)
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Hash { password, cost, salt } => commands::hash(password, cost, salt),

        Commands::Encrypt { filepath, password, output } => {
            let Some(password) = password::get_password(password) else {
                eprintln!("A password is required");
                std::process::exit(exit_codes::BAD_ARGS);
            };
            commands::encrypt(&filepath, password, output, cli.quiet)
        }

        Commands::Decrypt { filepath, password, output } => {
            let Some(password) = password::get_password(password) else {
                eprintln!("A password is required");
                std::process::exit(exit_codes::BAD_ARGS);
            };
            commands::decrypt(&filepath, password, output, cli.quiet)
        }
    };

    std::process::exit(exit_code.code());
}
