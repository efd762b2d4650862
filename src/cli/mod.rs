// Lockbox — CLI Module
//
// Command-line interface using clap derive macros.
// Subcommands: init, new, generate, seal, unseal, delete.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::execute;

/// Lockbox — per-identity credential vault and password generator.
#[derive(Parser, Debug)]
#[command(name = "lockbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the identity key records.
    /// Defaults to `lockbox/vault` under the platform data directory.
    #[arg(long, global = true)]
    pub vault_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the identity key that will seal an identity's credentials.
    Init {
        /// The identity token owning the credentials.
        #[arg(long)]
        token: String,
    },

    /// Generate a password without sealing it.
    Generate {
        /// Requested password length (8–32).
        #[arg(long, default_value = "16")]
        length: usize,

        /// Leave digits out of the password.
        #[arg(long)]
        no_digits: bool,

        /// Leave uppercase letters out of the password.
        #[arg(long)]
        no_uppercase: bool,

        /// Leave special characters out of the password.
        #[arg(long)]
        no_special: bool,
    },

    /// Generate a password and seal it under an identity in one step.
    New {
        #[arg(long)]
        token: String,

        /// The tail (label) identifying the credential, e.g. an account name.
        #[arg(long)]
        tail: String,

        /// Where the credential is used, e.g. a site or service name.
        #[arg(long)]
        scopes: Option<String>,

        /// Requested password length (8–32).
        #[arg(long, default_value = "16")]
        length: usize,

        #[arg(long)]
        no_digits: bool,

        #[arg(long)]
        no_uppercase: bool,

        #[arg(long)]
        no_special: bool,
    },

    /// Seal an externally supplied credential under an identity.
    Seal {
        #[arg(long)]
        token: String,

        #[arg(long)]
        tail: String,

        /// The plaintext password to seal.
        #[arg(long)]
        password: String,

        #[arg(long)]
        scopes: Option<String>,
    },

    /// Unseal credential fields for the owning identity.
    Unseal {
        #[arg(long)]
        token: String,

        /// The sealed password ciphertext.
        #[arg(long)]
        password: String,

        /// The sealed scopes ciphertext.
        #[arg(long)]
        scopes: String,

        /// The sealed tail ciphertext, if it should be unsealed too.
        #[arg(long)]
        tail: Option<String>,
    },

    /// Delete an identity key, permanently stranding its sealed credentials.
    Delete {
        #[arg(long)]
        token: String,
    },
}
