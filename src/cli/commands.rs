// Lockbox — CLI Command Handlers
//
// Each function handles one subcommand. They coordinate between the
// vault (identity keys), cipher (sealing), and generator modules, and
// enforce the input bounds before any key material is touched.

use std::path::PathBuf;

use crate::cipher::{CipherService, SealedCredential};
use crate::error::LockboxError;
use crate::generator::generate_password;
use crate::validation;
use crate::vault::{FsKeyStore, KeyStore};

use super::Commands;

/// Default directory for identity key records.
fn default_vault_root() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("lockbox").join("vault")
}

/// Execute the parsed CLI command.
pub fn execute(vault_root: Option<PathBuf>, command: Commands) -> Result<(), LockboxError> {
    let store = FsKeyStore::new(vault_root.unwrap_or_else(default_vault_root));

    match command {
        Commands::Init { token } => cmd_init(&store, &token),
        Commands::Generate {
            length,
            no_digits,
            no_uppercase,
            no_special,
        } => cmd_generate(length, no_digits, no_uppercase, no_special),
        Commands::New {
            token,
            tail,
            scopes,
            length,
            no_digits,
            no_uppercase,
            no_special,
        } => cmd_new(
            &store,
            &token,
            &tail,
            scopes.as_deref(),
            length,
            no_digits,
            no_uppercase,
            no_special,
        ),
        Commands::Seal {
            token,
            tail,
            password,
            scopes,
        } => cmd_seal(&store, &token, &tail, &password, scopes.as_deref()),
        Commands::Unseal {
            token,
            password,
            scopes,
            tail,
        } => cmd_unseal(&store, &token, password, scopes, tail),
        Commands::Delete { token } => cmd_delete(&store, &token),
    }
}

// ─── Init ────────────────────────────────────────────────────────────────────

fn cmd_init(store: &FsKeyStore, token: &str) -> Result<(), LockboxError> {
    store.create_key(token)?;

    println!("✓ Identity key created");
    println!("  Vault: {}", store.root().display());
    println!();
    println!("Next: seal a credential with `lockbox new --token <token> --tail <name>`");

    Ok(())
}

// ─── Generate ────────────────────────────────────────────────────────────────

fn cmd_generate(
    length: usize,
    no_digits: bool,
    no_uppercase: bool,
    no_special: bool,
) -> Result<(), LockboxError> {
    validate_length(length)?;

    let password = generate_password(length, !no_digits, !no_uppercase, !no_special);
    println!("{}", password);

    Ok(())
}

// ─── New (generate + seal) ───────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_new(
    store: &FsKeyStore,
    token: &str,
    tail: &str,
    scopes: Option<&str>,
    length: usize,
    no_digits: bool,
    no_uppercase: bool,
    no_special: bool,
) -> Result<(), LockboxError> {
    validate_fields(tail, scopes)?;
    validate_length(length)?;
    ensure_initialized(store, token)?;

    let password = generate_password(length, !no_digits, !no_uppercase, !no_special);
    let cipher = CipherService::new(store);
    let sealed = cipher.seal_triple(token, tail, &password, scopes)?;

    println!("✓ Credential generated and sealed");
    println!("  Password:        {}", password);
    print_sealed(&sealed);

    Ok(())
}

// ─── Seal ────────────────────────────────────────────────────────────────────

fn cmd_seal(
    store: &FsKeyStore,
    token: &str,
    tail: &str,
    password: &str,
    scopes: Option<&str>,
) -> Result<(), LockboxError> {
    validate_fields(tail, scopes)?;
    if !validation::password_is_valid(password) {
        return Err(LockboxError::InvalidInput(format!(
            "Password must be non-blank and between {} and {} characters",
            validation::PASSWORD_MIN_LENGTH,
            validation::PASSWORD_MAX_LENGTH
        )));
    }
    ensure_initialized(store, token)?;

    let cipher = CipherService::new(store);
    let sealed = cipher.seal_triple(token, tail, password, scopes)?;

    println!("✓ Credential sealed");
    print_sealed(&sealed);

    Ok(())
}

// ─── Unseal ──────────────────────────────────────────────────────────────────

fn cmd_unseal(
    store: &FsKeyStore,
    token: &str,
    password_ct: String,
    scopes_ct: String,
    tail_ct: Option<String>,
) -> Result<(), LockboxError> {
    ensure_initialized(store, token)?;

    let cipher = CipherService::new(store);

    match tail_ct {
        Some(tail_ct) => {
            let sealed = SealedCredential {
                tail: tail_ct,
                password: password_ct,
                scopes: scopes_ct,
            };
            let (tail, password, scopes) = cipher.unseal_triple(token, &sealed)?;
            println!("  Tail:     {}", tail);
            println!("  Password: {}", password.as_str());
            println!("  Scopes:   {}", scopes);
        }
        None => {
            let (password, scopes) = cipher.unseal_pair(token, &password_ct, &scopes_ct)?;
            println!("  Password: {}", password.as_str());
            println!("  Scopes:   {}", scopes);
        }
    }

    Ok(())
}

// ─── Delete ──────────────────────────────────────────────────────────────────

fn cmd_delete(store: &FsKeyStore, token: &str) -> Result<(), LockboxError> {
    if store.delete_key(token)? {
        println!("✓ Identity key deleted — sealed credentials for this identity are unrecoverable");
    } else {
        println!("No identity key found for that token");
    }

    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Fail early with guidance when the identity has no key yet.
fn ensure_initialized(store: &FsKeyStore, token: &str) -> Result<(), LockboxError> {
    if !store.contains(token)? {
        return Err(LockboxError::Other(
            "No identity key for this token. Run `lockbox init` first.".to_string(),
        ));
    }
    Ok(())
}

fn print_sealed(sealed: &SealedCredential) {
    println!("  Sealed tail:     {}", sealed.tail);
    println!("  Sealed password: {}", sealed.password);
    println!("  Sealed scopes:   {}", sealed.scopes);
}

fn validate_length(length: usize) -> Result<(), LockboxError> {
    if !validation::password_length_valid(length) {
        return Err(LockboxError::InvalidInput(format!(
            "Password length must be between {} and {}",
            validation::PASSWORD_MIN_LENGTH,
            validation::PASSWORD_MAX_LENGTH
        )));
    }
    Ok(())
}

fn validate_fields(tail: &str, scopes: Option<&str>) -> Result<(), LockboxError> {
    if !validation::tail_is_valid(tail) {
        return Err(LockboxError::InvalidInput(format!(
            "Tail must be non-blank and at most {} characters",
            validation::TAIL_MAX_LENGTH
        )));
    }
    if !validation::scopes_are_valid(scopes) {
        return Err(LockboxError::InvalidInput(format!(
            "Scopes must be at most {} characters",
            validation::SCOPES_MAX_LENGTH
        )));
    }
    Ok(())
}
