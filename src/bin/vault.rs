// src/bin/vault.rs
//! Thin command surface over the vault core
//!
//! Parses arguments, resolves the key location, dispatches to the
//! library, and maps errors to exit codes: 0 success, 2 user error
//! (missing file, wrong key, bad envelope), 1 system error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use secure_file_vault::core::batch::{decrypted_destination, encrypted_destination};
use secure_file_vault::core::util::key_fingerprint;
use secure_file_vault::{
    batch_report_json, decrypt_file, encrypt_file, process_directory, rotate_with_reencryption,
    BatchOptions, BatchResult, CipherEngine, Config, Direction, KeyStore, VaultError,
};

#[derive(Parser)]
#[command(name = "vault", version, about = "Encrypt and decrypt files under a vault key")]
struct Cli {
    /// Path to the key file (overrides config)
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new vault key and save it to the key file
    GenerateKey,

    /// Replace the vault key, optionally re-encrypting existing files
    RotateKey {
        /// Encrypted files to carry over to the new key. Without this,
        /// existing ciphertexts stay on the old key and become
        /// undecryptable once it is overwritten.
        #[arg(long = "reencrypt", value_name = "FILE")]
        reencrypt: Vec<PathBuf>,
    },

    /// Encrypt a single file
    Encrypt {
        source: PathBuf,
        /// Defaults to `<source>.enc`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a single file
    Decrypt {
        source: PathBuf,
        /// Defaults to `<source>` with the `.enc` suffix stripped
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encrypt every eligible file in a directory
    EncryptDir {
        directory: PathBuf,
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Decrypt every `.enc` file in a directory
    DecryptDir {
        directory: PathBuf,
        #[command(flatten)]
        batch: BatchArgs,
    },
}

#[derive(clap::Args)]
struct BatchArgs {
    /// Descend into subdirectories
    #[arg(long)]
    recursive: bool,
    /// Keep originals instead of removing them after each success
    #[arg(long)]
    keep: bool,
    /// Print a JSON report instead of the human summary
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("[ERROR] {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.chain().find_map(|e| e.downcast_ref::<VaultError>()) {
        Some(e) if e.is_user_error() => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path).context("failed to load config")?,
        None => Config::default(),
    };
    let key_file = cli.key_file.unwrap_or_else(|| config.key_file.clone());
    let store = KeyStore::new(&key_file);

    match cli.command {
        Command::GenerateKey => {
            let key = KeyStore::generate();
            store.save(&key)?;
            println!(
                "[+] New key generated and saved to {} (fingerprint {})",
                key_file.display(),
                key_fingerprint(&key)
            );
        }

        Command::RotateKey { reencrypt } => {
            if reencrypt.is_empty() {
                let key = store.rotate()?;
                println!(
                    "[+] Key rotated (fingerprint {})",
                    key_fingerprint(&key)
                );
                println!("    Files encrypted under the old key must be re-encrypted manually.");
            } else {
                let report = rotate_with_reencryption(&store, &reencrypt)?;
                println!(
                    "[+] Key rotated, {} file(s) re-encrypted (fingerprint {})",
                    report.reencrypted.len(),
                    report.new_key_fingerprint
                );
            }
        }

        Command::Encrypt { source, output } => {
            let engine = CipherEngine::new(&store.load()?);
            let output = output.unwrap_or_else(|| encrypted_destination(&source));
            encrypt_file(&source, &output, &engine)?;
            println!("[+] Encrypted '{}' → '{}'", source.display(), output.display());
        }

        Command::Decrypt { source, output } => {
            let engine = CipherEngine::new(&store.load()?);
            let output = output.unwrap_or_else(|| decrypted_destination(&source));
            decrypt_file(&source, &output, &engine)?;
            println!("[+] Decrypted '{}' → '{}'", source.display(), output.display());
        }

        Command::EncryptDir { directory, batch } => {
            let engine = CipherEngine::new(&store.load()?);
            let options = batch_options(&config, &batch);
            let result = process_directory(&directory, Direction::Encrypt, &engine, &options)?;
            print_batch(&result, batch.json)?;
        }

        Command::DecryptDir { directory, batch } => {
            let engine = CipherEngine::new(&store.load()?);
            let options = batch_options(&config, &batch);
            let result = process_directory(&directory, Direction::Decrypt, &engine, &options)?;
            print_batch(&result, batch.json)?;
        }
    }
    Ok(())
}

fn batch_options(config: &Config, args: &BatchArgs) -> BatchOptions {
    BatchOptions {
        recursive: args.recursive || config.batch.recursive,
        remove_source: !args.keep && config.batch.remove_source,
    }
}

fn print_batch(result: &BatchResult, json: bool) -> Result<()> {
    if json {
        println!("{}", batch_report_json(result)?);
        return Ok(());
    }
    for outcome in &result.outcomes {
        match &outcome.error {
            None => println!("[+] {} → {}",
                outcome.task.source.display(),
                outcome.task.destination.display()),
            Some(err) => println!("[!] {} — {err}", outcome.task.source.display()),
        }
    }
    println!("Succeeded: {}", result.succeeded);
    println!("Failed: {}", result.failed);
    Ok(())
}
