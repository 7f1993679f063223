use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use hybridvault::{Config, HybridVault};

#[derive(Parser)]
#[command(name = "hybridvault")]
#[command(about = "Hybrid RSA + CAST5 file encryption")]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).args(["generation", "encryption", "decryption"])))]
struct Cli {
    /// Generate an RSA key pair and a wrapped CAST5 key
    #[arg(short = 'g', long, visible_alias = "gen")]
    generation: bool,

    /// Encrypt the configured text file
    #[arg(short = 'e', long, visible_alias = "enc")]
    encryption: bool,

    /// Decrypt the configured encrypted file
    #[arg(short = 'd', long, visible_alias = "dec")]
    decryption: bool,

    /// CAST5 key length in bits, used when no key length file is configured
    #[arg(short = 'l', long, env = "HYBRIDVAULT_KEY_LENGTH")]
    cast_key_length: Option<u32>,

    /// Path to the JSON settings file
    #[arg(short, long, default_value = "settings.json", env = "HYBRIDVAULT_CONFIG")]
    config: PathBuf,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)?;
    let vault = HybridVault::from_config(&config, cli.cast_key_length)?;

    if cli.generation {
        vault.generate_keys()?;
    } else if cli.encryption {
        vault.encrypt_file()?;
    } else if cli.decryption {
        vault.decrypt_file()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hybridvault=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // Usage errors follow the same one-line contract as runtime errors.
            let rendered = err.to_string();
            let line = rendered.lines().next().unwrap_or_default();
            eprintln!("Error: {}", line.trim_start_matches("error: "));
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
