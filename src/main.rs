//! Credkeep - a local credential vault.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use credkeep::cli::output;
use credkeep::cli::{execute, Cli};
use credkeep::core::constants::{LOG_ENV, LOG_FORMAT_ENV};
use credkeep::error::{CipherError, Error, FileError, ProfileError, SiteError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("credkeep=debug")
        } else {
            EnvFilter::new("credkeep=warn")
        }
    });

    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .init();
    }

    if let Err(e) = execute(cli.command, cli.profile) {
        let suggestion = match &e {
            Error::Profile(ProfileError::NotFound(_)) => Some("run: credkeep profile new"),
            Error::Profile(ProfileError::WrongPasswordOrCorrupt(_)) => {
                Some("check the master password (CREDKEEP_PASSWORD)")
            }
            Error::File(FileError::Decrypt(CipherError::Authentication)) => {
                Some("check the file password")
            }
            Error::Site(SiteError::NotFound(_)) => Some("run: credkeep site list"),
            Error::Site(SiteError::PatternCompile(_)) => Some("use --literal to match the pattern as plain text"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
