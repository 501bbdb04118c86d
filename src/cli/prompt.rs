//! Terminal prompts.
//!
//! Implements [`Hooks`] for interactive use. Passwords come from
//! `CREDKEEP_PASSWORD` / `CREDKEEP_NEW_PASSWORD` when set, otherwise from a
//! hidden prompt. Confirmations are skipped with `--yes` and declined when
//! stdin is not a terminal.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Password};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{NEW_PASSWORD_ENV, PASSWORD_ENV};
use crate::core::hooks::{Hooks, Step};
use crate::error::{Result, ValidationError};

/// Interactive hooks for CLI commands.
#[derive(Debug, Default)]
pub struct Prompt {
    assume_yes: bool,
}

impl Prompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Hooks for Prompt {
    fn confirm(&mut self, step: Step) -> bool {
        if self.assume_yes {
            return true;
        }
        if !io::stdin().is_terminal() {
            debug!(step = %step, "not a terminal, declining");
            return false;
        }
        let question = match step {
            Step::SiteConfirmRemove => "Remove this site?",
            _ => "Continue?",
        };
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn password(&mut self, step: Step) -> Result<Zeroizing<String>> {
        let is_new = matches!(step, Step::ProfileNewPassword | Step::FileNewPassword);

        let from_env = if is_new {
            env_password(NEW_PASSWORD_ENV).or_else(|| env_password(PASSWORD_ENV))
        } else {
            env_password(PASSWORD_ENV)
        };
        if let Some(password) = from_env {
            debug!(step = %step, "password taken from environment");
            return Ok(password);
        }

        let label = match step {
            Step::ProfileNewPassword => "New master password",
            Step::FileNewPassword => "File password",
            Step::FilePassword => "File password",
            _ => "Master password",
        };
        let mut prompt = Password::new().with_prompt(label);
        if is_new {
            prompt = prompt.with_confirmation("Repeat password", "passwords do not match");
        }
        let password = Zeroizing::new(prompt.interact()?);
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword.into());
        }
        Ok(password)
    }
}

fn env_password(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(Zeroizing::new)
}

/// Ask for a site password, with confirmation.
pub fn site_password(site: &str) -> Result<Zeroizing<String>> {
    let password = Password::new()
        .with_prompt(format!("Password for {}", site))
        .with_confirmation("Repeat password", "passwords do not match")
        .interact()?;
    Ok(Zeroizing::new(password))
}
