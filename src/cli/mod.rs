//! Command-line interface.

pub mod clipboard;
pub mod completions;
pub mod config;
pub mod context;
pub mod file;
pub mod generate;
pub mod output;
pub mod profile;
pub mod prompt;
pub mod site;

use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};

use crate::core::types::{FieldName, FieldValue};
use crate::error::{Result, ValidationError};

/// Credkeep - a local credential vault.
#[derive(Parser)]
#[command(
    name = "credkeep",
    about = "A local credential vault",
    version,
    after_help = "Passwords can be supplied through CREDKEEP_PASSWORD and CREDKEEP_NEW_PASSWORD."
)]
pub struct Cli {
    /// Profile to use (defaults to the configured default profile)
    #[arg(short, long, global = true, env = "CREDKEEP_PROFILE")]
    pub profile: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Manage profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage sites in a profile
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },

    /// Encrypt and decrypt files
    File {
        #[command(subcommand)]
        action: FileAction,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a new, empty profile
    New,

    /// List profiles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a profile and all of its sites
    Rm {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Change the master password of a profile
    Passwd,
}

/// Site subcommands.
#[derive(Subcommand)]
pub enum SiteAction {
    /// Add a site
    Add {
        /// Site name
        name: String,
        /// Field to set (KEY=VALUE, repeatable)
        #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(FieldName, FieldValue)>,
        /// Tag to attach (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Remove a site
    Rm {
        /// Site name
        name: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Rename a site
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },

    /// Update a site's fields and tags
    Set {
        /// Site name
        name: String,
        /// Field to set (KEY=VALUE, repeatable)
        #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(FieldName, FieldValue)>,
        /// Field to delete (repeatable)
        #[arg(short, long = "delete", value_name = "KEY")]
        delete: Vec<String>,
        /// Tag to add (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Tag to remove (repeatable)
        #[arg(long = "untag", value_name = "TAG")]
        untag: Vec<String>,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// List sites, optionally filtered by pattern and tags
    List {
        /// Substring or regular expression to match against site names
        pattern: Option<String>,
        /// Only list sites with one of these tags (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Treat the pattern as a regular expression only
        #[arg(long, conflicts_with = "literal")]
        regex: bool,
        /// Treat the pattern as a plain substring only
        #[arg(long)]
        literal: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show fields of a site
    Get {
        /// Site name
        name: String,
        /// Fields to show (all when omitted)
        fields: Vec<String>,
        /// Include tags
        #[arg(short, long)]
        tags: bool,
        /// Copy the first named field (or the password) to the clipboard
        #[arg(short, long, conflicts_with = "json")]
        copy: bool,
        /// Show the password instead of masking it
        #[arg(short, long)]
        reveal: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// How a site password is supplied to `site add` and `site set`.
#[derive(Args, Debug, Clone, Default)]
pub struct PasswordArgs {
    /// Generate a random password
    #[arg(short, long, conflicts_with = "ask")]
    pub generate: bool,

    /// Length of the generated password
    #[arg(short, long, default_value_t = generate::DEFAULT_LENGTH,
          value_parser = clap::value_parser!(u16).range(4..=256).map(usize::from))]
    pub length: usize,

    /// Prompt for the password
    #[arg(short, long)]
    pub ask: bool,
}

/// File subcommands.
#[derive(Subcommand)]
pub enum FileAction {
    /// Encrypt a file
    Encrypt {
        /// File to encrypt
        input: PathBuf,
        /// Output path (default: <input>.<extension>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Delete the original after encrypting
        #[arg(long)]
        delete: bool,
        /// Record the encrypted file as a site in the profile
        #[arg(short, long)]
        register: bool,
        /// Also store the encrypted contents in the site (implies --register)
        #[arg(long)]
        store_content: bool,
    },

    /// Decrypt a file
    Decrypt {
        /// File to decrypt
        input: PathBuf,
        /// Output path (default: input without the encrypted extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recover a file stored in a site's content field
    Restore {
        /// Site holding the file
        site: String,
        /// Where to write the decrypted file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective settings
    Show,
}

/// Parse a `KEY=VALUE` field assignment.
fn parse_field(s: &str) -> Result<(FieldName, FieldValue)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(ValidationError::InvalidAssignment(s.to_string()).into()),
    }
}

/// Execute a command.
pub fn execute(command: Command, profile: Option<String>) -> Result<()> {
    use Command::*;

    match command {
        Profile { action } => match action {
            ProfileAction::New => profile::new(profile),
            ProfileAction::List { json } => profile::list(profile, json),
            ProfileAction::Rm { yes } => profile::rm(profile, yes),
            ProfileAction::Passwd => profile::passwd(profile),
        },
        Site { action } => site::execute(action, profile),
        File { action } => match action {
            FileAction::Encrypt {
                input,
                output,
                delete,
                register,
                store_content,
            } => file::encrypt(profile, input, output, delete, register, store_content),
            FileAction::Decrypt { input, output } => file::decrypt(profile, input, output),
            FileAction::Restore { site, output } => file::restore(profile, &site, output),
        },
        Config { action } => match action {
            ConfigAction::Init { force } => config::init(force),
            ConfigAction::Show => config::show(profile),
        },
        Completions { shell } => completions::execute(shell),
    }
}
