//! Site commands.

mod add;
mod get;
mod list;
mod rename;
mod rm;
mod set;

use zeroize::Zeroizing;

use crate::cli::{generate, prompt, PasswordArgs, SiteAction};
use crate::core::registry::PatternMode;
use crate::error::Result;

/// Dispatch a site subcommand.
pub fn execute(action: SiteAction, profile: Option<String>) -> Result<()> {
    match action {
        SiteAction::Add {
            name,
            fields,
            tags,
            password,
        } => add::execute(profile, name, fields, tags, &password),
        SiteAction::Rm { name, yes } => rm::execute(profile, &name, yes),
        SiteAction::Rename { name, new_name } => rename::execute(profile, &name, &new_name),
        SiteAction::Set {
            name,
            fields,
            delete,
            tags,
            untag,
            password,
        } => set::execute(profile, &name, fields, delete, tags, untag, &password),
        SiteAction::List {
            pattern,
            tags,
            regex,
            literal,
            json,
        } => {
            let mode = if regex {
                PatternMode::Regex
            } else if literal {
                PatternMode::Literal
            } else {
                PatternMode::Auto
            };
            list::execute(profile, pattern.unwrap_or_default(), tags, mode, json)
        }
        SiteAction::Get {
            name,
            fields,
            tags,
            copy,
            reveal,
            json,
        } => get::execute(profile, &name, fields, tags, copy, reveal, json),
    }
}

/// Resolve the site password requested on the command line, if any.
///
/// Returns the password and whether it was generated.
fn site_password(args: &PasswordArgs, site: &str) -> Result<Option<(Zeroizing<String>, bool)>> {
    if args.generate {
        return Ok(Some((generate::password(args.length), true)));
    }
    if args.ask {
        return Ok(Some((prompt::site_password(site)?, false)));
    }
    Ok(None)
}
