//! Profile commands: new, list, rm, passwd.

use std::io::{self, IsTerminal};

use dialoguer::Confirm;
use tracing::info;

use crate::cli::context::{self, Context};
use crate::cli::output;
use crate::core::session::Session;
use crate::core::store::Store;
use crate::error::Result;

/// Create a new, empty profile.
pub fn new(profile: Option<String>) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);

    let session = Session::create(ctx.store(), &ctx.profile, &mut hooks)?;
    session.commit(&mut hooks)?;

    info!(profile = %ctx.profile, "profile created");
    output::success(&format!("created profile {}", output::name(&ctx.profile)));
    Ok(())
}

/// List profiles.
pub fn list(profile: Option<String>, json: bool) -> Result<()> {
    let ctx = Context::load(profile)?;
    let names = ctx.store().list()?;

    if json {
        let result = serde_json::json!({
            "profiles": names,
            "current": ctx.profile,
            "count": names.len(),
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if names.is_empty() {
        output::dimmed("no profiles");
        output::hint("run: credkeep profile new");
    } else {
        for name in &names {
            let marker = if *name == ctx.profile { "*" } else { " " };
            output::data(&format!("{} {}", marker, output::name(name)));
        }
    }
    Ok(())
}

/// Delete a profile after confirmation.
pub fn rm(profile: Option<String>, yes: bool) -> Result<()> {
    let ctx = Context::load(profile)?;

    let confirmed = yes
        || (io::stdin().is_terminal()
            && Confirm::new()
                .with_prompt(format!(
                    "Delete profile {} and all of its sites?",
                    ctx.profile
                ))
                .default(false)
                .interact()?);
    if !confirmed {
        output::dimmed("cancelled");
        return Ok(());
    }

    ctx.store().remove(&ctx.profile)?;
    info!(profile = %ctx.profile, "profile removed");
    output::success(&format!("removed profile {}", output::name(&ctx.profile)));
    Ok(())
}

/// Re-encrypt a profile under a new master password.
pub fn passwd(profile: Option<String>) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);

    let mut session = ctx.open(&mut hooks)?;
    session.change_password(&mut hooks)?;
    session.commit(&mut hooks)?;

    output::success(&format!("changed password of {}", output::name(&ctx.profile)));
    Ok(())
}
