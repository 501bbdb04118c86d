//! Site remove command.

use crate::cli::context::{self, Context};
use crate::cli::output;
use crate::error::Result;

/// Remove a site after confirmation.
pub fn execute(profile: Option<String>, name: &str, yes: bool) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(yes);
    let mut session = ctx.open(&mut hooks)?;

    if !session.registry_mut().remove(name, &mut hooks)? {
        output::dimmed("cancelled");
        return Ok(());
    }
    session.commit(&mut hooks)?;

    output::success(&format!("removed {}", output::name(name)));
    Ok(())
}
