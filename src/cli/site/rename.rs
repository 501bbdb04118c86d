//! Site rename command.

use crate::cli::context::{self, Context};
use crate::cli::output;
use crate::error::Result;

/// Rename a site.
pub fn execute(profile: Option<String>, name: &str, new_name: &str) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let mut session = ctx.open(&mut hooks)?;

    session.registry_mut().rename(name, new_name, &mut hooks)?;
    session.commit(&mut hooks)?;

    output::success(&format!(
        "renamed {} to {}",
        output::name(name),
        output::name(new_name)
    ));
    Ok(())
}
