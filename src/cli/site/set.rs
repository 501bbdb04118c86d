//! Site set command.

use super::site_password;
use crate::cli::context::{self, Context};
use crate::cli::{output, PasswordArgs};
use crate::core::registry::SiteUpdate;
use crate::core::types::{FieldName, FieldValue, Tag};
use crate::error::Result;

/// Update a site's fields and tags.
pub fn execute(
    profile: Option<String>,
    name: &str,
    set_fields: Vec<(FieldName, FieldValue)>,
    delete_fields: Vec<FieldName>,
    add_tags: Vec<Tag>,
    delete_tags: Vec<Tag>,
    password: &PasswordArgs,
) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let mut session = ctx.open(&mut hooks)?;

    let update = SiteUpdate {
        password: site_password(password, name)?.map(|(pw, _)| pw.to_string()),
        set_fields,
        delete_fields,
        add_tags,
        delete_tags,
    };
    if update.is_empty() {
        output::dimmed("nothing to change");
        return Ok(());
    }

    session.registry_mut().set(name, update, &mut hooks)?;
    session.commit(&mut hooks)?;

    output::success(&format!("updated {}", output::name(name)));
    Ok(())
}
