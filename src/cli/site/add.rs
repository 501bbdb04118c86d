//! Site add command.

use tracing::info;

use super::site_password;
use crate::cli::context::{self, Context};
use crate::cli::{output, PasswordArgs};
use crate::core::registry::AddSite;
use crate::core::types::{FieldName, FieldValue, Tag};
use crate::error::Result;

/// Add a site and save the profile.
pub fn execute(
    profile: Option<String>,
    name: String,
    fields: Vec<(FieldName, FieldValue)>,
    tags: Vec<Tag>,
    password: &PasswordArgs,
) -> Result<()> {
    info!(site = %name, "adding site");
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let mut session = ctx.open(&mut hooks)?;

    let password = site_password(password, &name)?;
    let generated = password.as_ref().is_some_and(|(_, generated)| *generated);
    let request = AddSite {
        name: name.clone(),
        password: password.map(|(pw, _)| pw.to_string()),
        fields,
        tags,
    };
    session.registry_mut().add(request, &mut hooks)?;
    session.commit(&mut hooks)?;

    output::success(&format!("added {}", output::name(&name)));
    if generated {
        output::hint(&format!("run: credkeep site get {} password --reveal", name));
    }
    Ok(())
}
