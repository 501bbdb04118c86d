//! Site get command.

use crate::cli::context::{self, Context};
use crate::cli::{clipboard, output};
use crate::core::domain::Retrieval;
use crate::core::registry::FieldQuery;
use crate::core::types::FieldName;
use crate::error::Result;

/// Show or copy fields of a site.
///
/// Sensitive fields are masked unless `reveal` is set.
pub fn execute(
    profile: Option<String>,
    name: &str,
    fields: Vec<FieldName>,
    tags: bool,
    copy: bool,
    reveal: bool,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let session = ctx.open(&mut hooks)?;

    let query = FieldQuery { fields, tags, copy };
    match session.registry().get(name, &query, &mut hooks)? {
        Retrieval::Clipboard { field, value } => {
            let tool = clipboard::copy(&value)?;
            output::success(&format!("copied {} of {} ({})", field, output::name(name), tool));
        }
        Retrieval::Fields(mut view) => {
            if !reveal {
                for field in view.fields.iter_mut().filter(|f| f.sensitive) {
                    field.value = output::MASK.to_string();
                }
            }

            if json {
                output::data(&serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            output::header(&view.site);
            for field in &view.fields {
                output::kv(&field.name, &field.value);
            }
            if let Some(tags) = &view.tags {
                output::kv("tags", output::tags(tags));
            }
        }
    }
    Ok(())
}
