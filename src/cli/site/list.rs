//! Site list command.

use crate::cli::context::{self, Context};
use crate::cli::output;
use crate::core::registry::{ListQuery, PatternMode};
use crate::core::types::Tag;
use crate::error::Result;

/// List sites matching a pattern and tags.
pub fn execute(
    profile: Option<String>,
    pattern: String,
    tags: Vec<Tag>,
    mode: PatternMode,
    json: bool,
) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let session = ctx.open(&mut hooks)?;

    let query = ListQuery {
        pattern,
        tags,
        mode,
    };
    let matches = session.registry().list(&query, &mut hooks)?;

    if json {
        let result = serde_json::json!({
            "sites": matches,
            "count": matches.len(),
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if matches.is_empty() {
        output::dimmed("no matching sites");
    } else {
        for m in &matches {
            let name = output::highlight(&m.prefix, &m.matched, &m.suffix);
            if m.tags.is_empty() {
                output::data(&name);
            } else {
                output::data(&format!("{}  {}", name, output::tags(&m.tags)));
            }
        }
    }
    Ok(())
}
