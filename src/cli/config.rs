//! Config commands: init, show.

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::config::{self, Settings};
use crate::error::{ConfigError, Result};

/// Write a settings file with default values.
pub fn init(force: bool) -> Result<()> {
    let data_dir = config::data_dir()?;
    let path = Settings::path(&data_dir);

    if path.exists() && !force {
        output::warn(&format!("{} already exists", output::path(path.display())));
        output::hint("use --force to overwrite");
        return Ok(());
    }

    Settings::default().save(&data_dir)?;
    output::success(&format!("wrote {}", output::path(path.display())));
    Ok(())
}

/// Show the effective settings.
pub fn show(profile: Option<String>) -> Result<()> {
    let ctx = Context::load(profile)?;

    output::kv("data dir", ctx.data_dir.display());
    output::kv("profile", &ctx.profile);
    output::rule();
    let rendered = toml::to_string_pretty(&ctx.settings).map_err(ConfigError::Serialize)?;
    output::data(rendered.trim_end());
    Ok(())
}
