use sqlseed_import::display::{dimmed, emphasis, success};

use super::Context;
use crate::error::CliError;
use crate::settings::settings_path;

/// Show the effective settings and where the file lives.
pub(crate) fn run_config_show(ctx: &Context) -> Result<(), CliError> {
    let config = &ctx.config;
    let path = settings_path();

    log::info!("{}", emphasis(config, "sqlseed Configuration"));
    log::info!("");
    if path.exists() {
        log::info!("  Settings file: {} {}", path.display(), success(config, "(exists)"));
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display(),
            dimmed(config, "(not found, using defaults)")
        );
    }

    let database = match (&ctx.database, &ctx.settings.database) {
        (Some(flag), _) => format!("{} {}", flag.display(), dimmed(config, "(--database)")),
        (None, Some(saved)) => format!("{} {}", saved.display(), dimmed(config, "(settings)")),
        (None, None) => dimmed(config, "(not set)"),
    };
    log::info!("  Database:      {}", database);
    log::info!("");

    let rendered = toml::to_string_pretty(&ctx.settings)
        .map_err(|e| CliError::config(format!("cannot render settings: {e}")))?;
    for line in rendered.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}
