use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;

use super::raw::RawSettings;
use super::resolved::Settings;
use crate::cli::CliArgs;

/// Load settings by combining CLI arguments, the config file and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<Settings> {
    let builder = build_config(cli)?;
    let mut raw: RawSettings = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<config::Config> {
    let mut builder = config::Config::builder();

    if let Some(path) = &cli.config {
        builder = builder.add_source(config::File::from(path.clone()));
    } else if let Some(dirs) = ProjectDirs::from("", "", "mcfetch") {
        let path = dirs.config_dir().join("config.toml");
        builder = builder.add_source(config::File::from(path).required(false));
    }

    builder = builder.add_source(config::Environment::with_prefix("MCFETCH"));
    builder.build().context("failed to load configuration sources")
}
