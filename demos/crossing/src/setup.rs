//! Turn command-line options into a validated `SimConfig`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use gw_core::{SimConfig, SimRng};
use gw_world::{load_roster_csv, scatter};

use crate::Cli;

/// Parse a TOML config file.
pub fn load_config_file(path: &Path) -> Result<SimConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<SimConfig> {
    Ok(toml::from_str(contents)?)
}

/// Start from `--config` (or the built-in crossing scenario), then apply
/// `--seed` and replace the roster from `--roster` or `--scatter`.
pub fn build_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => SimConfig::crossing(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if let Some(path) = &cli.roster {
        config.agents = load_roster_csv(path)
            .with_context(|| format!("loading roster {}", path.display()))?;
        config.agent_count = config.agents.len();
        info!(agents = config.agent_count, roster = %path.display(), "loaded roster");
    } else if let Some(count) = cli.scatter {
        let mut rng = SimRng::new(config.seed);
        config.agents = scatter(count, config.field_size, &mut rng)?;
        config.agent_count = count;
        info!(agents = count, seed = config.seed, "scattered agents");
    }

    config.validate()?;
    Ok(config)
}
