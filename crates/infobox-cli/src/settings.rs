//! Configuration loading

use anyhow::Context;
use infobox_core::SessionConfig;
use std::path::Path;

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--dry-run`
    pub dry_run: bool,
    /// `--state`
    pub state: Option<String>,
    /// `--summary`
    pub summary: Option<String>,
    /// `--operator`
    pub operator: Option<String>,
    /// `--relocate-shared-citations`
    pub relocate_shared_citations: bool,
}

/// Parse TOML configuration text
///
/// # Errors
/// Fails on malformed TOML or unknown value types.
pub fn parse_config(text: &str) -> anyhow::Result<SessionConfig> {
    toml::from_str(text).context("invalid session configuration")
}

/// Load configuration from `path`, or defaults without one, then apply `overrides`
///
/// # Errors
/// Fails if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> anyhow::Result<SessionConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading configuration from {}", path.display()))?;
            parse_config(&text)?
        }
        None => SessionConfig::default(),
    };

    if overrides.dry_run {
        config = config.with_dry_run(true);
    }
    if overrides.relocate_shared_citations {
        config = config.with_relocation(true);
    }
    if let Some(state) = overrides.state {
        config = config.with_state(state);
    }
    if let Some(summary) = overrides.summary {
        config = config.with_summary(summary);
    }
    if let Some(operator) = overrides.operator {
        config = config.with_operator(operator);
    }
    Ok(config)
}
