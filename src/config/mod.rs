mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "./config.toml",
    "./reelshelf.toml",
    "~/.config/reelshelf/config.toml",
    "/etc/reelshelf/config.toml",
];

/// Load and validate configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let config = load_config_unvalidated(path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration without validating it.
///
/// Callers that apply overrides (CLI flags) validate the merged result with
/// [`validate_config`] afterwards.
pub fn load_config_unvalidated(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    prepare_library(&mut config.library);

    Ok(config)
}

/// The config file to use: `custom_path` if given, else the first default
/// location that exists.
pub fn find_config(custom_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = custom_path {
        return Some(path.to_path_buf());
    }

    DEFAULT_CONFIG_PATHS
        .iter()
        .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
        .find(|p| p.exists())
}

/// Load config from [`find_config`] or return the default config.
///
/// The result is not validated.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    match find_config(custom_path) {
        Some(path) => {
            tracing::debug!("Using config file {:?}", path);
            load_config_unvalidated(&path)
        }
        None => Ok(Config::default()),
    }
}

/// Replace the configured scan roots, e.g. with directories given on the
/// command line.
pub fn override_directories(config: &mut Config, directories: Vec<PathBuf>) {
    if directories.is_empty() {
        return;
    }
    config.library.directories = directories;
    prepare_library(&mut config.library);
}

/// Expand `~` in scan roots and canonicalize extension spelling.
fn prepare_library(library: &mut LibraryConfig) {
    library.directories = library
        .directories
        .iter()
        .map(|dir| PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).as_ref()))
        .collect();

    let set = library.extension_set();
    library.video_extensions = set.video().map(str::to_string).collect();
    library.image_extensions = set.image().map(str::to_string).collect();
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let set = config.library.extension_set();
    if set.video().next().is_none() {
        anyhow::bail!("At least one video extension must be configured");
    }
    if set.image().next().is_none() {
        anyhow::bail!("At least one image extension must be configured");
    }

    let overlap = set.overlap();
    if !overlap.is_empty() {
        anyhow::bail!(
            "Extensions configured as both video and image: {}",
            overlap.join(", ")
        );
    }

    // Missing roots are skipped at scan time
    for dir in &config.library.directories {
        if !dir.exists() {
            tracing::warn!("Library directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}
