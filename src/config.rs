//! Configuration and data directory management.
//!
//! The weight tables are process-wide named configuration: they default to
//! the tuned literal values in [`crate::algorithm`] but can be overridden
//! from a JSON file, either passed explicitly on the command line or placed
//! at the platform-standard location:
//!
//! - Linux: `~/.config/segue/weights.json`
//! - macOS: `~/Library/Application Support/segue/weights.json`
//! - Windows: `%APPDATA%\segue\weights.json`
//!
//! Override files may be partial; unspecified weights keep their defaults.

use crate::algorithm::ScoringContext;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the platform-appropriate weights file path.
///
/// Creates the `segue` subdirectory if it doesn't exist so a user can drop
/// a `weights.json` straight in. The file itself is not created.
///
/// # Errors
///
/// Returns an error if the system config directory cannot be determined or
/// the subdirectory cannot be created.
pub fn get_weights_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Please ensure your platform supports standard config directories."
        )
    })?;

    let segue_dir = config_dir.join("segue");
    fs::create_dir_all(&segue_dir).with_context(|| {
        format!(
            "Failed to create Segue config directory at {}. Please check file permissions.",
            segue_dir.display()
        )
    })?;

    Ok(segue_dir.join("weights.json"))
}

/// Loads the scoring context, applying any weight overrides.
///
/// Resolution order: an explicitly supplied file (which must exist), then
/// the platform-standard weights file if present, then the built-in
/// defaults.
///
/// # Errors
///
/// Returns an error if an explicit file cannot be read or parsed. A missing
/// file at the standard location is not an error.
pub fn load_scoring_context(explicit: Option<&Path>) -> Result<ScoringContext> {
    if let Some(path) = explicit {
        return read_weights_file(path);
    }

    match get_weights_path() {
        Ok(path) if path.exists() => read_weights_file(&path),
        _ => Ok(ScoringContext::default()),
    }
}

fn read_weights_file(path: &Path) -> Result<ScoringContext> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights file at {}", path.display()))?;

    let context: ScoringContext = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse weights file at {}", path.display()))?;

    log::info!("Loaded weight overrides from {}", path.display());
    Ok(context)
}
