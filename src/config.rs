//! # Configuration Module
//!
//! Handles the default catalog location and data directory setup for Attune.
//! The catalog itself is a plain CSV file; Attune never writes to it, only
//! reads it once per invocation.
//!
//! ## Data Storage
//!
//! The default catalog lives in the platform-standard data directory:
//! - Linux: `~/.local/share/attune/catalog.csv`
//! - macOS: `~/Library/Application Support/attune/catalog.csv`
//! - Windows: `%APPDATA%\attune\catalog.csv`
//!
//! Any command accepts `--catalog <path>` (or `ATTUNE_CATALOG`) to point at a
//! different file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Returns the platform-appropriate default catalog file path.
///
/// Locates the standard data directory for the current platform and creates
/// the `attune` subdirectory if it doesn't exist, so a first run can drop a
/// catalog file straight in.
///
/// # Errors
///
/// Fails when the system data directory cannot be determined, or the
/// `attune` subdirectory cannot be created (permissions, read-only fs).
pub fn get_catalog_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("catalog.csv"))
}

/// Returns the platform-appropriate data directory for Attune, creating it
/// when missing.
///
/// # Errors
///
/// Same failure modes as [`get_catalog_path`].
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let attune_dir = data_dir.join("attune");
    fs::create_dir_all(&attune_dir).with_context(|| {
        format!(
            "Failed to create Attune data directory at {}. Please check file permissions.",
            attune_dir.display()
        )
    })?;

    Ok(attune_dir)
}

/// Configuration for runtime behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Path to the catalog CSV file.
    pub catalog_path: PathBuf,
    /// How many songs a playlist adds beyond the seed.
    pub playlist_length: usize,
}

/// Default number of recommendations after the seed.
pub const DEFAULT_PLAYLIST_LENGTH: usize = 5;

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_path: get_catalog_path().unwrap_or_else(|_| PathBuf::from("catalog.csv")),
            playlist_length: DEFAULT_PLAYLIST_LENGTH,
        }
    }
}

impl RuntimeConfig {
    /// Create a runtime configuration rooted at the default data directory.
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog_path: get_catalog_path()?,
            playlist_length: DEFAULT_PLAYLIST_LENGTH,
        })
    }

    /// Create configuration with an explicit catalog path.
    #[must_use]
    pub fn with_catalog_path(catalog_path: PathBuf) -> Self {
        Self {
            catalog_path,
            playlist_length: DEFAULT_PLAYLIST_LENGTH,
        }
    }
}
