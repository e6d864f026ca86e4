//! Catalog loading and case-insensitive track lookup.
//!
//! The catalog is read once from a delimited source, filtered, and frozen:
//! there is no insert/update/delete surface, and positions handed out here
//! stay valid for the life of the process. The lowercase-name index is built
//! at load time so lookup never scans the whole table.

use crate::error::{Error, Result};
use crate::song::Song;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Header columns the source must carry, exactly as named.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Track Name",
    "Artist Name(s)",
    "Track Duration (ms)",
    "Danceability",
    "Energy",
    "Tempo",
    "Album Image URL",
    "Track URI",
];

/// One raw source row before admission. Every field is optional here; an
/// empty cell deserializes to `None` and disqualifies the row.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Track Name")]
    track_name: Option<String>,
    #[serde(rename = "Artist Name(s)")]
    artists: Option<String>,
    #[serde(rename = "Track Duration (ms)")]
    duration_ms: Option<u64>,
    #[serde(rename = "Danceability")]
    danceability: Option<f64>,
    #[serde(rename = "Energy")]
    energy: Option<f64>,
    #[serde(rename = "Tempo")]
    tempo: Option<f64>,
    #[serde(rename = "Album Image URL")]
    album_image_url: Option<String>,
    #[serde(rename = "Track URI")]
    track_uri: Option<String>,
}

impl RawRow {
    /// Admit the row if every required value is present.
    ///
    /// A literal `NaN`/`inf` token parses as a float but is still a missing
    /// measurement: one non-finite value would poison the catalog-wide
    /// mean/std and with it the whole similarity matrix, so those rows are
    /// excluded the same way empty cells are.
    fn admit(self) -> Option<Song> {
        let name = self.track_name?;
        let name_key = name.to_lowercase();
        Some(Song {
            name,
            artists: self.artists?,
            duration_ms: self.duration_ms?,
            danceability: self.danceability.filter(|v| v.is_finite())?,
            energy: self.energy.filter(|v| v.is_finite())?,
            tempo: self.tempo.filter(|v| v.is_finite())?,
            album_image_url: self.album_image_url?,
            track_uri: self.track_uri?,
            name_key,
        })
    }
}

/// Immutable, position-indexed song catalog.
///
/// Positions are 0-based and assigned in surviving-row order at load time.
/// Both the song table and the name index are read-only after construction,
/// so a `Catalog` is safe to share across any number of concurrent readers.
#[derive(Debug)]
pub struct Catalog {
    songs: Vec<Song>,
    by_name: HashMap<String, Vec<usize>>,
}

impl Catalog {
    /// Load the catalog from a CSV source.
    ///
    /// Rows with an empty value in any required column are dropped silently
    /// (the drop count is logged at debug level). Positions are assigned by
    /// surviving-row order.
    ///
    /// # Errors
    ///
    /// * [`Error::SourceUnavailable`] if the source cannot be opened or its
    ///   header cannot be read.
    /// * [`Error::MissingColumn`] if the header lacks a required column.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|source| {
            Error::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let headers = reader
            .headers()
            .map_err(|source| Error::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn(column.to_string()));
            }
        }

        let mut songs = Vec::new();
        let mut dropped = 0usize;
        for row in reader.deserialize::<RawRow>() {
            match row {
                Ok(raw) => match raw.admit() {
                    Some(song) => songs.push(song),
                    None => dropped += 1,
                },
                Err(err) => {
                    // Unparseable rows get the same treatment as incomplete
                    // ones: excluded, not fatal.
                    warn!("Skipping malformed catalog row: {err}");
                    dropped += 1;
                }
            }
        }

        debug!(
            "Loaded {} songs from {} ({} row(s) dropped for missing values)",
            songs.len(),
            path.display(),
            dropped
        );

        Ok(Self::from_songs(songs))
    }

    /// Build a catalog from already-admitted songs, indexing by `name_key`.
    /// Entry point for tests and benchmarks that sidestep the CSV layer.
    #[must_use]
    pub fn from_songs(songs: Vec<Song>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, song) in songs.iter().enumerate() {
            by_name
                .entry(song.name_key.clone())
                .or_default()
                .push(position);
        }
        Self { songs, by_name }
    }

    /// Case-insensitive exact-match lookup.
    ///
    /// Returns the first catalog position whose track name matches, or
    /// `None` when nothing matches. Duplicate names resolve to the earliest
    /// surviving row; no fuzzy or partial matching is attempted.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|positions| positions.first().copied())
    }

    /// Song at `position`, if the position is valid.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Song> {
        self.songs.get(position)
    }

    /// All songs in position order.
    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
