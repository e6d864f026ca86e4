//! The song record as it exists after catalog admission.
//!
//! Every field here is guaranteed present: rows with gaps never make it past
//! [`crate::catalog::Catalog::load`]. The derived `name_key` is computed once
//! at load time and backs the case-insensitive lookup index.

use serde::Serialize;

/// One admitted catalog entry and its acoustic features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    /// Track title as it appears in the source.
    pub name: String,
    /// Artist name(s), single display string.
    pub artists: String,
    /// Track duration in milliseconds.
    pub duration_ms: u64,
    /// Danceability, expected range [0, 1].
    pub danceability: f64,
    /// Energy, expected range [0, 1].
    pub energy: f64,
    /// Tempo in beats per minute.
    pub tempo: f64,
    /// Album cover URL, passed through untouched.
    pub album_image_url: String,
    /// Opaque `scheme:type:id` identifier.
    pub track_uri: String,
    /// Lowercased track name, the lookup key.
    #[serde(skip)]
    pub name_key: String,
}

impl Song {
    /// Duration rendered as `m:ss`, the way the playlist view shows it.
    #[must_use]
    pub fn duration_display(&self) -> String {
        let minutes = self.duration_ms / 60_000;
        let seconds = (self.duration_ms % 60_000) / 1_000;
        format!("{minutes}:{seconds:02}")
    }

    /// Playback link built from the trailing segment of the track URI.
    ///
    /// The URI is treated as opaque otherwise; a URI without separators
    /// yields a link built from the whole string.
    #[must_use]
    pub fn spotify_url(&self) -> String {
        let id = self.track_uri.rsplit(':').next().unwrap_or(&self.track_uri);
        format!("https://open.spotify.com/track/{id}")
    }

    /// The three acoustic features used for similarity, in index order.
    #[must_use]
    pub fn features(&self) -> [f64; 3] {
        [self.danceability, self.energy, self.tempo]
    }
}
