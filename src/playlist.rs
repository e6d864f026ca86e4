//! Playlist building on top of the similarity engine.
//!
//! A playlist is an ordered list of catalog positions: the seed first, then
//! repeated greedy nearest-unused-neighbor steps. The walk is pure and
//! deterministic, so the same catalog and seed always produce the same
//! playlist.

use crate::catalog::Catalog;
use crate::similarity::SimilarityEngine;
use serde::Serialize;
use std::collections::HashSet;

/// Build a playlist of at most `max_extra + 1` positions starting at `seed`.
///
/// Each step asks the engine for the unused position most similar to the
/// last entry and appends it; the walk stops early once every other catalog
/// position has been used. The result never repeats a position — the
/// used-set grows every step, so the walk makes forward progress even when
/// the whole catalog shares one feature vector.
#[must_use]
pub fn build_playlist(engine: &SimilarityEngine, seed: usize, max_extra: usize) -> Vec<usize> {
    let mut positions = vec![seed];
    let mut used: HashSet<usize> = HashSet::from([seed]);

    for _ in 0..max_extra {
        let last = *positions.last().unwrap_or(&seed);
        match engine.next_candidate(last, &used) {
            Some(next) => {
                used.insert(next);
                positions.push(next);
            }
            None => break,
        }
    }

    positions
}

/// One rendered playlist row, ready for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistEntry {
    /// Catalog position of the song.
    pub position: usize,
    pub name: String,
    pub artists: String,
    /// Duration as `m:ss`.
    pub duration: String,
    pub album_image_url: String,
    pub spotify_url: String,
    /// Similarity to the preceding entry; absent on the seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// Resolve positions into display entries, annotating each follow-up with
/// its similarity to the entry before it.
#[must_use]
pub fn resolve_entries(
    catalog: &Catalog,
    engine: &SimilarityEngine,
    positions: &[usize],
) -> Vec<PlaylistEntry> {
    positions
        .iter()
        .enumerate()
        .filter_map(|(i, &position)| {
            let song = catalog.get(position)?;
            let similarity = if i == 0 {
                None
            } else {
                engine.similarity(positions[i - 1], position)
            };
            Some(PlaylistEntry {
                position,
                name: song.name.clone(),
                artists: song.artists.clone(),
                duration: song.duration_display(),
                album_image_url: song.album_image_url.clone(),
                spotify_url: song.spotify_url(),
                similarity,
            })
        })
        .collect()
}
