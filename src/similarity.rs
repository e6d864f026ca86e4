//! Feature standardization and the song similarity engine.
//!
//! The engine is built once over the loaded catalog: the three acoustic
//! features are standardized with catalog-wide statistics, then the full
//! pairwise cosine-similarity matrix is computed. Both memory and build time
//! are O(n²) in catalog size; callers wanting bounded latency cap the catalog
//! before calling [`SimilarityEngine::build`].
//!
//! Standardization deliberately uses the whole-catalog mean and standard
//! deviation, computed once. Per-query statistics would make scores
//! incomparable across calls.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::song::Song;
use log::debug;
use rayon::prelude::*;
use std::collections::HashSet;

/// Number of acoustic features per song (danceability, energy, tempo).
pub const FEATURE_DIM: usize = 3;

/// Catalog-wide standardization parameters, fitted once.
///
/// A feature with zero spread gets divisor 1.0 rather than 0, so constant
/// columns standardize to all-zeros instead of NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureScaler {
    means: [f64; FEATURE_DIM],
    stds: [f64; FEATURE_DIM],
}

impl FeatureScaler {
    /// Fit mean and population standard deviation over every song.
    #[must_use]
    pub fn fit(songs: &[Song]) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let n = songs.len() as f64;

        let mut means = [0.0; FEATURE_DIM];
        for song in songs {
            for (mean, value) in means.iter_mut().zip(song.features()) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= n;
        }

        let mut stds = [0.0; FEATURE_DIM];
        for song in songs {
            for ((std, value), mean) in stds.iter_mut().zip(song.features()).zip(means) {
                *std += (value - mean).powi(2);
            }
        }
        for std in &mut stds {
            *std = (*std / n).sqrt();
            if *std == 0.0 {
                *std = 1.0;
            }
        }

        Self { means, stds }
    }

    /// Standardize one song's features with the fitted statistics.
    #[must_use]
    pub fn transform(&self, song: &Song) -> [f64; FEATURE_DIM] {
        let mut out = song.features();
        for ((value, mean), std) in out.iter_mut().zip(self.means).zip(self.stds) {
            *value = (*value - mean) / std;
        }
        out
    }
}

/// Cosine similarity of two standardized feature vectors.
///
/// Zero-norm vectors (possible when every feature is constant) get 0.0
/// against everything, matching what the matrix builder expects.
fn cosine_similarity(a: &[f64; FEATURE_DIM], b: &[f64; FEATURE_DIM]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// The fixed-catalog similarity engine.
///
/// Holds the full pairwise similarity matrix, keyed by catalog position.
/// Read-only after [`build`](Self::build); all query operations are pure
/// functions of the matrix and their inputs, so the engine is safe to share
/// across concurrent readers.
#[derive(Debug)]
pub struct SimilarityEngine {
    matrix: Vec<Vec<f64>>,
}

impl SimilarityEngine {
    /// Standardize the catalog's features and compute the similarity matrix.
    ///
    /// Rows are computed in parallel; each row is a pure function of the
    /// standardized vectors, so the result is deterministic regardless of
    /// thread scheduling. The diagonal is pinned to exactly 1.0.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`] when the catalog holds fewer than two
    /// records. Similarity over a single point is undefined here, so the
    /// engine refuses to build rather than hand back degenerate answers.
    pub fn build(catalog: &Catalog) -> Result<Self> {
        if catalog.len() < 2 {
            return Err(Error::InsufficientData(catalog.len()));
        }

        let scaler = FeatureScaler::fit(catalog.songs());
        let vectors: Vec<[f64; FEATURE_DIM]> = catalog
            .songs()
            .iter()
            .map(|song| scaler.transform(song))
            .collect();

        let mut matrix: Vec<Vec<f64>> = vectors
            .par_iter()
            .map(|row_vector| {
                vectors
                    .iter()
                    .map(|other| cosine_similarity(row_vector, other))
                    .collect()
            })
            .collect();
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        debug!("Built {0}x{0} similarity matrix", catalog.len());
        Ok(Self { matrix })
    }

    /// Number of catalog positions the matrix covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Similarity between two positions, if both are valid.
    #[must_use]
    pub fn similarity(&self, a: usize, b: usize) -> Option<f64> {
        self.matrix.get(a)?.get(b).copied()
    }

    /// Greedy selection: the unused position most similar to `current`.
    ///
    /// Positions are ranked by descending similarity to `current`; ties fall
    /// back to ascending catalog position (the stable sort keeps the original
    /// ascending order among equals), which keeps playlists reproducible even
    /// when many songs share identical feature vectors. The first ranked
    /// position that is neither `current` nor in `used` is returned, or
    /// `None` once every other position has been used.
    ///
    /// Pure function of the matrix and its inputs; `used` is expected to
    /// already contain `current`.
    #[must_use]
    pub fn next_candidate(&self, current: usize, used: &HashSet<usize>) -> Option<usize> {
        let row = self.matrix.get(current)?;

        let mut ranked: Vec<usize> = (0..row.len()).collect();
        ranked.sort_by(|&a, &b| {
            row[b]
                .partial_cmp(&row[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked
            .into_iter()
            .find(|&candidate| candidate != current && !used.contains(&candidate))
    }
}
