//! Typed errors for catalog loading and engine construction.
//!
//! The binary wraps these in `anyhow` context before showing them to the
//! user; the library keeps them typed so callers can distinguish "the
//! catalog file is gone" from "the catalog is too small to recommend from".

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The catalog source could not be opened or read at all.
    #[error("catalog source unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The catalog source opened fine but its header lacks a required column.
    #[error("catalog source is missing required column `{0}`")]
    MissingColumn(String),

    /// Fewer than two valid records survived filtering. Similarity over a
    /// single point is undefined for this system, so we fail fast instead of
    /// producing a degenerate one-song "playlist".
    #[error("catalog has {0} usable record(s), need at least 2 to recommend")]
    InsufficientData(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
