//! Acoustic song recommendations over a fixed catalog.
//!
//! Core modules:
//! - [`catalog`] - Catalog loading, filtering, and name lookup
//! - [`similarity`] - Feature standardization and the similarity matrix
//! - [`playlist`] - Greedy playlist building on top of the engine
//!
//! ### Supporting Modules
//!
//! - [`song`] - The song record and its display helpers
//! - [`error`] - Typed library errors
//! - [`config`] - Configuration and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation for enhanced UX
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use attune::{catalog::Catalog, playlist, similarity::SimilarityEngine};
//! use std::path::Path;
//!
//! // Load the catalog once; it is immutable afterwards.
//! let catalog = Catalog::load(Path::new("catalog.csv"))?;
//!
//! // Build the similarity index (O(n²), done once per process).
//! let engine = SimilarityEngine::build(&catalog)?;
//!
//! // Resolve a seed and walk to its nearest unused neighbors.
//! let seed = catalog
//!     .find_by_name("Shape of You")
//!     .expect("song not in catalog");
//! let positions = playlist::build_playlist(&engine, seed, 5);
//!
//! for entry in playlist::resolve_entries(&catalog, &engine, &positions) {
//!     println!("{} by {} ({})", entry.name, entry.artists, entry.duration);
//! }
//! # Ok::<(), attune::error::Error>(())
//! ```
//!
//! ## Algorithm Details
//!
//! Attune recommends by acoustic feature similarity:
//!
//! - Danceability, energy, and tempo are standardized (zero mean, unit
//!   variance) with statistics computed once over the whole catalog, so
//!   scores stay comparable across queries.
//! - The full pairwise cosine-similarity matrix is computed up front; every
//!   later query is a read against it.
//! - Playlists are built greedily: each step appends the unused song most
//!   similar to the last one, with ties broken by catalog position so the
//!   same seed always yields the same playlist.
//!
//! ## Error Handling
//!
//! The library returns typed [`error::Error`] values (source unavailable,
//! missing column, insufficient data); the binary wraps them with
//! `anyhow` context. A failed name lookup is not an error — it is an
//! `Option::None` the caller presents as "song not found".
//!
//! ## Performance Characteristics
//!
//! - **Catalog load**: one pass over the source, O(n)
//! - **Matrix build**: O(n²) time and memory, rows computed in parallel
//! - **Playlist step**: one row scan, O(n log n) for the ranking sort
//!
//! The quadratic matrix is a deliberate scaling limit: callers wanting
//! bounded latency should cap catalog size before building the engine.

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod playlist;
pub mod similarity;
pub mod song;
