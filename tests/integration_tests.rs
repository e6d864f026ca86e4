//! # Integration Tests for Attune
//!
//! End-to-end tests covering the full pipeline from a CSV catalog source to
//! a rendered playlist, plus CLI smoke tests from a user perspective.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const HEADER: &str = "Track Name,Artist Name(s),Track Duration (ms),Danceability,Energy,Tempo,Album Image URL,Track URI";

/// Test helper to create a temporary catalog with sample data.
///
/// Contains the A/B/C trio (A and B acoustically identical, C distant),
/// two extra songs, and one defective row missing its Energy value.
fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let catalog_path = temp_dir.path().join("test_catalog.csv");

    let rows = [
        HEADER,
        "Alpha,Artist One,201000,0.5,0.5,100,https://img.example/a,spotify:track:alpha1",
        "Beta,Artist Two,183000,0.5,0.5,100,https://img.example/b,spotify:track:beta22",
        "Gamma,Artist Three,240000,0.9,0.1,180,https://img.example/c,spotify:track:gamma3",
        "Broken,Artist Four,150000,0.4,,90,https://img.example/d,spotify:track:brok44",
        "Delta,Artist Five,222000,0.6,0.4,110,https://img.example/e,spotify:track:delta5",
        "Epsilon,Artist Six,199000,0.2,0.8,140,https://img.example/f,spotify:track:epsi66",
    ];
    fs::write(&catalog_path, rows.join("\n"))?;

    Ok((temp_dir, catalog_path))
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help_displays_correctly() {
        let output = Command::new("cargo")
            .args(["run", "--", "--help"])
            .output()
            .expect("Failed to run help command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("attune"));
        assert!(stdout.contains("recommend"));
        assert!(stdout.contains("info"));
        assert!(stdout.contains("list"));
        assert!(stdout.contains("completion"));
    }

    #[test]
    fn test_cli_version_flag() {
        let output = Command::new("cargo")
            .args(["run", "--", "--version"])
            .output()
            .expect("Failed to run version command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("attune"));
    }

    #[test]
    fn test_completion_generation() {
        let output = Command::new("cargo")
            .args(["run", "--", "completion", "bash"])
            .output()
            .expect("Failed to run completion command");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("_attune"));
        assert!(stdout.contains("complete"));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_completion_works_without_writable_data_dir() {
        // Point the data directory somewhere that can never be created.
        // Completion-script generation reads no catalog and must still work.
        let output = Command::new("cargo")
            .args(["run", "--", "completion", "bash"])
            .env("XDG_DATA_HOME", "/dev/null/xdg")
            .output()
            .expect("Failed to run completion command");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("_attune"));

        // Sanity check: the same environment does break commands that need
        // the default catalog path.
        let output = Command::new("cargo")
            .args(["run", "--", "list"])
            .env("XDG_DATA_HOME", "/dev/null/xdg")
            .output()
            .expect("Failed to run list command");
        assert!(!output.status.success());
    }

    #[test]
    fn test_recommend_command_end_to_end() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;

        let output = Command::new("cargo")
            .args([
                "run",
                "--",
                "--catalog",
                &catalog_path.to_string_lossy(),
                "recommend",
                "Alpha",
                "--length",
                "2",
            ])
            .output()
            .expect("Failed to run recommend command");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Now Playing:"));
        assert!(stdout.contains("Alpha"));
        assert!(stdout.contains("Up Next:"));
        // Beta is acoustically identical to Alpha and must come first.
        let beta = stdout.find("Beta").expect("Beta recommended");
        assert!(stdout[beta..].contains("by Artist Two"));
        assert!(stdout.contains("https://open.spotify.com/track/alpha1"));

        Ok(())
    }

    #[test]
    fn test_recommend_json_output_is_parseable() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;

        let output = Command::new("cargo")
            .args([
                "run",
                "--",
                "--catalog",
                &catalog_path.to_string_lossy(),
                "recommend",
                "alpha",
                "--length",
                "3",
                "--json",
            ])
            .output()
            .expect("Failed to run recommend command");

        assert!(output.status.success());
        let entries: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        let entries = entries.as_array().expect("JSON array");
        assert_eq!(entries.len(), 4); // seed + 3
        assert_eq!(entries[0]["name"], "Alpha");
        assert!(entries[0].get("similarity").is_none());
        assert!(entries[1]["similarity"].is_number());

        Ok(())
    }

    #[test]
    fn test_unknown_song_is_reported_not_crashed() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;

        let output = Command::new("cargo")
            .args([
                "run",
                "--",
                "--catalog",
                &catalog_path.to_string_lossy(),
                "recommend",
                "No Such Song",
            ])
            .output()
            .expect("Failed to run recommend command");

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Song not found"));

        Ok(())
    }

    #[test]
    fn test_list_command_excludes_dropped_rows() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;

        let output = Command::new("cargo")
            .args([
                "run",
                "--",
                "--catalog",
                &catalog_path.to_string_lossy(),
                "list",
            ])
            .output()
            .expect("Failed to run list command");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Alpha"));
        assert!(stdout.contains("Epsilon"));
        assert!(!stdout.contains("Broken"));

        Ok(())
    }
}

#[cfg(test)]
mod catalog_integration_tests {
    use super::*;
    use attune::catalog::Catalog;
    use attune::error::Error;

    #[test]
    fn test_catalog_load_and_filtering() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;

        let catalog = Catalog::load(&catalog_path)?;
        // 6 data rows, one missing Energy: 5 survive.
        assert_eq!(catalog.len(), 5);
        assert!(catalog.find_by_name("Broken").is_none());

        // Positions follow surviving-row order.
        assert_eq!(catalog.get(0).unwrap().name, "Alpha");
        assert_eq!(catalog.get(3).unwrap().name, "Delta");

        Ok(())
    }

    #[test]
    fn test_case_insensitive_lookup() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let catalog = Catalog::load(&catalog_path)?;

        assert_eq!(
            catalog.find_by_name("Alpha"),
            catalog.find_by_name("alpha")
        );
        assert_eq!(
            catalog.find_by_name("ALPHA"),
            catalog.find_by_name("aLpHa")
        );
        assert!(catalog.find_by_name("Alpha").is_some());

        Ok(())
    }

    #[test]
    fn test_missing_source_is_source_unavailable() {
        let err = Catalog::load(std::path::Path::new("/no/such/catalog.csv")).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }
}

#[cfg(test)]
mod engine_integration_tests {
    use super::*;
    use attune::catalog::Catalog;
    use attune::error::Error;
    use attune::similarity::SimilarityEngine;

    #[test]
    fn test_matrix_properties_on_loaded_catalog() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let catalog = Catalog::load(&catalog_path)?;
        let engine = SimilarityEngine::build(&catalog)
            .expect("catalog has enough records");

        assert_eq!(engine.len(), catalog.len());
        for i in 0..engine.len() {
            assert!((engine.similarity(i, i).unwrap() - 1.0).abs() < 1e-12);
            for j in 0..engine.len() {
                let ij = engine.similarity(i, j).unwrap();
                assert!((ij - engine.similarity(j, i).unwrap()).abs() < 1e-12);
            }
        }

        Ok(())
    }

    #[test]
    fn test_insufficient_data_on_tiny_source() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let catalog_path = temp_dir.path().join("tiny.csv");
        fs::write(
            &catalog_path,
            format!("{HEADER}\nOnly,Artist,200000,0.5,0.5,100,https://img.example/o,spotify:track:only77"),
        )?;

        let catalog = Catalog::load(&catalog_path)?;
        assert_eq!(catalog.len(), 1);
        assert!(matches!(
            SimilarityEngine::build(&catalog),
            Err(Error::InsufficientData(1))
        ));

        Ok(())
    }
}

#[cfg(test)]
mod playlist_integration_tests {
    use super::*;
    use attune::catalog::Catalog;
    use attune::playlist;
    use attune::similarity::SimilarityEngine;
    use std::collections::HashSet;

    #[test]
    fn test_playlist_is_deterministic_across_rebuilds() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;

        let mut runs = Vec::new();
        for _ in 0..2 {
            let catalog = Catalog::load(&catalog_path)?;
            let engine = SimilarityEngine::build(&catalog).expect("build");
            let seed = catalog.find_by_name("gamma").expect("seed");
            runs.push(playlist::build_playlist(&engine, seed, 4));
        }
        assert_eq!(runs[0], runs[1]);

        Ok(())
    }

    #[test]
    fn test_playlist_exhausts_without_repeats() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let catalog = Catalog::load(&catalog_path)?;
        let engine = SimilarityEngine::build(&catalog).expect("build");

        for seed in 0..catalog.len() {
            let positions = playlist::build_playlist(&engine, seed, catalog.len() + 10);
            assert!(positions.len() <= catalog.len());
            let unique: HashSet<usize> = positions.iter().copied().collect();
            assert_eq!(unique.len(), positions.len());
            assert_eq!(positions[0], seed);
        }

        Ok(())
    }

    #[test]
    fn test_identical_songs_rank_before_distant_ones() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let catalog = Catalog::load(&catalog_path)?;
        let engine = SimilarityEngine::build(&catalog).expect("build");

        let alpha = catalog.find_by_name("Alpha").expect("seed");
        let beta = catalog.find_by_name("Beta").expect("beta");
        let positions = playlist::build_playlist(&engine, alpha, 4);

        // Beta shares Alpha's exact feature vector and must be picked first.
        assert_eq!(positions[1], beta);

        Ok(())
    }

    #[test]
    fn test_resolved_entries_carry_display_fields() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let catalog = Catalog::load(&catalog_path)?;
        let engine = SimilarityEngine::build(&catalog).expect("build");

        let seed = catalog.find_by_name("Alpha").expect("seed");
        let positions = playlist::build_playlist(&engine, seed, 2);
        let entries = playlist::resolve_entries(&catalog, &engine, &positions);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Alpha");
        assert_eq!(entries[0].duration, "3:21");
        assert_eq!(
            entries[0].spotify_url,
            "https://open.spotify.com/track/alpha1"
        );
        assert!(entries[0].similarity.is_none());
        assert!(entries.iter().skip(1).all(|e| e.similarity.is_some()));

        Ok(())
    }
}

#[cfg(test)]
mod configuration_tests {
    use attune::config;
    use std::path::PathBuf;

    #[test]
    fn test_catalog_path_generation() -> anyhow::Result<()> {
        let catalog_path = config::get_catalog_path()?;

        assert!(catalog_path.is_absolute());
        assert!(catalog_path.to_string_lossy().ends_with("catalog.csv"));
        assert!(catalog_path.parent().is_some());

        Ok(())
    }

    #[test]
    fn test_data_directory_creation() -> anyhow::Result<()> {
        let data_dir = config::get_data_dir()?;

        assert!(data_dir.exists());
        assert!(data_dir.is_dir());
        assert!(data_dir.is_absolute());

        Ok(())
    }

    #[test]
    fn test_runtime_config_creation() -> anyhow::Result<()> {
        let config = config::RuntimeConfig::new()?;
        assert!(config.catalog_path.is_absolute());

        let config_with_path =
            config::RuntimeConfig::with_catalog_path(PathBuf::from("/tmp/test.csv"));
        assert_eq!(config_with_path.catalog_path, PathBuf::from("/tmp/test.csv"));

        Ok(())
    }
}
