//! # Integration Tests for Segue
//!
//! End-to-end tests covering catalog ingestion, scoring and sequencing as a
//! library consumer would drive them, plus basic CLI smoke tests.

use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

use segue::algorithm::ScoringContext;
use segue::song::Song;

/// Test helper to write a raw catalog file with sample data.
///
/// Uses the raw Spotify-style export names and scales so the tests also
/// exercise normalization: popularity on the 0-100 scale, unrounded
/// features, fractional tempo.
fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let catalog_path = temp_dir.path().join("test_songs.json");

    let records = serde_json::json!([
        {
            "track_name": "Opening Track",
            "track_artist": "Artist One",
            "playlist_genre": "house",
            "tempo": 120.02,
            "key": 0,
            "energy": 0.501,
            "track_popularity": 50,
            "danceability": 0.5,
            "liveness": 0.1
        },
        {
            "track_name": "Tight Follow",
            "track_artist": "Artist Two",
            "playlist_genre": "house",
            "tempo": 122.4,
            "key": 1,
            "energy": 0.5,
            "track_popularity": 80,
            "danceability": 0.7,
            "liveness": 0.1
        },
        {
            "track_name": "Loose Follow",
            "track_artist": "Artist Three",
            "playlist_genre": "edm",
            "tempo": 129.0,
            "key": 4,
            "energy": 0.62,
            "track_popularity": 70,
            "danceability": 0.66,
            "liveness": 0.2
        },
        {
            "track_name": "Opening Track",
            "track_artist": "Artist One",
            "playlist_genre": "pop",
            "tempo": 120.0,
            "key": 0,
            "energy": 0.5,
            "track_popularity": 50,
            "danceability": 0.5,
            "liveness": 0.1
        },
        {
            "track_name": "Clashing Track",
            "track_artist": "Artist Four",
            "playlist_genre": "metal",
            "tempo": 180.0,
            "key": 6,
            "energy": 0.98,
            "track_popularity": 30,
            "danceability": 0.3,
            "liveness": 0.8
        }
    ]);

    std::fs::write(&catalog_path, serde_json::to_string_pretty(&records)?)?;
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
        assert!(stdout.contains("segue"));
        assert!(stdout.contains("rank"));
        assert!(stdout.contains("pair"));
        assert!(stdout.contains("playlist"));
        assert!(stdout.contains("list"));
    }

    #[test]
    fn test_cli_version_flag() {
        let output = Command::new("cargo")
            .args(["run", "--", "--version"])
            .output()
            .expect("Failed to run version command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("segue"));
        assert!(stdout.contains("0.4.0"));
    }
}

#[cfg(test)]
mod catalog_integration_tests {
    use super::*;
    use segue::catalog;
    use segue::error::SegueError;

    #[test]
    fn test_catalog_loads_and_normalizes() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;

        let songs = catalog::load_catalog(&catalog_path)?;
        assert_eq!(songs.len(), 5);

        let opener = catalog::find_song(&songs, "Opening Track", None).unwrap();
        assert_eq!(opener.tempo, 120);
        assert!((opener.popularity - 0.50).abs() < 1e-12);
        assert!((opener.energy - 0.50).abs() < 1e-12);

        let follow = catalog::find_song(&songs, "Tight Follow", None).unwrap();
        assert_eq!(follow.tempo, 122);
        assert!((follow.popularity - 0.80).abs() < 1e-12);

        Ok(())
    }

    #[test]
    fn test_catalog_with_missing_columns_fails_with_schema_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let catalog_path = temp_dir.path().join("broken.json");

        std::fs::write(
            &catalog_path,
            r#"[{"track_name": "No Features", "track_artist": "Artist", "playlist_genre": "pop"}]"#,
        )?;

        let err = catalog::load_catalog(&catalog_path).unwrap_err();
        match err {
            SegueError::Schema { track, fields } => {
                assert_eq!(track, "No Features");
                assert!(fields.contains(&"tempo".to_string()));
                assert!(fields.contains(&"key".to_string()));
                assert!(fields.contains(&"liveness".to_string()));
            }
            other => panic!("expected Schema error, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn test_catalog_with_out_of_domain_value_fails() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let catalog_path = temp_dir.path().join("bad_domain.json");

        std::fs::write(
            &catalog_path,
            r#"[{
                "track_name": "Bad Key",
                "track_artist": "Artist",
                "playlist_genre": "pop",
                "tempo": 120,
                "key": 14,
                "energy": 0.5,
                "track_popularity": 50,
                "danceability": 0.5,
                "liveness": 0.1
            }]"#,
        )?;

        let err = catalog::load_catalog(&catalog_path).unwrap_err();
        assert!(matches!(err, SegueError::Domain { field: "key", .. }));

        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = catalog::load_catalog(std::path::Path::new("/nonexistent/songs.json"))
            .unwrap_err();
        assert!(matches!(err, SegueError::Io(_)));
    }
}

#[cfg(test)]
mod sequencer_integration_tests {
    use super::*;
    use segue::{algorithm, catalog, queue};

    #[test]
    fn test_advance_over_loaded_catalog() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let songs = catalog::load_catalog(&catalog_path)?;
        let current = catalog::find_song(&songs, "Opening Track", None).unwrap().clone();

        let (ranked, history) = queue::advance(&current, &songs, &[], &ScoringContext::default())?;

        // Both copies of the opener are excluded
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|r| !r.song.same_track(&current)));

        // Descending mixability
        for pair in ranked.windows(2) {
            assert!(f64::from(pair[0].mixability) >= f64::from(pair[1].mixability));
        }

        // History grew by exactly one, holding the score-free record
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], current);

        Ok(())
    }

    #[test]
    fn test_concrete_scoring_scenario_through_the_stack() -> Result<()> {
        // From the loaded catalog: Opening Track (120 BPM, key 0, energy 0.5)
        // against Tight Follow (122 BPM, key 1, energy 0.5, popularity 0.8,
        // danceability 0.7, liveness 0.1) must come out at 0.80.
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let songs = catalog::load_catalog(&catalog_path)?;

        let current = catalog::find_song(&songs, "Opening Track", None).unwrap();
        let candidate = catalog::find_song(&songs, "Tight Follow", None).unwrap();

        let score = algorithm::mixability(current, candidate, &ScoringContext::default())?;
        assert!((score - 0.80).abs() < 1e-12);

        let (ranked, _) = queue::advance(current, &songs, &[], &ScoringContext::default())?;
        assert_eq!(ranked[0].song.track, "Tight Follow");

        Ok(())
    }

    #[test]
    fn test_full_session_plays_catalog_to_exhaustion() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let songs = catalog::load_catalog(&catalog_path)?;

        let start = catalog::find_song(&songs, "Opening Track", None).unwrap().clone();
        let mut session = queue::Session::new(songs, ScoringContext::default())?;

        let mut current = start;
        let mut plays = 0;
        loop {
            let history_before = session.history().len();
            let ranked = session.advance(&current)?;
            plays += 1;

            assert_eq!(session.history().len(), history_before + 1);

            match ranked.first() {
                Some(best) => current = best.song.clone(),
                None => break,
            }
        }

        // 5 records, 4 distinct (track, artist) pairs
        assert_eq!(plays, 4);
        assert_eq!(session.history().len(), 4);
        assert!(session.pool().is_empty());

        Ok(())
    }

    #[test]
    fn test_generate_playlist_from_loaded_catalog() -> Result<()> {
        let (_temp_dir, catalog_path) = create_test_catalog()?;
        let songs = catalog::load_catalog(&catalog_path)?;
        let start = catalog::find_song(&songs, "Opening Track", None).unwrap().clone();

        let playlist = queue::generate_playlist(songs, start, 10, &ScoringContext::default())?;

        // Opener plus three distinct followers
        assert_eq!(playlist.len(), 4);
        assert_eq!(playlist[0].track, "Opening Track");
        assert_eq!(playlist[1].track, "Tight Follow");

        for (i, a) in playlist.iter().enumerate() {
            for b in &playlist[i + 1..] {
                assert!(!a.same_track(b));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod configuration_tests {
    use super::*;
    use segue::{algorithm, config};
    use std::io::Write;

    fn sample_pair() -> (Song, Song) {
        let current = Song {
            track: "Current".to_string(),
            artist: "A".to_string(),
            genre: "pop".to_string(),
            tempo: 120,
            key: 0,
            energy: 0.5,
            popularity: 0.5,
            danceability: 0.5,
            liveness: 0.1,
        };
        let candidate = Song {
            track: "Candidate".to_string(),
            artist: "B".to_string(),
            tempo: 150,
            key: 6,
            popularity: 1.0,
            danceability: 1.0,
            liveness: 1.0,
            ..current.clone()
        };
        (current, candidate)
    }

    #[test]
    fn test_weight_override_changes_scores() -> Result<()> {
        let (current, candidate) = sample_pair();

        let default_score =
            algorithm::mixability(&current, &candidate, &ScoringContext::default())?;

        // Ranking-only weights reward the candidate's perfect intrinsics
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"weights": {{"closeness": 0.0, "ranking": 1.0}}}}"#)?;

        let overridden = config::load_scoring_context(Some(file.path()))?;
        let overridden_score = algorithm::mixability(&current, &candidate, &overridden)?;

        assert!(overridden_score > default_score);
        assert!((overridden_score - 1.0).abs() < 1e-12);

        Ok(())
    }

    #[test]
    fn test_default_weights_match_documented_values() -> Result<()> {
        let context = config::load_scoring_context(None)?;

        assert_eq!(context.weights.tempo, 0.45);
        assert_eq!(context.weights.energy, 0.10);
        assert_eq!(context.weights.key, 0.35);
        assert_eq!(context.weights.popularity, 0.6);
        assert_eq!(context.weights.danceability, 0.35);
        assert_eq!(context.weights.liveness, 0.05);
        assert_eq!(context.weights.closeness, 0.6);
        assert_eq!(context.weights.ranking, 0.4);

        Ok(())
    }
}
