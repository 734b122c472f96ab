//! Catalog ingestion and normalization.
//!
//! Raw catalog exports arrive with mixed conventions: Spotify-style column
//! names (`track_name`, `track_artist`, `playlist_genre`, `track_popularity`),
//! popularity on a 0-100 scale, and unrounded feature values. This module
//! turns a JSON array of such records into validated [`Song`]s:
//!
//! - popularity is scaled by 0.01 into `[0, 1]`
//! - energy, danceability and liveness are rounded to two decimals
//! - tempo is rounded to the nearest integer BPM
//! - missing fields fail with a Schema error naming every absent field
//! - out-of-domain values fail with a Domain error, never silently clamped

use crate::error::SegueError;
use crate::song::Song;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One unvalidated catalog row.
///
/// Every field is optional so a single pass can report all missing fields
/// at once instead of failing on the first. Serde aliases accept the raw
/// export column names alongside the normalized ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSong {
    #[serde(alias = "track_name")]
    pub track: Option<String>,
    #[serde(alias = "track_artist")]
    pub artist: Option<String>,
    #[serde(alias = "playlist_genre")]
    pub genre: Option<String>,
    pub tempo: Option<f64>,
    pub key: Option<i64>,
    pub energy: Option<f64>,
    #[serde(alias = "track_popularity")]
    pub popularity: Option<f64>,
    pub danceability: Option<f64>,
    pub liveness: Option<f64>,
}

impl RawSong {
    /// Normalizes this row into a validated [`Song`].
    ///
    /// # Errors
    ///
    /// Returns [`SegueError::Schema`] naming every missing field, or
    /// [`SegueError::Domain`] for values outside their documented ranges.
    pub fn normalize(self) -> Result<Song, SegueError> {
        let mut missing = Vec::new();

        for (field, present) in [
            ("track", self.track.is_some()),
            ("artist", self.artist.is_some()),
            ("genre", self.genre.is_some()),
            ("tempo", self.tempo.is_some()),
            ("key", self.key.is_some()),
            ("energy", self.energy.is_some()),
            ("popularity", self.popularity.is_some()),
            ("danceability", self.danceability.is_some()),
            ("liveness", self.liveness.is_some()),
        ] {
            if !present {
                missing.push(field.to_string());
            }
        }

        if !missing.is_empty() {
            return Err(SegueError::Schema {
                track: self.track.unwrap_or_else(|| "<unknown>".to_string()),
                fields: missing,
            });
        }

        let track = self.track.unwrap_or_default();

        let tempo = self.tempo.unwrap_or_default();
        if !tempo.is_finite() || tempo < 0.0 {
            return Err(SegueError::Domain {
                track,
                field: "tempo",
                value: tempo,
                expected: "non-negative BPM",
            });
        }

        let key = self.key.unwrap_or_default();
        if !(0..=11).contains(&key) {
            return Err(SegueError::Domain {
                track,
                field: "key",
                value: key as f64,
                expected: "integer in [0, 11]",
            });
        }

        let song = Song {
            track,
            artist: self.artist.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            tempo: tempo.round() as u32,
            key: key as u8,
            energy: round2(self.energy.unwrap_or_default()),
            // Raw popularity is on the 0-100 scale
            popularity: self.popularity.unwrap_or_default() * 0.01,
            danceability: round2(self.danceability.unwrap_or_default()),
            liveness: round2(self.liveness.unwrap_or_default()),
        };

        song.validate()?;
        Ok(song)
    }
}

/// Normalizes a batch of raw rows, failing on the first bad record.
///
/// # Errors
///
/// Propagates the Schema or Domain error of the first invalid row.
pub fn clean_catalog(raw: Vec<RawSong>) -> Result<Vec<Song>, SegueError> {
    raw.into_iter().map(RawSong::normalize).collect()
}

/// Loads and normalizes a catalog from a JSON file.
///
/// The file holds a JSON array of records; both normalized and raw export
/// field names are accepted (see [`RawSong`]).
///
/// # Errors
///
/// Returns [`SegueError::Io`] if the file cannot be read,
/// [`SegueError::Parse`] if it is not a JSON array of records, or the
/// Schema/Domain error of the first invalid row.
pub fn load_catalog(path: &Path) -> Result<Vec<Song>, SegueError> {
    let contents = fs::read_to_string(path)?;
    let raw: Vec<RawSong> = serde_json::from_str(&contents)?;

    log::info!("Loaded {} raw records from {}", raw.len(), path.display());
    clean_catalog(raw)
}

/// Finds a song in the catalog by title, optionally narrowed by artist.
///
/// Matching is case-insensitive on the full title. When several records
/// match, the first in catalog order wins.
#[must_use]
pub fn find_song<'a>(catalog: &'a [Song], track: &str, artist: Option<&str>) -> Option<&'a Song> {
    catalog.iter().find(|song| {
        song.track.eq_ignore_ascii_case(track)
            && artist.map_or(true, |a| song.artist.eq_ignore_ascii_case(a))
    })
}

/// Rounds to two decimals, the precision the scorers expect features at.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
