//! The catalog record every scorer and the sequencer operate on.
//!
//! A [`Song`] is immutable once validated. Identity for duplicate suppression
//! is the `(track, artist)` pair: the same track may appear more than once in
//! a catalog (e.g. on several playlists of a Spotify export), and the
//! sequencer removes all copies of the current song at once.

use crate::error::SegueError;
use serde::{Deserialize, Serialize};

/// One validated catalog entry.
///
/// All nine fields are required; absence is caught at ingestion (see
/// [`crate::catalog`]). Audio features follow the Spotify convention:
/// `tempo` in whole BPM, `key` as a pitch class on the 12-point circular
/// scale, and the remaining features as fractions in `[0, 1]` rounded to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Track title, not guaranteed unique
    pub track: String,
    /// Artist name
    pub artist: String,
    /// Genre label, informational only (not used in scoring)
    pub genre: String,
    /// Tempo in beats per minute, rounded to nearest integer
    pub tempo: u32,
    /// Pitch class in [0, 11]
    pub key: u8,
    /// Energy in [0, 1]
    pub energy: f64,
    /// Popularity in [0, 1] (scaled from the raw 0-100 value)
    pub popularity: f64,
    /// Danceability in [0, 1]
    pub danceability: f64,
    /// Liveness in [0, 1]
    pub liveness: f64,
}

impl Song {
    /// Checks every field against its documented domain.
    ///
    /// The scoring core calls this at its boundary rather than clamping:
    /// an out-of-range energy of 1.3 would silently score as more similar
    /// to 1.0 than it should, so it is rejected instead.
    ///
    /// # Errors
    ///
    /// Returns [`SegueError::Domain`] for the first out-of-range field found.
    pub fn validate(&self) -> Result<(), SegueError> {
        if self.key > 11 {
            return Err(SegueError::Domain {
                track: self.track.clone(),
                field: "key",
                value: f64::from(self.key),
                expected: "integer in [0, 11]",
            });
        }

        for (field, value) in [
            ("energy", self.energy),
            ("popularity", self.popularity),
            ("danceability", self.danceability),
            ("liveness", self.liveness),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SegueError::Domain {
                    track: self.track.clone(),
                    field,
                    value,
                    expected: "[0, 1]",
                });
            }
        }

        Ok(())
    }

    /// Whether `other` is the same track for exclusion purposes.
    ///
    /// The key is the `(track, artist)` pair by design: suppressing every
    /// copy of the currently playing track keeps exact duplicates from being
    /// suggested again in the same pass.
    #[must_use]
    pub fn same_track(&self, other: &Song) -> bool {
        self.track == other.track && self.artist == other.artist
    }
}
