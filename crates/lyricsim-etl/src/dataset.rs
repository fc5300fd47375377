//! Lyrics dataset loading and sampling.
//!
//! The dataset is a CSV file with a header row and at least the columns
//! `artist`, `song`, and `text`. Any other column (the Spotify million-song
//! dump carries a `link` column) is ignored.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::{BuildError, BuildResult};

const REQUIRED_COLUMNS: [&str; 3] = ["artist", "song", "text"];

/// One row of the raw lyrics dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawSong {
    pub artist: String,
    #[serde(rename = "song")]
    pub title: String,
    /// Lyric text. Empty cells deserialize to `None`.
    #[serde(rename = "text")]
    pub lyrics: Option<String>,
}

impl RawSong {
    #[must_use]
    pub fn new(artist: impl Into<String>, title: impl Into<String>, lyrics: Option<&str>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            lyrics: lyrics.map(String::from),
        }
    }
}

/// Load every row of the dataset at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, a required column is missing, or a
/// row cannot be parsed.
pub fn load_dataset(path: &Path) -> BuildResult<Vec<RawSong>> {
    let dataset_error = |source: csv::Error| BuildError::Dataset {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(dataset_error)?;

    let headers = reader.headers().map_err(dataset_error)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BuildError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let songs = reader
        .deserialize()
        .collect::<Result<Vec<RawSong>, csv::Error>>()
        .map_err(dataset_error)?;

    log::info!("Loaded {} songs from {}", songs.len(), path.display());
    Ok(songs)
}

/// Draw a uniform sample of `size` songs without replacement.
///
/// Returns every song (in the original order) when the dataset holds no
/// more than `size` rows. Otherwise the sample is in draw order. A `seed`
/// makes the draw reproducible.
pub fn sample(songs: Vec<RawSong>, size: usize, seed: Option<u64>) -> Vec<RawSong> {
    if songs.len() <= size {
        return songs;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let picked = rand::seq::index::sample(&mut rng, songs.len(), size);

    let mut slots: Vec<Option<RawSong>> = songs.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
