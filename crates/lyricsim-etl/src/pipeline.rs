//! Model build orchestration: dataset → cleaned records → TF-IDF →
//! similarity matrix → artifact.
//!
//! A build runs to completion or not at all. Nothing is written until the
//! whole artifact exists in memory, and the save itself is atomic.

use std::path::PathBuf;

use lyricsim_core::{Artifact, SongRecord};

use crate::config::Config;
use crate::dataset::{self, RawSong};
use crate::error::{BuildError, BuildResult};
use crate::normalize::Normalizer;
use crate::similarity::similarity_matrix;
use crate::vectorize::{SparseVector, TfidfVectorizer};

/// Summary of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub records: usize,
    pub vocabulary: usize,
    pub artifact_path: PathBuf,
}

/// Clean, vectorize, and compare `songs`, in their given order.
///
/// # Errors
/// Returns an error only if the resulting artifact violates the
/// record/matrix correspondence, which indicates a bug.
pub fn build_artifact(
    songs: Vec<RawSong>,
    normalizer: &Normalizer,
    max_features: usize,
) -> BuildResult<Artifact> {
    log::info!(
        "Cleaning lyrics for {} songs ({} tokenizer)",
        songs.len(),
        normalizer.strategy()
    );
    let records: Vec<SongRecord> = songs
        .into_iter()
        .map(|song| {
            let cleaned = normalizer.normalize(song.lyrics.as_deref());
            SongRecord {
                artist: song.artist,
                title: song.title,
                lyrics: song.lyrics,
                cleaned,
            }
        })
        .collect();
    let empty = records.iter().filter(|r| r.cleaned.is_empty()).count();
    if empty > 0 {
        log::warn!("{} songs have no lyric text left after cleaning", empty);
    }

    log::info!("Vectorizing with TF-IDF (max {} features)", max_features);
    let corpus: Vec<&str> = records.iter().map(|r| r.cleaned.as_str()).collect();
    let fitted = TfidfVectorizer::new(max_features).fit(&corpus);
    let vectors = fitted.transform_all(&corpus);
    log::info!(
        "TF-IDF matrix shape: ({}, {}), {} non-zero entries",
        vectors.len(),
        fitted.vocabulary().len(),
        vectors.iter().map(SparseVector::nnz).sum::<usize>()
    );

    log::info!("Calculating cosine similarity");
    let matrix = similarity_matrix(&vectors);
    log::info!(
        "Cosine similarity matrix shape: ({}, {})",
        matrix.dimension(),
        matrix.dimension()
    );

    let vocabulary = fitted.vocabulary().terms().to_vec();
    Ok(Artifact::new(records, vocabulary, matrix)?)
}

/// Run the full offline build described by `config` and save the artifact.
///
/// # Errors
/// Fails if no dataset is configured, the dataset cannot be loaded or is
/// empty, or the artifact cannot be written. No artifact is written on
/// failure.
pub fn build_model(config: &Config, normalizer: &Normalizer) -> BuildResult<BuildReport> {
    let dataset_path = config.dataset_path.as_ref().ok_or(BuildError::NoDataset)?;

    log::info!("Starting model build from {}", dataset_path.display());
    let songs = dataset::load_dataset(dataset_path)?;
    let songs = dataset::sample(songs, config.sample_size, config.sample_seed);
    if songs.is_empty() {
        return Err(BuildError::EmptyDataset {
            path: dataset_path.clone(),
        });
    }
    log::info!("Dataset loaded & sampled: {} rows", songs.len());

    let artifact = build_artifact(songs, normalizer, config.max_features)?;

    log::info!("Saving model to {}", config.artifact_path.display());
    artifact.save(&config.artifact_path)?;

    log::info!("Model build completed");
    Ok(BuildReport {
        records: artifact.len(),
        vocabulary: artifact.vocabulary().len(),
        artifact_path: config.artifact_path.clone(),
    })
}
