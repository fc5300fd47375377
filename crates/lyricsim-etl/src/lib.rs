//! Offline model builder for lyricsim.
//!
//! Loads and samples the lyrics dataset, normalizes lyric text, fits a
//! TF-IDF vectorizer over the corpus, computes the pairwise cosine
//! similarity matrix, and persists the result as an artifact.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod similarity;
pub mod vectorize;

pub use config::Config;
pub use dataset::RawSong;
pub use error::{BuildError, BuildResult};
pub use normalize::Normalizer;
pub use pipeline::{build_artifact, build_model, BuildReport};
pub use vectorize::{FittedVectorizer, SparseVector, TfidfVectorizer};
