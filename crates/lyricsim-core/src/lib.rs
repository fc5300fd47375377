//! Core domain model for lyricsim.
//!
//! This crate defines the song record model, the symmetric similarity
//! matrix, and the persisted model artifact shared by the offline builder
//! and the online recommender.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod artifact;
pub mod error;
pub mod matrix;
pub mod model;

pub use artifact::Artifact;
pub use error::{Error, Result};
pub use matrix::SimilarityMatrix;
pub use model::{Lookup, Recommendation, SongRecord, DEFAULT_TOP_N};
