use serde::{Deserialize, Serialize};

/// Number of recommendations returned when the caller does not choose.
pub const DEFAULT_TOP_N: usize = 5;

/// One ranked entry in a recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1-based display rank.
    pub rank: usize,
    pub artist: String,
    pub title: String,
    /// Cosine similarity against the query song.
    pub score: f32,
}

/// Outcome of a recommendation lookup.
///
/// A title missing from the working set is an expected outcome, not an
/// error, so callers branch on `NotFound` explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Vec<Recommendation>),
    NotFound,
}

impl Lookup {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// The ranked list, or `None` when the query title was not found.
    pub fn into_found(self) -> Option<Vec<Recommendation>> {
        match self {
            Self::Found(recs) => Some(recs),
            Self::NotFound => None,
        }
    }
}
