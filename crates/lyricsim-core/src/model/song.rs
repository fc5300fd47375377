use serde::{Deserialize, Serialize};

/// A song in the working set, with its raw and cleaned lyric text.
///
/// Records carry no unique key. Position in the artifact's record list is
/// the only identity, and it doubles as the row/column index into the
/// similarity matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub artist: String,
    pub title: String,

    /// Raw lyric text as it appeared in the dataset.
    pub lyrics: Option<String>,

    /// Normalized lyric text the feature vectors were built from.
    #[serde(default)]
    pub cleaned: String,
}

impl SongRecord {
    #[must_use]
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            lyrics: None,
            cleaned: String::new(),
        }
    }

    #[must_use]
    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    #[must_use]
    pub fn with_cleaned(mut self, cleaned: impl Into<String>) -> Self {
        self.cleaned = cleaned.into();
        self
    }

    /// Case-insensitive title comparison.
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase() == query.to_lowercase()
    }
}
