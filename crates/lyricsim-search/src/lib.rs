//! Lyric-similarity recommendations for lyricsim.
//!
//! A [`Recommender`] owns a loaded model artifact for the lifetime of the
//! process and answers top-N queries against its similarity matrix.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

use std::collections::BTreeSet;
use std::path::Path;

pub use lyricsim_core::{Artifact, Lookup, Recommendation, DEFAULT_TOP_N};

/// Read-only recommendation service over one artifact.
#[derive(Debug)]
pub struct Recommender {
    artifact: Artifact,
    lowered_titles: Vec<String>,
}

impl Recommender {
    #[must_use]
    pub fn new(artifact: Artifact) -> Self {
        let lowered_titles = artifact
            .records()
            .iter()
            .map(|r| r.title.to_lowercase())
            .collect();
        Self {
            artifact,
            lowered_titles,
        }
    }

    /// Load the artifact at `path` and wrap it.
    pub fn load(path: impl AsRef<Path>) -> lyricsim_core::Result<Self> {
        Artifact::load(path).map(Self::new)
    }

    /// Index of the first record whose title matches `title`, ignoring case.
    pub fn find(&self, title: &str) -> Option<usize> {
        let query = title.to_lowercase();
        self.lowered_titles.iter().position(|t| *t == query)
    }

    /// The `n` songs most similar to `title`.
    ///
    /// Scores are ranked descending; equal scores keep ascending record
    /// order. The query song itself is never returned.
    pub fn recommend(&self, title: &str, n: usize) -> Lookup {
        log::info!("Recommending songs for: '{}'", title);
        let Some(index) = self.find(title) else {
            log::warn!("Song not found: '{}'", title);
            return Lookup::NotFound;
        };

        let Some(row) = self.artifact.matrix().row(index) else {
            return Lookup::NotFound;
        };
        let mut scores: Vec<(usize, f32)> = row.collect();
        // Stable sort: ties stay in index order.
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));

        let records = self.artifact.records();
        let recommendations: Vec<Recommendation> = scores
            .into_iter()
            .filter(|&(j, _)| j != index)
            .take(n)
            .enumerate()
            .map(|(rank, (j, score))| Recommendation {
                rank: rank + 1,
                artist: records[j].artist.clone(),
                title: records[j].title.clone(),
                score,
            })
            .collect();

        log::info!("Top {} recommendations ready", recommendations.len());
        Lookup::Found(recommendations)
    }

    /// Distinct non-empty titles, sorted, for title pickers.
    pub fn titles(&self) -> Vec<&str> {
        self.artifact
            .records()
            .iter()
            .map(|r| r.title.as_str())
            .filter(|t| !t.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.artifact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifact.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyricsim_core::{SimilarityMatrix, SongRecord};

    /// Four songs with hand-set similarities:
    ///
    /// ```text
    ///        0     1     2     3
    /// 0    1.0   0.2   0.5   0.2
    /// 1    0.2   1.0   0.1   0.0
    /// 2    0.5   0.1   1.0   0.3
    /// 3    0.2   0.0   0.3   1.0
    /// ```
    fn fixture() -> Recommender {
        let records = vec![
            SongRecord::new("The Beatles", "Let It Be"),
            SongRecord::new("Queen", "Bohemian Rhapsody"),
            SongRecord::new("ABBA", "Waterloo"),
            SongRecord::new("Elvis Presley", "Love Me Tender"),
        ];
        let mut m = SimilarityMatrix::zeros(4);
        for i in 0..4 {
            m.set(i, i, 1.0);
        }
        m.set(0, 1, 0.2);
        m.set(0, 2, 0.5);
        m.set(0, 3, 0.2);
        m.set(1, 2, 0.1);
        m.set(2, 3, 0.3);
        Recommender::new(Artifact::new(records, Vec::new(), m).unwrap())
    }

    fn titles(lookup: Lookup) -> Vec<String> {
        lookup
            .into_found()
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect()
    }

    #[test]
    fn test_recommend_orders_by_score_then_index() {
        let recs = fixture().recommend("Let It Be", 5).into_found().unwrap();
        let ranked: Vec<(usize, &str, f32)> = recs
            .iter()
            .map(|r| (r.rank, r.title.as_str(), r.score))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (1, "Waterloo", 0.5),
                (2, "Bohemian Rhapsody", 0.2),
                (3, "Love Me Tender", 0.2),
            ]
        );
    }

    #[test]
    fn test_recommend_excludes_query() {
        let recommender = fixture();
        for title in ["Let It Be", "Bohemian Rhapsody", "Waterloo", "Love Me Tender"] {
            let found = titles(recommender.recommend(title, 10));
            assert_eq!(found.len(), 3);
            assert!(!found.iter().any(|t| t == title));
        }
    }

    #[test]
    fn test_recommend_top_n_bound() {
        let recommender = fixture();
        assert_eq!(titles(recommender.recommend("Waterloo", 2)).len(), 2);
        assert!(titles(recommender.recommend("Waterloo", 0)).is_empty());
    }

    #[test]
    fn test_recommend_is_case_insensitive() {
        let recommender = fixture();
        assert_eq!(
            recommender.recommend("Let It Be", 5),
            recommender.recommend("LET IT BE", 5)
        );
        assert_eq!(
            recommender.recommend("let it be", 5),
            recommender.recommend("Let It Be", 5)
        );
    }

    #[test]
    fn test_recommend_not_found() {
        let lookup = fixture().recommend("Definitely Not A Real Song Title", 5);
        assert!(lookup.is_not_found());
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let recommender = fixture();
        let first = recommender.recommend("Waterloo", 3);
        for _ in 0..5 {
            assert_eq!(recommender.recommend("Waterloo", 3), first);
        }
    }

    #[test]
    fn test_duplicate_titles_use_first_match() {
        let records = vec![
            SongRecord::new("Artist A", "Home"),
            SongRecord::new("Artist B", "Away"),
            SongRecord::new("Artist C", "HOME"),
        ];
        let mut m = SimilarityMatrix::zeros(3);
        m.set(0, 1, 0.9);
        m.set(1, 2, 0.1);
        let recommender = Recommender::new(Artifact::new(records, Vec::new(), m).unwrap());

        assert_eq!(recommender.find("home"), Some(0));
        let recs = recommender.recommend("home", 1).into_found().unwrap();
        assert_eq!(recs[0].artist, "Artist B");
    }

    #[test]
    fn test_titles_sorted_distinct_non_empty() {
        let records = vec![
            SongRecord::new("A", "Yesterday"),
            SongRecord::new("B", ""),
            SongRecord::new("C", "Help!"),
            SongRecord::new("D", "Yesterday"),
        ];
        let artifact = Artifact::new(records, Vec::new(), SimilarityMatrix::zeros(4)).unwrap();
        let recommender = Recommender::new(artifact);
        assert_eq!(recommender.titles(), vec!["Help!", "Yesterday"]);
    }
}
