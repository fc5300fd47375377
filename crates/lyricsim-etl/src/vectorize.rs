//! TF-IDF vectorization of the cleaned lyric corpus.
//!
//! Terms are whitespace-separated tokens of at least two characters. The
//! vocabulary keeps the `max_features` terms with the highest total count
//! across the corpus (ties broken alphabetically) and indexes them in
//! alphabetical order. Weights are raw term count times the smoothed IDF
//! `ln((1 + n) / (1 + df)) + 1`, and each document vector is L2-normalized.

use std::collections::{HashMap, HashSet};

/// Shortest token kept as a term.
const MIN_TERM_LEN: usize = 2;

fn terms(doc: &str) -> impl Iterator<Item = &str> {
    doc.split_whitespace().filter(|t| t.len() >= MIN_TERM_LEN)
}

/// A sparse vector of `(dimension, weight)` pairs sorted by dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build from arbitrary pairs. Duplicate dimensions are summed and
    /// zero weights dropped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f32)>) -> Self {
        let mut acc: HashMap<usize, f32> = HashMap::new();
        for (dim, weight) in pairs {
            *acc.entry(dim).or_insert(0.0) += weight;
        }
        let mut entries: Vec<(usize, f32)> = acc.into_iter().filter(|&(_, w)| w != 0.0).collect();
        entries.sort_unstable_by_key(|&(dim, _)| dim);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, dim: usize) -> f32 {
        self.entries
            .binary_search_by_key(&dim, |&(d, _)| d)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &Self) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_dim, a_w) = self.entries[i];
            let (b_dim, b_w) = other.entries[j];
            match a_dim.cmp(&b_dim) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Ordered term set; a term's position is its feature dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Unfitted TF-IDF vectorizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl TfidfVectorizer {
    #[must_use]
    pub const fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Learn the vocabulary and IDF weights from the full corpus.
    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> FittedVectorizer {
        // term -> (total count, document frequency)
        let mut stats: HashMap<&str, (u64, u64)> = HashMap::new();
        for doc in corpus {
            let mut seen = HashSet::new();
            for term in terms(doc.as_ref()) {
                let entry = stats.entry(term).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(term) {
                    entry.1 += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, u64, u64)> = stats
            .into_iter()
            .map(|(term, (count, df))| (term, count, df))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);
        ranked.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let n = corpus.len() as f64;
        #[allow(clippy::cast_possible_truncation)]
        let idf = ranked
            .iter()
            .map(|&(_, _, df)| (((1.0 + n) / (1.0 + df as f64)).ln() + 1.0) as f32)
            .collect();
        let vocabulary =
            Vocabulary::from_sorted(ranked.into_iter().map(|(t, _, _)| t.to_string()).collect());

        log::debug!(
            "Fitted TF-IDF over {} documents: {} terms (cap {})",
            corpus.len(),
            vocabulary.len(),
            self.max_features
        );
        FittedVectorizer { vocabulary, idf }
    }
}

/// A vectorizer with a learned vocabulary; the only type that can
/// produce document vectors, so every vector shares one coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedVectorizer {
    vocabulary: Vocabulary,
    idf: Vec<f32>,
}

impl FittedVectorizer {
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// IDF weight of each dimension.
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// L2-normalized TF-IDF vector for one cleaned document.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut vector = SparseVector::from_pairs(
            terms(doc)
                .filter_map(|t| self.vocabulary.get(t))
                .map(|dim| (dim, self.idf[dim])),
        );
        vector.normalize();
        vector
    }

    pub fn transform_all<S: AsRef<str>>(&self, corpus: &[S]) -> Vec<SparseVector> {
        corpus.iter().map(|doc| self.transform(doc.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_sparse_vector_from_pairs_sums_and_sorts() {
        let v = SparseVector::from_pairs([(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(2), 0.0);
    }

    #[test]
    fn test_sparse_dot() {
        let a = SparseVector::from_pairs([(0, 1.0), (2, 2.0), (5, 3.0)]);
        let b = SparseVector::from_pairs([(2, 4.0), (3, 1.0), (5, 1.0)]);
        assert!((a.dot(&b) - 11.0).abs() < EPS);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }

    #[test]
    fn test_vocabulary_is_alphabetical_and_skips_short_tokens() {
        let fitted = TfidfVectorizer::new(100).fit(&["rain sun x", "sun wind"]);
        assert_eq!(fitted.vocabulary().terms(), &["rain", "sun", "wind"]);
        assert_eq!(fitted.vocabulary().get("sun"), Some(1));
        assert_eq!(fitted.vocabulary().get("x"), None);
    }

    #[test]
    fn test_vocabulary_cap_keeps_most_frequent_terms() {
        let corpus = ["love love love heart", "love heart night", "night star"];
        let fitted = TfidfVectorizer::new(2).fit(&corpus);
        // love: 4, heart: 2, night: 2, star: 1. heart wins the tie alphabetically.
        assert_eq!(fitted.vocabulary().terms(), &["heart", "love"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let fitted = TfidfVectorizer::new(100).fit(&["rain sun", "sun"]);
        let rain = fitted.vocabulary().get("rain").unwrap();
        let sun = fitted.vocabulary().get("sun").unwrap();
        // n = 2; df(rain) = 1, df(sun) = 2
        let expected_rain = ((3.0f64 / 2.0).ln() + 1.0) as f32;
        assert!((fitted.idf()[rain] - expected_rain).abs() < EPS);
        assert!((fitted.idf()[sun] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let corpus = ["rain rain sun", "sun wind", "wind rain"];
        let fitted = TfidfVectorizer::new(100).fit(&corpus);
        for v in fitted.transform_all(&corpus) {
            assert!((v.norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_transform_weights_follow_term_counts() {
        let corpus = ["rain rain sun", "sun"];
        let fitted = TfidfVectorizer::new(100).fit(&corpus);
        let v = fitted.transform(corpus[0]);
        let rain = fitted.vocabulary().get("rain").unwrap();
        let sun = fitted.vocabulary().get("sun").unwrap();

        let raw_rain = 2.0 * fitted.idf()[rain];
        let raw_sun = fitted.idf()[sun];
        let norm = (raw_rain * raw_rain + raw_sun * raw_sun).sqrt();
        assert!((v.get(rain) - raw_rain / norm).abs() < EPS);
        assert!((v.get(sun) - raw_sun / norm).abs() < EPS);
    }

    #[test]
    fn test_transform_empty_and_unknown_docs() {
        let fitted = TfidfVectorizer::new(100).fit(&["rain sun", ""]);
        assert!(fitted.transform("").is_zero());
        assert!(fitted.transform("thunder lightning").is_zero());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = ["a bb cc dd", "cc dd ee", "ee ff bb"];
        let first = TfidfVectorizer::new(3).fit(&corpus);
        let second = TfidfVectorizer::new(3).fit(&corpus);
        assert_eq!(first, second);
        assert_eq!(first.transform_all(&corpus), second.transform_all(&corpus));
    }
}
