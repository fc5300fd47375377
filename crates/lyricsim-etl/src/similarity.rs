//! All-pairs cosine similarity over sparse document vectors.
//!
//! Dot products are accumulated through an inverted index (dimension →
//! postings), so each pair of documents only costs the terms they share.
//! Only the upper triangle is computed; the matrix stores it once.

use lyricsim_core::SimilarityMatrix;

use crate::vectorize::SparseVector;

/// Cosine of the angle between `a` and `b`; 0 when either is a zero vector.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    scale(a.dot(b), a.norm(), b.norm())
}

fn scale(dot: f32, norm_a: f32, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Compute the N×N cosine similarity matrix for `vectors`.
pub fn similarity_matrix(vectors: &[SparseVector]) -> SimilarityMatrix {
    let n = vectors.len();
    let norms: Vec<f32> = vectors.iter().map(SparseVector::norm).collect();

    let dims = vectors
        .iter()
        .filter_map(|v| v.entries().last().map(|&(dim, _)| dim + 1))
        .max()
        .unwrap_or(0);
    // Postings are appended in document order, so each list is sorted by
    // document index.
    let mut postings: Vec<Vec<(usize, f32)>> = vec![Vec::new(); dims];
    for (doc, vector) in vectors.iter().enumerate() {
        for &(dim, weight) in vector.entries() {
            postings[dim].push((doc, weight));
        }
    }

    let mut matrix = SimilarityMatrix::zeros(n);
    let mut dots = vec![0.0f32; n];
    for (i, vector) in vectors.iter().enumerate() {
        dots[i..].fill(0.0);
        for &(dim, weight) in vector.entries() {
            let list = &postings[dim];
            let start = list.partition_point(|&(doc, _)| doc < i);
            for &(j, other) in &list[start..] {
                dots[j] += weight * other;
            }
        }
        for j in i..n {
            matrix.set(i, j, scale(dots[j], norms[i], norms[j]));
        }
    }

    log::debug!("Computed {n}x{n} cosine similarity matrix over {dims} dimensions");
    matrix
}
