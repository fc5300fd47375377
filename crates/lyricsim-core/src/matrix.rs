//! Symmetric pairwise similarity matrix.
//!
//! Only the upper triangle (diagonal included) is stored, row by row. For
//! a working set of N songs that is N·(N+1)/2 cells instead of N².

use crate::error::{Error, Result};

/// An N×N symmetric matrix of similarity scores indexed by record position.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dimension: usize,
    packed: Vec<f32>,
}

/// Number of cells in the packed upper triangle of an N×N matrix.
pub const fn packed_len(dimension: usize) -> usize {
    dimension * (dimension + 1) / 2
}

impl SimilarityMatrix {
    /// Create an all-zero matrix.
    #[must_use]
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            packed: vec![0.0; packed_len(dimension)],
        }
    }

    /// Rebuild a matrix from its packed upper triangle.
    ///
    /// # Errors
    /// Returns `InvalidData` if the cell count does not fit the dimension.
    pub fn from_packed(dimension: usize, packed: Vec<f32>) -> Result<Self> {
        let expected = packed_len(dimension);
        if packed.len() != expected {
            return Err(Error::InvalidData(format!(
                "packed similarity matrix of dimension {dimension} needs {expected} cells, got {}",
                packed.len()
            )));
        }
        Ok(Self { dimension, packed })
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// The packed upper triangle, row by row.
    #[must_use]
    pub fn packed(&self) -> &[f32] {
        &self.packed
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        row * (2 * self.dimension - row + 1) / 2 + (col - row)
    }

    /// Similarity between records `i` and `j`, or `None` if out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.dimension || j >= self.dimension {
            return None;
        }
        Some(self.packed[self.offset(i, j)])
    }

    /// Set cell (i, j) and its mirror (j, i).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        assert!(
            i < self.dimension && j < self.dimension,
            "index ({i}, {j}) out of range for dimension {}",
            self.dimension
        );
        let offset = self.offset(i, j);
        self.packed[offset] = value;
    }

    /// Iterate over row `i`, yielding `(column, score)` in column order.
    pub fn row(&self, i: usize) -> Option<impl Iterator<Item = (usize, f32)> + '_> {
        if i >= self.dimension {
            return None;
        }
        Some((0..self.dimension).map(move |j| (j, self.packed[self.offset(i, j)])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_len() {
        assert_eq!(packed_len(0), 0);
        assert_eq!(packed_len(1), 1);
        assert_eq!(packed_len(3), 6);
        assert_eq!(packed_len(10_000), 50_005_000);
    }

    #[test]
    fn test_set_is_symmetric() {
        let mut m = SimilarityMatrix::zeros(3);
        m.set(0, 2, 0.5);
        m.set(2, 1, 0.25);
        assert_eq!(m.get(0, 2), Some(0.5));
        assert_eq!(m.get(2, 0), Some(0.5));
        assert_eq!(m.get(1, 2), Some(0.25));
        assert_eq!(m.get(2, 1), Some(0.25));
    }

    #[test]
    fn test_packed_layout_is_row_major_upper_triangle() {
        // [1.0 0.1 0.2]
        // [0.1 1.0 0.3]
        // [0.2 0.3 1.0]
        let m = SimilarityMatrix::from_packed(3, vec![1.0, 0.1, 0.2, 1.0, 0.3, 1.0]).unwrap();
        assert_eq!(m.get(0, 1), Some(0.1));
        assert_eq!(m.get(2, 0), Some(0.2));
        assert_eq!(m.get(2, 1), Some(0.3));
        assert_eq!(m.get(1, 1), Some(1.0));
    }

    #[test]
    fn test_from_packed_rejects_wrong_length() {
        let result = SimilarityMatrix::from_packed(3, vec![1.0; 5]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_get_out_of_range() {
        let m = SimilarityMatrix::zeros(2);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 2), None);
    }

    #[test]
    fn test_row_iterates_full_row() {
        let m = SimilarityMatrix::from_packed(3, vec![1.0, 0.1, 0.2, 1.0, 0.3, 1.0]).unwrap();
        let row: Vec<(usize, f32)> = m.row(2).unwrap().collect();
        assert_eq!(row, vec![(0, 0.2), (1, 0.3), (2, 1.0)]);
        assert!(m.row(3).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range_panics() {
        let mut m = SimilarityMatrix::zeros(2);
        m.set(0, 2, 1.0);
    }
}
