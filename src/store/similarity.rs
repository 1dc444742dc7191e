use crate::error::{AppError, AppResult};

const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// Square matrix of pairwise similarity scores, stored row-major
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from rows, rejecting ragged input and non-finite scores
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(AppError::Configuration(format!(
                    "Similarity matrix is not square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    dim
                )));
            }
            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(AppError::Configuration(format!(
                    "Similarity score at ({}, {}) is not finite",
                    i, j
                )));
            }
            scores.extend(row);
        }

        Ok(Self { dim, scores })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.dim + j]
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.dim {
            return None;
        }
        Some(&self.scores[i * self.dim..(i + 1) * self.dim])
    }

    /// Checks that the matrix is symmetric and each diagonal cell is its row maximum
    pub fn validate(&self) -> AppResult<()> {
        for i in 0..self.dim {
            let diagonal = self.get(i, i);
            for j in 0..self.dim {
                let score = self.get(i, j);
                if (score - self.get(j, i)).abs() > SYMMETRY_TOLERANCE {
                    return Err(AppError::Configuration(format!(
                        "Similarity matrix is not symmetric at ({}, {})",
                        i, j
                    )));
                }
                if score > diagonal + SYMMETRY_TOLERANCE {
                    return Err(AppError::Configuration(format!(
                        "Self-similarity of row {} is below score at column {}",
                        i, j
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_square() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.3, 1.0]]).unwrap();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.get(0, 1), 0.3);
        assert_eq!(matrix.row(1), Some(&[0.3, 1.0][..]));
        assert_eq!(matrix.row(2), None);
        assert!(matrix.validate().is_ok());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.3]]);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_from_rows_rejects_nan() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, f64::NAN], vec![0.3, 1.0]]);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_asymmetry() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.4, 1.0]]).unwrap();
        assert!(matches!(matrix.validate(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_low_diagonal() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![0.5, 0.9], vec![0.9, 1.0]]).unwrap();
        assert!(matches!(matrix.validate(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_validate_allows_ties_with_diagonal() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        assert!(matrix.validate().is_ok());
    }
}
