//! Travel-duration matrix and neighbor ordering.

use serde::Serialize;

/// Errors building a [`DurationMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("duration matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("duration matrix has {actual} rows, expected {expected}")]
    WrongSize { actual: usize, expected: usize },
}

/// Square matrix of travel durations in whole minutes.
///
/// Indexed by candidate order. `None` marks a pair the provider could not
/// route. Diagonal entries are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationMatrix {
    size: usize,
    cells: Vec<Option<u32>>,
}

impl DurationMatrix {
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, MatrixError> {
        Self::from_optional_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    pub fn from_optional_rows(rows: Vec<Vec<Option<u32>>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MatrixError::NotSquare {
                    row: row_index,
                    len: row.len(),
                    expected: size,
                });
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    /// The degenerate 1 x 1 matrix for a single candidate.
    pub fn single() -> Self {
        Self {
            size: 1,
            cells: vec![Some(0)],
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, from: usize, to: usize) -> Option<u32> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.cells[from * self.size + to]
    }

    pub(crate) fn expect_size(&self, expected: usize) -> Result<(), MatrixError> {
        if self.size == expected {
            Ok(())
        } else {
            Err(MatrixError::WrongSize {
                actual: self.size,
                expected,
            })
        }
    }
}

/// An outgoing edge in a neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub index: usize,
    pub minutes: u32,
}

/// For every index, all other reachable indices sorted by ascending duration.
///
/// Ties keep the original index order. Not meaningful for a single candidate;
/// callers handle that case without building neighbor lists.
pub fn build_neighbor_lists(matrix: &DurationMatrix) -> Vec<Vec<Neighbor>> {
    let n = matrix.len();
    (0..n)
        .map(|from| {
            let mut neighbors: Vec<Neighbor> = (0..n)
                .filter(|to| *to != from)
                .filter_map(|to| {
                    matrix
                        .get(from, to)
                        .map(|minutes| Neighbor { index: to, minutes })
                })
                .collect();
            // stable: equal durations stay in index order
            neighbors.sort_by_key(|neighbor| neighbor.minutes);
            neighbors
        })
        .collect()
}
