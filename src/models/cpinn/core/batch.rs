//! Coordinate and field batches exchanged with subdomain models.

use std::ops::AddAssign;

use thiserror::Error;

/// Errors that can occur while constructing a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The x and y coordinate columns have different lengths.
    #[error("coordinate shape mismatch: {x_len} x-values, {y_len} y-values")]
    ShapeMismatch { x_len: usize, y_len: usize },
}

/// A batch of `(x, y)` coordinates stored as two equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateBatch {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl CoordinateBatch {
    /// Constructs a batch from coordinate columns.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ShapeMismatch`] if the columns differ in length.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, BatchError> {
        if x.len() != y.len() {
            return Err(BatchError::ShapeMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Collects a batch from `(x, y)` pairs.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (x, y) = points.into_iter().unzip();
        Self { x, y }
    }

    /// Builds the tensor-product grid of `xs` and `ys`.
    ///
    /// Points are ordered row by row: `y` varies slowest, `x` fastest.
    #[must_use]
    pub fn grid(xs: &[f64], ys: &[f64]) -> Self {
        Self::from_points(ys.iter().flat_map(|&y| xs.iter().map(move |&x| (x, y))))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Returns the sub-batch at `indices`, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: indices.iter().map(|&i| self.x[i]).collect(),
            y: indices.iter().map(|&i| self.y[i]).collect(),
        }
    }
}

/// A batch of two-component field values, one `[u, v]` pair per point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldBatch {
    values: Vec<[f64; 2]>,
}

impl FieldBatch {
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![[0.0; 2]; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[[f64; 2]] {
        &self.values
    }

    /// First field component at every point.
    pub fn u(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(|p| p[0])
    }

    /// Second field component at every point.
    pub fn v(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(|p| p[1])
    }

    /// Adds `other[k]` into `self[indices[k]]` for every `k`.
    ///
    /// # Panics
    ///
    /// Panics if `indices` and `other` differ in length or an index is out of bounds.
    pub(crate) fn scatter_add(&mut self, indices: &[usize], other: &FieldBatch) {
        assert_eq!(indices.len(), other.len(), "scatter length mismatch");
        for (&i, value) in indices.iter().zip(&other.values) {
            self.values[i][0] += value[0];
            self.values[i][1] += value[1];
        }
    }
}

impl From<Vec<[f64; 2]>> for FieldBatch {
    fn from(values: Vec<[f64; 2]>) -> Self {
        Self { values }
    }
}

impl FromIterator<[f64; 2]> for FieldBatch {
    fn from_iter<I: IntoIterator<Item = [f64; 2]>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Element-wise accumulation.
///
/// # Panics
///
/// Panics if the batches differ in length.
impl AddAssign<&FieldBatch> for FieldBatch {
    fn add_assign(&mut self, rhs: &FieldBatch) {
        assert_eq!(self.len(), rhs.len(), "field batch length mismatch");
        for (lhs, rhs) in self.values.iter_mut().zip(&rhs.values) {
            lhs[0] += rhs[0];
            lhs[1] += rhs[1];
        }
    }
}
