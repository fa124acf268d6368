use ndarray::Array1;

use crate::{RegressionErr, Result};

/// A single generated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y_observed: f64,
    pub y_true: f64,
}

/// An ordered set of samples stored column wise.
///
/// All three columns always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDataset {
    x: Array1<f64>,
    y_observed: Array1<f64>,
    y_true: Array1<f64>,
}

impl SampleDataset {
    /// Creates a new `SampleDataset` from its columns.
    ///
    /// # Arguments
    /// * `x` - The feature column.
    /// * `y_observed` - The noisy response column.
    /// * `y_true` - The noise free response column.
    ///
    /// # Returns
    /// An `InvalidParameter` error if the columns differ in length or hold
    /// a NaN or infinite value.
    pub fn from_columns(
        x: Array1<f64>,
        y_observed: Array1<f64>,
        y_true: Array1<f64>,
    ) -> Result<Self> {
        let n = x.len();
        for (name, len) in [("y_observed", y_observed.len()), ("y_true", y_true.len())] {
            if len != n {
                return Err(RegressionErr::invalid(
                    name,
                    format!("column has {len} values but x has {n}"),
                ));
            }
        }

        let columns = [("x", &x), ("y_observed", &y_observed), ("y_true", &y_true)];
        for (name, column) in columns {
            if let Some((i, v)) = column.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(RegressionErr::invalid(
                    name,
                    format!("value {i} must be finite, got {v}"),
                ));
            }
        }

        Ok(Self {
            x,
            y_observed,
            y_true,
        })
    }

    /// Creates a dataset of observations with unknown ground truth, the
    /// observed values stand in for the true ones.
    ///
    /// # Returns
    /// An `InvalidParameter` error if a coordinate is NaN or infinite.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let x: Array1<f64> = points.iter().map(|&(x, _)| x).collect();
        let y: Array1<f64> = points.iter().map(|&(_, y)| y).collect();

        Self::from_columns(x, y.clone(), y)
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y_observed(&self) -> &Array1<f64> {
        &self.y_observed
    }

    pub fn y_true(&self) -> &Array1<f64> {
        &self.y_true
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the `i`-th sample, `None` if `i` is out of bounds.
    pub fn get(&self, i: usize) -> Option<Sample> {
        Some(Sample {
            x: *self.x.get(i)?,
            y_observed: *self.y_observed.get(i)?,
            y_true: *self.y_true.get(i)?,
        })
    }

    /// Iterates the samples in order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.x
            .iter()
            .zip(self.y_observed.iter())
            .zip(self.y_true.iter())
            .map(|((&x, &y_observed), &y_true)| Sample {
                x,
                y_observed,
                y_true,
            })
    }

    /// The first `n` samples, or all of them if there are fewer.
    pub fn head(&self, n: usize) -> Vec<Sample> {
        self.iter().take(n).collect()
    }
}
