use serde::{Deserialize, Serialize};

use crate::{RegressionErr, Result};

/// The closed interval the x values of every generated dataset span.
pub const X_DOMAIN: (f64, f64) = (-10.0, 10.0);

/// The four scalars a synthetic dataset is generated from.
///
/// Values built by struct literal or deserialized are not checked until
/// [`GenerationParams::validate`] runs, every entry point of the crate
/// validates before using them. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub slope: f64,
    pub intercept: f64,
    pub noise_std_dev: f64,
    pub n_points: usize,
}

impl GenerationParams {
    /// Creates new validated `GenerationParams`.
    ///
    /// # Arguments
    /// * `slope` - The true slope of the line.
    /// * `intercept` - The true intercept of the line.
    /// * `noise_std_dev` - The standard deviation of the gaussian noise, must be `>= 0`.
    /// * `n_points` - The amount of points to generate, must be `>= 2`.
    ///
    /// # Returns
    /// An `InvalidParameter` error if any of the constraints is violated.
    pub fn new(slope: f64, intercept: f64, noise_std_dev: f64, n_points: usize) -> Result<Self> {
        let params = Self {
            slope,
            intercept,
            noise_std_dev,
            n_points,
        };

        params.validate()?;
        Ok(params)
    }

    /// Checks every field against its domain.
    ///
    /// # Returns
    /// An `InvalidParameter` error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("slope", self.slope),
            ("intercept", self.intercept),
            ("noise_std_dev", self.noise_std_dev),
        ];

        if let Some((name, value)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(RegressionErr::invalid(name, format!("must be finite, got {value}")));
        }

        if self.noise_std_dev < 0.0 {
            return Err(RegressionErr::invalid(
                "noise_std_dev",
                format!("must be non negative, got {}", self.noise_std_dev),
            ));
        }

        if self.n_points < 2 {
            return Err(RegressionErr::invalid(
                "n_points",
                format!("must be at least 2, got {}", self.n_points),
            ));
        }

        Ok(())
    }

    /// The noise free response at `x`.
    pub fn true_value(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Whether every field lies inside the range its input control offers.
    pub fn within_controls(&self) -> bool {
        SLOPE_RANGE.contains(self.slope)
            && INTERCEPT_RANGE.contains(self.intercept)
            && NOISE_RANGE.contains(self.noise_std_dev)
            && N_POINTS_RANGE.contains(self.n_points as f64)
    }

    /// Moves every field onto the closest position its input control can take.
    pub fn snapped_to_controls(&self) -> Self {
        Self {
            slope: SLOPE_RANGE.snap(self.slope),
            intercept: INTERCEPT_RANGE.snap(self.intercept),
            noise_std_dev: NOISE_RANGE.snap(self.noise_std_dev),
            n_points: N_POINTS_RANGE.snap(self.n_points as f64) as usize,
        }
    }

    /// The identity used to memoize datasets generated from these parameters.
    pub fn key(&self) -> CacheKey {
        CacheKey {
            slope: self.slope.to_bits(),
            intercept: self.intercept.to_bits(),
            noise_std_dev: self.noise_std_dev.to_bits(),
            n_points: self.n_points,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            slope: SLOPE_RANGE.default,
            intercept: INTERCEPT_RANGE.default,
            noise_std_dev: NOISE_RANGE.default,
            n_points: N_POINTS_RANGE.default as usize,
        }
    }
}

/// Exact identity of a `GenerationParams` value.
///
/// Reals are compared by bit pattern so the key is `Eq + Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    slope: u64,
    intercept: u64,
    noise_std_dev: u64,
    n_points: usize,
}

/// The range, granularity and initial position of a numeric input control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParamRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamps `value` into the range and rounds it to the nearest step
    /// counted from `min`.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }

        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

pub const SLOPE_RANGE: ParamRange = ParamRange {
    min: -5.0,
    max: 5.0,
    step: 0.1,
    default: 2.0,
};

pub const INTERCEPT_RANGE: ParamRange = ParamRange {
    min: -10.0,
    max: 10.0,
    step: 0.5,
    default: 1.0,
};

pub const NOISE_RANGE: ParamRange = ParamRange {
    min: 0.0,
    max: 10.0,
    step: 0.5,
    default: 2.0,
};

pub const N_POINTS_RANGE: ParamRange = ParamRange {
    min: 10.0,
    max: 500.0,
    step: 10.0,
    default: 100.0,
};
