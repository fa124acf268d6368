use crate::{FitResult, GenerationParams};

/// A fitted line compared against the line the data was generated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub true_slope: f64,
    pub true_intercept: f64,
    pub fitted_slope: f64,
    pub fitted_intercept: f64,
    /// `None` when the observations have no variance.
    pub r_squared: Option<f64>,
}

/// A labelled scalar with its optional deviation from a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: Option<f64>,
    pub delta: Option<f64>,
    pub precision: usize,
}

impl Evaluation {
    pub fn new(params: &GenerationParams, fit: &FitResult) -> Self {
        Self {
            true_slope: params.slope,
            true_intercept: params.intercept,
            fitted_slope: fit.slope,
            fitted_intercept: fit.intercept,
            r_squared: fit.r_squared().ok(),
        }
    }

    /// `fitted - true` for the slope.
    pub fn slope_delta(&self) -> f64 {
        self.fitted_slope - self.true_slope
    }

    /// `fitted - true` for the intercept.
    pub fn intercept_delta(&self) -> f64 {
        self.fitted_intercept - self.true_intercept
    }

    /// The metrics shown to the user, in display order.
    pub fn summary(&self) -> Vec<Metric> {
        vec![
            Metric {
                label: "fitted slope (a')",
                value: Some(self.fitted_slope),
                delta: Some(self.slope_delta()),
                precision: 2,
            },
            Metric {
                label: "fitted intercept (b')",
                value: Some(self.fitted_intercept),
                delta: Some(self.intercept_delta()),
                precision: 2,
            },
            Metric {
                label: "R-squared",
                value: self.r_squared,
                delta: None,
                precision: 3,
            },
        ]
    }
}

impl Metric {
    /// The value with the metric's precision, `undefined` if there is none.
    pub fn formatted_value(&self) -> String {
        match self.value {
            Some(v) => format!("{v:.prec$}", prec = self.precision),
            None => "undefined".to_string(),
        }
    }

    pub fn formatted_delta(&self) -> Option<String> {
        self.delta.map(|d| format!("{d:+.prec$}", prec = self.precision))
    }
}
