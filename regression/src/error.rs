use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::NormalError;

/// The result type used in the entire regression crate.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The reason a least squares fit (or one of its metrics) is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateInput {
    /// Fewer than two samples were given.
    TooFewPoints { got: usize },
    /// Every x value is identical, the slope is undefined.
    ConstantFeature,
    /// Every observed y value is identical, R² is undefined.
    ConstantTarget,
}

impl Display for DegenerateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateInput::TooFewPoints { got } => {
                write!(f, "at least 2 points are needed to fit a line, got {got}")
            }
            DegenerateInput::ConstantFeature => {
                write!(f, "x has zero variance, the slope is undefined")
            }
            DegenerateInput::ConstantTarget => {
                write!(f, "y has zero variance, R-squared is undefined")
            }
        }
    }
}

/// The regression crate's error type.
#[derive(Debug)]
pub enum RegressionErr {
    /// A generation parameter is outside of its allowed domain.
    InvalidParameter { name: &'static str, reason: String },
    /// The input of a fit doesn't determine a unique line.
    DegenerateInput(DegenerateInput),
}

impl RegressionErr {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error was caused by the caller's parameters.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns `true` if the error was caused by a degenerate dataset.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput(_))
    }
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
            RegressionErr::DegenerateInput(kind) => write!(f, "degenerate input: {kind}"),
        }
    }
}

impl Error for RegressionErr {}

impl From<DegenerateInput> for RegressionErr {
    fn from(value: DegenerateInput) -> Self {
        Self::DegenerateInput(value)
    }
}

// The only normal distribution built by this crate is the noise term.
impl From<NormalError> for RegressionErr {
    fn from(value: NormalError) -> Self {
        Self::invalid("noise_std_dev", value.to_string())
    }
}
