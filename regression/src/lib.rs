//! Synthetic simple linear regression.
//!
//! Parameters go into the [`DataGenerator`], the generated [`SampleDataset`]
//! goes into [`fit`], and the resulting [`FitResult`] is compared against
//! the true line by an [`Evaluation`]. A [`Session`] ties the steps together,
//! recomputing only when the parameters change and memoizing datasets in a
//! [`DatasetCache`].

mod cache;
mod dataset;
mod error;
mod evaluation;
mod fitting;
mod generation;
pub mod params;
mod session;

pub use cache::{CacheStats, DatasetCache};
pub use dataset::{Sample, SampleDataset};
pub use error::{DegenerateInput, RegressionErr, Result};
pub use evaluation::{Evaluation, Metric};
pub use fitting::{FitResult, fit};
pub use generation::{DataGenerator, generate};
pub use params::GenerationParams;
pub use session::{Outcome, Session, Snapshot};
