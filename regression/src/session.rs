use std::rc::Rc;

use log::{debug, info, warn};

use crate::{
    DataGenerator, DatasetCache, Evaluation, FitResult, GenerationParams, Result, SampleDataset,
    fit,
};

/// Everything derived from one set of parameters.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub params: GenerationParams,
    pub dataset: Rc<SampleDataset>,
    pub fit: FitResult,
    pub evaluation: Evaluation,
}

/// What `Session::update` did with the given parameters.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The parameters equal the last accepted ones, nothing was recomputed.
    Unchanged(Snapshot),
    /// The dataset and the fit were recomputed.
    Recomputed(Snapshot),
}

impl Outcome {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            Outcome::Unchanged(s) | Outcome::Recomputed(s) => s,
        }
    }

    pub fn recomputed(&self) -> bool {
        matches!(self, Outcome::Recomputed(_))
    }
}

/// Recomputes the dataset and its fit whenever the input parameters change.
///
/// A failed update leaves the previous snapshot in place.
#[derive(Debug)]
pub struct Session {
    generator: DataGenerator,
    cache: DatasetCache,
    current: Option<Snapshot>,
}

impl Session {
    /// Creates a new `Session`.
    ///
    /// # Arguments
    /// * `generator` - Where the noise of every dataset comes from.
    /// * `cache` - The memo of generated datasets.
    pub fn new(generator: DataGenerator, cache: DatasetCache) -> Self {
        info!("starting session, seed {:?}", generator.seed());

        Self {
            generator,
            cache,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Feeds a new set of parameters into the session.
    ///
    /// # Returns
    /// An `InvalidParameter` error if `params` is invalid, or a
    /// `DegenerateInput` error if the generated dataset can't be fitted.
    pub fn update(&mut self, params: GenerationParams) -> Result<Outcome> {
        if let Err(e) = params.validate() {
            warn!("rejected parameters {params:?}: {e}");
            return Err(e);
        }

        if let Some(current) = self.current.as_ref().filter(|s| s.params.key() == params.key()) {
            debug!("parameters unchanged, skipping recompute");
            return Ok(Outcome::Unchanged(current.clone()));
        }

        let generator = self.generator;
        let dataset = self
            .cache
            .get_or_try_insert_with(&params, |p| generator.generate(p))?;
        let fit = fit(&dataset)?;
        let evaluation = Evaluation::new(&params, &fit);

        debug!(
            "fitted slope {:.4}, intercept {:.4}, r2 {:?}",
            fit.slope, fit.intercept, evaluation.r_squared
        );

        let snapshot = Snapshot {
            params,
            dataset,
            fit,
            evaluation,
        };
        self.current = Some(snapshot.clone());

        Ok(Outcome::Recomputed(snapshot))
    }
}
