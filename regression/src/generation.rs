use log::debug;
use ndarray::Array1;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use crate::{GenerationParams, Result, SampleDataset, params::X_DOMAIN};

/// Generates a noisy linear dataset.
///
/// The x values are `params.n_points` evenly spaced values over [`X_DOMAIN`],
/// both ends included, each observation gets independent gaussian noise.
///
/// # Arguments
/// * `params` - The generation parameters.
/// * `rng` - The source of the noise.
///
/// # Returns
/// An `InvalidParameter` error if `params` is invalid.
pub fn generate<R: Rng + ?Sized>(params: &GenerationParams, rng: &mut R) -> Result<SampleDataset> {
    params.validate()?;

    let x = linspace(X_DOMAIN.0, X_DOMAIN.1, params.n_points);
    let y_true = x.mapv(|x| params.true_value(x));

    let y_observed = if params.noise_std_dev == 0.0 {
        y_true.clone()
    } else {
        let noise = Normal::new(0.0, params.noise_std_dev)?;
        y_true.mapv(|y| y + noise.sample(&mut *rng))
    };

    SampleDataset::from_columns(x, y_observed, y_true)
}

/// `n` evenly spaced values over `[start, end]`, the last one is exactly `end`.
fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };

    Array1::from_shape_fn(n, |i| {
        if i + 1 == n && n > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Decides where the noise of every generated dataset comes from.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataGenerator {
    seed: Option<u64>,
}

impl DataGenerator {
    /// Creates a `DataGenerator` that restarts the same random stream on
    /// every call, the same parameters always produce the same dataset.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Creates a `DataGenerator` that draws fresh noise on every call.
    pub fn from_os_rng() -> Self {
        Self { seed: None }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates a dataset following `params`.
    ///
    /// # Returns
    /// An `InvalidParameter` error if `params` is invalid.
    pub fn generate(&self, params: &GenerationParams) -> Result<SampleDataset> {
        debug!("generating {} points, seed {:?}", params.n_points, self.seed);

        let mut rng = self.generate_rng();
        generate(params, &mut rng)
    }

    fn generate_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
