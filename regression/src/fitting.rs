use ndarray::Array1;

use crate::{DegenerateInput, Result, SampleDataset};

/// An ordinary least squares line and the sums of squares it was judged by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub ss_residual: f64,
    pub ss_total: f64,
    pub n: usize,
}

/// Fits `y_observed = slope * x + intercept` by ordinary least squares.
///
/// The sums are taken around the means (two passes), which keeps the
/// result accurate when the x values are far from zero.
///
/// # Returns
/// A `DegenerateInput` error if there are fewer than two samples or x has
/// no representable variance.
pub fn fit(dataset: &SampleDataset) -> Result<FitResult> {
    let n = dataset.len();
    if n < 2 {
        return Err(DegenerateInput::TooFewPoints { got: n }.into());
    }

    let x = dataset.x();
    let y = dataset.y_observed();

    if is_constant(x) {
        return Err(DegenerateInput::ConstantFeature.into());
    }

    let x_mean = mean(x);
    let y_mean = mean(y);

    let (sxx, sxy) = x
        .iter()
        .zip(y.iter())
        .fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxx + dx * dx, sxy + dx * (yi - y_mean))
        });

    // Distinct x values can still underflow (or overflow) the sum of squares.
    if !(sxx > 0.0 && sxx.is_finite()) {
        return Err(DegenerateInput::ConstantFeature.into());
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let ss_residual = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (yi - (slope * xi + intercept)).powi(2))
        .sum();

    // Exactly zero when every observation is equal, even if the mean rounds.
    let ss_total = if is_constant(y) {
        0.0
    } else {
        y.iter().map(|&yi| (yi - y_mean).powi(2)).sum()
    };

    Ok(FitResult {
        slope,
        intercept,
        ss_residual,
        ss_total,
        n,
    })
}

fn mean(values: &Array1<f64>) -> f64 {
    values.mean().unwrap_or_default()
}

fn is_constant(values: &Array1<f64>) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

impl FitResult {
    /// The coefficient of determination, `1 - SS_res / SS_tot`.
    ///
    /// # Returns
    /// A `DegenerateInput` error if the observations have no variance.
    pub fn r_squared(&self) -> Result<f64> {
        if self.ss_total == 0.0 {
            return Err(DegenerateInput::ConstantTarget.into());
        }

        Ok(1.0 - self.ss_residual / self.ss_total)
    }

    /// Same as [`FitResult::r_squared`] but undefined values are `NaN`.
    pub fn r_squared_or_nan(&self) -> f64 {
        self.r_squared().unwrap_or(f64::NAN)
    }

    /// Root mean squared residual.
    pub fn rmse(&self) -> f64 {
        (self.ss_residual / self.n as f64).sqrt()
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// The fitted line evaluated at every x of `dataset`.
    pub fn predictions(&self, dataset: &SampleDataset) -> Array1<f64> {
        dataset.x().mapv(|x| self.predict(x))
    }

    /// `y_observed - prediction` for every sample of `dataset`.
    pub fn residuals(&self, dataset: &SampleDataset) -> Array1<f64> {
        dataset.y_observed() - &self.predictions(dataset)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{GenerationParams, RegressionErr, generate};

    const TOL: f64 = 1e-9;

    fn noise_free(slope: f64, intercept: f64, n: usize) -> SampleDataset {
        let params = GenerationParams::new(slope, intercept, 0.0, n).unwrap();
        generate(&params, &mut StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn recovers_reference_line() {
        let result = fit(&noise_free(2.0, 1.0, 100)).unwrap();

        assert!((result.slope - 2.0).abs() < TOL);
        assert!((result.intercept - 1.0).abs() < TOL);
        assert!((result.r_squared().unwrap() - 1.0).abs() < TOL);
        assert!(result.rmse() < TOL);
    }

    #[test]
    fn recovers_lines_across_controls() {
        for (slope, intercept, n) in [(-5.0, -10.0, 10), (0.3, 7.5, 37), (4.9, 0.0, 500)] {
            let result = fit(&noise_free(slope, intercept, n)).unwrap();
            assert!((result.slope - slope).abs() < TOL, "slope {slope}");
            assert!((result.intercept - intercept).abs() < TOL, "intercept {intercept}");
            assert!((result.r_squared_or_nan() - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn matches_hand_computed_fit() {
        // x mean 2, y mean 3, Sxx 10, Sxy 12 and SS_tot 16.
        let dataset =
            SampleDataset::from_points(&[(0., 1.), (1., 2.), (2., 2.), (3., 4.), (4., 6.)])
                .unwrap();
        let result = fit(&dataset).unwrap();

        assert!((result.slope - 1.2).abs() < TOL);
        assert!((result.intercept - 0.6).abs() < TOL);
        assert!((result.ss_total - 16.0).abs() < TOL);
        assert!((result.ss_residual - 1.6).abs() < TOL);
        assert!((result.r_squared().unwrap() - 0.9).abs() < TOL);
    }

    #[test]
    fn residuals_are_orthogonal_to_x() {
        let params = GenerationParams::new(1.5, -2.0, 3.0, 200).unwrap();
        let dataset = generate(&params, &mut StdRng::seed_from_u64(3)).unwrap();
        let result = fit(&dataset).unwrap();

        let residuals = result.residuals(&dataset);
        assert!(residuals.sum().abs() < 1e-8);
        assert!(residuals.dot(dataset.x()).abs() < 1e-6);
        assert!((residuals.mapv(|r| r * r).sum() - result.ss_residual).abs() < 1e-8);
    }

    #[test]
    fn predictions_follow_the_line() {
        let dataset = noise_free(-3.0, 4.0, 10);
        let result = fit(&dataset).unwrap();
        let predictions = result.predictions(&dataset);

        for (p, s) in predictions.iter().zip(dataset.iter()) {
            assert!((p - s.y_true).abs() < TOL);
        }
    }

    #[test]
    fn constant_x_is_degenerate() {
        let dataset = SampleDataset::from_points(&[(1., 1.), (1., 2.), (1., 3.)]).unwrap();
        let err = fit(&dataset).unwrap_err();
        assert!(matches!(
            err,
            RegressionErr::DegenerateInput(DegenerateInput::ConstantFeature)
        ));
    }

    #[test]
    fn underflowing_x_variance_is_degenerate() {
        let dataset = SampleDataset::from_points(&[(0.0, 0.0), (1e-200, 1.0)]).unwrap();
        assert!(matches!(
            fit(&dataset),
            Err(RegressionErr::DegenerateInput(DegenerateInput::ConstantFeature))
        ));
    }

    #[test]
    fn overflowing_x_variance_is_degenerate() {
        let dataset = SampleDataset::from_points(&[(-1e200, 0.0), (1e200, 1.0)]).unwrap();
        assert!(fit(&dataset).unwrap_err().is_degenerate());
    }

    #[test]
    fn too_few_points_is_degenerate() {
        let dataset = SampleDataset::from_points(&[(1., 1.)]).unwrap();
        assert!(matches!(
            fit(&dataset),
            Err(RegressionErr::DegenerateInput(DegenerateInput::TooFewPoints { got: 1 }))
        ));
    }

    #[test]
    fn constant_y_has_undefined_r_squared() {
        let result = fit(&noise_free(0.0, 3.0, 20)).unwrap();

        assert!(result.slope.abs() < TOL);
        assert!((result.intercept - 3.0).abs() < TOL);
        assert!(matches!(
            result.r_squared(),
            Err(RegressionErr::DegenerateInput(DegenerateInput::ConstantTarget))
        ));
        assert!(result.r_squared_or_nan().is_nan());
    }
}
