use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use log::{info, warn};
use regression::GenerationParams;
use serde::Deserialize;

const CONFIG_VAR: &str = "CRISPDM_CONFIG";
const SEED_VAR: &str = "CRISPDM_SEED";
const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Everything the walkthrough needs, loaded from an optional JSON file.
///
/// ```json
/// { "params": { "slope": 2.0, "intercept": 1.0, "noise_std_dev": 2.0, "n_points": 100 },
///   "seed": 42, "preview_rows": 5 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub params: GenerationParams,
    pub seed: Option<u64>,
    pub preview_rows: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            params: GenerationParams::default(),
            seed: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl DemoConfig {
    /// Resolves the configuration from the first CLI argument or `CRISPDM_CONFIG`,
    /// then applies the `CRISPDM_SEED` override.
    ///
    /// # Errors
    /// Fails if the file can't be read or parsed, or the seed isn't a `u64`.
    pub fn load(arg: Option<String>) -> Result<Self> {
        let path = arg.or_else(|| env::var(CONFIG_VAR).ok());

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                info!("no config given, using defaults");
                Self::default()
            }
        };

        if let Ok(seed) = env::var(SEED_VAR) {
            config.seed = Some(
                seed.parse::<u64>()
                    .with_context(|| format!("{SEED_VAR} must be a u64, got '{seed}'"))?,
            );
        }

        Ok(config.snapped())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;

        info!("loaded config from {}", path.display());
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("invalid config JSON")
    }

    /// Moves valid parameters outside of the input controls back into range,
    /// invalid ones are left for the session to reject.
    fn snapped(mut self) -> Self {
        if self.params.validate().is_ok() && !self.params.within_controls() {
            let snapped = self.params.snapped_to_controls();
            warn!(
                "parameters {:?} are outside of the controls, using {:?}",
                self.params, snapped
            );
            self.params = snapped;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = DemoConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.params, GenerationParams::default());
        assert_eq!(config.preview_rows, DEFAULT_PREVIEW_ROWS);
    }

    #[test]
    fn full_config_parses() {
        let config = DemoConfig::from_json(
            r#"{
                "params": { "slope": -1.5, "intercept": 4.0, "noise_std_dev": 0.0, "n_points": 20 },
                "preview_rows": 3
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.params,
            GenerationParams::new(-1.5, 4.0, 0.0, 20).unwrap()
        );
        assert_eq!(config.seed, None);
        assert_eq!(config.preview_rows, 3);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(DemoConfig::from_json(r#"{ "sed": 7 }"#).is_err());
    }

    #[test]
    fn out_of_range_params_are_snapped() {
        let config = DemoConfig {
            params: GenerationParams {
                slope: 12.0,
                intercept: 0.0,
                noise_std_dev: 1.0,
                n_points: 3,
            },
            ..DemoConfig::default()
        }
        .snapped();

        assert_eq!(config.params.slope, 5.0);
        assert_eq!(config.params.n_points, 10);
    }

    #[test]
    fn invalid_params_are_not_snapped() {
        let params = GenerationParams {
            n_points: 1,
            ..GenerationParams::default()
        };
        let config = DemoConfig {
            params,
            ..DemoConfig::default()
        }
        .snapped();

        assert_eq!(config.params, params);
    }
}
