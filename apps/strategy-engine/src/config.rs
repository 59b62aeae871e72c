//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunable engine parameters. Every field has a default, so hosts can
/// provide partial configuration (file or environment) or none at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Risk-free rate (annualized).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Shares per contract.
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: f64,
    /// Samples per P/L curve.
    #[serde(default = "default_curve_points")]
    pub curve_points: usize,
    /// Curve half-width as a fraction of spot (0.2 = sample 0.8x-1.2x).
    #[serde(default = "default_curve_range_pct")]
    pub curve_range_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            contract_multiplier: default_contract_multiplier(),
            curve_points: default_curve_points(),
            curve_range_pct: default_curve_range_pct(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from an optional TOML file plus `ENGINE_`-prefixed
    /// environment overrides (e.g. `ENGINE_RISK_FREE_RATE=0.04`).
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be parsed, or when
    /// an override has the wrong type.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder
            .add_source(config::Environment::with_prefix("ENGINE"))
            .build()?
            .try_deserialize()
    }

    /// Curve sampling range for the given spot price.
    #[must_use]
    pub fn curve_range(&self, spot: f64) -> crate::analysis::CurveRange {
        crate::analysis::CurveRange {
            min: spot * (1.0 - self.curve_range_pct),
            max: spot * (1.0 + self.curve_range_pct),
            points: self.curve_points,
        }
    }
}

const fn default_risk_free_rate() -> f64 {
    0.05
}

const fn default_contract_multiplier() -> f64 {
    100.0
}

const fn default_curve_points() -> usize {
    100
}

const fn default_curve_range_pct() -> f64 {
    0.2
}
