//! Black-Scholes closed-form valuation.
//!
//! Fair value of a single European-style call or put from strike, spot,
//! time to expiry, volatility, and the risk-free rate. At or after expiry
//! the value collapses to intrinsic value.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Risk-free rate used when the caller does not override it (annualized).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.05;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// Standard normal CDF (cumulative distribution function).
///
/// Zelen & Severo rational polynomial approximation (Abramowitz & Stegun
/// 26.2.17), accurate to about 1e-7 absolute error over the full real line.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let p = d * t * (0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));
    if x > 0.0 { 1.0 - p } else { p }
}

/// Standard normal PDF (probability density function).
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter.
pub(crate) fn d1(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Black-Scholes d2 parameter.
pub(crate) fn d2(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    d1(s, k, t, r, sigma) - sigma * t.sqrt()
}

/// Option value at immediate exercise, ignoring time value.
#[must_use]
pub fn intrinsic_value(kind: OptionKind, strike: f64, spot: f64) -> f64 {
    match kind {
        OptionKind::Call => (spot - strike).max(0.0),
        OptionKind::Put => (strike - spot).max(0.0),
    }
}

/// Black-Scholes fair value for a single contract.
///
/// `t` is time to expiry in years. At or after expiry (`t <= 0`) the value
/// is the intrinsic value, modeling settlement.
///
/// Degenerate inputs (`sigma = 0`, `k = 0`, `s = 0`) are not guarded here:
/// the division or `ln` propagates a non-finite result. Callers that need a
/// defined degenerate result add their own guard (see
/// [`crate::pricing::greeks()`]).
#[must_use]
pub fn price(kind: OptionKind, k: f64, s: f64, t: f64, sigma: f64, r: f64) -> f64 {
    if t <= 0.0 {
        return intrinsic_value(kind, k, s);
    }

    let d1_val = d1(s, k, t, r, sigma);
    let d2_val = d2(s, k, t, r, sigma);

    match kind {
        OptionKind::Call => s * norm_cdf(d1_val) - k * (-r * t).exp() * norm_cdf(d2_val),
        OptionKind::Put => k * (-r * t).exp() * norm_cdf(-d2_val) - s * norm_cdf(-d1_val),
    }
}
