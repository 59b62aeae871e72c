//! Analytic first-order Greeks for a single contract.
//!
//! Reporting conventions:
//! - theta is per calendar day (raw per-year value divided by 365)
//! - vega is per 1 percentage-point volatility change (divided by 100)
//! - rho is per 1 percentage-point rate change (divided by 100)

use serde::{Deserialize, Serialize};

use super::black_scholes::{OptionKind, d1, d2, norm_cdf, norm_pdf};

const DAYS_PER_YEAR: f64 = 365.0;

/// First-order sensitivities for an option or a whole strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Rate of change of option price with respect to underlying price.
    /// Range: -1.0 to 1.0 for individual options.
    pub delta: f64,
    /// Rate of change of delta with respect to underlying price.
    pub gamma: f64,
    /// Rate of change of option price with respect to time (per day).
    /// Typically negative for long options.
    pub theta: f64,
    /// Sensitivity to implied volatility (per 1% change in IV).
    pub vega: f64,
    /// Sensitivity to interest rate changes (per 1% change in rates).
    pub rho: f64,
}

impl Greeks {
    /// Create new Greeks.
    #[must_use]
    pub const fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// All-zero Greeks, the defined result for degenerate inputs.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Scale by a signed quantity (positive for long, negative for short).
    #[must_use]
    pub fn scale(&self, quantity: f64) -> Self {
        Self {
            delta: self.delta * quantity,
            gamma: self.gamma * quantity,
            theta: self.theta * quantity,
            vega: self.vega * quantity,
            rho: self.rho * quantity,
        }
    }

    /// Component-wise sum with another Greeks.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }
}

/// Analytic Greeks for a single contract.
///
/// Returns [`Greeks::zero`] when `t <= 0`, `sigma <= 0`, or `s <= 0` --
/// "no sensitivity when undefined". This guard is deliberately stricter
/// than [`super::price`], which propagates non-finite values instead.
#[must_use]
pub fn greeks(kind: OptionKind, k: f64, s: f64, t: f64, sigma: f64, r: f64) -> Greeks {
    if t <= 0.0 || sigma <= 0.0 || s <= 0.0 {
        return Greeks::zero();
    }

    let d1_val = d1(s, k, t, r, sigma);
    let d2_val = d2(s, k, t, r, sigma);
    let phi_d1 = norm_pdf(d1_val);
    let discount = (-r * t).exp();

    let delta = match kind {
        OptionKind::Call => norm_cdf(d1_val),
        OptionKind::Put => norm_cdf(d1_val) - 1.0,
    };

    // Gamma is type-independent
    let gamma = phi_d1 / (s * sigma * t.sqrt());

    let decay = -s * sigma * phi_d1 / (2.0 * t.sqrt());
    let theta = match kind {
        OptionKind::Call => decay - r * k * discount * norm_cdf(d2_val),
        OptionKind::Put => decay + r * k * discount * norm_cdf(-d2_val),
    };

    let vega = s * t.sqrt() * phi_d1;

    let rho = match kind {
        OptionKind::Call => k * t * discount * norm_cdf(d2_val),
        OptionKind::Put => -k * t * discount * norm_cdf(-d2_val),
    };

    Greeks {
        delta,
        gamma,
        theta: theta / DAYS_PER_YEAR,
        vega: vega / 100.0,
        rho: rho / 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn degenerate_inputs_return_zero() {
        let zero = Greeks::zero();
        assert_eq!(greeks(OptionKind::Call, 100.0, 100.0, 0.0, 0.3, 0.05), zero);
        assert_eq!(greeks(OptionKind::Call, 100.0, 100.0, -1.0, 0.3, 0.05), zero);
        assert_eq!(greeks(OptionKind::Put, 100.0, 100.0, 0.5, 0.0, 0.05), zero);
        assert_eq!(greeks(OptionKind::Put, 100.0, 0.0, 0.5, 0.3, 0.05), zero);
        assert_eq!(greeks(OptionKind::Put, 100.0, -5.0, 0.5, 0.3, 0.05), zero);
    }

    #[test]
    fn atm_call_delta_near_half() {
        // ATM call delta slightly above 0.5 from the drift term
        let g = greeks(OptionKind::Call, 100.0, 100.0, 1.0, 0.20, 0.05);
        assert!(g.delta > 0.5 && g.delta < 0.7, "delta = {}", g.delta);
    }

    #[test]
    fn put_call_delta_relationship() {
        // delta_call - delta_put = 1 for the same contract terms
        let call = greeks(OptionKind::Call, 100.0, 105.0, 0.5, 0.25, 0.05);
        let put = greeks(OptionKind::Put, 100.0, 105.0, 0.5, 0.25, 0.05);
        assert!(approx_eq(call.delta - put.delta, 1.0, 1e-6));
        // Gamma and vega are type-independent
        assert!(approx_eq(call.gamma, put.gamma, 1e-12));
        assert!(approx_eq(call.vega, put.vega, 1e-12));
    }

    #[test]
    fn long_call_theta_negative() {
        let g = greeks(OptionKind::Call, 100.0, 100.0, 30.0 / 365.0, 0.30, 0.05);
        assert!(g.theta < 0.0);
        // Per-day theta for a 30-day ATM option is a small fraction of value
        assert!(g.theta > -1.0);
    }

    #[test]
    fn vega_reported_per_percentage_point() {
        // Raw vega S*sqrt(t)*phi(d1) divided by 100
        let k = 100.0;
        let s = 100.0;
        let t = 1.0;
        let sigma = 0.20;
        let r = 0.05;
        let g = greeks(OptionKind::Call, k, s, t, sigma, r);
        let raw = s * t.sqrt() * norm_pdf(d1(s, k, t, r, sigma));
        assert!(approx_eq(g.vega, raw / 100.0, 1e-12));
    }

    #[test]
    fn rho_signs() {
        let call = greeks(OptionKind::Call, 100.0, 100.0, 1.0, 0.2, 0.05);
        let put = greeks(OptionKind::Put, 100.0, 100.0, 1.0, 0.2, 0.05);
        assert!(call.rho > 0.0);
        assert!(put.rho < 0.0);
    }

    #[test]
    fn scale_and_add() {
        let g = Greeks::new(0.5, 0.01, -5.0, 10.0, 1.0);

        let long10 = g.scale(10.0);
        assert_eq!(long10.delta, 5.0);
        assert_eq!(long10.theta, -50.0);

        let short5 = g.scale(-5.0);
        assert_eq!(short5.delta, -2.5);

        let sum = long10.add(&short5);
        assert!(approx_eq(sum.delta, 2.5, 1e-12));
        assert!(approx_eq(sum.vega, 50.0, 1e-12));
    }
}
