//! Portfolio P/L aggregation and payoff-curve sampling.

use serde::{Deserialize, Serialize};

use crate::domain::OptionContract;
use crate::pricing::{self, DEFAULT_RISK_FREE_RATE, Greeks};

/// Standard equity-option contract multiplier (shares per contract).
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

const DAYS_PER_YEAR: f64 = 365.0;

/// Market inputs for a single evaluation: not a stored entity, just the
/// tuple every pricing call takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    /// Underlying spot price.
    pub spot: f64,
    /// Implied volatility (annualized, e.g. 0.30 = 30%).
    pub volatility: f64,
    /// Calendar days until expiration.
    pub days_to_expiry: f64,
    /// Annualized risk-free rate.
    pub risk_free_rate: f64,
}

impl MarketState {
    /// Market state with the default risk-free rate.
    #[must_use]
    pub const fn new(spot: f64, volatility: f64, days_to_expiry: f64) -> Self {
        Self {
            spot,
            volatility,
            days_to_expiry,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Override the risk-free rate.
    #[must_use]
    pub const fn with_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Time to expiry in years.
    #[must_use]
    pub fn years_to_expiry(&self) -> f64 {
        self.days_to_expiry / DAYS_PER_YEAR
    }
}

/// Total P/L for a set of legs under the given market state.
///
/// Per leg: `(current fair value - entry premium) * quantity * 100`.
/// Short legs carry negative quantity, so their P/L flips sign. The sum is
/// commutative; contract order never matters. Empty set is worth 0.
#[must_use]
pub fn total_pl(contracts: &[OptionContract], market: &MarketState) -> f64 {
    contracts
        .iter()
        .map(|contract| {
            let current = pricing::price(
                contract.kind,
                contract.strike,
                market.spot,
                market.years_to_expiry(),
                market.volatility,
                market.risk_free_rate,
            );
            (current - contract.premium) * f64::from(contract.quantity) * CONTRACT_MULTIPLIER
        })
        .sum()
}

/// Strategy-level Greeks: per-leg sensitivities scaled by signed quantity
/// and summed.
#[must_use]
pub fn strategy_greeks(contracts: &[OptionContract], market: &MarketState) -> Greeks {
    contracts.iter().fold(Greeks::zero(), |acc, contract| {
        let leg = pricing::greeks(
            contract.kind,
            contract.strike,
            market.spot,
            market.years_to_expiry(),
            market.volatility,
            market.risk_free_rate,
        );
        acc.add(&leg.scale(f64::from(contract.quantity)))
    })
}

/// One sample on a P/L curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Hypothetical underlying price.
    pub price: f64,
    /// Total strategy P/L at that price.
    pub pl: f64,
}

/// Sampling range for a P/L curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveRange {
    /// Lowest sampled price.
    pub min: f64,
    /// Highest sampled price.
    pub max: f64,
    /// Number of evenly spaced samples.
    pub points: usize,
}

impl CurveRange {
    /// Default chart range: 100 points between 0.8x and 1.2x spot.
    #[must_use]
    pub fn around_spot(spot: f64) -> Self {
        Self {
            min: spot * 0.8,
            max: spot * 1.2,
            points: 100,
        }
    }
}

/// Sample the strategy's P/L across a range of hypothetical underlying
/// prices, holding volatility and time fixed. Pure: charting backends
/// consume the samples, the engine never renders.
#[must_use]
pub fn pl_curve(
    contracts: &[OptionContract],
    market: &MarketState,
    range: &CurveRange,
) -> Vec<CurvePoint> {
    if range.points == 0 {
        return Vec::new();
    }
    let step = (range.max - range.min) / range.points as f64;
    (0..range.points)
        .map(|i| {
            let price = range.min + step * i as f64;
            let shifted = MarketState {
                spot: price,
                ..*market
            };
            CurvePoint {
                price,
                pl: total_pl(contracts, &shifted),
            }
        })
        .collect()
}
