//! Scenario impact decomposition.
//!
//! Isolates how much of a hypothetical market move's P/L is attributable to
//! price, volatility, and time individually: each factor is shocked alone
//! with the other two held at base, and the combined shock is evaluated
//! separately.

use serde::{Deserialize, Serialize};

use super::pl::{MarketState, total_pl};
use crate::domain::OptionContract;

/// A hypothetical market move, expressed relative to a base state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioShock {
    /// Underlying price change, in percent (10.0 = +10%).
    pub price_change_pct: f64,
    /// Volatility change, in percent of the base volatility.
    pub vol_change_pct: f64,
    /// Days to expiration after the move (replaces the base, not a delta).
    pub new_days: f64,
}

/// P/L deltas from a base market state, per factor and combined.
///
/// The decomposition is not additive: `price_pl + vol_pl + time_pl` will
/// generally differ from `total_pl` because option value is non-linear in
/// its joint arguments (cross terms). That is a property of the model, not
/// an inconsistency to reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioImpact {
    /// P/L delta from the price move alone.
    pub price_pl: f64,
    /// P/L delta from the volatility move alone.
    pub vol_pl: f64,
    /// P/L delta from time decay alone.
    pub time_pl: f64,
    /// P/L delta with all three factors moved together.
    pub total_pl: f64,
}

/// Decompose a scenario's P/L impact against a base market state.
///
/// Each component re-prices the full strategy with exactly one factor
/// changed; `total_pl` re-prices with all three changed at once. All four
/// are deltas from the base P/L.
#[must_use]
pub fn scenario_impact(
    contracts: &[OptionContract],
    base: &MarketState,
    shock: &ScenarioShock,
) -> ScenarioImpact {
    let base_pl = total_pl(contracts, base);

    let shocked_price = base.spot * (1.0 + shock.price_change_pct / 100.0);
    let shocked_vol = base.volatility * (1.0 + shock.vol_change_pct / 100.0);

    let price_only = total_pl(
        contracts,
        &MarketState {
            spot: shocked_price,
            ..*base
        },
    );
    let vol_only = total_pl(
        contracts,
        &MarketState {
            volatility: shocked_vol,
            ..*base
        },
    );
    let time_only = total_pl(
        contracts,
        &MarketState {
            days_to_expiry: shock.new_days,
            ..*base
        },
    );
    let combined = total_pl(
        contracts,
        &MarketState {
            spot: shocked_price,
            volatility: shocked_vol,
            days_to_expiry: shock.new_days,
            ..*base
        },
    );

    ScenarioImpact {
        price_pl: price_only - base_pl,
        vol_pl: vol_only - base_pl,
        time_pl: time_only - base_pl,
        total_pl: combined - base_pl,
    }
}
