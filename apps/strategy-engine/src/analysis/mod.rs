//! Portfolio-level analytics over a strategy snapshot.
//!
//! Everything here is a pure function of `(contracts, market state)`:
//! no mutation of inputs, no side effects, order-independent aggregation.

mod pl;
mod scenario;

pub use pl::{
    CONTRACT_MULTIPLIER, CurvePoint, CurveRange, MarketState, pl_curve, strategy_greeks, total_pl,
};
pub use scenario::{ScenarioImpact, ScenarioShock, scenario_impact};
