// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Strategy Engine - Options P/L & Greeks Core
//!
//! Stateless pricing and risk engine for multi-leg options strategies,
//! plus the lifecycle service that owns the mutable strategy state.
//!
//! # Architecture
//!
//! The engine splits into three layers:
//!
//! - **Domain**: The entities every calculation operates on
//!   - `contract`: Option legs (call/put, strike, expiration, premium, quantity)
//!   - `strategy`: The aggregate of legs under one underlying
//!   - `scenario`: Immutable scenario evaluation records
//!
//! - **Numerics**: Pure, stateless functions over a strategy snapshot
//!   - `pricing`: Closed-form Black-Scholes valuation and analytic Greeks
//!   - `analysis`: Portfolio P/L aggregation, payoff-curve sampling, and
//!     scenario impact decomposition
//!
//! - **Store**: The single mutation surface
//!   - `StrategyStore`: Owns the current strategy, the persisted collection,
//!     and the scenario log; serializes all mutations
//!   - `StrategyRepository`: Persistence port (in-memory, file-backed)
//!
//! The numeric layers never mutate their inputs; all state transitions go
//! through the store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain entities - contracts, strategies, scenario records.
pub mod domain;

/// Closed-form option valuation and Greeks.
pub mod pricing;

/// Portfolio-level P/L aggregation and scenario decomposition.
pub mod analysis;

/// Strategy lifecycle service and persistence port.
pub mod store;

/// Engine configuration.
pub mod config;

// Domain re-exports
pub use domain::{
    ContractId, ContractUpdate, NewContract, OptionContract, ScenarioRecord, Strategy, StrategyId,
};

// Numerics re-exports
pub use analysis::{
    CurvePoint, CurveRange, MarketState, ScenarioImpact, ScenarioShock, pl_curve, scenario_impact,
    strategy_greeks, total_pl,
};
pub use pricing::{DEFAULT_RISK_FREE_RATE, Greeks, OptionKind, greeks, intrinsic_value, price};

// Store re-exports
pub use store::{
    FileStrategyRepository, InMemoryStrategyRepository, StoreError, StrategyRepository,
    StrategyStore,
};

// Config re-exports
pub use config::EngineConfig;
