//! Closed-form option valuation and risk sensitivities.
//!
//! This module provides:
//! - Black-Scholes fair value for a single call/put
//! - Analytic first-order Greeks (delta, gamma, theta, vega, rho)
//!
//! # Example
//!
//! ```
//! use strategy_engine::pricing::{self, OptionKind};
//!
//! // ATM call, 30 days out, 30% vol
//! let value = pricing::price(OptionKind::Call, 100.0, 100.0, 30.0 / 365.0, 0.30, 0.05);
//! assert!(value > 0.0);
//!
//! let greeks = pricing::greeks(OptionKind::Call, 100.0, 100.0, 30.0 / 365.0, 0.30, 0.05);
//! assert!(greeks.delta > 0.0 && greeks.delta < 1.0);
//! ```

mod black_scholes;
mod greeks;

pub use black_scholes::{
    DEFAULT_RISK_FREE_RATE, OptionKind, intrinsic_value, norm_cdf, norm_pdf, price,
};
pub use greeks::{Greeks, greeks};
