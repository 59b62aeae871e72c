//! Strategy lifecycle service and persistence port.
//!
//! [`StrategyStore`] is the only mutation surface in the engine: external
//! commands (add/remove/update leg, save, load, roll) go through it, and it
//! serializes every mutation behind a single lock. Persistence is a simple
//! key-value collaborator behind [`StrategyRepository`].

mod error;
mod repository;
mod service;

pub use error::StoreError;
pub use repository::{FileStrategyRepository, InMemoryStrategyRepository, StrategyRepository};
pub use service::StrategyStore;
