//! Domain entities operated on by the pricing and analysis layers and
//! mutated only through the [`crate::store::StrategyStore`].

mod contract;
mod scenario;
mod strategy;

pub use contract::{ContractError, ContractId, ContractUpdate, NewContract, OptionContract};
pub use scenario::ScenarioRecord;
pub use strategy::{Strategy, StrategyId};
