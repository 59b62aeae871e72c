//! Option Contract - one leg of a strategy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::OptionKind;

/// Errors from contract construction and mutation.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Strike must be strictly positive.
    #[error("Strike must be positive, got: {strike}")]
    InvalidStrike {
        /// The rejected strike.
        strike: f64,
    },
}

/// Unique contract identifier, assigned at creation, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(Uuid);

impl ContractId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One leg of an options strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    /// Unique identifier within the strategy.
    pub id: ContractId,
    /// Call or put.
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Strike price. Invariant: positive.
    pub strike: f64,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Entry price paid per share (sign of P/L flows through `quantity`).
    pub premium: f64,
    /// Signed contract count: positive = long, negative = short.
    pub quantity: i32,
}

impl OptionContract {
    /// Clone this leg for a roll: fresh id, new expiration, adjusted strike.
    /// All other fields carry over unchanged.
    #[must_use]
    pub fn rolled(&self, new_expiration: NaiveDate, strike_adjustment: f64) -> Self {
        Self {
            id: ContractId::generate(),
            expiration: new_expiration,
            strike: self.strike + strike_adjustment,
            ..self.clone()
        }
    }
}

/// Draft for a new contract, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContract {
    /// Call or put.
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Strike price.
    pub strike: f64,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Entry price paid per share.
    pub premium: f64,
    /// Signed contract count.
    pub quantity: i32,
}

impl NewContract {
    /// Validate the draft and assign a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidStrike`] when the strike is not
    /// strictly positive.
    pub fn into_contract(self) -> Result<OptionContract, ContractError> {
        if !(self.strike > 0.0) {
            return Err(ContractError::InvalidStrike {
                strike: self.strike,
            });
        }
        Ok(OptionContract {
            id: ContractId::generate(),
            kind: self.kind,
            strike: self.strike,
            expiration: self.expiration,
            premium: self.premium,
            quantity: self.quantity,
        })
    }
}

/// Partial update for an existing contract. `None` fields are left as-is;
/// the id is never changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractUpdate {
    /// New option type.
    #[serde(rename = "type")]
    pub kind: Option<OptionKind>,
    /// New strike price.
    pub strike: Option<f64>,
    /// New expiration date.
    pub expiration: Option<NaiveDate>,
    /// New entry premium.
    pub premium: Option<f64>,
    /// New signed quantity.
    pub quantity: Option<i32>,
}

impl ContractUpdate {
    /// Merge the populated fields into `contract`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidStrike`] when the update carries a
    /// non-positive strike; the contract is left untouched in that case.
    pub fn apply(&self, contract: &mut OptionContract) -> Result<(), ContractError> {
        if let Some(strike) = self.strike {
            if !(strike > 0.0) {
                return Err(ContractError::InvalidStrike { strike });
            }
        }
        if let Some(kind) = self.kind {
            contract.kind = kind;
        }
        if let Some(strike) = self.strike {
            contract.strike = strike;
        }
        if let Some(expiration) = self.expiration {
            contract.expiration = expiration;
        }
        if let Some(premium) = self.premium {
            contract.premium = premium;
        }
        if let Some(quantity) = self.quantity {
            contract.quantity = quantity;
        }
        Ok(())
    }
}
