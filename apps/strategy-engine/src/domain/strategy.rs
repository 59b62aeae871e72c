//! Strategy aggregate - an ordered set of option legs under one underlying.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::contract::{ContractId, OptionContract};

/// Unique strategy identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyId(Uuid);

impl StrategyId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An options strategy: a named, ordered collection of contracts under one
/// underlying. Contract order is display order only; every calculation over
/// the legs is order-independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Unique identifier.
    pub id: StrategyId,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference spot price for default chart ranges.
    pub underlying_price: f64,
    /// The legs, in insertion order. Invariant: ids are unique.
    pub contracts: Vec<OptionContract>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every contract mutation.
    pub updated_at: DateTime<Utc>,
}

impl Strategy {
    /// Create an empty draft strategy.
    #[must_use]
    pub fn draft(name: impl Into<String>, underlying_price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: StrategyId::generate(),
            name: name.into(),
            description: None,
            underlying_price,
            contracts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a leg and refresh `updated_at`.
    pub fn add(&mut self, contract: OptionContract) {
        self.contracts.push(contract);
        self.touch();
    }

    /// Remove the leg with the given id. Returns whether a leg was removed;
    /// `updated_at` is refreshed either way (matching the permissive
    /// mutation contract).
    pub fn remove(&mut self, id: &ContractId) -> bool {
        let before = self.contracts.len();
        self.contracts.retain(|c| c.id != *id);
        self.touch();
        self.contracts.len() < before
    }

    /// Find a leg by id, mutably.
    pub fn find_mut(&mut self, id: &ContractId) -> Option<&mut OptionContract> {
        self.contracts.iter_mut().find(|c| c.id == *id)
    }

    /// Refresh the `updated_at` timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Snapshot for persistence: a clone with a fresh id, the given name and
    /// description, and current timestamps. The source is left untouched.
    #[must_use]
    pub fn snapshot(&self, name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: StrategyId::generate(),
            name: name.into(),
            description,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Roll every leg to a new expiration with an optional strike shift:
    /// a brand-new strategy (fresh id, fresh leg ids, annotated name) whose
    /// legs are clones of this one's. The source strategy is untouched.
    #[must_use]
    pub fn rolled(&self, new_expiration: NaiveDate, strike_adjustment: f64) -> Self {
        let now = Utc::now();
        Self {
            id: StrategyId::generate(),
            name: format!(
                "{} (Rolled to {})",
                self.name,
                new_expiration.format("%b %Y")
            ),
            description: self.description.clone(),
            underlying_price: self.underlying_price,
            contracts: self
                .contracts
                .iter()
                .map(|c| c.rolled(new_expiration, strike_adjustment))
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::NewContract;
    use crate::pricing::OptionKind;

    fn leg(strike: f64) -> OptionContract {
        NewContract {
            kind: OptionKind::Call,
            strike,
            expiration: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            premium: 5.0,
            quantity: 1,
        }
        .into_contract()
        .unwrap()
    }

    #[test]
    fn add_and_remove_refresh_updated_at() {
        let mut strategy = Strategy::draft("Test", 100.0);
        let before = strategy.updated_at;

        let contract = leg(100.0);
        let id = contract.id;
        strategy.add(contract);
        assert_eq!(strategy.contracts.len(), 1);
        assert!(strategy.updated_at >= before);

        assert!(strategy.remove(&id));
        assert!(strategy.contracts.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut strategy = Strategy::draft("Test", 100.0);
        strategy.add(leg(100.0));

        assert!(!strategy.remove(&ContractId::generate()));
        assert_eq!(strategy.contracts.len(), 1);
    }

    #[test]
    fn snapshot_gets_fresh_identity() {
        let mut strategy = Strategy::draft("Draft", 100.0);
        strategy.add(leg(100.0));

        let saved = strategy.snapshot("Iron Fly", Some("july income".into()));

        assert_ne!(saved.id, strategy.id);
        assert_eq!(saved.name, "Iron Fly");
        assert_eq!(saved.description.as_deref(), Some("july income"));
        assert_eq!(saved.contracts, strategy.contracts);
        assert_eq!(strategy.name, "Draft");
    }

    #[test]
    fn rolled_annotates_name_and_clones_legs() {
        let mut strategy = Strategy::draft("Covered Call", 100.0);
        strategy.add(leg(100.0));
        strategy.add(leg(110.0));

        let new_exp = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let rolled = strategy.rolled(new_exp, 2.5);

        assert_ne!(rolled.id, strategy.id);
        assert_eq!(rolled.name, "Covered Call (Rolled to Jul 2024)");
        assert_eq!(rolled.contracts.len(), 2);
        assert_eq!(rolled.contracts[0].strike, 102.5);
        assert_eq!(rolled.contracts[1].strike, 112.5);
        for (rolled_leg, source_leg) in rolled.contracts.iter().zip(&strategy.contracts) {
            assert_ne!(rolled_leg.id, source_leg.id);
            assert_eq!(rolled_leg.expiration, new_exp);
        }
        // Source untouched
        assert_eq!(strategy.contracts[0].strike, 100.0);
        assert_eq!(
            strategy.contracts[0].expiration,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn serde_round_trip_with_camel_case() {
        let mut strategy = Strategy::draft("Wire", 100.0);
        strategy.add(leg(95.0));

        let json = serde_json::to_value(&strategy).unwrap();
        assert!(json.get("underlyingPrice").is_some());
        assert!(json.get("createdAt").is_some());

        let parsed: Strategy = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, strategy);
    }
}
