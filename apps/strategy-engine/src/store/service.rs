//! Strategy store: the single state-owning service.
//!
//! Owns the current (editable) strategy, the cached persisted collection,
//! and the scenario log. All mutations are serialized behind one lock so
//! UI-driven commands and persistence I/O interleave with read-after-write
//! consistency. The numeric engine is invoked on snapshots taken from here
//! and never mutates them.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::error::StoreError;
use super::repository::StrategyRepository;
use crate::domain::{
    ContractId, ContractUpdate, NewContract, ScenarioRecord, Strategy, StrategyId,
};

#[derive(Debug)]
struct State {
    current: Strategy,
    saved: Vec<Strategy>,
    scenarios: Vec<ScenarioRecord>,
}

/// The state-owning strategy service.
///
/// Injected into callers (no ambient global); exposes the lifecycle
/// operations as its only mutation surface.
pub struct StrategyStore {
    state: RwLock<State>,
    repository: Arc<dyn StrategyRepository>,
}

impl StrategyStore {
    /// Create a store with an empty current strategy.
    #[must_use]
    pub fn new(repository: Arc<dyn StrategyRepository>) -> Self {
        Self {
            state: RwLock::new(State {
                current: Strategy::draft("New Strategy", 100.0),
                saved: Vec::new(),
                scenarios: Vec::new(),
            }),
            repository,
        }
    }

    /// Load the persisted collection into the in-memory cache. Called once
    /// at startup; a missing document leaves the cache empty.
    pub async fn hydrate(&self) -> Result<(), StoreError> {
        let loaded = self.repository.load().await?;
        let mut state = self.state.write().await;
        state.saved = loaded.unwrap_or_default();
        info!(count = state.saved.len(), "hydrated saved strategies");
        Ok(())
    }

    /// Snapshot of the current strategy.
    pub async fn current_strategy(&self) -> Strategy {
        self.state.read().await.current.clone()
    }

    /// Snapshot of the persisted collection cache.
    pub async fn saved_strategies(&self) -> Vec<Strategy> {
        self.state.read().await.saved.clone()
    }

    /// Validate a draft leg, assign it a fresh id, and append it to the
    /// current strategy.
    pub async fn add_contract(&self, draft: NewContract) -> Result<ContractId, StoreError> {
        let contract = draft.into_contract()?;
        let id = contract.id;
        let mut state = self.state.write().await;
        state.current.add(contract);
        debug!(contract_id = %id, legs = state.current.contracts.len(), "contract added");
        Ok(id)
    }

    /// Remove the leg with the given id. Unknown ids are a silent no-op.
    pub async fn remove_contract(&self, id: &ContractId) {
        let mut state = self.state.write().await;
        if !state.current.remove(id) {
            debug!(contract_id = %id, "remove: contract not found");
        }
    }

    /// Merge a partial update into the matching leg. Unknown ids are a
    /// silent no-op.
    pub async fn update_contract(
        &self,
        id: &ContractId,
        update: ContractUpdate,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.current.find_mut(id) {
            Some(contract) => update.apply(contract)?,
            None => debug!(contract_id = %id, "update: contract not found"),
        }
        state.current.touch();
        Ok(())
    }

    /// Set the current strategy's reference spot price.
    pub async fn set_underlying_price(&self, price: f64) {
        let mut state = self.state.write().await;
        state.current.underlying_price = price;
        state.current.touch();
    }

    /// Snapshot the current strategy into the persisted collection under a
    /// fresh id and persist the whole collection.
    ///
    /// # Errors
    ///
    /// Persistence failures surface as [`StoreError`]; the snapshot stays in
    /// the in-memory cache either way.
    pub async fn save_strategy(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<StrategyId, StoreError> {
        let mut state = self.state.write().await;
        let snapshot = state.current.snapshot(name, description);
        let id = snapshot.id;
        state.saved.push(snapshot);

        if let Err(e) = self.repository.save(&state.saved).await {
            warn!(strategy_id = %id, error = %e, "persisting saved strategies failed");
            return Err(e);
        }
        info!(strategy_id = %id, count = state.saved.len(), "strategy saved");
        Ok(id)
    }

    /// Replace the current strategy with a deep copy of the matching
    /// persisted strategy. Unknown ids are a silent no-op.
    pub async fn load_strategy(&self, id: &StrategyId) {
        let mut state = self.state.write().await;
        match state.saved.iter().find(|s| s.id == *id).cloned() {
            Some(strategy) => {
                info!(strategy_id = %id, name = %strategy.name, "strategy loaded");
                state.current = strategy;
            }
            None => debug!(strategy_id = %id, "load: strategy not found"),
        }
    }

    /// Roll a persisted strategy to a new expiration: a brand-new strategy
    /// (fresh ids throughout, annotated name, strikes shifted by
    /// `strike_adjustment`) is appended to the collection and persisted.
    /// The source strategy is untouched.
    ///
    /// Returns `Ok(None)` when the source id is unknown.
    pub async fn roll_strategy(
        &self,
        id: &StrategyId,
        new_expiration: NaiveDate,
        strike_adjustment: f64,
    ) -> Result<Option<StrategyId>, StoreError> {
        let mut state = self.state.write().await;
        let Some(source) = state.saved.iter().find(|s| s.id == *id) else {
            debug!(strategy_id = %id, "roll: strategy not found");
            return Ok(None);
        };

        let rolled = source.rolled(new_expiration, strike_adjustment);
        let rolled_id = rolled.id;
        state.saved.push(rolled);

        if let Err(e) = self.repository.save(&state.saved).await {
            warn!(strategy_id = %rolled_id, error = %e, "persisting rolled strategy failed");
            return Err(e);
        }
        info!(
            source_id = %id,
            strategy_id = %rolled_id,
            expiration = %new_expiration,
            strike_adjustment,
            "strategy rolled"
        );
        Ok(Some(rolled_id))
    }

    /// Append a scenario evaluation to the log.
    pub async fn record_scenario(&self, record: ScenarioRecord) {
        let mut state = self.state.write().await;
        state.scenarios.push(record);
    }

    /// Snapshot of the scenario log.
    pub async fn scenarios(&self) -> Vec<ScenarioRecord> {
        self.state.read().await.scenarios.clone()
    }

    /// Clear the scenario log as a batch.
    pub async fn clear_scenarios(&self) {
        let mut state = self.state.write().await;
        state.scenarios.clear();
    }
}

impl std::fmt::Debug for StrategyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::OptionKind;
    use crate::store::repository::InMemoryStrategyRepository;

    fn store_with_memory() -> (StrategyStore, Arc<InMemoryStrategyRepository>) {
        let repo = Arc::new(InMemoryStrategyRepository::new());
        (StrategyStore::new(repo.clone()), repo)
    }

    fn draft(strike: f64, quantity: i32) -> NewContract {
        NewContract {
            kind: OptionKind::Call,
            strike,
            expiration: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            premium: 5.0,
            quantity,
        }
    }

    #[tokio::test]
    async fn add_update_remove_contract() {
        let (store, _) = store_with_memory();

        let id = store.add_contract(draft(100.0, 1)).await.unwrap();
        assert_eq!(store.current_strategy().await.contracts.len(), 1);

        store
            .update_contract(
                &id,
                ContractUpdate {
                    quantity: Some(-2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.current_strategy().await.contracts[0].quantity, -2);

        store.remove_contract(&id).await;
        assert!(store.current_strategy().await.contracts.is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_are_silent_noops() {
        let (store, _) = store_with_memory();
        store.add_contract(draft(100.0, 1)).await.unwrap();

        store.remove_contract(&ContractId::generate()).await;
        store
            .update_contract(
                &ContractId::generate(),
                ContractUpdate {
                    premium: Some(1.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store.load_strategy(&StrategyId::generate()).await;

        let current = store.current_strategy().await;
        assert_eq!(current.contracts.len(), 1);
        assert_eq!(current.contracts[0].premium, 5.0);
    }

    #[tokio::test]
    async fn invalid_strike_is_rejected() {
        let (store, _) = store_with_memory();
        assert!(store.add_contract(draft(0.0, 1)).await.is_err());
        assert!(store.current_strategy().await.contracts.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_through_repository() {
        let (store, repo) = store_with_memory();
        store.add_contract(draft(100.0, 1)).await.unwrap();

        let saved_id = store.save_strategy("Income", None).await.unwrap();

        // Current strategy keeps editing independently of the snapshot
        store.add_contract(draft(110.0, -1)).await.unwrap();
        assert_eq!(store.current_strategy().await.contracts.len(), 2);

        store.load_strategy(&saved_id).await;
        let current = store.current_strategy().await;
        assert_eq!(current.id, saved_id);
        assert_eq!(current.contracts.len(), 1);

        // A fresh store hydrates the same collection from the backend
        let fresh = StrategyStore::new(repo);
        fresh.hydrate().await.unwrap();
        assert_eq!(fresh.saved_strategies().await.len(), 1);
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_as_error() {
        let (store, repo) = store_with_memory();
        store.add_contract(draft(100.0, 1)).await.unwrap();

        repo.fail_writes(true);
        assert!(store.save_strategy("Doomed", None).await.is_err());

        // The store keeps working once the backend recovers
        repo.fail_writes(false);
        assert!(store.save_strategy("Retry", None).await.is_ok());
    }

    #[tokio::test]
    async fn roll_creates_new_persisted_strategy() {
        let (store, _) = store_with_memory();
        store.add_contract(draft(100.0, 1)).await.unwrap();
        let source_id = store.save_strategy("June", None).await.unwrap();

        let new_exp = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let rolled_id = store
            .roll_strategy(&source_id, new_exp, 0.0)
            .await
            .unwrap()
            .unwrap();

        assert_ne!(rolled_id, source_id);
        let saved = store.saved_strategies().await;
        assert_eq!(saved.len(), 2);

        let source = saved.iter().find(|s| s.id == source_id).unwrap();
        let rolled = saved.iter().find(|s| s.id == rolled_id).unwrap();
        assert_eq!(rolled.contracts.len(), 1);
        assert_eq!(rolled.contracts[0].strike, 100.0);
        assert_eq!(rolled.contracts[0].expiration, new_exp);
        // Source leg untouched
        assert_eq!(
            source.contracts[0].expiration,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn roll_unknown_id_returns_none() {
        let (store, _) = store_with_memory();
        let result = store
            .roll_strategy(
                &StrategyId::generate(),
                NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                0.0,
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(store.saved_strategies().await.is_empty());
    }

    #[tokio::test]
    async fn scenario_log_appends_and_clears_as_batch() {
        let (store, _) = store_with_memory();

        store
            .record_scenario(ScenarioRecord {
                price_change: 10.0,
                volatility_change: 0.0,
                days_to_expiration: 20.0,
                expected_pl: 50.0,
            })
            .await;
        store
            .record_scenario(ScenarioRecord {
                price_change: -10.0,
                volatility_change: 5.0,
                days_to_expiration: 20.0,
                expected_pl: -80.0,
            })
            .await;

        assert_eq!(store.scenarios().await.len(), 2);

        store.clear_scenarios().await;
        assert!(store.scenarios().await.is_empty());
    }
}
