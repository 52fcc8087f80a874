use std::sync::Arc;

use tessera_ledger::state::{ContractState, LinearId, LinearState, ResolvedState, StateRef};

use crate::state::States;

/// In-memory pool of states, for tests and local tooling.
#[derive(Default)]
pub struct InMemStatePool {
    entries: Vec<PoolEntry>,
}

struct PoolEntry {
    state_ref: StateRef,
    state: Arc<dyn ContractState>,
    linear_id: Option<LinearId>,
    consumed: bool,
}

impl InMemStatePool {
    pub fn new() -> InMemStatePool {
        InMemStatePool::default()
    }

    /// Record a state at the given address.
    pub fn insert(&mut self, state_ref: StateRef, state: Arc<dyn ContractState>) {
        self.entries.push(PoolEntry {
            state_ref,
            state,
            linear_id: None,
            consumed: false,
        });
    }

    /// Record a linear state; its logical identity becomes queryable.
    pub fn insert_linear<S: LinearState + 'static>(&mut self, state_ref: StateRef, state: Arc<S>) {
        let linear_id = state.linear_id();
        self.entries.push(PoolEntry {
            state_ref,
            state,
            linear_id: Some(linear_id),
            consumed: false,
        });
    }

    /// Mark the state at the given address as consumed.
    pub fn consume(&mut self, state_ref: StateRef) {
        for entry in self.entries.iter_mut().filter(|e| e.state_ref == state_ref) {
            entry.consumed = true;
        }
    }
}

impl States for InMemStatePool {
    fn get_unconsumed_by_linear_id(&self, id: LinearId) -> Vec<ResolvedState> {
        self.entries
            .iter()
            .filter(|e| !e.consumed && e.linear_id == Some(id))
            .map(|e| ResolvedState::new(e.state.clone(), e.state_ref))
            .collect()
    }

    fn get_by_ref(&self, state_ref: StateRef) -> Option<ResolvedState> {
        self.entries
            .iter()
            .find(|e| e.state_ref == state_ref)
            .map(|e| ResolvedState::new(e.state.clone(), e.state_ref))
    }
}
