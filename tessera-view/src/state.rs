use tessera_ledger::state::{LinearId, ResolvedState, StateRef};

pub mod integration;
pub mod mem;
pub mod resolving;

#[cfg(test)]
pub(crate) mod testing;

/// Pool of ledger states.
pub trait States {
    /// All unconsumed states carrying the given logical identity.
    fn get_unconsumed_by_linear_id(&self, id: LinearId) -> Vec<ResolvedState>;
    /// State at the exact address.
    fn get_by_ref(&self, state_ref: StateRef) -> Option<ResolvedState>;
}
