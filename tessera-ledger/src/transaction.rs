use std::sync::Arc;

use tessera_crypto::digest::Blake2bDigest256;

use crate::state::{ContractState, StateRef};

/// Transaction identifier.
#[derive(
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Copy,
    Clone,
    Hash,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    derive_more::From,
    derive_more::Into,
)]
pub struct TxId(Blake2bDigest256);

impl TxId {
    pub fn random() -> TxId {
        TxId(Blake2bDigest256::random())
    }
}

/// Assembles a transaction: consumed inputs, produced outputs and
/// read-only reference inputs. Exclusively owned by the authoring context.
#[derive(Default)]
pub struct TransactionBuilder {
    inputs: Vec<StateRef>,
    reference_inputs: Vec<StateRef>,
    outputs: Vec<Arc<dyn ContractState>>,
}

impl TransactionBuilder {
    pub fn new() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    /// Consume the state at the given address.
    pub fn add_input(&mut self, state_ref: StateRef) {
        self.inputs.push(state_ref);
    }

    /// Produce a new output state.
    pub fn add_output_state(&mut self, state: Arc<dyn ContractState>) {
        self.outputs.push(state);
    }

    /// Attach a read-only dependency. Attaching a ref which is already
    /// present is a no-op.
    pub fn add_reference_input(&mut self, state_ref: StateRef) {
        if !self.reference_inputs.contains(&state_ref) {
            self.reference_inputs.push(state_ref);
        }
    }

    pub fn inputs(&self) -> &[StateRef] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Arc<dyn ContractState>] {
        &self.outputs
    }

    /// Read-only dependencies in the order they were attached.
    pub fn reference_inputs(&self) -> &[StateRef] {
        &self.reference_inputs
    }
}
