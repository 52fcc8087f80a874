use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use rand::{thread_rng, Rng};

use tessera_crypto::digest::{blake2b256_hash, Blake2bDigest256};

use crate::scan::Traverse;
use crate::transaction::TxId;
use crate::SystemDigest;

/// Stable logical identity which persists across successive versions
/// of a logically-the-same state.
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
pub struct LinearId(u128);

impl LinearId {
    pub fn random() -> LinearId {
        LinearId(thread_rng().gen())
    }
}

/// Tag of the state type a linear pointer expects to resolve to.
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
)]
pub struct StateTag(Blake2bDigest256);

impl StateTag {
    /// Derive a tag from a stable type name.
    pub fn of(name: &str) -> StateTag {
        StateTag(blake2b256_hash(name.as_bytes()))
    }
}

/// Index of an output within the transaction which produced it.
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
pub struct OutIndex(u32);

/// Fully qualified address of one transaction output.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct StateRef(pub TxId, pub OutIndex);

/// A structured record authored by the domain model.
/// Opaque to the ledger except for child enumeration and content digest.
pub trait ContractState: Traverse + SystemDigest + Send + Sync {}

/// A state which evolves under a stable logical identity.
pub trait LinearState: ContractState {
    fn linear_id(&self) -> LinearId;
}

/// A concrete state together with the address it sits at.
#[derive(Clone)]
pub struct ResolvedState {
    pub state: Arc<dyn ContractState>,
    pub state_ref: StateRef,
}

impl ResolvedState {
    pub fn new(state: Arc<dyn ContractState>, state_ref: StateRef) -> Self {
        Self { state, state_ref }
    }
}

impl Debug for ResolvedState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResolvedState({:?})", self.state_ref)
    }
}
