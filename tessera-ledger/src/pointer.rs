use tessera_crypto::digest::Blake2bDigest256;

use crate::state::{ContractState, LinearId, StateRef, StateTag};
use crate::SystemDigest;

/// Reference to "whichever state currently carries the given logical
/// identity". The concrete version is resolved at use-time.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct LinearPointer {
    pub id: LinearId,
    pub tag: StateTag,
}

/// Reference to one exact, immutable state, verified by content digest.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct StaticPointer {
    pub state_ref: StateRef,
    pub content_hash: Blake2bDigest256,
}

impl StaticPointer {
    /// Capture the pointed-to state's content digest at pointer-creation time.
    pub fn capture(state_ref: StateRef, state: &dyn ContractState) -> StaticPointer {
        StaticPointer {
            state_ref,
            content_hash: state.digest(),
        }
    }
}

/// Pointer to a state embedded within another state.
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
pub enum StatePointer {
    /// Pointer by stable logical identity.
    Linear(LinearPointer),
    /// Fully qualified pointer.
    Static(StaticPointer),
}

impl StatePointer {
    pub fn linear(id: LinearId, tag: StateTag) -> StatePointer {
        StatePointer::Linear(LinearPointer { id, tag })
    }

    pub fn fixed(state_ref: StateRef, content_hash: Blake2bDigest256) -> StatePointer {
        StatePointer::Static(StaticPointer {
            state_ref,
            content_hash,
        })
    }
}
