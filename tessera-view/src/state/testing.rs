//! Shared fixtures for the crate's tests.
use tessera_crypto::digest::Blake2bDigest256;
use tessera_ledger::pointer::StatePointer;
use tessera_ledger::scan::{Node, Traverse};
use tessera_ledger::state::{ContractState, LinearId, LinearState, OutIndex, StateRef, StateTag};
use tessera_ledger::transaction::TxId;
use tessera_ledger::DigestViaEncoder;

pub(crate) fn state_ref(n: u8, ix: u32) -> StateRef {
    StateRef(TxId::from(Blake2bDigest256::from([n; 32])), OutIndex::from(ix))
}

/// A linear state which evolves under a stable identity.
#[derive(serde::Serialize)]
pub(crate) struct Account {
    pub balance: u64,
    pub linear_id: LinearId,
}

impl Account {
    pub fn new(balance: u64) -> Account {
        Account {
            balance,
            linear_id: LinearId::random(),
        }
    }

    pub fn pointer(&self) -> StatePointer {
        StatePointer::linear(self.linear_id, StateTag::of("Account"))
    }
}

impl DigestViaEncoder for Account {}

impl Traverse for Account {
    fn classify(&self) -> Node<'_> {
        Node::Object(vec![&self.balance])
    }
}

impl ContractState for Account {}

impl LinearState for Account {
    fn linear_id(&self) -> LinearId {
        self.linear_id
    }
}

/// A state holding pointers to other states.
#[derive(serde::Serialize)]
pub(crate) struct Portfolio {
    pub memo: String,
    pub holdings: Vec<StatePointer>,
}

impl DigestViaEncoder for Portfolio {}

impl Traverse for Portfolio {
    fn classify(&self) -> Node<'_> {
        Node::Object(vec![&self.memo, &self.holdings])
    }
}

impl ContractState for Portfolio {}
