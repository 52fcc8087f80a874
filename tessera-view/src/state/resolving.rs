use log::trace;

use tessera_ledger::pointer::{LinearPointer, StatePointer, StaticPointer};
use tessera_ledger::state::{LinearId, ResolvedState, StateRef};
use tessera_ledger::SystemDigest;

use crate::state::States;

#[derive(Eq, PartialEq, Copy, Clone, Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("no unconsumed state found for {0:?}")]
    NotFound(StatePointer),
    #[error("multiple unconsumed states carry linear id {0:?}")]
    AmbiguousLinearState(LinearId),
    #[error("content hash mismatch at {0:?}")]
    IntegrityMismatch(StateRef),
}

pub trait PointerResolver {
    /// Resolve the pointer into a concrete state.
    fn resolve(&self, ptr: StatePointer) -> Result<ResolvedState, ResolutionError>;
}

pub struct LedgerResolver<P> {
    pub pool: P,
}

impl<P> PointerResolver for LedgerResolver<P>
where
    P: States,
{
    fn resolve(&self, ptr: StatePointer) -> Result<ResolvedState, ResolutionError> {
        match ptr {
            StatePointer::Linear(LinearPointer { id, .. }) => {
                let mut matches = self.pool.get_unconsumed_by_linear_id(id);
                match matches.len() {
                    0 => Err(ResolutionError::NotFound(ptr)),
                    1 => {
                        let resolved = matches.remove(0);
                        trace!("resolved linear pointer {:?} to {:?}", id, resolved.state_ref);
                        Ok(resolved)
                    }
                    // More than one unconsumed state sharing an identity is
                    // an upstream consistency violation. Never pick one.
                    _ => Err(ResolutionError::AmbiguousLinearState(id)),
                }
            }
            StatePointer::Static(StaticPointer {
                state_ref,
                content_hash,
            }) => match self.pool.get_by_ref(state_ref) {
                None => Err(ResolutionError::NotFound(ptr)),
                Some(resolved) if resolved.state.digest() != content_hash => {
                    Err(ResolutionError::IntegrityMismatch(state_ref))
                }
                Some(resolved) => {
                    trace!("resolved static pointer at {:?}", state_ref);
                    Ok(resolved)
                }
            },
        }
    }
}
