use log::debug;

use tessera_ledger::scan::{PointerScan, ScanError, Traverse};
use tessera_ledger::transaction::TransactionBuilder;

use crate::state::resolving::{PointerResolver, ResolutionError};

#[derive(Eq, PartialEq, Copy, Clone, Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Folds the states referenced by a candidate output into the transaction
/// under construction as read-only dependencies.
pub struct PointerIntegrator<R> {
    pub resolver: R,
}

impl<R> PointerIntegrator<R>
where
    R: PointerResolver,
{
    /// Discover every pointer within `state`, resolve all of them, then
    /// attach the resolved refs in discovery order. All-or-nothing: on any
    /// failure the builder is left untouched.
    pub fn integrate(
        &self,
        builder: &mut TransactionBuilder,
        state: &dyn Traverse,
    ) -> Result<(), IntegrationError> {
        let pointers = PointerScan::new(state).run()?;
        let mut resolved = Vec::with_capacity(pointers.len());
        for ptr in pointers {
            resolved.push(self.resolver.resolve(ptr)?);
        }
        debug!("attaching {} resolved reference(s)", resolved.len());
        for reference in resolved {
            builder.add_reference_input(reference.state_ref);
        }
        Ok(())
    }
}
