use joinorm_core::{driver::Executor, Result};
use tracing::{trace, warn};

/// An open store transaction. Rolls back when dropped without committing.
pub(crate) struct Transaction<'a, E: Executor> {
    executor: &'a mut E,
    committed: bool,
}

impl<'a, E: Executor> Transaction<'a, E> {
    pub(crate) fn begin(executor: &'a mut E) -> Result<Self> {
        executor.begin_transaction()?;
        trace!("transaction started");

        Ok(Self {
            executor,
            committed: false,
        })
    }

    pub(crate) fn executor(&mut self) -> &mut E {
        &mut *self.executor
    }

    pub(crate) fn commit(mut self) -> Result<()> {
        self.executor.commit()?;
        self.committed = true;
        trace!("transaction committed");
        Ok(())
    }
}

impl<E: Executor> Drop for Transaction<'_, E> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        match self.executor.rollback() {
            Ok(()) => trace!("transaction rolled back"),
            Err(err) => warn!(%err, "rollback failed"),
        }
    }
}
