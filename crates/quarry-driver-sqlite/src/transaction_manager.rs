use quarry_core::{Error, Result};

/// Tracks whether the connection has an open transaction and hands out the
/// SQL for each transition. Nesting is refused rather than mapped to
/// savepoints.
#[derive(Debug, Default)]
pub(crate) struct TransactionManager {
    active: bool,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) -> Result<&'static str> {
        if self.active {
            return Err(Error::transaction(
                "a transaction is already active; nested transactions are not supported",
            ));
        }
        self.active = true;
        Ok("BEGIN")
    }

    pub fn commit(&mut self) -> Result<&'static str> {
        self.finish("commit")?;
        Ok("COMMIT")
    }

    pub fn rollback(&mut self) -> Result<&'static str> {
        self.finish("rollback")?;
        Ok("ROLLBACK")
    }

    /// Restores the active flag after the database refused a transition.
    pub fn revert(&mut self, was_active: bool) {
        self.active = was_active;
    }

    fn finish(&mut self, action: &str) -> Result<()> {
        if !self.active {
            return Err(Error::transaction(format!(
                "{action} without an active transaction"
            )));
        }
        self.active = false;
        Ok(())
    }
}
