use crate::logging_connection::{LoggedOp, Shared};
use std::sync::{Arc, Mutex};

/// A handle on what a [`LoggingConnection`](crate::LoggingConnection) has
/// executed
#[derive(Debug, Clone)]
pub struct ExecLog {
    shared: Arc<Mutex<Shared>>,
}

impl ExecLog {
    pub(crate) fn new(shared: Arc<Mutex<Shared>>) -> Self {
        Self { shared }
    }

    /// Every logged operation, oldest first
    pub fn ops(&self) -> Vec<LoggedOp> {
        self.shared.lock().unwrap().ops.clone()
    }

    /// SQL of every logged operation, oldest first
    pub fn statements(&self) -> Vec<String> {
        self.ops().into_iter().map(|op| op.sql).collect()
    }

    pub fn len(&self) -> usize {
        self.shared.lock().unwrap().ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count statements starting with `prefix`, e.g. `"INSERT"`
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.statements()
            .iter()
            .filter(|sql| sql.starts_with(prefix))
            .count()
    }

    /// Count statements that succeeded and start with `prefix`
    pub fn count_ok(&self, prefix: &str) -> usize {
        self.ops()
            .iter()
            .filter(|op| op.ok && op.sql.starts_with(prefix))
            .count()
    }

    pub fn selects(&self) -> usize {
        self.count_prefix("SELECT")
    }

    /// Clear the log
    pub fn clear(&self) {
        self.shared.lock().unwrap().ops.clear();
    }

    /// Make every statement containing `pattern` fail until
    /// [`ExecLog::stop_failing`] is called
    pub fn fail_on(&self, pattern: &str) {
        self.shared.lock().unwrap().fail_on = Some(pattern.to_owned());
    }

    pub fn stop_failing(&self) {
        self.shared.lock().unwrap().fail_on = None;
    }
}
