//! Salsa Database
//!
//! The database owns every memoized pipeline result. It lives for as long
//! as the generating process: a build script run, or a `Session` held by a
//! long-running host.

use std::sync::{Arc, Mutex};

/// Main database trait that extends Salsa's Database.
///
/// All pipeline queries take `&dyn Db`.
#[salsa::db]
pub trait Db: salsa::Database {}

/// Concrete implementation of the generator database.
///
/// MUST implement Clone for Salsa to work.
#[salsa::db]
#[derive(Clone)]
pub struct GeneratorDb {
    /// Salsa's internal storage for all queries.
    storage: salsa::Storage<Self>,

    /// Event logs for testing/debugging (optional).
    /// Wrapped in Arc<Mutex> so Clone works.
    logs: Arc<Mutex<Option<Vec<String>>>>,
}

impl Default for GeneratorDb {
    fn default() -> Self {
        Self {
            storage: salsa::Storage::default(),
            logs: Arc::default(),
        }
    }
}

impl GeneratorDb {
    /// Create a new generator database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable logging of Salsa events (for testing).
    #[cfg(test)]
    #[expect(clippy::unwrap_used, reason = "Test-only method uses unwrap")]
    pub fn enable_logging(&self) {
        let mut logs = self.logs.lock().unwrap();
        if logs.is_none() {
            *logs = Some(vec![]);
        }
    }

    /// Take the accumulated logs (for testing).
    #[cfg(test)]
    #[expect(clippy::unwrap_used, reason = "Test-only method uses unwrap")]
    pub fn take_logs(&self) -> Vec<String> {
        let mut logs = self.logs.lock().unwrap();
        if let Some(logs) = &mut *logs {
            std::mem::take(logs)
        } else {
            vec![]
        }
    }
}

#[salsa::db]
impl Db for GeneratorDb {}

/// Implement `salsa::Database` for `GeneratorDb`.
///
/// Only `WillExecute` events are recorded; they are what reuse tests count.
#[salsa::db]
impl salsa::Database for GeneratorDb {
    fn salsa_event(&self, event: &dyn Fn() -> salsa::Event) {
        if let Some(logs) = &mut *self
            .logs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
        {
            let event = event();
            if let salsa::EventKind::WillExecute { .. } = event.kind {
                tracing::trace!(?event, "salsa execute");
                logs.push(format!("{event:?}"));
            }
        }
    }
}
