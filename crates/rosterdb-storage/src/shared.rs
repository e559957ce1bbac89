//! Thread-safe handle around an [`Engine`].
//!
//! One exclusive lock guards the whole engine, so every query's traversal
//! and its comparison count are taken under the same critical section.
//! Records cross the lock boundary as owned clones.

use crate::engine::Engine;
use crate::index::Probe;
use crate::record::{Record, Rid};
use parking_lot::Mutex;
use rosterdb_common::{EngineConfig, Result};
use std::sync::Arc;

/// Cloneable, lock-protected engine handle.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    /// Wraps an existing engine.
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Creates a shared engine after validating `config`.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Ok(Self::new(Engine::with_config(config)?))
    }

    pub fn insert_record(&self, record: Record) -> Result<Rid> {
        self.inner.lock().insert_record(record)
    }

    pub fn delete_by_id(&self, id: i64) -> bool {
        self.inner.lock().delete_by_id(id)
    }

    pub fn find_by_id(&self, id: i64) -> Probe<Option<Record>> {
        self.inner.lock().find_by_id(id).map(|r| r.cloned())
    }

    pub fn range_by_id(&self, lo: i64, hi: i64) -> Probe<Vec<Record>> {
        let engine = self.inner.lock();
        engine
            .range_by_id(lo, hi)
            .map(|records| records.into_iter().cloned().collect())
    }

    pub fn prefix_by_last(&self, prefix: &str) -> Probe<Vec<Record>> {
        let engine = self.inner.lock();
        engine
            .prefix_by_last(prefix)
            .map(|records| records.into_iter().cloned().collect())
    }

    /// Runs `f` with shared access to the engine while holding the lock.
    pub fn with_engine<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
