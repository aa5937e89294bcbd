// src/http/state.rs

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};

/// Shared application state. The single SQLite connection lives behind a
/// mutex; handlers take the lock for the duration of one store operation and
/// never hold it across an await point.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<DbPool>>,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, pool: DbPool) -> Self {
        Self {
            db: Arc::new(Mutex::new(pool)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Acquire the store lock. A poisoned lock means a handler panicked
    /// mid-operation; surface it as a storage failure instead of crashing.
    pub fn db(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.db
            .lock()
            .map_err(|_| AppError::Other("database lock poisoned".to_string()))
    }
}
