//! Test helpers for code that reads the `DPB_*` configuration variables.

use crate::config::{SERVER_ENV, SHARE_URL_ENV, TIMEOUT_ENV};
use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Every variable [`crate::ClientConfig::from_env`] reads.
pub const CONFIG_VARS: [&str; 3] = [SERVER_ENV, SHARE_URL_ENV, TIMEOUT_ENV];

fn config_env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Exclusive hold on the `DPB_*` variables for one test.
///
/// Creation snapshots all of [`CONFIG_VARS`] and unsets them; dropping puts
/// the snapshot back. Only one guard exists at a time per process, so do not
/// create a second one while the first is alive on the same thread.
pub struct ConfigEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ConfigEnv {
    /// Start from an environment with no `DPB_*` configuration at all.
    pub fn cleared() -> Self {
        // A test that panicked while holding the guard has already restored
        // the variables in `Drop`, so a poisoned lock is safe to reuse.
        let lock = config_env_lock()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let saved = CONFIG_VARS
            .iter()
            .map(|key| (*key, env::var(key).ok()))
            .collect();
        for key in CONFIG_VARS {
            env::remove_var(key);
        }
        Self { saved, _lock: lock }
    }

    /// Set one of [`CONFIG_VARS`] for the rest of the guard's life.
    ///
    /// # Panics
    /// Panics if `key` is not a configuration variable.
    pub fn with(self, key: &'static str, value: &str) -> Self {
        assert!(
            CONFIG_VARS.contains(&key),
            "{} is not a DPB configuration variable",
            key
        );
        env::set_var(key, value);
        self
    }

    /// Value `key` had before this guard cleared it.
    pub fn previous(&self, key: &str) -> Option<&str> {
        self.saved
            .iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| value.as_deref())
    }
}

impl Drop for ConfigEnv {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}
