//! RAII guards for process environment in tests.
//!
//! Configuration and auth read `RIVALSCOPE_*` variables, so tests that set
//! them must restore the previous state even on panic. Tests using these
//! guards must still be marked `#[serial]`.

use std::env;
use std::ffi::OsString;

use crate::config::{API_URL_ENV, PUBLISHABLE_KEY_ENV, SESSION_TOKEN_ENV};

/// Restores one environment variable on drop.
pub struct EnvGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvGuard {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            original: env::var_os(key),
        }
    }

    /// Snapshot `key`, then set it to `value`.
    ///
    /// # Safety
    /// Mutates process environment; callers must be `#[serial]`.
    pub unsafe fn set(key: &str, value: &str) -> Self {
        let guard = Self::new(key);
        unsafe { env::set_var(key, value) };
        guard
    }

    /// Snapshot `key`, then remove it.
    ///
    /// # Safety
    /// Mutates process environment; callers must be `#[serial]`.
    pub unsafe fn remove(key: &str) -> Self {
        let guard = Self::new(key);
        unsafe { env::remove_var(key) };
        guard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: guarded tests are #[serial]
        match &self.original {
            Some(val) => unsafe { env::set_var(&self.key, val) },
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Clear every `RIVALSCOPE_*` override for the guard's lifetime.
///
/// # Safety
/// Mutates process environment; callers must be `#[serial]`.
pub unsafe fn clean_env() -> Vec<EnvGuard> {
    [API_URL_ENV, PUBLISHABLE_KEY_ENV, SESSION_TOKEN_ENV]
        .into_iter()
        .map(|key| unsafe { EnvGuard::remove(key) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_restores_existing_var() {
        let key = "RIVALSCOPE_TEST_GUARD_EXISTING";
        unsafe { env::set_var(key, "original_value") };
        {
            let _guard = unsafe { EnvGuard::set(key, "modified_value") };
            assert_eq!(env::var(key).unwrap(), "modified_value");
        }
        assert_eq!(env::var(key).unwrap(), "original_value");
        unsafe { env::remove_var(key) };
    }

    #[test]
    #[serial]
    fn test_clean_env_hides_overrides() {
        let _outer = unsafe { EnvGuard::set(API_URL_ENV, "https://outer.example") };
        {
            let _clean = unsafe { clean_env() };
            assert!(env::var(API_URL_ENV).is_err());
        }
        assert_eq!(env::var(API_URL_ENV).unwrap(), "https://outer.example");
    }
}
