//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::ffi::OsString;
use std::path::PathBuf;

/// Sets an environment variable for the lifetime of the guard and restores
/// the previous value on drop. Pair with `#[serial]`.
pub struct EnvGuard {
    key: String,
    previous: Option<OsString>,
}

impl EnvGuard {
    pub fn set(key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let previous = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }

    pub fn unset(key: &str) -> Self {
        let previous = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.previous {
                Some(v) => std::env::set_var(&self.key, v),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

pub fn fixture_pages() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pages")
}
