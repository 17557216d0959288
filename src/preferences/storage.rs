//! Durable per-browser storage for preferences.
//!
//! Two backends: an in-memory map for tests and tooling, and a cookie-backed
//! store that reads the request's `Cookie` header and records the
//! `Set-Cookie` values that persist each write.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::http::{header, HeaderMap, HeaderValue};
use thiserror::Error;

/// One year, the lifetime of a persisted preference cookie.
pub const PREFERENCE_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend poisoned")]
    Poisoned,

    #[error("value for {0:?} cannot be stored")]
    InvalidValue(String),
}

/// Key/value storage that outlives a single page view.
pub trait PreferenceStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by the browser's cookie jar.
///
/// Reads come from the request; writes update the local view and queue a
/// `Set-Cookie` for the response.
#[derive(Debug, Default)]
pub struct CookieStorage {
    state: Mutex<CookieState>,
}

#[derive(Debug, Default)]
struct CookieState {
    values: HashMap<String, String>,
    pending: Vec<(String, String)>,
}

impl CookieStorage {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let values = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(parse_cookie_header)
            .collect();

        Self {
            state: Mutex::new(CookieState {
                values,
                pending: Vec::new(),
            }),
        }
    }

    /// `Set-Cookie` headers for every write, in write order. Repeated writes
    /// to one key collapse to the last value.
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        let Ok(state) = self.state.lock() else {
            return Vec::new();
        };

        let mut latest: Vec<(&str, &str)> = Vec::new();
        for (key, value) in &state.pending {
            match latest.iter().position(|(k, _)| *k == key.as_str()) {
                Some(i) => latest[i].1 = value.as_str(),
                None => latest.push((key.as_str(), value.as_str())),
            }
        }

        latest
            .into_iter()
            .filter_map(|(key, value)| {
                HeaderValue::from_str(&format!(
                    "{}={}; Path=/; Max-Age={}; SameSite=Lax",
                    key, value, PREFERENCE_COOKIE_MAX_AGE
                ))
                .ok()
            })
            .collect()
    }
}

impl PreferenceStorage for CookieStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.state.lock().ok()?.values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !value.bytes().all(is_cookie_octet) {
            return Err(StorageError::InvalidValue(key.to_string()));
        }
        let mut state = self.state.lock().map_err(|_| StorageError::Poisoned)?;
        state.values.insert(key.to_string(), value.to_string());
        state.pending.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Split a `Cookie` request header into name/value pairs.
pub fn parse_cookie_header(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let value = value.trim().trim_matches('"');
            (!name.is_empty()).then(|| (name.trim().to_string(), value.to_string()))
        })
        .collect()
}

fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2b | 0x2d..=0x3a | 0x3c..=0x5b | 0x5d..=0x7e)
}
