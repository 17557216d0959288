//! Per-request CSP nonce generation.
//!
//! # Responsibilities
//! - Draw random bytes from the OS random source
//! - Render them as fixed-width lowercase hex
//!
//! # Design Decisions
//! - Generation returns `Result`; the caller decides to skip the header
//! - The random source sits behind a trait so failure is testable

use std::fmt;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Default nonce length in bytes.
pub const DEFAULT_NONCE_BYTES: usize = 16;

/// The random source could not produce bytes.
#[derive(Debug, Error)]
#[error("random source unavailable: {0}")]
pub struct NonceError(#[from] rand::Error);

/// Supplier of random bytes.
pub trait NonceSource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl NonceSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}

/// A hex-encoded nonce, valid for exactly one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(String);

impl Nonce {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The CSP source expression, `'nonce-<hex>'`.
    pub fn source(&self) -> String {
        format!("'nonce-{}'", self.0)
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates nonces of a fixed byte length.
#[derive(Clone)]
pub struct NonceGenerator {
    len: usize,
    source: Arc<dyn NonceSource>,
}

impl NonceGenerator {
    /// Generator backed by the OS random source.
    pub fn new(len: usize) -> Self {
        Self::with_source(len, Arc::new(OsRandom))
    }

    pub fn with_source(len: usize, source: Arc<dyn NonceSource>) -> Self {
        Self { len, source }
    }

    /// Length of generated nonces in hex characters.
    pub fn hex_len(&self) -> usize {
        self.len * 2
    }

    pub fn generate(&self) -> Result<Nonce, NonceError> {
        let mut bytes = vec![0u8; self.len];
        self.source.fill(&mut bytes)?;
        Ok(Nonce(hex::encode(&bytes)))
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NONCE_BYTES)
    }
}

impl fmt::Debug for NonceGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonceGenerator").field("len", &self.len).finish()
    }
}
