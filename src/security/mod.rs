//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → csp.rs (draw nonce, expose to handler)
//!     → handler renders inline tags with the nonce
//!     → csp.rs (nonce cookie + Content-Security-Policy)
//!     → headers.rs (static hardening headers)
//! ```
//!
//! # Design Decisions
//! - Defense in depth: CSP plus static headers
//! - Fail open on nonce generation: the policy is hardening, not a gate
//! - No shared mutable state between requests

pub mod csp;
pub mod headers;
pub mod nonce;

pub use csp::{csp_nonce_middleware, CspNonce, CspPolicy, CspSettings, SharedCsp};
pub use nonce::{Nonce, NonceError, NonceGenerator, NonceSource, OsRandom};
