//! HTTP middleware owned by the server. Security middleware lives in
//! `crate::security`.

pub mod metrics;

pub use metrics::track_metrics;
