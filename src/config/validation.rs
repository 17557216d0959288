//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (nonce length, addresses, URLs)
//! - Check the connect-src allow-list is made of real origins
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::SiteConfig;

/// Smallest nonce accepted, in bytes.
pub const MIN_NONCE_BYTES: usize = 8;
/// Largest nonce accepted, in bytes.
pub const MAX_NONCE_BYTES: usize = 64;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("site.base_url {0:?} is not an absolute http(s) URL")]
    BaseUrl(String),

    #[error("security.nonce_bytes must be within {MIN_NONCE_BYTES}..={MAX_NONCE_BYTES}, got {0}")]
    NonceBytes(usize),

    #[error("security.nonce_cookie {0:?} is not a valid cookie name")]
    CookieName(String),

    #[error("security.connect_src entry {0:?} is neither 'self' nor an http(s) origin")]
    ConnectSource(String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.log_format must be \"pretty\" or \"json\", got {0:?}")]
    LogFormat(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Validate the whole configuration, collecting every problem.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if !is_http_url(&config.site.base_url) {
        errors.push(ValidationError::BaseUrl(config.site.base_url.clone()));
    }

    let security = &config.security;
    if !(MIN_NONCE_BYTES..=MAX_NONCE_BYTES).contains(&security.nonce_bytes) {
        errors.push(ValidationError::NonceBytes(security.nonce_bytes));
    }
    if !is_cookie_name(&security.nonce_cookie) {
        errors.push(ValidationError::CookieName(security.nonce_cookie.clone()));
    }
    for source in &security.connect_src {
        if source != "'self'" && !is_origin(source) {
            errors.push(ValidationError::ConnectSource(source.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    let observability = &config.observability;
    if !matches!(observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::LogFormat(observability.log_format.clone()));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

/// A bare `scheme://host[:port]` origin. Anything else would be spliced into
/// the policy verbatim.
fn is_origin(value: &str) -> bool {
    if value.contains(';') || value.ends_with('/') {
        return false;
    }
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host().is_some()
                && url.username().is_empty()
                && url.password().is_none()
                && url.path() == "/"
                && url.query().is_none()
                && url.fragment().is_none()
        }
        Err(_) => false,
    }
}

/// RFC 6265 cookie-name: a non-empty token.
fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
