//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::preferences::{TextSizePreference, ThemePreference};

/// Root configuration for the portfolio site.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Site identity used by pages and SEO metadata.
    pub site: SiteMetaConfig,

    /// Location of the JSON content files.
    pub content: ContentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// CSP nonce and static security header settings.
    pub security: SecurityConfig,

    /// Defaults for the display preference store.
    pub preferences: PreferencesConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteMetaConfig {
    /// Absolute base URL without trailing slash.
    pub base_url: String,

    /// Site name, used as the title suffix.
    pub name: String,

    /// Owner of the portfolio.
    pub author: String,

    /// Default meta description.
    pub description: String,

    /// OpenGraph locale.
    pub locale: String,

    /// Twitter handle including the leading `@`.
    pub twitter: String,

    /// Default social preview image path.
    pub og_image: String,

    /// Public contact address shown on the contact page.
    pub contact_email: String,
}

impl Default for SiteMetaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.evanmarshall.dev".to_string(),
            name: "Evan Marshall - Full-Stack Developer".to_string(),
            author: "Evan Marshall".to_string(),
            description: "Full-Stack Developer specializing in modern web technologies. \
                Building scalable, performant applications."
                .to_string(),
            locale: "en_CA".to_string(),
            twitter: "@evanmarshall".to_string(),
            og_image: "/images/og-image.jpg".to_string(),
            contact_email: "hello@evanmarshall.dev".to_string(),
        }
    }
}

impl SiteMetaConfig {
    /// Join a site-relative path onto the base URL.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Content file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding `projects.json`, `services.json` and `site.json`.
    pub directory: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            directory: "content".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security header configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Generate a per-request CSP nonce and policy.
    pub csp_enabled: bool,

    /// Random bytes per nonce. The hex form is twice as long.
    pub nonce_bytes: usize,

    /// Name of the cookie carrying the nonce.
    pub nonce_cookie: String,

    /// Allowed `connect-src` origins. Shared by the per-request policy and
    /// the static template.
    pub connect_src: Vec<String>,

    /// Add Referrer-Policy, X-Frame-Options and friends to every response.
    pub enable_headers: bool,

    /// Production mode adds Strict-Transport-Security.
    pub production: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            csp_enabled: true,
            nonce_bytes: 16,
            nonce_cookie: "__csp_nonce".to_string(),
            connect_src: vec![
                "'self'".to_string(),
                "https://api.example.com".to_string(),
                "https://sentry.io".to_string(),
                "https://www.google-analytics.com".to_string(),
            ],
            enable_headers: true,
            production: false,
        }
    }
}

/// Preference store defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Text size used when nothing is stored.
    pub default_text_size: TextSizePreference,

    /// Theme used when nothing is stored.
    pub default_theme: ThemePreference,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            default_text_size: TextSizePreference::Md,
            default_theme: ThemePreference::System,
        }
    }
}
