//! Portfolio site library.
//!
//! Server-rendered portfolio pages with a per-request CSP nonce, static
//! security headers, cookie-backed display preferences and SEO output.

pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod preferences;
pub mod security;
pub mod seo;

pub use config::SiteConfig;
pub use content::Catalog;
pub use http::{HttpServer, SiteState};
pub use lifecycle::Shutdown;
