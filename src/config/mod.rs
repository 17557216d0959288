//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → shared via ArcSwap to request handlers
//!
//! On change:
//!     watcher.rs detects change to config file or content directory
//!     → loader.rs loads new config, content is re-read
//!     → validation.rs validates
//!     → atomic swap of the shared state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::ContentConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::PreferencesConfig;
pub use schema::SecurityConfig;
pub use schema::SiteConfig;
pub use schema::SiteMetaConfig;
