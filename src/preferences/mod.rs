//! Display preferences: motion, text size and theme.
//!
//! # Data Flow
//! ```text
//! storage.rs (durable values) ─┐
//! media.rs (OS signals) ───────┼─→ store.rs / theme.rs (in-memory value)
//!                              │        ├─→ storage.rs (persist on set)
//!                              │        ├─→ hooks.rs (data-* root attributes)
//!                              │        └─→ watch channel (subscribed consumers)
//! session.rs wires all of the above to one HTTP request.
//! ```
//!
//! # Design Decisions
//! - The store is constructed explicitly; there is no global instance
//! - Persistence is best effort, the in-memory value is authoritative
//! - No cross-tab synchronization: last local write wins

pub mod hooks;
pub mod media;
pub mod session;
pub mod storage;
pub mod store;
pub mod theme;
pub mod types;

pub use hooks::{RootAttributes, StyleHooks};
pub use media::{ClientHints, MediaQueries, StaticMediaQueries};
pub use session::PreferenceSession;
pub use storage::{CookieStorage, MemoryStorage, PreferenceStorage, StorageError};
pub use store::{PreferenceContext, PreferenceStore};
pub use theme::ThemeController;
pub use types::{MotionPreference, ParsePreferenceError, TextSizePreference, ThemePreference};

/// Storage key for the motion preference.
pub const MOTION_KEY: &str = "motion-preference";
/// Storage key for the text size preference.
pub const TEXT_SIZE_KEY: &str = "text-size-preference";
/// Storage key for the theme, owned by [`ThemeController`].
pub const THEME_KEY: &str = "theme-preference";

pub const MOTION_ATTRIBUTE: &str = "data-motion";
pub const TEXT_SIZE_ATTRIBUTE: &str = "data-text-size";
pub const THEME_ATTRIBUTE: &str = "data-theme";
