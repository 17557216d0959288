//! Server-rendered HTML pages.
//!
//! `views.rs` produces page bodies from the content catalog; `layout.rs`
//! wraps them in the shared document with the preference attributes and the
//! request nonce applied.

pub mod html;
pub mod layout;
pub mod views;

pub use layout::{render_document, PageContext};
pub use views::Page;
