//! Site content read from local JSON files.
//!
//! # Design Decisions
//! - Content is read once at startup and on file change, never per request
//! - Validation (unique, URL-safe slugs) happens at load, so routes can trust it
//! - The catalog is immutable; a reload builds a new one

pub mod catalog;
pub mod types;

pub use catalog::{Catalog, ContentError};
pub use types::{
    FaqCategory, FaqItem, ProcessStep, Project, ProjectCategory, ProjectStatus, Service,
    ServicePricing, SiteContent, TechCategory, Testimonial,
};
