//! Search engine metadata: sitemap, robots, structured data and head tags.

pub mod jsonld;
pub mod metadata;
pub mod robots;
pub mod sitemap;

pub use jsonld::Crumb;
pub use metadata::PageMeta;
pub use robots::render_robots;
pub use sitemap::{render_sitemap, sitemap_entries, SitemapEntry, STATIC_ROUTES};
