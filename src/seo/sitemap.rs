//! `sitemap.xml` generation.

use chrono::NaiveDate;

use crate::config::SiteMetaConfig;
use crate::content::Catalog;
use crate::pages::html::escape;

/// Every static page, in sitemap order. `""` is the home page.
pub const STATIC_ROUTES: &[&str] = &[
    "",
    "/projects",
    "/services",
    "/process",
    "/faq",
    "/testimonials",
    "/tech",
    "/contact",
    "/about",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Static routes followed by one entry per project.
pub fn sitemap_entries(
    site: &SiteMetaConfig,
    catalog: &Catalog,
    last_modified: NaiveDate,
) -> Vec<SitemapEntry> {
    let static_routes = STATIC_ROUTES.iter().map(|path| SitemapEntry {
        url: site.absolute(path),
        last_modified,
        change_frequency: "monthly",
        priority: if path.is_empty() { 1.0 } else { 0.7 },
    });

    let project_routes = catalog.project_slugs().map(|slug| SitemapEntry {
        url: site.absolute(&format!("/projects/{}", slug)),
        last_modified,
        change_frequency: "monthly",
        priority: 0.6,
    });

    static_routes.chain(project_routes).collect()
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape(&entry.url),
            entry.last_modified.format("%Y-%m-%d"),
            entry.change_frequency,
            entry.priority,
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}
