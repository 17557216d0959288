//! `robots.txt` generation.

use crate::config::SiteMetaConfig;

pub fn render_robots(site: &SiteMetaConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\nHost: {}\n",
        site.absolute("/sitemap.xml"),
        site.absolute(""),
    )
}
