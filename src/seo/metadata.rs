//! Per-page `<head>` metadata: title, description, canonical, OpenGraph, Twitter.

use crate::config::SiteMetaConfig;
use crate::pages::html::escape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// Page title; `None` for the home page, which uses the site name alone.
    pub title: Option<String>,
    pub description: Option<String>,
    /// Site-relative canonical path.
    pub path: String,
    pub og_type: &'static str,
    pub images: Vec<String>,
    pub no_index: bool,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            path: path.into(),
            og_type: "website",
            images: Vec::new(),
            no_index: false,
        }
    }

    pub fn home() -> Self {
        Self {
            title: None,
            ..Self::new("", "/")
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn article(mut self) -> Self {
        self.og_type = "article";
        self
    }

    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    /// Document title, applying the `"%s | <site name>"` template.
    pub fn document_title(&self, site: &SiteMetaConfig) -> String {
        match &self.title {
            Some(title) => format!("{} | {}", title, site.name),
            None => site.name.clone(),
        }
    }

    pub fn render_head(&self, site: &SiteMetaConfig) -> String {
        let title = escape(&self.document_title(site));
        let description = escape(self.description.as_deref().unwrap_or(&site.description));
        let canonical = escape(&site.absolute(&self.path));
        let images: Vec<String> = if self.images.is_empty() {
            vec![site.og_image.clone()]
        } else {
            self.images.clone()
        };

        let mut head = String::new();
        head.push_str(&format!("<title>{}</title>\n", title));
        head.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            description
        ));
        head.push_str(&format!("<link rel=\"canonical\" href=\"{}\">\n", canonical));
        head.push_str(&format!(
            "<meta name=\"robots\" content=\"{}\">\n",
            if self.no_index { "noindex, nofollow" } else { "index, follow" }
        ));
        head.push_str(&format!(
            "<meta property=\"og:type\" content=\"{}\">\n",
            self.og_type
        ));
        head.push_str(&format!("<meta property=\"og:title\" content=\"{}\">\n", title));
        head.push_str(&format!(
            "<meta property=\"og:description\" content=\"{}\">\n",
            description
        ));
        head.push_str(&format!("<meta property=\"og:url\" content=\"{}\">\n", canonical));
        head.push_str(&format!(
            "<meta property=\"og:locale\" content=\"{}\">\n",
            escape(&site.locale)
        ));
        for image in &images {
            head.push_str(&format!(
                "<meta property=\"og:image\" content=\"{}\">\n",
                escape(&site.absolute(image))
            ));
        }
        head.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\">\n");
        head.push_str(&format!(
            "<meta name=\"twitter:creator\" content=\"{}\">\n",
            escape(&site.twitter)
        ));
        head.push_str(&format!("<meta name=\"twitter:title\" content=\"{}\">\n", title));
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_template() {
        let site = SiteMetaConfig::default();
        assert_eq!(PageMeta::home().document_title(&site), site.name);
        assert_eq!(
            PageMeta::new("About", "/about").document_title(&site),
            format!("About | {}", site.name)
        );
    }

    #[test]
    fn test_head_contents() {
        let site = SiteMetaConfig::default();
        let head = PageMeta::new("Tom & Co", "/projects/tom")
            .with_description("A \"quoted\" project")
            .article()
            .render_head(&site);

        assert!(head.contains("<title>Tom &amp; Co | "));
        assert!(head.contains("content=\"A &quot;quoted&quot; project\""));
        assert!(head.contains(
            "<link rel=\"canonical\" href=\"https://www.evanmarshall.dev/projects/tom\">"
        ));
        assert!(head.contains("og:type\" content=\"article\""));
        assert!(head.contains("https://www.evanmarshall.dev/images/og-image.jpg"));
    }

    #[test]
    fn test_no_index() {
        let site = SiteMetaConfig::default();
        let head = PageMeta::new("Missing", "/projects/x").no_index().render_head(&site);
        assert!(head.contains("noindex, nofollow"));
    }
}
