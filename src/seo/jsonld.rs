//! JSON-LD structured data.

use serde_json::{json, Value};

use crate::config::SiteMetaConfig;
use crate::content::Project;
use crate::pages::html::nonce_attr;

/// One breadcrumb. The last crumb is the current page and usually has no href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: Option<String>,
}

impl Crumb {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

pub fn breadcrumb_list(site: &SiteMetaConfig, crumbs: &[Crumb]) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(idx, crumb)| {
            let mut item = json!({
                "@type": "ListItem",
                "position": idx + 1,
                "name": crumb.label,
            });
            if let Some(href) = &crumb.href {
                item["item"] = Value::String(site.absolute(href));
            }
            item
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

pub fn person(site: &SiteMetaConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": site.author,
        "url": site.absolute(""),
        "jobTitle": "Full-Stack Developer",
        "email": format!("mailto:{}", site.contact_email),
    })
}

pub fn creative_work(site: &SiteMetaConfig, project: &Project) -> Value {
    let mut work = json!({
        "@context": "https://schema.org",
        "@type": "CreativeWork",
        "name": project.title,
        "description": project.description,
        "url": site.absolute(&format!("/projects/{}", project.slug)),
        "image": site.absolute(&project.image),
        "dateCreated": project.year.to_string(),
        "keywords": project.technologies.join(", "),
        "author": { "@type": "Person", "name": site.author },
        "codeRepository": project.github_url,
    });
    if let Some(live) = &project.live_url {
        work["sameAs"] = Value::String(live.clone());
    }
    work
}

/// `<script type="application/ld+json">` carrying `value`, safe against
/// `</script>` inside strings.
pub fn script_tag(value: &Value, nonce: Option<&str>) -> String {
    let body = value.to_string().replace('<', "\\u003c");
    format!(
        "<script type=\"application/ld+json\"{}>{}</script>",
        nonce_attr(nonce),
        body
    )
}
