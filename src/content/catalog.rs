//! Loading, validating and querying the content files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::{
    FaqCategory, FaqItem, Project, ProjectCategory, ProjectsFile, Service, ServicesFile,
    SiteContent,
};

pub const PROJECTS_FILE: &str = "projects.json";
pub const SERVICES_FILE: &str = "services.json";
pub const SITE_FILE: &str = "site.json";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("duplicate project slug {0:?}")]
    DuplicateSlug(String),

    #[error("project {id:?} has an empty {field}")]
    MissingField { id: String, field: &'static str },

    #[error("project slug {0:?} is not URL safe")]
    InvalidSlug(String),
}

/// Read-only catalog of everything the pages render.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    services: Vec<Service>,
    site: SiteContent,
}

impl Catalog {
    /// Build and validate from already parsed parts.
    pub fn new(
        projects: Vec<Project>,
        services: Vec<Service>,
        site: SiteContent,
    ) -> Result<Self, ContentError> {
        validate_projects(&projects)?;
        Ok(Self {
            projects,
            services,
            site,
        })
    }

    /// Load `projects.json`, `services.json` and (optional) `site.json` from
    /// a directory.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let projects: ProjectsFile = read_json(&dir.join(PROJECTS_FILE))?;
        let services: ServicesFile = read_json(&dir.join(SERVICES_FILE))?;

        let site_path = dir.join(SITE_FILE);
        let site = if site_path.exists() {
            read_json(&site_path)?
        } else {
            SiteContent::default()
        };

        let catalog = Self::new(projects.projects, services.services, site)?;
        tracing::info!(
            directory = %dir.display(),
            projects = catalog.projects.len(),
            services = catalog.services.len(),
            "Content loaded"
        );
        Ok(catalog)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn site(&self) -> &SiteContent {
        &self.site
    }

    pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    pub fn service_by_id(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn featured_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }

    /// Projects for the listing page: featured first, newest first, then
    /// file order.
    pub fn project_listing(&self, category: Option<ProjectCategory>) -> Vec<&Project> {
        let mut listing: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect();
        listing.sort_by(|a, b| b.featured.cmp(&a.featured).then(b.year.cmp(&a.year)));
        listing
    }

    /// Slugs in file order, for route generation.
    pub fn project_slugs(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.slug.as_str())
    }

    pub fn faq_by_category(&self, category: FaqCategory) -> impl Iterator<Item = &FaqItem> {
        self.site.faq.iter().filter(move |f| f.category == category)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_projects(projects: &[Project]) -> Result<(), ContentError> {
    let mut slugs = HashSet::new();
    for project in projects {
        for (field, value) in [
            ("id", &project.id),
            ("title", &project.title),
            ("slug", &project.slug),
            ("description", &project.description),
        ] {
            if value.trim().is_empty() {
                return Err(ContentError::MissingField {
                    id: project.id.clone(),
                    field,
                });
            }
        }
        if !project
            .slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(ContentError::InvalidSlug(project.slug.clone()));
        }
        if !slugs.insert(project.slug.as_str()) {
            return Err(ContentError::DuplicateSlug(project.slug.clone()));
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::{project, sample_catalog};
    use super::*;

    #[test]
    fn test_duplicate_slugs_rejected() {
        let err = Catalog::new(
            vec![
                project("same", false, 2020, ProjectCategory::Api),
                project("same", true, 2021, ProjectCategory::Tool),
            ],
            Vec::new(),
            SiteContent::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(s) if s == "same"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut p = project("x", false, 2020, ProjectCategory::Api);
        p.title = "  ".to_string();
        let err = Catalog::new(vec![p], Vec::new(), SiteContent::default()).unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "title", .. }));
    }

    #[test]
    fn test_unsafe_slug_rejected() {
        let p = project("../etc", false, 2020, ProjectCategory::Api);
        let err = Catalog::new(vec![p], Vec::new(), SiteContent::default()).unwrap_err();
        assert!(matches!(err, ContentError::InvalidSlug(_)));
    }

    #[test]
    fn test_lookups() {
        let catalog = sample_catalog();
        assert_eq!(catalog.project_by_slug("beta").unwrap().title, "Project beta");
        assert!(catalog.project_by_slug("missing").is_none());
        assert_eq!(catalog.service_by_id("web").unwrap().title, "Web Apps");
        assert_eq!(catalog.featured_projects().count(), 1);
        assert_eq!(
            catalog.project_slugs().collect::<Vec<_>>(),
            vec!["alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn test_listing_order_and_filter() {
        let catalog = sample_catalog();
        let order: Vec<&str> = catalog
            .project_listing(None)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(order, vec!["beta", "gamma", "alpha"]);

        let tools = catalog.project_listing(Some(ProjectCategory::Tool));
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].slug, "gamma");
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECTS_FILE),
            serde_json::json!({ "projects": [project("one", true, 2024, ProjectCategory::Api)] })
                .to_string(),
        )
        .unwrap();
        std::fs::write(dir.path().join(SERVICES_FILE), r#"{"services": []}"#).unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.projects().len(), 1);
        assert!(catalog.site().faq.is_empty());
    }

    #[test]
    fn test_load_reports_bad_json_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECTS_FILE), "{ not json").unwrap();
        std::fs::write(dir.path().join(SERVICES_FILE), r#"{"services": []}"#).unwrap();

        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
        assert!(err.to_string().contains(PROJECTS_FILE));
    }

    #[test]
    fn test_bundled_content_is_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("content");
        let catalog = Catalog::load(&dir).unwrap();
        assert!(!catalog.projects().is_empty());
        assert!(!catalog.services().is_empty());
        assert!(catalog.featured_projects().count() > 0);
    }
}
