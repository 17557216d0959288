//! Content types deserialized from the JSON files.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    pub github_url: String,
    #[serde(default)]
    pub live_url: Option<String>,
    pub status: ProjectStatus,
    pub featured: bool,
    pub category: ProjectCategory,
    pub year: u16,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planning,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Planning => "Planning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    WebDevelopment,
    MobileDevelopment,
    FullStack,
    Api,
    Tool,
    DesignSystem,
}

impl ProjectCategory {
    pub const ALL: &'static [ProjectCategory] = &[
        ProjectCategory::WebDevelopment,
        ProjectCategory::MobileDevelopment,
        ProjectCategory::FullStack,
        ProjectCategory::Api,
        ProjectCategory::Tool,
        ProjectCategory::DesignSystem,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ProjectCategory::WebDevelopment => "web-development",
            ProjectCategory::MobileDevelopment => "mobile-development",
            ProjectCategory::FullStack => "full-stack",
            ProjectCategory::Api => "api",
            ProjectCategory::Tool => "tool",
            ProjectCategory::DesignSystem => "design-system",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectCategory::WebDevelopment => "Web Development",
            ProjectCategory::MobileDevelopment => "Mobile Development",
            ProjectCategory::FullStack => "Full Stack",
            ProjectCategory::Api => "API",
            ProjectCategory::Tool => "Tool",
            ProjectCategory::DesignSystem => "Design System",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub pricing: Option<ServicePricing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePricing {
    pub starting: f64,
    pub currency: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqCategory {
    General,
    Process,
    Technical,
    Pricing,
}

impl FaqCategory {
    pub const ALL: &'static [FaqCategory] = &[
        FaqCategory::General,
        FaqCategory::Process,
        FaqCategory::Technical,
        FaqCategory::Pricing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FaqCategory::General => "General",
            FaqCategory::Process => "Process",
            FaqCategory::Technical => "Technical",
            FaqCategory::Pricing => "Pricing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub id: u32,
    pub question: String,
    pub answer: String,
    pub category: FaqCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub company: String,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechCategory {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub step: u32,
    pub title: String,
    pub description: String,
}

/// Everything in `site.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteContent {
    pub tagline: String,
    pub about: Vec<String>,
    pub faq: Vec<FaqItem>,
    pub testimonials: Vec<Testimonial>,
    pub tech_stack: Vec<TechCategory>,
    pub process: Vec<ProcessStep>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsFile {
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServicesFile {
    pub services: Vec<Service>,
}
