//! Page bodies. Each returns the page metadata and the `<main>` content.

use crate::config::SiteMetaConfig;
use crate::content::{Catalog, FaqCategory, Project, ProjectCategory, Service};
use crate::pages::html::escape;
use crate::seo::jsonld::{self, Crumb};
use crate::seo::PageMeta;

pub struct Page {
    pub meta: PageMeta,
    pub main: String,
}

pub fn home(site: &SiteMetaConfig, catalog: &Catalog, nonce: Option<&str>) -> Page {
    let featured: String = catalog.featured_projects().map(project_card).collect();
    let services: String = catalog
        .services()
        .iter()
        .map(|s| {
            format!(
                "<li><h3>{}</h3><p>{}</p></li>",
                escape(&s.title),
                escape(&s.description)
            )
        })
        .collect();

    let main = format!(
        "<section class=\"hero\">\n<h1>{}</h1>\n<p>{}</p>\n\
         <p><a href=\"/projects\">View my work</a> <a href=\"/contact\">Get in touch</a></p>\n\
         </section>\n\
         <section aria-labelledby=\"featured\">\n<h2 id=\"featured\">Featured Projects</h2>\n\
         <div class=\"cards\">{}</div>\n</section>\n\
         <section aria-labelledby=\"services\">\n<h2 id=\"services\">Services</h2>\n\
         <ul>{}</ul>\n<p><a href=\"/services\">All services</a></p>\n</section>\n{}\n",
        escape(&site.author),
        escape(&catalog.site().tagline),
        featured,
        services,
        jsonld::script_tag(&jsonld::person(site), nonce),
    );

    Page {
        meta: PageMeta::home(),
        main,
    }
}

pub fn about(site: &SiteMetaConfig, catalog: &Catalog) -> Page {
    let paragraphs: String = catalog
        .site()
        .about
        .iter()
        .map(|p| format!("<p>{}</p>\n", escape(p)))
        .collect();

    Page {
        meta: PageMeta::new("About", "/about")
            .with_description(format!("About {}", site.author)),
        main: format!("<h1>About</h1>\n{}", paragraphs),
    }
}

pub fn services(catalog: &Catalog) -> Page {
    let items: String = catalog.services().iter().map(service_card).collect();
    Page {
        meta: PageMeta::new("Services", "/services")
            .with_description("Web development, APIs and technical consulting."),
        main: format!("<h1>Services</h1>\n<div class=\"cards\">{}</div>\n", items),
    }
}

pub fn projects(catalog: &Catalog, category: Option<ProjectCategory>) -> Page {
    let filters: String = std::iter::once(("All".to_string(), "/projects".to_string(), category.is_none()))
        .chain(ProjectCategory::ALL.iter().map(|c| {
            (
                c.label().to_string(),
                format!("/projects?category={}", c.slug()),
                category == Some(*c),
            )
        }))
        .map(|(label, href, active)| {
            let current = if active { " aria-current=\"true\"" } else { "" };
            format!("<li><a href=\"{}\"{}>{}</a></li>", href, current, label)
        })
        .collect();

    let listing = catalog.project_listing(category);
    let cards: String = if listing.is_empty() {
        "<p>No projects in this category yet.</p>".to_string()
    } else {
        listing.into_iter().map(project_card).collect()
    };

    Page {
        meta: PageMeta::new("Projects", "/projects")
            .with_description("Selected web, API and tooling projects."),
        main: format!(
            "<h1>Projects</h1>\n<nav aria-label=\"Project categories\"><ul>{}</ul></nav>\n\
             <div class=\"cards\">{}</div>\n",
            filters, cards
        ),
    }
}

pub fn project_detail(site: &SiteMetaConfig, project: &Project, nonce: Option<&str>) -> Page {
    let crumbs = [
        Crumb::link("Home", "/"),
        Crumb::link("Projects", "/projects"),
        Crumb::current(project.title.clone()),
    ];
    let technologies: String = project
        .technologies
        .iter()
        .map(|t| format!("<li>{}</li>", escape(t)))
        .collect();
    let live = project
        .live_url
        .as_deref()
        .map(|url| format!(" <a href=\"{}\" rel=\"noopener\">Live site</a>", escape(url)))
        .unwrap_or_default();
    let images = if project.images.is_empty() {
        vec![project.image.clone()]
    } else {
        project.images.clone()
    };

    let main = format!(
        "{}\n<article>\n<h1>{}</h1>\n\
         <p class=\"meta\">{} &middot; {} &middot; {}</p>\n\
         <img src=\"{}\" alt=\"{}\">\n<p>{}</p>\n\
         <h2>Technologies</h2>\n<ul>{}</ul>\n\
         <p><a href=\"{}\" rel=\"noopener\">Source code</a>{}</p>\n</article>\n{}\n",
        render_breadcrumbs(&crumbs),
        escape(&project.title),
        project.category.label(),
        project.status.label(),
        project.year,
        escape(&project.image),
        escape(&project.title),
        escape(&project.long_description),
        technologies,
        escape(&project.github_url),
        live,
        jsonld::script_tag(&jsonld::creative_work(site, project), nonce),
    );

    Page {
        meta: PageMeta::new(
            format!("{} | Projects", project.title),
            format!("/projects/{}", project.slug),
        )
        .with_description(project.description.clone())
        .with_images(images)
        .article(),
        main,
    }
}

pub fn project_not_found(site: &SiteMetaConfig, slug: &str, nonce: Option<&str>) -> Page {
    let crumbs = [
        Crumb::link("Home", "/"),
        Crumb::link("Projects", "/projects"),
        Crumb::current("Not found"),
    ];
    let main = format!(
        "<h1 class=\"sr-only\">Project Not Found</h1>\n{}\n\
         <p>Sorry, this project could not be found.</p>\n\
         <p><a href=\"/projects\">Back to Projects</a></p>\n{}\n",
        render_breadcrumbs(&crumbs),
        jsonld::script_tag(&jsonld::breadcrumb_list(site, &crumbs), nonce),
    );

    Page {
        meta: PageMeta::new("Project Not Found", format!("/projects/{}", slug)).no_index(),
        main,
    }
}

pub fn process(catalog: &Catalog) -> Page {
    let steps: String = catalog
        .site()
        .process
        .iter()
        .map(|s| {
            format!(
                "<li><h2>{}. {}</h2><p>{}</p></li>\n",
                s.step,
                escape(&s.title),
                escape(&s.description)
            )
        })
        .collect();
    Page {
        meta: PageMeta::new("Process", "/process")
            .with_description("How a project runs from discovery to launch."),
        main: format!("<h1>Process</h1>\n<ol>\n{}</ol>\n", steps),
    }
}

pub fn tech(catalog: &Catalog) -> Page {
    let groups: String = catalog
        .site()
        .tech_stack
        .iter()
        .map(|group| {
            let items: String = group
                .items
                .iter()
                .map(|i| format!("<li>{}</li>", escape(i)))
                .collect();
            format!("<section><h2>{}</h2><ul>{}</ul></section>\n", escape(&group.name), items)
        })
        .collect();
    Page {
        meta: PageMeta::new("Tech Stack", "/tech")
            .with_description("Languages, frameworks and tools in daily use."),
        main: format!("<h1>Tech Stack</h1>\n{}", groups),
    }
}

pub fn testimonials(catalog: &Catalog) -> Page {
    let quotes: String = catalog
        .site()
        .testimonials
        .iter()
        .map(|t| {
            format!(
                "<figure><blockquote>{}</blockquote>\
                 <figcaption>{}, {} at {}</figcaption></figure>\n",
                escape(&t.quote),
                escape(&t.name),
                escape(&t.role),
                escape(&t.company)
            )
        })
        .collect();
    Page {
        meta: PageMeta::new("Testimonials", "/testimonials")
            .with_description("What clients say."),
        main: format!("<h1>Testimonials</h1>\n{}", quotes),
    }
}

pub fn faq(catalog: &Catalog) -> Page {
    let sections: String = FaqCategory::ALL
        .iter()
        .filter_map(|category| {
            let items: String = catalog
                .faq_by_category(*category)
                .map(|f| {
                    format!(
                        "<details id=\"faq-{}\"><summary>{}</summary><p>{}</p></details>\n",
                        f.id,
                        escape(&f.question),
                        escape(&f.answer)
                    )
                })
                .collect();
            (!items.is_empty())
                .then(|| format!("<section><h2>{}</h2>\n{}</section>\n", category.label(), items))
        })
        .collect();
    Page {
        meta: PageMeta::new("FAQ", "/faq")
            .with_description("Answers to common questions about working together."),
        main: format!("<h1>Frequently Asked Questions</h1>\n{}", sections),
    }
}

pub fn contact(site: &SiteMetaConfig, catalog: &Catalog) -> Page {
    let services: String = catalog
        .services()
        .iter()
        .map(|s| format!("<li>{}</li>", escape(&s.title)))
        .collect();
    let email = escape(&site.contact_email);
    Page {
        meta: PageMeta::new("Contact", "/contact")
            .with_description("Start a project or ask a question."),
        main: format!(
            "<h1>Contact</h1>\n<p>Tell me about your project: \
             <a href=\"mailto:{email}\">{email}</a></p>\n\
             <h2>I can help with</h2>\n<ul>{services}</ul>\n"
        ),
    }
}

pub fn not_found(path: &str) -> Page {
    Page {
        meta: PageMeta::new("Page Not Found", path.to_string()).no_index(),
        main: "<h1>Page Not Found</h1>\n\
               <p>The page you are looking for does not exist.</p>\n\
               <p><a href=\"/\">Go home</a></p>\n"
            .to_string(),
    }
}

fn project_card(project: &Project) -> String {
    let technologies = project
        .technologies
        .iter()
        .map(|t| escape(t))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "<article class=\"card\"><h3>{}</h3><p>{}</p><p class=\"tech\">{}</p>\
         <a href=\"/projects/{}\">View Details</a></article>\n",
        escape(&project.title),
        escape(&project.description),
        technologies,
        project.slug,
    )
}

fn service_card(service: &Service) -> String {
    let features: String = service
        .features
        .iter()
        .map(|f| format!("<li>{}</li>", escape(f)))
        .collect();
    let pricing = service
        .pricing
        .as_ref()
        .map(|p| {
            format!(
                "<p class=\"pricing\">From {} {} per {}</p>",
                format_amount(p.starting),
                escape(&p.currency),
                escape(&p.unit)
            )
        })
        .unwrap_or_default();
    format!(
        "<article class=\"card\" id=\"{}\"><h2>{}</h2><p>{}</p><ul>{}</ul>{}</article>\n",
        escape(&service.id),
        escape(&service.title),
        escape(&service.description),
        features,
        pricing
    )
}

/// Whole amounts with thousands separators, `5000.0` → `"5,000"`.
fn format_amount(amount: f64) -> String {
    let whole = amount.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn render_breadcrumbs(crumbs: &[Crumb]) -> String {
    let last = crumbs.len().saturating_sub(1);
    let items: String = crumbs
        .iter()
        .enumerate()
        .map(|(idx, crumb)| {
            let body = match (&crumb.href, idx == last) {
                (Some(href), false) => {
                    format!("<a href=\"{}\">{}</a>", escape(href), escape(&crumb.label))
                }
                (_, true) => format!("<span aria-current=\"page\">{}</span>", escape(&crumb.label)),
                (None, false) => format!("<span>{}</span>", escape(&crumb.label)),
            };
            let separator = if idx == last {
                ""
            } else {
                "<span aria-hidden=\"true\">›</span>"
            };
            format!("<li>{}{}</li>", body, separator)
        })
        .collect();
    format!("<nav aria-label=\"Breadcrumb\"><ol>{}</ol></nav>", items)
}
