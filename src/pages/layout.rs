//! Shared page chrome: document head, navigation, footer, preferences form.

use crate::config::SiteMetaConfig;
use crate::pages::html::{escape, nonce_attr};
use crate::preferences::{MotionPreference, TextSizePreference, ThemePreference};
use crate::seo::PageMeta;

/// Primary navigation, in display order.
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Home", "/"),
    ("About", "/about"),
    ("Services", "/services"),
    ("Projects", "/projects"),
    ("Process", "/process"),
    ("Tech", "/tech"),
    ("Testimonials", "/testimonials"),
    ("FAQ", "/faq"),
    ("Contact", "/contact"),
];

/// Critical styles inlined so the preference attributes take effect before
/// any external stylesheet loads.
const CRITICAL_CSS: &str = "\
:root{--text-base:1rem}\
[data-text-size=\"sm\"]{--text-base:.875rem}\
[data-text-size=\"lg\"]{--text-base:1.125rem}\
body{font-size:var(--text-base);margin:0;font-family:system-ui,sans-serif}\
[data-theme=\"dark\"] body{background:#0f172a;color:#e2e8f0}\
[data-theme=\"high-contrast\"] body{background:#000;color:#fff}\
[data-motion=\"reduced\"] *{animation-duration:.01ms!important;transition-duration:.01ms!important}\
[data-motion=\"off\"] *{animation:none!important;transition:none!important}\
.sr-only{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0,0,0,0)}";

/// Per-request values every page needs.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub site: &'a SiteMetaConfig,
    /// Request path, for the current-page marker.
    pub path: &'a str,
    /// Path and query the preferences form returns to.
    pub return_to: &'a str,
    pub nonce: Option<&'a str>,
    pub root_attributes: String,
    pub motion: MotionPreference,
    pub text_size: TextSizePreference,
    pub theme: ThemePreference,
}

/// Wrap `main` in the full document.
pub fn render_document(ctx: &PageContext<'_>, meta: &PageMeta, main: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\"{root}>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         {head}\
         <style{nonce}>{css}</style>\n\
         </head>\n\
         <body>\n\
         <a href=\"#main-content\" class=\"sr-only\">Skip to main content</a>\n\
         {header}\
         <main id=\"main-content\">\n{main}</main>\n\
         {footer}\
         </body>\n\
         </html>\n",
        root = ctx.root_attributes,
        head = meta.render_head(ctx.site),
        nonce = nonce_attr(ctx.nonce),
        css = CRITICAL_CSS,
        header = render_header(ctx),
        main = main,
        footer = render_footer(ctx),
    )
}

fn render_header(ctx: &PageContext<'_>) -> String {
    let links: String = NAV_ITEMS
        .iter()
        .map(|(label, href)| {
            let current = if is_current(ctx.path, href) {
                " aria-current=\"page\""
            } else {
                ""
            };
            format!("<li><a href=\"{}\"{}>{}</a></li>", href, current, label)
        })
        .collect();

    format!(
        "<header>\n<a href=\"/\" class=\"brand\">{}</a>\n\
         <nav aria-label=\"Main\"><ul>{}</ul></nav>\n</header>\n",
        escape(&ctx.site.author),
        links
    )
}

fn is_current(path: &str, href: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        path == href || path.starts_with(&format!("{}/", href))
    }
}

fn render_footer(ctx: &PageContext<'_>) -> String {
    format!(
        "<footer>\n{}\
         <p>&copy; {} &middot; <a href=\"/sitemap.xml\">Sitemap</a></p>\n</footer>\n",
        render_preferences_form(ctx),
        escape(&ctx.site.author)
    )
}

/// Server-side preferences panel; each button posts one value.
fn render_preferences_form(ctx: &PageContext<'_>) -> String {
    let group = |label: &str, buttons: String| {
        format!(
            "<div role=\"group\" aria-label=\"{label}\"><span>{label}</span>{buttons}</div>\n"
        )
    };
    let button = |name: &str, value: &str, label: &str, pressed: bool| {
        format!(
            "<button type=\"submit\" name=\"{}\" value=\"{}\" aria-pressed=\"{}\">{}</button>",
            name, value, pressed, label
        )
    };

    let themes: String = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
        ThemePreference::HighContrast,
    ]
    .iter()
    .map(|t| button("theme", t.as_str(), t.label(), *t == ctx.theme))
    .collect();
    let motions: String = MotionPreference::ALL
        .iter()
        .map(|m| button("motion", m.as_str(), m.label(), *m == ctx.motion))
        .collect();
    let sizes: String = TextSizePreference::ALL
        .iter()
        .map(|s| button("text_size", s.as_str(), s.label(), *s == ctx.text_size))
        .collect();

    format!(
        "<form method=\"post\" action=\"/preferences\" aria-label=\"Display preferences\">\n\
         <input type=\"hidden\" name=\"return_to\" value=\"{}\">\n{}{}{}</form>\n",
        escape(ctx.return_to),
        group("Theme", themes),
        group("Motion", motions),
        group("Text Size", sizes),
    )
}
