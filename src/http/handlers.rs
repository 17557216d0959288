//! Route handlers.
//!
//! Every page handler loads the current site state once, builds the page
//! body, then wraps it in the layout with the request's preferences applied.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::content::ProjectCategory;
use crate::http::request::RequestIdExt;
use crate::http::server::{AppState, SiteState};
use crate::pages::{render_document, views, Page, PageContext};
use crate::preferences::{
    ClientHints, MotionPreference, PreferenceSession, TextSizePreference, ThemePreference,
};
use crate::security::CspNonce;
use crate::seo::{render_robots, render_sitemap, sitemap_entries};

type NonceExt = Option<Extension<CspNonce>>;

fn nonce_str(nonce: &NonceExt) -> Option<&str> {
    nonce.as_ref().map(|Extension(CspNonce(n))| n.as_str())
}

/// Wrap a page body in the layout for this request.
fn render(
    site: &SiteState,
    headers: &HeaderMap,
    uri: &Uri,
    nonce: Option<&str>,
    status: StatusCode,
    page: Page,
) -> Response {
    let session = PreferenceSession::from_headers(headers, &site.config.preferences);
    let ctx = PageContext {
        site: &site.config.site,
        path: uri.path(),
        return_to: uri.path_and_query().map_or(uri.path(), |pq| pq.as_str()),
        nonce,
        root_attributes: session.root_attributes(),
        motion: session.store.motion(),
        text_size: session.store.text_size(),
        theme: session.theme.theme(),
    };
    let document = render_document(&ctx, &page.meta, &page.main);

    let mut response = (status, Html(document)).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::HeaderName::from_static("accept-ch"),
        HeaderValue::from_static(ClientHints::accept_ch()),
    );
    headers.insert(
        header::VARY,
        HeaderValue::from_static("Cookie, Sec-CH-Prefers-Reduced-Motion, Sec-CH-Prefers-Color-Scheme"),
    );
    response
}

pub async fn home(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::home(&site.config.site, &site.catalog, nonce_str(&nonce));
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn about(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::about(&site.config.site, &site.catalog);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn services(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::services(&site.catalog);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    pub category: Option<String>,
}

pub async fn projects(
    State(app): State<AppState>,
    Query(query): Query<ProjectsQuery>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    // Unknown categories fall back to the full listing.
    let category = query.category.as_deref().and_then(ProjectCategory::from_slug);
    let page = views::projects(&site.catalog, category);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn project_detail(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let nonce = nonce_str(&nonce);

    match site.catalog.project_by_slug(&slug) {
        Some(project) => {
            let page = views::project_detail(&site.config.site, project, nonce);
            render(&site, &headers, &uri, nonce, StatusCode::OK, page)
        }
        None => {
            tracing::debug!(
                request_id = %headers.request_id(),
                slug = %slug,
                "Unknown project slug"
            );
            let page = views::project_not_found(&site.config.site, &slug, nonce);
            render(&site, &headers, &uri, nonce, StatusCode::NOT_FOUND, page)
        }
    }
}

pub async fn process(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::process(&site.catalog);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn tech(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::tech(&site.catalog);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn testimonials(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::testimonials(&site.catalog);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn faq(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::faq(&site.catalog);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn contact(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::contact(&site.config.site, &site.catalog);
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::OK, page)
}

pub async fn not_found(
    State(app): State<AppState>,
    uri: Uri,
    nonce: NonceExt,
    headers: HeaderMap,
) -> Response {
    let site = app.current();
    let page = views::not_found(uri.path());
    render(&site, &headers, &uri, nonce_str(&nonce), StatusCode::NOT_FOUND, page)
}

pub async fn sitemap(State(app): State<AppState>) -> Response {
    let site = app.current();
    let today = chrono::Utc::now().date_naive();
    let entries = sitemap_entries(&site.config.site, &site.catalog, today);
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&entries),
    )
        .into_response()
}

pub async fn robots(State(app): State<AppState>) -> Response {
    let site = app.current();
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&site.config.site),
    )
        .into_response()
}

pub async fn healthz(State(app): State<AppState>) -> Json<serde_json::Value> {
    let site = app.current();
    Json(json!({
        "status": "ok",
        "projects": site.catalog.projects().len(),
        "services": site.catalog.services().len(),
    }))
}

/// Body of `POST /preferences`. Each field is optional; a form button
/// submits exactly one of them.
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesForm {
    pub motion: Option<String>,
    pub text_size: Option<String>,
    /// A theme value, or `toggle` to advance the cycle.
    pub theme: Option<String>,
    pub return_to: Option<String>,
}

pub async fn update_preferences(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PreferencesForm>,
) -> Response {
    let site = app.current();

    let motion = match parse_field::<MotionPreference>(form.motion.as_deref()) {
        Ok(v) => v,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };
    let text_size = match parse_field::<TextSizePreference>(form.text_size.as_deref()) {
        Ok(v) => v,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };
    let toggle_theme = form.theme.as_deref() == Some("toggle");
    let theme = if toggle_theme {
        None
    } else {
        match parse_field::<ThemePreference>(form.theme.as_deref()) {
            Ok(v) => v,
            Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
        }
    };

    let mut session = PreferenceSession::from_headers(&headers, &site.config.preferences);
    if let Some(motion) = motion {
        session.store.set_motion(motion);
    }
    if let Some(text_size) = text_size {
        session.store.set_text_size(text_size);
    }
    if let Some(theme) = theme {
        session.theme.set_theme(theme);
    } else if toggle_theme {
        session.theme.toggle();
    }

    let location = safe_return_path(form.return_to.as_deref());
    tracing::debug!(
        request_id = %headers.request_id(),
        return_to = %location,
        "Preferences updated"
    );

    let mut response = StatusCode::SEE_OTHER.into_response();
    let response_headers = response.headers_mut();
    let location =
        HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/"));
    response_headers.insert(header::LOCATION, location);
    for cookie in session.set_cookie_headers() {
        response_headers.append(header::SET_COOKIE, cookie);
    }
    response
}

fn parse_field<T>(value: Option<&str>) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|e: T::Err| e.to_string()),
    }
}

/// Only site-relative paths are followed; anything else redirects home.
///
/// Browsers drop tab, CR and LF while parsing a URL, so a path carrying any
/// control character or space is refused outright rather than stripped.
pub(crate) fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if is_same_site_path(path) => path,
        _ => "/",
    }
}

fn is_same_site_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.bytes().any(|b| b.is_ascii_control() || b == b' ')
}
