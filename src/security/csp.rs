//! Content-Security-Policy assembly and the per-request nonce middleware.
//!
//! # Responsibilities
//! - Build the ordered directive list with the request nonce interpolated
//! - Render the static template used by tooling (`<NONCE>` placeholder)
//! - Attach nonce cookie and CSP header to every response
//!
//! # Design Decisions
//! - Fail open: if no nonce can be drawn the response passes through untouched
//! - Template and live policy share one connect-src list, so they cannot drift
//! - The nonce is also placed in request extensions for inline tags

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::config::SecurityConfig;
use crate::observability::metrics;
use crate::security::nonce::{Nonce, NonceGenerator};

/// Placeholder rendered by [`CspPolicy::template`].
pub const NONCE_PLACEHOLDER: &str = "<NONCE>";

/// The directive set. Only `connect-src` is configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CspPolicy {
    connect_src: Vec<String>,
}

impl CspPolicy {
    pub fn new(connect_src: Vec<String>) -> Self {
        Self { connect_src }
    }

    pub fn connect_src(&self) -> &[String] {
        &self.connect_src
    }

    /// Header value for one response.
    pub fn render(&self, nonce: &Nonce) -> String {
        self.render_with(nonce.as_str())
    }

    /// Static form with a `<NONCE>` placeholder in place of a live nonce.
    pub fn template(&self) -> String {
        self.render_with(NONCE_PLACEHOLDER)
    }

    fn render_with(&self, nonce: &str) -> String {
        let nonce_source = format!("'nonce-{}'", nonce);
        let connect = self.connect_src.join(" ");

        [
            "default-src 'self'".to_string(),
            format!("script-src 'self' {}", nonce_source),
            format!("style-src 'self' {}", nonce_source),
            "img-src 'self' data: blob: https:".to_string(),
            "font-src 'self' data:".to_string(),
            format!("connect-src {}", connect),
            "object-src 'none'".to_string(),
            "base-uri 'self'".to_string(),
            "frame-ancestors 'none'".to_string(),
        ]
        .join("; ")
    }
}

impl Default for CspPolicy {
    fn default() -> Self {
        Self::new(SecurityConfig::default().connect_src)
    }
}

/// Everything the middleware needs for one request.
#[derive(Debug, Clone)]
pub struct CspSettings {
    pub enabled: bool,
    pub generator: NonceGenerator,
    pub policy: CspPolicy,
    pub cookie_name: String,
}

impl CspSettings {
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            enabled: config.csp_enabled,
            generator: NonceGenerator::new(config.nonce_bytes),
            policy: CspPolicy::new(config.connect_src.clone()),
            cookie_name: config.nonce_cookie.clone(),
        }
    }

    /// `Set-Cookie` value: readable by scripts, lax, site-wide, session-scoped.
    pub fn cookie(&self, nonce: &Nonce) -> String {
        format!("{}={}; Path=/; SameSite=Lax", self.cookie_name, nonce)
    }
}

/// Hot-swappable middleware state.
pub type SharedCsp = Arc<ArcSwap<CspSettings>>;

/// Nonce for the current request, available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct CspNonce(pub Nonce);

/// Generate a nonce, expose it to the handler, then stamp cookie and policy
/// onto the response.
pub async fn csp_nonce_middleware(
    State(settings): State<SharedCsp>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let settings = settings.load_full();
    if !settings.enabled {
        return next.run(request).await;
    }

    let nonce = match settings.generator.generate() {
        Ok(nonce) => nonce,
        Err(_) => {
            metrics::record_nonce_failure();
            return next.run(request).await;
        }
    };

    let cookie = HeaderValue::from_str(&settings.cookie(&nonce));
    let policy = HeaderValue::from_str(&settings.policy.render(&nonce));
    let (Ok(cookie), Ok(policy)) = (cookie, policy) else {
        return next.run(request).await;
    };

    request.extensions_mut().insert(CspNonce(nonce));
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.append(header::SET_COOKIE, cookie);
    headers.insert(header::CONTENT_SECURITY_POLICY, policy);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::nonce::testing::{BrokenSource, FixedSource};
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    fn nonce_tokens(policy: &str) -> Vec<&str> {
        policy
            .split(' ')
            .filter(|t| t.starts_with("'nonce-"))
            .collect()
    }

    fn directive<'a>(policy: &'a str, name: &str) -> &'a str {
        policy
            .split("; ")
            .find(|d| d.split(' ').next() == Some(name))
            .unwrap()
    }

    fn app(settings: CspSettings) -> Router {
        let shared: SharedCsp = Arc::new(ArcSwap::from_pointee(settings));
        Router::new()
            .route(
                "/about",
                get(|nonce: Option<Extension<CspNonce>>| async move {
                    match nonce {
                        Some(Extension(CspNonce(n))) => n.to_string(),
                        None => String::new(),
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(shared, csp_nonce_middleware))
    }

    #[test]
    fn test_directive_order() {
        let policy = CspPolicy::default().template();
        let names: Vec<&str> = policy
            .split("; ")
            .map(|d| d.split(' ').next().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "default-src",
                "script-src",
                "style-src",
                "img-src",
                "font-src",
                "connect-src",
                "object-src",
                "base-uri",
                "frame-ancestors",
            ]
        );
    }

    #[test]
    fn test_nonce_in_script_and_style_only() {
        let nonce = NonceGenerator::default().generate().unwrap();
        let policy = CspPolicy::default().render(&nonce);
        let expected = nonce.source();

        assert_eq!(nonce_tokens(&policy), vec![expected.as_str(), expected.as_str()]);
        assert_eq!(directive(&policy, "script-src"), format!("script-src 'self' {}", expected));
        assert_eq!(directive(&policy, "style-src"), format!("style-src 'self' {}", expected));
    }

    #[test]
    fn test_template_shares_connect_src() {
        let policy = CspPolicy::new(vec!["'self'".into(), "https://api.example.com".into()]);
        let template = policy.template();
        assert!(template.contains("script-src 'self' 'nonce-<NONCE>'"));

        let live = policy.render(&NonceGenerator::default().generate().unwrap());
        assert_eq!(directive(&template, "connect-src"), directive(&live, "connect-src"));
        assert_eq!(
            directive(&live, "connect-src"),
            "connect-src 'self' https://api.example.com"
        );
    }

    #[test]
    fn test_cookie_attributes() {
        let settings = CspSettings::from_config(&SecurityConfig::default());
        let generator = NonceGenerator::with_source(2, Arc::new(FixedSource(0xff)));
        let cookie = settings.cookie(&generator.generate().unwrap());
        assert_eq!(cookie, "__csp_nonce=ffff; Path=/; SameSite=Lax");
        assert!(!cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Expires"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[tokio::test]
    async fn test_middleware_sets_cookie_and_header() {
        let settings = CspSettings::from_config(&SecurityConfig::default());
        let response = app(settings)
            .oneshot(Request::get("/about").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let policy = response
            .headers()
            .get(header::CONTENT_SECURITY_POLICY)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let nonce = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(nonce.len(), 32);

        assert!(policy.contains(&format!("script-src 'self' 'nonce-{}'", nonce)));
        assert!(policy.contains(&format!("style-src 'self' 'nonce-{}'", nonce)));
        assert!(cookie.starts_with(&format!("__csp_nonce={};", nonce)));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn test_each_request_gets_fresh_nonce() {
        let app = app(CspSettings::from_config(&SecurityConfig::default()));
        let mut seen = Vec::new();
        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(Request::get("/about").body(Body::empty()).unwrap())
                .await
                .unwrap();
            let policy = response.headers()[header::CONTENT_SECURITY_POLICY]
                .to_str()
                .unwrap()
                .to_string();
            seen.push(nonce_tokens(&policy)[0].to_string());
        }
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_broken_random_source_fails_open() {
        let mut settings = CspSettings::from_config(&SecurityConfig::default());
        settings.generator = NonceGenerator::with_source(16, Arc::new(BrokenSource));

        let response = app(settings)
            .oneshot(Request::get("/about").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.headers().get(header::CONTENT_SECURITY_POLICY).is_none());
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_passes_through() {
        let mut settings = CspSettings::from_config(&SecurityConfig::default());
        settings.enabled = false;

        let response = app(settings)
            .oneshot(Request::get("/about").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().get(header::CONTENT_SECURITY_POLICY).is_none());
    }
}
