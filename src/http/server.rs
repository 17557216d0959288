//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all page, SEO and preference handlers
//! - Wire up middleware (CSP nonce, static security headers, tracing,
//!   request ID, timeout, metrics)
//! - Bind server to listener
//! - Apply hot-reloaded config and content without restarting

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::content::Catalog;
use crate::http::handlers;
use crate::http::middleware::track_metrics;
use crate::http::request::RequestIdLayer;
use crate::security::{csp_nonce_middleware, headers::with_security_headers, CspSettings, SharedCsp};

/// Config and content as one unit, so a reload never mixes generations.
#[derive(Debug)]
pub struct SiteState {
    pub config: SiteConfig,
    pub catalog: Catalog,
}

impl SiteState {
    pub fn new(config: SiteConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    site: Arc<ArcSwap<SiteState>>,
    csp: SharedCsp,
}

impl AppState {
    pub fn new(site: SiteState) -> Self {
        let csp = CspSettings::from_config(&site.config.security);
        Self {
            site: Arc::new(ArcSwap::from_pointee(site)),
            csp: Arc::new(ArcSwap::from_pointee(csp)),
        }
    }

    /// Snapshot of the current state; stays valid across a concurrent reload.
    pub fn current(&self) -> Arc<SiteState> {
        self.site.load_full()
    }

    /// Swap in reloaded state. In-flight requests finish on the old snapshot.
    pub fn replace(&self, site: SiteState) {
        self.csp
            .store(Arc::new(CspSettings::from_config(&site.config.security)));
        self.site.store(Arc::new(site));
    }
}

/// HTTP server for the portfolio site.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and content.
    pub fn new(config: SiteConfig, catalog: Catalog) -> Self {
        let state = AppState::new(SiteState::new(config, catalog));
        let router = Self::build_router(&state);
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Static headers and the request timeout are fixed at startup; the CSP
    /// settings and everything the handlers read follow reloads.
    #[allow(deprecated)]
    fn build_router(state: &AppState) -> Router {
        let current = state.current();
        let config = &current.config;

        let routes = Router::new()
            .route("/", get(handlers::home))
            .route("/about", get(handlers::about))
            .route("/services", get(handlers::services))
            .route("/projects", get(handlers::projects))
            .route("/projects/{slug}", get(handlers::project_detail))
            .route("/process", get(handlers::process))
            .route("/tech", get(handlers::tech))
            .route("/testimonials", get(handlers::testimonials))
            .route("/faq", get(handlers::faq))
            .route("/contact", get(handlers::contact))
            .route("/sitemap.xml", get(handlers::sitemap))
            .route("/robots.txt", get(handlers::robots))
            .route("/healthz", get(handlers::healthz))
            .route("/preferences", post(handlers::update_preferences))
            .route_layer(middleware::from_fn(track_metrics))
            .fallback(handlers::not_found)
            .with_state(state.clone())
            .layer(middleware::from_fn_with_state(
                state.csp.clone(),
                csp_nonce_middleware,
            ));

        with_security_headers(routes, &config.security)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer::propagate())
            .layer(TraceLayer::new_for_http())
            .layer(RequestIdLayer::set())
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Reloaded state arriving on `updates` is swapped in as it comes; the
    /// server stops accepting when `shutdown` fires and drains open requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut updates: mpsc::UnboundedReceiver<SiteState>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(next) = updates.recv().await {
                tracing::info!(
                    projects = next.catalog.projects().len(),
                    services = next.catalog.services().len(),
                    "Applying reloaded site state"
                );
                state.replace(next);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::catalog::testing::sample_catalog;
    use crate::security::nonce::testing::BrokenSource;
    use crate::security::NonceGenerator;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(SiteConfig::default(), sample_catalog())
    }

    async fn get_path(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_about_has_csp_and_matching_inline_nonce() {
        let response = get_path(server().router(), "/about").await;
        assert_eq!(response.status(), StatusCode::OK);

        let policy = response
            .headers()
            .get(header::CONTENT_SECURITY_POLICY)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let start = policy.find("'nonce-").unwrap() + "'nonce-".len();
        let nonce = &policy[start..start + 32];
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));

        let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert_eq!(cookie, format!("__csp_nonce={}; Path=/; SameSite=Lax", nonce));

        let html = body_text(response).await;
        assert!(html.contains(&format!("<style nonce=\"{}\">", nonce)));
    }

    #[tokio::test]
    async fn test_static_headers_on_every_response() {
        let response = get_path(server().router(), "/robots.txt").await;
        let headers = response.headers();
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert!(headers.get("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_unknown_project_is_404_with_breadcrumbs() {
        let response = get_path(server().router(), "/projects/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("aria-label=\"Breadcrumb\""));
        assert!(html.contains("noindex"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = get_path(server().router(), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Page Not Found"));
    }

    #[tokio::test]
    async fn test_preferences_redirect_and_cookies() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/preferences")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("motion=off&return_to=%2Ffaq"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/faq");
        let cookies: Vec<&str> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert!(cookies.iter().any(|c| c.starts_with("motion-preference=off;")));
    }

    #[tokio::test]
    async fn test_control_characters_in_return_to_redirect_home() {
        for body in [
            "motion=off&return_to=%2F%09%2Fevil.example",
            "motion=off&return_to=%2Ffaq%0D%0AX-Evil%3A1",
        ] {
            let response = server()
                .router()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/preferences")
                        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/", "{}", body);
        }
    }

    #[tokio::test]
    async fn test_invalid_preference_rejected() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/preferences")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("theme=sepia"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preference_cookie_applied_to_page() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/faq")
                    .header(header::COOKIE, "motion-preference=reduced; text-size-preference=lg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("data-motion=\"reduced\""));
        assert!(html.contains("data-text-size=\"lg\""));
    }

    #[tokio::test]
    async fn test_nonce_failure_fails_open() {
        let server = server();
        let mut settings = CspSettings::from_config(&SiteConfig::default().security);
        settings.generator = NonceGenerator::with_source(16, Arc::new(BrokenSource));
        server.state().csp.store(Arc::new(settings));

        let response = get_path(server.router(), "/about").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_SECURITY_POLICY).is_none());
        assert!(response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .all(|v| !v.to_str().unwrap().starts_with("__csp_nonce")));
        assert!(body_text(response).await.contains("<style>"));
    }

    #[tokio::test]
    async fn test_replace_swaps_content() {
        let server = server();
        let router = server.router();
        server
            .state()
            .replace(SiteState::new(SiteConfig::default(), Catalog::default()));

        let response = get_path(router, "/projects/beta").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
