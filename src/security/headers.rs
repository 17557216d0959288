//! Static security response headers.
//!
//! Applied to every response regardless of route. The per-request CSP lives
//! in `csp.rs`; these never vary between requests.

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::SecurityConfig;

/// Header set for the given configuration, in emission order.
pub fn static_headers(config: &SecurityConfig) -> Vec<(HeaderName, HeaderValue)> {
    if !config.enable_headers {
        return Vec::new();
    }

    let mut headers = vec![
        (
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        // frame-ancestors covers modern browsers; this is for older ones.
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
    ];

    if config.production {
        headers.push((
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains; preload"),
        ));
    }

    headers
}

/// Wrap a router so every response carries the static headers.
pub fn with_security_headers(router: Router, config: &SecurityConfig) -> Router {
    static_headers(config)
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(name, value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[test]
    fn test_hsts_only_in_production() {
        let mut config = SecurityConfig::default();
        let names: Vec<_> = static_headers(&config).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names.len(), 4);
        assert!(!names.contains(&header::STRICT_TRANSPORT_SECURITY));

        config.production = true;
        let names: Vec<_> = static_headers(&config).into_iter().map(|(n, _)| n).collect();
        assert!(names.contains(&header::STRICT_TRANSPORT_SECURITY));
    }

    #[test]
    fn test_disabled_emits_nothing() {
        let mut config = SecurityConfig::default();
        config.enable_headers = false;
        config.production = true;
        assert!(static_headers(&config).is_empty());
    }

    #[tokio::test]
    async fn test_headers_on_response() {
        let router = Router::new().route("/", get(|| async { "ok" }));
        let router = with_security_headers(router, &SecurityConfig::default());

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(headers[header::X_XSS_PROTECTION], "0");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(
            headers[header::REFERRER_POLICY],
            "strict-origin-when-cross-origin"
        );
    }
}
