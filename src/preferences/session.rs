//! Per-request wiring of the preference store for server rendering.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};

use super::hooks::RootAttributes;
use super::media::ClientHints;
use super::storage::CookieStorage;
use super::store::PreferenceStore;
use super::theme::ThemeController;
use crate::config::PreferencesConfig;

/// A store and theme controller over the request's cookies and client hints.
pub struct PreferenceSession {
    storage: Arc<CookieStorage>,
    hooks: Arc<RootAttributes>,
    pub store: PreferenceStore,
    pub theme: ThemeController,
}

impl PreferenceSession {
    pub fn from_headers(headers: &HeaderMap, config: &PreferencesConfig) -> Self {
        let storage = Arc::new(CookieStorage::from_headers(headers));
        let hooks = Arc::new(RootAttributes::new());
        let hints = ClientHints::from_headers(headers);

        let store = PreferenceStore::new(
            storage.clone(),
            &hints,
            hooks.clone(),
            config.default_text_size,
        );
        let theme = ThemeController::new(
            storage.clone(),
            &hints,
            hooks.clone(),
            config.default_theme,
        );

        Self {
            storage,
            hooks,
            store,
            theme,
        }
    }

    /// Attributes for the `<html>` element.
    pub fn root_attributes(&self) -> String {
        self.hooks.render()
    }

    /// Cookies persisting whatever was set during this request.
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        self.storage.set_cookie_headers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{MotionPreference, ThemePreference};
    use axum::http::header;

    #[test]
    fn test_session_from_cookies_and_hints() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme-preference=system; text-size-preference=lg"),
        );
        headers.insert("sec-ch-prefers-reduced-motion", HeaderValue::from_static("reduce"));
        headers.insert("sec-ch-prefers-color-scheme", HeaderValue::from_static("dark"));

        let session = PreferenceSession::from_headers(&headers, &PreferencesConfig::default());
        assert_eq!(session.store.motion(), MotionPreference::Reduced);
        assert_eq!(session.theme.resolved_theme(), ThemePreference::Dark);
        assert_eq!(
            session.root_attributes(),
            " data-motion=\"reduced\" data-text-size=\"lg\" data-theme=\"dark\""
        );
        assert!(session.set_cookie_headers().is_empty());
    }

    #[test]
    fn test_writes_become_cookies() {
        let mut session =
            PreferenceSession::from_headers(&HeaderMap::new(), &PreferencesConfig::default());
        session.store.set_motion(MotionPreference::Off);
        session.theme.set_theme(ThemePreference::Dark);

        let cookies: Vec<String> = session
            .set_cookie_headers()
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("motion-preference=off;"));
        assert!(cookies[1].starts_with("theme-preference=dark;"));
    }
}
