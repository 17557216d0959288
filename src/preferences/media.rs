//! OS-level media-query signals.

use axum::http::HeaderMap;

/// `Sec-CH-Prefers-Reduced-Motion` user-agent client hint.
pub const REDUCED_MOTION_HINT: &str = "sec-ch-prefers-reduced-motion";
/// `Sec-CH-Prefers-Color-Scheme` user-agent client hint.
pub const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

/// What the operating system reports about display preferences.
pub trait MediaQueries {
    /// `(prefers-reduced-motion: reduce)`
    fn prefers_reduced_motion(&self) -> bool;

    /// `(prefers-color-scheme: dark)`
    fn prefers_dark(&self) -> bool;
}

/// Fixed answers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StaticMediaQueries {
    pub reduced_motion: bool,
    pub dark: bool,
}

impl MediaQueries for StaticMediaQueries {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

/// Media queries answered from client hint request headers.
///
/// Browsers only send these after the server advertises them with
/// `Accept-CH`; absent hints read as "no preference".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClientHints {
    reduced_motion: bool,
    dark: bool,
}

impl ClientHints {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            reduced_motion: hint(headers, REDUCED_MOTION_HINT) == Some("reduce"),
            dark: hint(headers, COLOR_SCHEME_HINT) == Some("dark"),
        }
    }

    /// Value for the `Accept-CH` response header.
    pub fn accept_ch() -> &'static str {
        "Sec-CH-Prefers-Reduced-Motion, Sec-CH-Prefers-Color-Scheme"
    }
}

impl MediaQueries for ClientHints {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

fn hint<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().trim_matches('"'))
}
