//! Theme selection.
//!
//! Separate from the motion/text store: it owns its own storage key and root
//! attribute. Other consumers only read it.

use std::sync::Arc;

use super::hooks::StyleHooks;
use super::media::MediaQueries;
use super::storage::PreferenceStorage;
use super::types::ThemePreference;
use super::{THEME_ATTRIBUTE, THEME_KEY};
use crate::observability::metrics;

pub struct ThemeController {
    storage: Arc<dyn PreferenceStorage>,
    hooks: Arc<dyn StyleHooks>,
    prefers_dark: bool,
    theme: ThemePreference,
}

impl ThemeController {
    pub fn new(
        storage: Arc<dyn PreferenceStorage>,
        media: &dyn MediaQueries,
        hooks: Arc<dyn StyleHooks>,
        default_theme: ThemePreference,
    ) -> Self {
        let theme = storage
            .get(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_theme);

        let controller = Self {
            storage,
            hooks,
            prefers_dark: media.prefers_dark(),
            theme,
        };
        controller.reflect();
        controller
    }

    /// The theme as chosen, possibly `system`.
    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// The theme actually applied; `system` follows the OS colour scheme.
    pub fn resolved_theme(&self) -> ThemePreference {
        match self.theme {
            ThemePreference::System if self.prefers_dark => ThemePreference::Dark,
            ThemePreference::System => ThemePreference::Light,
            other => other,
        }
    }

    pub fn set_theme(&mut self, theme: ThemePreference) {
        if self.theme != theme {
            metrics::record_preference_update("theme");
        }
        self.theme = theme;
        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            tracing::debug!(error = %e, "Theme not persisted");
        }
        self.reflect();
    }

    /// Advance to the next theme in the toggle cycle.
    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.theme.next();
        self.set_theme(next);
        next
    }

    fn reflect(&self) {
        self.hooks
            .set_attribute(THEME_ATTRIBUTE, self.resolved_theme().as_str());
    }
}
