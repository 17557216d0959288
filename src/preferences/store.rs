//! The motion / text-size preference store.

use std::sync::Arc;

use tokio::sync::watch;

use super::hooks::StyleHooks;
use super::media::MediaQueries;
use super::storage::PreferenceStorage;
use super::types::{MotionPreference, TextSizePreference};
use super::{MOTION_ATTRIBUTE, MOTION_KEY, TEXT_SIZE_ATTRIBUTE, TEXT_SIZE_KEY};
use crate::observability::metrics;

/// The value shared with subscribed consumers.
///
/// A new `Arc` is published only when one of the fields changes, so
/// consumers can compare pointers to skip work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceContext {
    pub motion: MotionPreference,
    pub text_size: TextSizePreference,
}

/// Holds the current preferences and keeps storage and style hooks in step.
pub struct PreferenceStore {
    storage: Arc<dyn PreferenceStorage>,
    hooks: Arc<dyn StyleHooks>,
    context: watch::Sender<Arc<PreferenceContext>>,
}

impl PreferenceStore {
    /// Hydrate from storage, falling back to the OS motion signal and the
    /// given text size. Initial values are reflected to the style hooks.
    pub fn new(
        storage: Arc<dyn PreferenceStorage>,
        media: &dyn MediaQueries,
        hooks: Arc<dyn StyleHooks>,
        default_text_size: TextSizePreference,
    ) -> Self {
        let motion = storage
            .get(MOTION_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or(if media.prefers_reduced_motion() {
                MotionPreference::Reduced
            } else {
                MotionPreference::Full
            });
        let text_size = storage
            .get(TEXT_SIZE_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_text_size);

        hooks.set_attribute(MOTION_ATTRIBUTE, motion.as_str());
        hooks.set_attribute(TEXT_SIZE_ATTRIBUTE, text_size.as_str());

        let (context, _) = watch::channel(Arc::new(PreferenceContext { motion, text_size }));
        Self {
            storage,
            hooks,
            context,
        }
    }

    pub fn motion(&self) -> MotionPreference {
        self.context.borrow().motion
    }

    pub fn text_size(&self) -> TextSizePreference {
        self.context.borrow().text_size
    }

    /// Current shared value.
    pub fn context(&self) -> Arc<PreferenceContext> {
        self.context.borrow().clone()
    }

    /// Receiver that wakes only when a preference actually changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PreferenceContext>> {
        self.context.subscribe()
    }

    pub fn set_motion(&self, motion: MotionPreference) {
        let changed = self.context.send_if_modified(|ctx| {
            if ctx.motion == motion {
                return false;
            }
            *ctx = Arc::new(PreferenceContext { motion, ..**ctx });
            true
        });
        if changed {
            metrics::record_preference_update("motion");
        }
        self.persist(MOTION_KEY, motion.as_str());
        self.hooks.set_attribute(MOTION_ATTRIBUTE, motion.as_str());
    }

    pub fn set_text_size(&self, text_size: TextSizePreference) {
        let changed = self.context.send_if_modified(|ctx| {
            if ctx.text_size == text_size {
                return false;
            }
            *ctx = Arc::new(PreferenceContext { text_size, ..**ctx });
            true
        });
        if changed {
            metrics::record_preference_update("text_size");
        }
        self.persist(TEXT_SIZE_KEY, text_size.as_str());
        self.hooks.set_attribute(TEXT_SIZE_ATTRIBUTE, text_size.as_str());
    }

    // Best effort: a lost write only changes next session's defaults.
    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::debug!(key, error = %e, "Preference not persisted");
        }
    }
}
