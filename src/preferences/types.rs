//! Preference value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored or submitted value did not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} preference {value:?}")]
pub struct ParsePreferenceError {
    kind: &'static str,
    value: String,
}

macro_rules! preference_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParsePreferenceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParsePreferenceError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

preference_enum! {
    /// How much animation the site may play.
    MotionPreference, "motion" {
        Full => "full",
        Reduced => "reduced",
        Off => "off",
    }
}

preference_enum! {
    /// Base text size.
    TextSizePreference, "text size" {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
}

preference_enum! {
    /// Colour theme as chosen by the user.
    ThemePreference, "theme" {
        Light => "light",
        Dark => "dark",
        HighContrast => "high-contrast",
        System => "system",
    }
}

impl ThemePreference {
    /// Next theme for the toggle control. High contrast rejoins the cycle at light.
    pub fn next(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
            ThemePreference::System | ThemePreference::HighContrast => ThemePreference::Light,
        }
    }

    /// Human label for the theme control.
    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::HighContrast => "High Contrast",
            ThemePreference::System => "System",
        }
    }
}

impl MotionPreference {
    pub fn label(self) -> &'static str {
        match self {
            MotionPreference::Full => "Full",
            MotionPreference::Reduced => "Reduced",
            MotionPreference::Off => "Off",
        }
    }
}

impl TextSizePreference {
    pub fn label(self) -> &'static str {
        match self {
            TextSizePreference::Sm => "S",
            TextSizePreference::Md => "M",
            TextSizePreference::Lg => "L",
        }
    }
}
