//! Shared types, constants, and defaults for the Parlor widget platform.
//!
//! This crate owns the canonical shape of a widget configuration
//! ([`WidgetConfig`]) and the host application settings that feed it
//! ([`EmbedAppConfig`]). Every other crate in the workspace reads these
//! definitions; none of them redefine a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod app;
mod widget;

pub use app::EmbedAppConfig;
pub use widget::WidgetConfig;

/// Edge length of the minimized launcher button, in pixels.
pub const LAUNCHER_SIZE_PX: u32 = 64;

/// Distance between the widget and both edges of its anchor corner, in pixels.
pub const EDGE_OFFSET_PX: u32 = 20;

/// Named primary-color presets offered by the builder.
pub const COLOR_PRESETS: &[(&str, &str)] = &[
    ("Parlor Blue", "#002cf2"),
    ("Ocean", "#0ea5e9"),
    ("Emerald", "#10b981"),
    ("Purple", "#8b5cf6"),
    ("Rose", "#f43f5e"),
    ("Orange", "#f97316"),
];

/// Inclusive `(min, max, step)` ranges the builder exposes for numeric fields.
pub mod ranges {
    pub const BORDER_RADIUS: (u32, u32, u32) = (0, 32, 2);
    pub const WIDTH: (u32, u32, u32) = (280, 800, 20);
    pub const HEIGHT: (u32, u32, u32) = (400, 800, 20);
    pub const Z_INDEX: (i32, i32, i32) = (1, 9999, 100);
}

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseVariantError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseVariantError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Requested color theme of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Defer to the viewer's preferred color scheme.
    Auto,
}

impl ThemeMode {
    /// Every mode, in builder display order.
    pub const ALL: [ThemeMode; 3] = [Self::Light, Self::Dark, Self::Auto];

    /// Returns the wire label for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            _ => Err(ParseVariantError::new("theme mode", s)),
        }
    }
}

/// Screen corner the widget is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl WidgetPosition {
    /// Every corner, in builder display order.
    pub const ALL: [WidgetPosition; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Returns the wire label for this corner.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "Top Left",
            Self::TopRight => "Top Right",
            Self::BottomLeft => "Bottom Left",
            Self::BottomRight => "Bottom Right",
        }
    }

    /// The vertical CSS edge this corner binds to (`top` or `bottom`).
    pub fn vertical_edge(self) -> &'static str {
        match self {
            Self::TopLeft | Self::TopRight => "top",
            Self::BottomLeft | Self::BottomRight => "bottom",
        }
    }

    /// The horizontal CSS edge this corner binds to (`left` or `right`).
    pub fn horizontal_edge(self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomLeft => "left",
            Self::TopRight | Self::BottomRight => "right",
        }
    }
}

impl std::fmt::Display for WidgetPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WidgetPosition {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            _ => Err(ParseVariantError::new("widget position", s)),
        }
    }
}

/// Convenience size preset.
///
/// `width` and `height` on [`WidgetConfig`] are authoritative; the preset only
/// supplies them when a configuration names a preset without dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizePreset {
    /// Every preset, smallest first.
    pub const ALL: [SizePreset; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Returns the wire label for this preset.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Expanded `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Small => (320, 480),
            Self::Medium => (400, 600),
            Self::Large => (500, 700),
        }
    }
}

impl std::fmt::Display for SizePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SizePreset {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(ParseVariantError::new("size preset", s)),
        }
    }
}
