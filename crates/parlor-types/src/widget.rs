//! The widget configuration value object.

use serde::{Deserialize, Serialize};

use crate::{EmbedAppConfig, SizePreset, ThemeMode, WidgetPosition};

/// Complete configuration of an embeddable widget.
///
/// Every field has a total default, so a configuration is always fully
/// populated. Values are treated as immutable once decoded; edits go through
/// the `with_*` helpers or struct update syntax and produce a new value.
///
/// `custom_css` is trusted operator input: it is authored by whoever builds
/// the snippet and is injected verbatim into the embed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    // Appearance
    pub theme: ThemeMode,
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
    /// Expanded-panel corner radius in pixels.
    pub border_radius: u32,

    // Layout
    pub position: WidgetPosition,
    pub size: SizePreset,
    /// Expanded width in pixels. Always positive.
    pub width: u32,
    /// Expanded height in pixels. Always positive.
    pub height: u32,

    // Behavior
    pub auto_open: bool,
    pub show_minimized: bool,
    pub enable_dragging: bool,

    // Features
    pub show_header: bool,
    pub show_branding: bool,
    /// Empty means "use the host application's page title".
    pub custom_title: String,
    /// Empty means "use the host application's page description".
    pub custom_subtitle: String,

    // Advanced
    #[serde(rename = "customCSS")]
    pub custom_css: String,
    pub z_index: i32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let (width, height) = SizePreset::Medium.dimensions();
        Self {
            theme: ThemeMode::Light,
            primary_color: "#002cf2".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            border_radius: 16,
            position: WidgetPosition::BottomRight,
            size: SizePreset::Medium,
            width,
            height,
            auto_open: false,
            show_minimized: true,
            enable_dragging: false,
            show_header: true,
            show_branding: true,
            custom_title: String::new(),
            custom_subtitle: String::new(),
            custom_css: String::new(),
            z_index: 1000,
        }
    }
}

impl WidgetConfig {
    /// Wire names of every field, in declaration order.
    pub const FIELD_NAMES: [&'static str; 18] = [
        "theme",
        "primaryColor",
        "backgroundColor",
        "textColor",
        "borderRadius",
        "position",
        "size",
        "width",
        "height",
        "autoOpen",
        "showMinimized",
        "enableDragging",
        "showHeader",
        "showBranding",
        "customTitle",
        "customSubtitle",
        "customCSS",
        "zIndex",
    ];

    /// Selects a size preset and copies its dimensions into `width`/`height`.
    pub fn with_size_preset(mut self, preset: SizePreset) -> Self {
        let (width, height) = preset.dimensions();
        self.size = preset;
        self.width = width;
        self.height = height;
        self
    }

    /// Title shown in the header and launcher tooltip.
    pub fn display_title<'a>(&'a self, app: &'a EmbedAppConfig) -> &'a str {
        if self.custom_title.is_empty() {
            &app.page_title
        } else {
            &self.custom_title
        }
    }

    /// Subtitle shown under the title, if either source provides one.
    pub fn display_subtitle<'a>(&'a self, app: &'a EmbedAppConfig) -> Option<&'a str> {
        let subtitle = if self.custom_subtitle.is_empty() {
            app.page_description.as_str()
        } else {
            self.custom_subtitle.as_str()
        };
        (!subtitle.is_empty()).then_some(subtitle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = WidgetConfig::default();
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.primary_color, "#002cf2");
        assert_eq!(config.border_radius, 16);
        assert_eq!(config.position, WidgetPosition::BottomRight);
        assert_eq!((config.width, config.height), (400, 600));
        assert!(!config.auto_open);
        assert!(config.show_minimized);
        assert!(config.show_header);
        assert!(config.show_branding);
        assert!(config.custom_css.is_empty());
        assert_eq!(config.z_index, 1000);
    }

    #[test]
    fn serializes_every_field_under_its_wire_name() {
        let value = serde_json::to_value(WidgetConfig::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), WidgetConfig::FIELD_NAMES.len());
        for name in WidgetConfig::FIELD_NAMES {
            assert!(object.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn size_preset_overwrites_dimensions() {
        let config = WidgetConfig {
            width: 720,
            height: 420,
            ..WidgetConfig::default()
        }
        .with_size_preset(SizePreset::Small);
        assert_eq!(config.size, SizePreset::Small);
        assert_eq!((config.width, config.height), (320, 480));
    }

    #[test]
    fn title_falls_back_to_app_config() {
        let app = EmbedAppConfig {
            page_title: "Acme Assistant".into(),
            page_description: "Talk to us".into(),
            ..EmbedAppConfig::default()
        };
        let config = WidgetConfig::default();
        assert_eq!(config.display_title(&app), "Acme Assistant");
        assert_eq!(config.display_subtitle(&app), Some("Talk to us"));

        let custom = WidgetConfig {
            custom_title: "Support".into(),
            custom_subtitle: "We reply fast".into(),
            ..WidgetConfig::default()
        };
        assert_eq!(custom.display_title(&app), "Support");
        assert_eq!(custom.display_subtitle(&app), Some("We reply fast"));
    }

    #[test]
    fn subtitle_absent_when_both_sources_empty() {
        let app = EmbedAppConfig {
            page_description: String::new(),
            ..EmbedAppConfig::default()
        };
        assert_eq!(WidgetConfig::default().display_subtitle(&app), None);
    }
}
