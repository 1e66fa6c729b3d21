//! Builder-side live preview synchronization.
//!
//! The preview iframe is never patched in place. Every configuration change
//! produces a fresh embed address with `preview=true`, and assigning it to
//! the iframe reloads the embed runtime from scratch. A newer navigation
//! supersedes an in-flight one simply by replacing the address.

use parlor_types::WidgetConfig;

use crate::codec;
use crate::runtime::EmbedRequest;
use crate::snippet::EMBED_PATH;

/// Embed address for a preview of `config`, relative to the builder origin.
pub fn preview_src(config: &WidgetConfig) -> String {
    format!(
        "{EMBED_PATH}?{}={}&{}=true",
        EmbedRequest::CONFIG_PARAM,
        codec::encode(config),
        EmbedRequest::PREVIEW_PARAM
    )
}

/// A navigation the host must apply to the preview iframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub src: String,
    /// Identifies this navigation when its load completes.
    pub generation: u64,
}

/// Tracks the preview iframe's address and loading indicator.
#[derive(Debug, Clone, Default)]
pub struct PreviewBridge {
    current: Option<WidgetConfig>,
    generation: u64,
    loading: bool,
}

impl PreviewBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a configuration change.
    ///
    /// Returns the navigation to perform, or `None` when the configuration is
    /// unchanged and the current preview already reflects it.
    pub fn update(&mut self, config: &WidgetConfig) -> Option<Navigation> {
        if self.current.as_ref() == Some(config) {
            return None;
        }
        self.current = Some(config.clone());
        self.generation += 1;
        self.loading = true;
        Some(Navigation {
            src: preview_src(config),
            generation: self.generation,
        })
    }

    /// Handles the iframe's load-completion signal.
    ///
    /// Only the latest navigation clears the loading indicator; returns
    /// whether it did.
    pub fn on_load(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.loading {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Address of the latest navigation, if any.
    pub fn src(&self) -> Option<String> {
        self.current.as_ref().map(preview_src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_types::ThemeMode;

    #[test]
    fn preview_src_enables_preview_mode() {
        let src = preview_src(&WidgetConfig::default());
        assert!(src.starts_with("/embed?config=%7B"));
        assert!(src.ends_with("&preview=true"));

        let request = EmbedRequest::from_query(src.split_once('?').map(|(_, q)| q));
        assert!(request.preview);
        assert_eq!(
            codec::decode(request.config_token.as_deref().unwrap()),
            WidgetConfig::default()
        );
    }

    #[test]
    fn every_change_navigates_and_shows_loading() {
        let mut bridge = PreviewBridge::new();
        assert!(!bridge.is_loading());

        let first = bridge.update(&WidgetConfig::default()).unwrap();
        assert!(bridge.is_loading());
        assert!(bridge.on_load(first.generation));
        assert!(!bridge.is_loading());

        let dark = WidgetConfig {
            theme: ThemeMode::Dark,
            ..WidgetConfig::default()
        };
        let second = bridge.update(&dark).unwrap();
        assert_ne!(first.src, second.src);
        assert_eq!(bridge.src(), Some(second.src.clone()));
        assert!(bridge.is_loading());
    }

    #[test]
    fn unchanged_config_does_not_reload() {
        let mut bridge = PreviewBridge::new();
        bridge.update(&WidgetConfig::default()).unwrap();
        assert_eq!(bridge.update(&WidgetConfig::default()), None);
    }

    #[test]
    fn superseded_load_does_not_clear_indicator() {
        let mut bridge = PreviewBridge::new();
        let stale = bridge.update(&WidgetConfig::default()).unwrap();
        let latest = bridge
            .update(&WidgetConfig {
                width: 500,
                ..WidgetConfig::default()
            })
            .unwrap();
        assert!(!bridge.on_load(stale.generation));
        assert!(bridge.is_loading());
        assert!(bridge.on_load(latest.generation));
        assert!(!bridge.on_load(latest.generation));
    }
}
