//! Host application settings consumed by the widget.

use serde::{Deserialize, Serialize};

/// Per-deployment application settings.
///
/// Read-only from the widget's point of view: the page title and description
/// are fallbacks for an empty `customTitle`/`customSubtitle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedAppConfig {
    pub page_title: String,
    pub page_description: String,
    /// Label of the button that starts a voice session.
    pub start_button_text: String,
}

impl Default for EmbedAppConfig {
    fn default() -> Self {
        Self {
            page_title: "Voice Assistant".to_string(),
            page_description: "A voice AI assistant".to_string(),
            start_button_text: "Start call".to_string(),
        }
    }
}
