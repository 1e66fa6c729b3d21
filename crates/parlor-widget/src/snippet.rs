//! Generation of the host-page embed snippet.
//!
//! The snippet is a container element plus a script that mounts an iframe
//! pointed at the embed endpoint. The host page has to size and anchor the
//! iframe before the embed document can run, so the snippet carries the
//! initial [`Placement`](crate::layout::Placement) as literal CSS computed by
//! [`layout::place`] from the same initial-state rule the runtime uses.

use parlor_types::WidgetConfig;
use url::Url;

use crate::codec;
use crate::error::SnippetError;
use crate::layout::{self, PlacementMode};
use crate::runtime::{initial_open_state, EmbedRequest};

/// Path of the embed endpoint relative to the deploying base URL.
pub const EMBED_PATH: &str = "/embed";

/// Id of the element the snippet mounts into.
pub const CONTAINER_ID: &str = "parlor-widget-container";

/// File name offered when the snippet is downloaded.
pub const DOWNLOAD_FILENAME: &str = "parlor-widget-embed.html";

/// Permissions the embedded voice session needs from the host page.
const IFRAME_ALLOW: &str = "microphone; autoplay";

/// Produces embed snippets for one deploying base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedScriptGenerator {
    base_url: String,
}

impl EmbedScriptGenerator {
    /// # Errors
    ///
    /// Returns [`SnippetError`] if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, SnippetError> {
        let mut url = Url::parse(base_url).map_err(|source| SnippetError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SnippetError::UnsupportedScheme(base_url.to_string()));
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// The normalized base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Address of the embed endpoint for `config`.
    pub fn embed_src(&self, config: &WidgetConfig) -> String {
        format!(
            "{}{EMBED_PATH}?{}={}",
            self.base_url,
            EmbedRequest::CONFIG_PARAM,
            codec::encode(config)
        )
    }

    /// Renders the snippet. Identical inputs produce byte-identical output.
    pub fn generate(&self, config: &WidgetConfig) -> String {
        let placement = layout::place(config, initial_open_state(config));
        let mut declarations = vec![
            "border: none".to_string(),
            "transition: all 0.3s ease".to_string(),
        ];
        declarations.extend(
            placement
                .declarations(PlacementMode::Overlay)
                .into_iter()
                .map(|(property, value)| format!("{property}: {value}")),
        );
        let style_lines = declarations
            .iter()
            .map(|d| format!("      '{d}'"))
            .collect::<Vec<_>>()
            .join(",\n");

        format!(
            r#"<!-- Parlor Voice Assistant Widget -->
<div id="{CONTAINER_ID}"></div>
<script>
  (function() {{
    var iframe = document.createElement('iframe');
    iframe.src = {src};
    iframe.title = 'Voice assistant';
    iframe.setAttribute('allow', '{IFRAME_ALLOW}');
    iframe.style.cssText = [
{style_lines}
    ].join('; ');
    var container = document.getElementById('{CONTAINER_ID}') || document.body;
    container.appendChild(iframe);
  }})();
</script>
"#,
            src = js_string(&self.embed_src(config)),
        )
    }
}

/// Quotes `value` as a JavaScript string literal that is also safe inside a
/// `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('<', "\\u003c")
}
