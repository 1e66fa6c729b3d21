//! URL-safe token encoding for [`WidgetConfig`].
//!
//! A token is the configuration's compact JSON form, percent-encoded with the
//! same reserved set as JavaScript's `encodeURIComponent`, so tokens minted
//! here and tokens minted by a browser decode identically.
//!
//! Decoding is deliberately forgiving: a malformed token yields the default
//! configuration, and a well-formed object contributes only the fields whose
//! values have the expected type. Field values are never interpreted beyond
//! their type; `customCSS` and the title strings stay opaque text.

use parlor_types::{SizePreset, WidgetConfig};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CodecError;

/// Bytes left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub config: WidgetConfig,
    /// Wire names of known fields that were present but ill-typed or out of range.
    pub rejected: Vec<&'static str>,
}

/// Percent-encodes an arbitrary string as a URI component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Serializes the full configuration into a URL-safe token.
///
/// Pure: no defaults are applied and field order is fixed by the struct
/// definition, so equal inputs always produce equal tokens.
pub fn encode(config: &WidgetConfig) -> String {
    match serde_json::to_string(config) {
        Ok(json) => encode_component(&json),
        Err(e) => {
            // Only reachable if a field type gains a fallible Serialize impl.
            tracing::error!("failed to serialize widget config: {}", e);
            String::new()
        }
    }
}

/// Decodes a token, reporting why it could not be decoded.
///
/// # Errors
///
/// Returns [`CodecError`] when the token is not percent-encoded UTF-8, not
/// JSON, or not a JSON object.
pub fn try_decode(token: &str) -> Result<Decoded, CodecError> {
    let json = percent_decode_str(token).decode_utf8()?;
    let value: Value = serde_json::from_str(&json)?;
    from_value(&value)
}

/// Decodes a token, falling back to the default configuration on any failure.
///
/// Failures and rejected fields are logged as warnings; this function never
/// fails and always returns a fully populated configuration.
pub fn decode(token: &str) -> WidgetConfig {
    match try_decode(token) {
        Ok(decoded) => {
            if !decoded.rejected.is_empty() {
                tracing::warn!(
                    fields = ?decoded.rejected,
                    "ignored widget config fields with unexpected values"
                );
            }
            decoded.config
        }
        Err(e) => {
            tracing::warn!("failed to parse widget config, using defaults: {}", e);
            WidgetConfig::default()
        }
    }
}

/// Merges an already-parsed JSON value over the defaults.
///
/// # Errors
///
/// Returns [`CodecError::NotAnObject`] when `value` is not a JSON object.
pub fn from_value(value: &Value) -> Result<Decoded, CodecError> {
    let object = value
        .as_object()
        .ok_or_else(|| CodecError::NotAnObject(json_kind(value)))?;
    Ok(merge(object))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Field-by-field reader that records rejected values.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    rejected: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            rejected: Vec::new(),
        }
    }

    fn read<T: DeserializeOwned>(&mut self, name: &'static str) -> Option<T> {
        self.read_if(name, |_: &T| true)
    }

    fn read_if<T: DeserializeOwned>(
        &mut self,
        name: &'static str,
        accept: impl Fn(&T) -> bool,
    ) -> Option<T> {
        let raw = self.object.get(name)?;
        match serde_json::from_value::<T>(raw.clone()) {
            Ok(value) if accept(&value) => Some(value),
            _ => {
                self.rejected.push(name);
                None
            }
        }
    }
}

fn merge(object: &Map<String, Value>) -> Decoded {
    let mut config = WidgetConfig::default();
    let mut fields = FieldReader::new(object);

    if let Some(theme) = fields.read("theme") {
        config.theme = theme;
    }
    if let Some(color) = fields.read("primaryColor") {
        config.primary_color = color;
    }
    if let Some(color) = fields.read("backgroundColor") {
        config.background_color = color;
    }
    if let Some(color) = fields.read("textColor") {
        config.text_color = color;
    }
    if let Some(radius) = fields.read("borderRadius") {
        config.border_radius = radius;
    }
    if let Some(position) = fields.read("position") {
        config.position = position;
    }

    // Explicit dimensions beat the preset; a bare preset supplies both.
    let size: Option<SizePreset> = fields.read("size");
    let width: Option<u32> = fields.read_if("width", |w: &u32| *w > 0);
    let height: Option<u32> = fields.read_if("height", |h: &u32| *h > 0);
    if let Some(size) = size {
        config.size = size;
        if width.is_none() && height.is_none() {
            (config.width, config.height) = size.dimensions();
        }
    }
    if let Some(width) = width {
        config.width = width;
    }
    if let Some(height) = height {
        config.height = height;
    }

    if let Some(flag) = fields.read("autoOpen") {
        config.auto_open = flag;
    }
    if let Some(flag) = fields.read("showMinimized") {
        config.show_minimized = flag;
    }
    if let Some(flag) = fields.read("enableDragging") {
        config.enable_dragging = flag;
    }
    if let Some(flag) = fields.read("showHeader") {
        config.show_header = flag;
    }
    if let Some(flag) = fields.read("showBranding") {
        config.show_branding = flag;
    }
    if let Some(title) = fields.read("customTitle") {
        config.custom_title = title;
    }
    if let Some(subtitle) = fields.read("customSubtitle") {
        config.custom_subtitle = subtitle;
    }
    if let Some(css) = fields.read("customCSS") {
        config.custom_css = css;
    }
    if let Some(z_index) = fields.read("zIndex") {
        config.z_index = z_index;
    }

    Decoded {
        config,
        rejected: fields.rejected,
    }
}
