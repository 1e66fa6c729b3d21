//! Lifecycle state machine of the embedded widget.
//!
//! One [`WidgetRuntime`] lives for one embed document. It starts in
//! [`LoadPhase::Loading`], derives its initial [`OpenState`] exactly once on
//! [`WidgetRuntime::mount`], and afterwards only moves between `Minimized`
//! and `Expanded` through [`WidgetRuntime::toggle`]. Nothing survives a
//! reload: every new document re-derives its state from configuration.

use parlor_types::{EmbedAppConfig, WidgetConfig};

use crate::codec;
use crate::document::{self, DocumentView};
use crate::error::RuntimeError;
use crate::layout::{self, Placement, PlacementMode};
use crate::theme::{ColorScheme, EnvironmentProbe, ThemeSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenState {
    /// Collapsed to the circular launcher.
    Minimized,
    Expanded,
}

impl OpenState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimized => "minimized",
            Self::Expanded => "expanded",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Minimized => Self::Expanded,
            Self::Expanded => Self::Minimized,
        }
    }
}

/// Initial open state on entering `Ready`.
///
/// `autoOpen` only forces `Expanded` when `showMinimized` is off; otherwise
/// `showMinimized` decides directly.
pub fn initial_open_state(config: &WidgetConfig) -> OpenState {
    if config.auto_open && !config.show_minimized {
        OpenState::Expanded
    } else if config.show_minimized {
        OpenState::Minimized
    } else {
        OpenState::Expanded
    }
}

/// Parameters of an embed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedRequest {
    /// Still percent-encoded configuration token, if present and non-empty.
    pub config_token: Option<String>,
    /// Inline rendering for the builder preview.
    pub preview: bool,
}

impl EmbedRequest {
    pub const CONFIG_PARAM: &'static str = "config";
    pub const PREVIEW_PARAM: &'static str = "preview";

    /// Reads the parameters from a raw, undecoded query string.
    ///
    /// The `config` value is kept encoded so that the codec performs the one
    /// and only percent-decode. `preview` is on only for the exact value
    /// `true`. The first occurrence of each parameter wins.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut config_token = None;
        let mut preview = None;
        for pair in raw.unwrap_or_default().split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                Self::CONFIG_PARAM if config_token.is_none() => {
                    config_token = Some(value.to_string());
                }
                Self::PREVIEW_PARAM if preview.is_none() => {
                    preview = Some(value == "true");
                }
                _ => {}
            }
        }
        Self {
            config_token: config_token.filter(|token| !token.is_empty()),
            preview: preview.unwrap_or(false),
        }
    }
}

/// The embedded widget for the lifetime of one document.
#[derive(Debug, Clone)]
pub struct WidgetRuntime {
    config: WidgetConfig,
    preview: bool,
    phase: LoadPhase,
    open: OpenState,
    theme: Option<ThemeSession>,
}

impl WidgetRuntime {
    /// Starts loading from a request. An absent or malformed token yields the
    /// default configuration; loading never fails.
    pub fn load(request: &EmbedRequest) -> Self {
        let config = request
            .config_token
            .as_deref()
            .map(codec::decode)
            .unwrap_or_default();
        Self::with_config(config, request.preview)
    }

    pub fn with_config(config: WidgetConfig, preview: bool) -> Self {
        let open = initial_open_state(&config);
        Self {
            config,
            preview,
            phase: LoadPhase::Loading,
            open,
            theme: None,
        }
    }

    /// Enters `Ready`, resolving the theme and the initial open state.
    ///
    /// Calling it again is a no-op that returns the current state.
    pub fn mount(&mut self, probe: &dyn EnvironmentProbe) -> OpenState {
        if self.phase == LoadPhase::Ready {
            return self.open;
        }
        let theme = ThemeSession::start(self.config.theme, probe);
        self.open = initial_open_state(&self.config);
        tracing::debug!(
            open = self.open.as_str(),
            scheme = theme.scheme().as_str(),
            preview = self.preview,
            "widget runtime ready"
        );
        self.theme = Some(theme);
        self.phase = LoadPhase::Ready;
        self.open
    }

    /// Flips between `Minimized` and `Expanded`, one step per call.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::NotReady`] while still loading.
    pub fn toggle(&mut self) -> Result<OpenState, RuntimeError> {
        if self.phase != LoadPhase::Ready {
            return Err(RuntimeError::NotReady);
        }
        self.open = self.open.toggled();
        Ok(self.open)
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Current open state, once ready.
    pub fn open_state(&self) -> Option<OpenState> {
        (self.phase == LoadPhase::Ready).then_some(self.open)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn theme(&self) -> Option<&ThemeSession> {
        self.theme.as_ref()
    }

    /// Forwards a late probe reading to the theme session.
    pub fn refresh_theme(&mut self, probe: &dyn EnvironmentProbe) -> Option<ColorScheme> {
        self.theme.as_mut()?.refresh(probe)
    }

    pub fn placement_mode(&self) -> PlacementMode {
        if self.preview {
            PlacementMode::Inline
        } else {
            PlacementMode::Overlay
        }
    }

    /// Placement for the current state, once ready.
    pub fn placement(&self) -> Option<Placement> {
        self.open_state()
            .map(|open| layout::place(&self.config, open))
    }

    /// Renders the embed document for the current state.
    ///
    /// Every render carries the operator stylesheet as a single
    /// `<style data-parlor-custom>` element, so re-rendering after a toggle or
    /// theme refresh replaces the document without dropping or duplicating it.
    /// A runtime that is still loading renders the spinner document.
    pub fn render(&self, app: &EmbedAppConfig) -> String {
        let (Some(open), Some(theme)) = (self.open_state(), self.theme.as_ref()) else {
            return document::render_loading();
        };
        document::render(&DocumentView {
            config: &self.config,
            app,
            open,
            scheme: theme.scheme(),
            deferred_theme: theme.awaiting_probe(),
            mode: self.placement_mode(),
            custom_css: &self.config.custom_css,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ProbeReading;
    use parlor_types::{ThemeMode, WidgetPosition, LAUNCHER_SIZE_PX};

    fn config(auto_open: bool, show_minimized: bool) -> WidgetConfig {
        WidgetConfig {
            auto_open,
            show_minimized,
            ..WidgetConfig::default()
        }
    }

    #[test]
    fn initial_state_table() {
        assert_eq!(initial_open_state(&config(true, false)), OpenState::Expanded);
        assert_eq!(initial_open_state(&config(true, true)), OpenState::Minimized);
        assert_eq!(initial_open_state(&config(false, true)), OpenState::Minimized);
        assert_eq!(initial_open_state(&config(false, false)), OpenState::Expanded);
    }

    #[test]
    fn toggle_flips_one_step() {
        let mut runtime = WidgetRuntime::with_config(config(false, true), false);
        runtime.mount(&ProbeReading::Unavailable);
        assert_eq!(runtime.toggle(), Ok(OpenState::Expanded));
        assert_eq!(runtime.toggle(), Ok(OpenState::Minimized));
        assert_eq!(runtime.open_state(), Some(OpenState::Minimized));
    }

    #[test]
    fn toggle_requires_ready() {
        let mut runtime = WidgetRuntime::with_config(WidgetConfig::default(), false);
        assert_eq!(runtime.phase(), LoadPhase::Loading);
        assert_eq!(runtime.toggle(), Err(RuntimeError::NotReady));
        assert_eq!(runtime.open_state(), None);
        assert!(runtime.placement().is_none());
    }

    #[test]
    fn mount_is_computed_once() {
        let mut runtime = WidgetRuntime::with_config(config(false, true), false);
        assert_eq!(runtime.mount(&ProbeReading::Unavailable), OpenState::Minimized);
        runtime.toggle().unwrap();
        assert_eq!(runtime.mount(&ProbeReading::Unavailable), OpenState::Expanded);
    }

    #[test]
    fn query_parsing() {
        let request = EmbedRequest::from_query(Some("config=%7B%7D&preview=true"));
        assert_eq!(request.config_token.as_deref(), Some("%7B%7D"));
        assert!(request.preview);

        let request = EmbedRequest::from_query(Some("preview=TRUE&preview=true"));
        assert!(!request.preview);
        assert_eq!(request.config_token, None);

        let request = EmbedRequest::from_query(Some("config=&preview"));
        assert_eq!(request, EmbedRequest::default());

        assert_eq!(EmbedRequest::from_query(None), EmbedRequest::default());
    }

    #[test]
    fn missing_config_loads_default_launcher() {
        let mut runtime = WidgetRuntime::load(&EmbedRequest::from_query(None));
        assert_eq!(runtime.config(), &WidgetConfig::default());
        assert_eq!(runtime.mount(&ProbeReading::Unavailable), OpenState::Minimized);
        let placement = runtime.placement().unwrap();
        assert_eq!(placement.width, LAUNCHER_SIZE_PX);
        assert_eq!(runtime.placement_mode(), PlacementMode::Overlay);
    }

    #[test]
    fn malformed_config_loads_defaults() {
        let runtime = WidgetRuntime::load(&EmbedRequest::from_query(Some("config=%7Bbroken")));
        assert_eq!(runtime.config(), &WidgetConfig::default());
    }

    #[test]
    fn top_left_minimized_scenario() {
        let token = codec::encode(&WidgetConfig {
            position: WidgetPosition::TopLeft,
            show_minimized: true,
            width: 777,
            height: 555,
            ..WidgetConfig::default()
        });
        let request = EmbedRequest::from_query(Some(&format!("config={token}")));
        let mut runtime = WidgetRuntime::load(&request);
        runtime.mount(&ProbeReading::Unavailable);
        let placement = runtime.placement().unwrap();
        assert_eq!(placement.anchor, WidgetPosition::TopLeft);
        assert_eq!(placement.edges()[0].0, "top");
        assert_eq!(placement.edges()[1].0, "left");
        assert_eq!((placement.width, placement.height), (LAUNCHER_SIZE_PX, LAUNCHER_SIZE_PX));
    }

    #[test]
    fn css_survives_rerender_after_toggle() {
        let mut runtime = WidgetRuntime::with_config(
            WidgetConfig {
                custom_css: ".accent{color:red}".into(),
                ..WidgetConfig::default()
            },
            false,
        );
        let app = EmbedAppConfig::default();
        runtime.mount(&ProbeReading::Unavailable);
        let first = runtime.render(&app);
        runtime.toggle().unwrap();
        let second = runtime.render(&app);

        let style = "<style data-parlor-custom>.accent{color:red}</style>";
        assert!(first.contains(style));
        assert!(second.contains(style));
        assert_eq!(second.matches("data-parlor-custom").count(), 1);
    }

    #[test]
    fn refresh_theme_settles_auto_once() {
        let mut runtime = WidgetRuntime::with_config(
            WidgetConfig {
                theme: ThemeMode::Auto,
                ..WidgetConfig::default()
            },
            false,
        );
        assert_eq!(runtime.refresh_theme(&ProbeReading::Prefers(ColorScheme::Dark)), None);

        runtime.mount(&ProbeReading::Unavailable);
        assert!(runtime.theme().unwrap().awaiting_probe());
        assert_eq!(
            runtime.refresh_theme(&ProbeReading::Prefers(ColorScheme::Dark)),
            Some(ColorScheme::Dark)
        );
        assert!(!runtime.theme().unwrap().awaiting_probe());
        assert_eq!(runtime.theme().unwrap().scheme(), ColorScheme::Dark);
        assert_eq!(
            runtime.refresh_theme(&ProbeReading::Prefers(ColorScheme::Light)),
            None
        );
        assert_eq!(runtime.theme().unwrap().scheme(), ColorScheme::Dark);
    }

    #[test]
    fn preview_switches_to_inline_placement() {
        let runtime = WidgetRuntime::load(&EmbedRequest::from_query(Some("preview=true")));
        assert!(runtime.is_preview());
        assert_eq!(runtime.placement_mode(), PlacementMode::Inline);
    }

    #[test]
    fn loading_runtime_renders_spinner() {
        let runtime = WidgetRuntime::with_config(WidgetConfig::default(), false);
        let html = runtime.render(&EmbedAppConfig::default());
        assert!(html.contains("parlor-spinner"));
        assert!(!html.contains(r#"id="parlor-launcher""#));
    }
}
