//! HTML rendering of the embed document.
//!
//! The document carries both the launcher and the expanded panel; the one not
//! matching the current [`OpenState`] is `hidden`. A small inline script swaps
//! them on click, one state step per click. Operator strings are escaped,
//! except `customCSS`, which is trusted and emitted verbatim. Anyone able to
//! hand out an embed URL controls that stylesheet, so serve the widget from
//! an origin that holds nothing else worth protecting.

use parlor_types::{EmbedAppConfig, WidgetConfig};

use crate::layout::{self, PlacementMode};
use crate::runtime::OpenState;
use crate::theme::ColorScheme;

/// Path the session panel requests connection details from.
pub const CONNECTION_DETAILS_PATH: &str = "/api/connection-details";

/// Everything [`render`] needs for one document.
#[derive(Debug, Clone)]
pub struct DocumentView<'a> {
    pub config: &'a WidgetConfig,
    pub app: &'a EmbedAppConfig,
    pub open: OpenState,
    pub scheme: ColorScheme,
    /// Emit the one-shot client-side `auto` theme re-evaluation.
    pub deferred_theme: bool,
    pub mode: PlacementMode,
    pub custom_css: &'a str,
}

const BASE_STYLES: &str = r#"
*, *::before, *::after { box-sizing: border-box; }
html, body { margin: 0; padding: 0; height: 100%; background: transparent; }
body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; color: var(--foreground); }
:root { --panel-muted: #f3f4f6; --muted-text: #6b7280; }
.dark { --panel-muted: #1f2937; --muted-text: #9ca3af; }
#parlor-widget { pointer-events: auto; }
.parlor-launcher { width: 100%; height: 100%; border: 0; border-radius: 50%; cursor: pointer;
  background: var(--primary); color: #fff; display: flex; align-items: center; justify-content: center;
  box-shadow: 0 10px 25px rgba(0, 0, 0, 0.25); position: relative; }
.parlor-launcher .tooltip { position: absolute; bottom: 100%; margin-bottom: 8px; padding: 4px 10px;
  border-radius: 8px; background: #111827; color: #fff; font-size: 12px; white-space: nowrap;
  opacity: 0; pointer-events: none; transition: opacity 0.15s ease; }
.parlor-launcher:hover .tooltip { opacity: 1; }
.widget-container { width: 100%; height: 100%; display: flex; flex-direction: column; overflow: hidden;
  background: var(--background); border: 1px solid rgba(0, 0, 0, 0.08); box-shadow: 0 25px 50px rgba(0, 0, 0, 0.25); }
.widget-header { display: flex; align-items: center; justify-content: space-between; padding: 16px;
  border-bottom: 1px solid rgba(0, 0, 0, 0.08); background: var(--panel-muted); flex-shrink: 0; }
.widget-header.draggable { cursor: move; }
.widget-header h3 { margin: 0; font-size: 14px; font-weight: 600; }
.widget-header p { margin: 2px 0 0; font-size: 12px; color: var(--muted-text); }
.widget-header .dot { width: 8px; height: 8px; border-radius: 50%; background: var(--primary); margin-right: 8px; }
.widget-header .title { display: flex; align-items: center; gap: 4px; }
.widget-header .grip { color: var(--muted-text); margin-right: 8px; }
.widget-header button { border: 0; background: transparent; width: 28px; height: 28px; border-radius: 50%; cursor: pointer; color: inherit; }
.widget-body { flex: 1; position: relative; overflow: hidden; display: flex; flex-direction: column;
  align-items: center; justify-content: center; gap: 12px; padding: 16px; }
.widget-body .start { border: 0; border-radius: 999px; padding: 10px 20px; background: var(--primary); color: #fff; cursor: pointer; }
.widget-body .status { font-size: 13px; color: var(--muted-text); text-align: center; }
.widget-body .status.error { color: #dc2626; }
.widget-footer { padding: 8px 16px; border-top: 1px solid rgba(0, 0, 0, 0.08); font-size: 12px; text-align: center; color: var(--muted-text); flex-shrink: 0; }
.widget-footer a { color: var(--primary); font-weight: 500; text-decoration: none; }
.parlor-spinner { width: 24px; height: 24px; border: 2px solid #2563eb; border-top-color: transparent; border-radius: 50%; animation: spin 0.8s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

const TOGGLE_SCRIPT: &str = r#"(function () {
  var root = document.getElementById('parlor-widget');
  var launcher = document.getElementById('parlor-launcher');
  var panel = document.getElementById('parlor-panel');
  function show(state) {
    root.setAttribute('data-state', state);
    root.style.cssText = root.getAttribute('data-style-' + state);
    launcher.hidden = state !== 'minimized';
    panel.hidden = state !== 'expanded';
  }
  function toggle() {
    show(root.getAttribute('data-state') === 'minimized' ? 'expanded' : 'minimized');
  }
  launcher.addEventListener('click', toggle);
  var minimize = document.getElementById('parlor-minimize');
  if (minimize) { minimize.addEventListener('click', toggle); }
})();"#;

const SESSION_SCRIPT: &str = r#"(function () {
  var body = document.getElementById('parlor-session');
  var start = body.querySelector('.start');
  var status = body.querySelector('.status');
  function fail(message) {
    status.textContent = message;
    status.className = 'status error';
    start.disabled = false;
    start.textContent = 'Retry';
  }
  start.addEventListener('click', function () {
    start.disabled = true;
    status.className = 'status';
    status.textContent = 'Connecting…';
    fetch(body.getAttribute('data-endpoint'), { cache: 'no-store' })
      .then(function (res) {
        return res.json().catch(function () { return {}; }).then(function (data) {
          if (!res.ok) { throw new Error(data.error || ('HTTP ' + res.status)); }
          return data;
        });
      })
      .then(function (details) {
        status.textContent = 'Connected to ' + details.roomName;
        start.hidden = true;
        window.dispatchEvent(new CustomEvent('parlor:connection', { detail: details }));
      })
      .catch(function (err) {
        console.error('Error fetching connection details:', err.message || err);
        fail('Could not start the session. Please try again.');
      });
  });
})();"#;

const DEFERRED_THEME_SCRIPT: &str = r#"(function () {
  if (window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches) {
    document.documentElement.classList.add('dark');
  }
})();"#;

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the spinner shown while the runtime is loading.
pub fn render_loading() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>{BASE_STYLES}</style>
</head>
<body>
<div style="width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; background: #fff;">
<div class="parlor-spinner"></div>
</div>
</body>
</html>
"#
    )
}

/// Renders the ready widget document.
pub fn render(view: &DocumentView<'_>) -> String {
    let config = view.config;
    let title = escape_html(config.display_title(view.app));
    let minimized_style = layout::place(config, OpenState::Minimized).to_css(view.mode);
    let expanded_style = layout::place(config, OpenState::Expanded).to_css(view.mode);
    let current_style = match view.open {
        OpenState::Minimized => &minimized_style,
        OpenState::Expanded => &expanded_style,
    };
    let hidden_if = |state: OpenState| if view.open == state { "" } else { " hidden" };

    let root_vars = format!(
        "--primary: {}; --background: {}; --foreground: {};",
        escape_html(&config.primary_color),
        escape_html(&config.background_color),
        escape_html(&config.text_color),
    );
    let overlay_wrapper = match view.mode {
        PlacementMode::Overlay => " style=\"position: fixed; inset: 0; pointer-events: none;\"",
        PlacementMode::Contained => " style=\"position: relative; width: 100%; height: 100%;\"",
        PlacementMode::Inline => " style=\"width: 100%; height: 100%;\"",
    };
    let deferred_theme = if view.deferred_theme {
        format!("<script>{DEFERRED_THEME_SCRIPT}</script>\n")
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="{scheme_class}" style="{root_vars}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{deferred_theme}<style>{BASE_STYLES}</style>
<style data-parlor-custom>{custom_css}</style>
</head>
<body>
<div class="parlor-stage"{overlay_wrapper}>
<div id="parlor-widget" data-state="{state}" data-mode="{mode}" data-style-minimized="{minimized_style}" data-style-expanded="{expanded_style}" style="{current_style}">
<button id="parlor-launcher" class="parlor-launcher" type="button" aria-label="Open {title}"{launcher_hidden}>
<svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor" aria-hidden="true"><path d="M12 3C6.5 3 2 6.9 2 11.7c0 2.4 1.1 4.6 3 6.2L4 22l4.6-2.3c1.1.3 2.2.5 3.4.5 5.5 0 10-3.9 10-8.5S17.5 3 12 3z"/></svg>
<span class="tooltip">{title}</span>
</button>
<div id="parlor-panel" class="widget-container" style="border-radius: {radius}px;"{panel_hidden}>
{header}{body}{footer}</div>
</div>
</div>
<script>{TOGGLE_SCRIPT}</script>
<script>{SESSION_SCRIPT}</script>
</body>
</html>
"#,
        scheme_class = view.scheme.css_class(),
        custom_css = view.custom_css,
        state = view.open.as_str(),
        mode = view.mode.as_str(),
        launcher_hidden = hidden_if(OpenState::Minimized),
        panel_hidden = hidden_if(OpenState::Expanded),
        radius = config.border_radius,
        header = render_header(view, &title),
        body = render_session_panel(view.app),
        footer = render_branding(config),
    )
}

fn render_header(view: &DocumentView<'_>, title: &str) -> String {
    let config = view.config;
    if !config.show_header {
        return String::new();
    }
    let (class, grip) = if config.enable_dragging {
        (
            "widget-header draggable",
            "<span class=\"grip\" aria-hidden=\"true\">&#8942;&#8942;</span>",
        )
    } else {
        ("widget-header", "")
    };
    let subtitle = config
        .display_subtitle(view.app)
        .map(|s| format!("<p>{}</p>", escape_html(s)))
        .unwrap_or_default();
    format!(
        r#"<div class="{class}">
<div class="title">{grip}<span class="dot"></span><div><h3>{title}</h3>{subtitle}</div></div>
<button id="parlor-minimize" type="button" aria-label="Minimize">&#8722;</button>
</div>
"#
    )
}

fn render_session_panel(app: &EmbedAppConfig) -> String {
    format!(
        r#"<div id="parlor-session" class="widget-body" data-endpoint="{CONNECTION_DETAILS_PATH}">
<button class="start" type="button">{start}</button>
<p class="status" role="status"></p>
</div>
"#,
        start = escape_html(&app.start_button_text),
    )
}

fn render_branding(config: &WidgetConfig) -> String {
    if !config.show_branding {
        return String::new();
    }
    r#"<div class="widget-footer">Powered by <a href="https://livekit.io" target="_blank" rel="noopener noreferrer">LiveKit</a></div>
"#
    .to_string()
}
