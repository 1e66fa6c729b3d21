//! Server-rendered widget builder page.
//!
//! Controls carry the configuration's wire names in `data-field`; the page
//! script posts the collected values to the builder API and re-navigates the
//! preview iframe with the returned address.

use parlor_types::{
    ranges, SizePreset, ThemeMode, WidgetConfig, WidgetPosition, COLOR_PRESETS,
};
use parlor_widget::{
    document::escape_html, initial_open_state, place, snippet::DOWNLOAD_FILENAME, PlacementMode,
    PreviewBridge,
};

const PAGE_STYLES: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; background: #f9fafb; color: #111827; }
header { padding: 16px 24px; border-bottom: 1px solid #e5e7eb; background: #fff; display: flex; align-items: center; justify-content: space-between; }
header h1 { margin: 0; font-size: 18px; }
main { display: grid; grid-template-columns: 360px 1fr; gap: 24px; padding: 24px; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 16px; }
.tabs { display: flex; gap: 4px; margin-bottom: 16px; }
.tabs button { flex: 1; border: 0; padding: 8px; border-radius: 8px; background: #f3f4f6; cursor: pointer; }
.tabs button.active { background: #111827; color: #fff; }
label { display: block; font-size: 13px; font-weight: 500; margin: 12px 0 4px; }
.row { display: flex; gap: 8px; flex-wrap: wrap; }
.row button, .swatch { border: 1px solid #e5e7eb; background: #fff; border-radius: 8px; padding: 6px 10px; cursor: pointer; font-size: 12px; }
.row button.active { border-color: #111827; }
.swatch { width: 28px; height: 28px; padding: 0; border-radius: 50%; }
input[type=text], input[type=number], select, textarea { width: 100%; padding: 6px 8px; border: 1px solid #d1d5db; border-radius: 6px; font: inherit; }
textarea { font-family: ui-monospace, monospace; font-size: 12px; }
.check { display: flex; align-items: center; gap: 8px; font-weight: 400; }
.stage { position: relative; height: 720px; border-radius: 12px; overflow: hidden; background: linear-gradient(135deg, #eef2ff, #f8fafc); }
.stage .mock { padding: 32px; color: #9ca3af; }
.stage .mock div { height: 12px; background: #e5e7eb; border-radius: 6px; margin-bottom: 12px; }
#preview-frame { border: none; transition: all 0.3s ease; }
#preview-loading { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(255, 255, 255, 0.6); }
#preview-loading[hidden] { display: none; }
.spinner { width: 24px; height: 24px; border: 2px solid #2563eb; border-top-color: transparent; border-radius: 50%; animation: spin 0.8s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
#preview-status { font-size: 12px; color: #6b7280; margin-top: 8px; }
#builder-notice { position: fixed; bottom: 24px; left: 50%; transform: translateX(-50%); background: #111827; color: #fff; padding: 8px 16px; border-radius: 8px; font-size: 13px; }
.actions { display: flex; gap: 8px; margin-top: 8px; }
.actions button, .actions a { border: 0; background: #111827; color: #fff; padding: 8px 12px; border-radius: 8px; cursor: pointer; font-size: 13px; text-decoration: none; }
"#;

const PAGE_SCRIPT: &str = r#"(function () {
  var form = document.getElementById('builder-form');
  var frame = document.getElementById('preview-frame');
  var overlay = document.getElementById('preview-loading');
  var status = document.getElementById('preview-status');
  var notice = document.getElementById('builder-notice');
  var codeBox = document.getElementById('embed-code');
  var download = document.getElementById('embed-download');
  var generation = 0;
  var applied = null;
  var noticeTimer = null;

  function showNotice(message) {
    notice.textContent = message;
    notice.hidden = false;
    clearTimeout(noticeTimer);
    noticeTimer = setTimeout(function () { notice.hidden = true; }, 3000);
  }

  function field(name) { return form.querySelector('[data-field="' + name + '"]'); }

  function collect() {
    var config = {};
    form.querySelectorAll('[data-field]').forEach(function (el) {
      var name = el.getAttribute('data-field');
      var kind = el.getAttribute('data-kind');
      if (kind === 'bool') { config[name] = el.checked; }
      else if (kind === 'number') { config[name] = Number(el.value); }
      else { config[name] = el.value; }
    });
    return config;
  }

  function fill(config) {
    Object.keys(config).forEach(function (name) {
      var el = field(name);
      if (!el) { return; }
      if (el.getAttribute('data-kind') === 'bool') { el.checked = !!config[name]; }
      else { el.value = config[name]; }
    });
    syncControls();
  }

  function syncControls() {
    form.querySelectorAll('output[data-for]').forEach(function (out) {
      out.textContent = field(out.getAttribute('data-for')).value;
    });
    form.querySelectorAll('[data-choice]').forEach(function (button) {
      var target = field(button.getAttribute('data-choice'));
      button.classList.toggle('active', target.value === button.getAttribute('data-value'));
    });
  }

  function post(path, body) {
    return fetch(path, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body)
    }).then(function (res) {
      return res.json().catch(function () { return {}; }).then(function (data) {
        if (!res.ok) { throw new Error(data.error || ('HTTP ' + res.status)); }
        return data;
      });
    });
  }

  function refresh() {
    var config = collect();
    var serialized = JSON.stringify(config);
    if (serialized === applied) { return; }
    applied = serialized;
    var current = ++generation;
    overlay.hidden = false;
    post('/api/widget/preview', config).then(function (data) {
      if (current !== generation) { return; }
      download.setAttribute('data-token', data.token);
      frame.setAttribute('data-generation', String(current));
      frame.style.cssText = data.frameStyle;
      frame.src = data.src;
      var state = data.initialState || '';
      status.textContent = 'Widget: ' + state.charAt(0).toUpperCase() + state.slice(1) +
        ' | Theme: ' + config.theme + ' | Z-Index: ' + config.zIndex;
    }).catch(function (err) {
      console.error('Failed to update preview:', err.message || err);
      if (current === generation) { overlay.hidden = true; }
      showNotice('Preview could not be updated.');
    });
  }

  frame.addEventListener('load', function () {
    if (Number(frame.getAttribute('data-generation')) === generation) { overlay.hidden = true; }
  });

  document.querySelectorAll('.tabs button').forEach(function (tab) {
    tab.addEventListener('click', function () {
      document.querySelectorAll('.tabs button').forEach(function (t) { t.classList.toggle('active', t === tab); });
      document.querySelectorAll('[data-panel]').forEach(function (panel) {
        panel.hidden = panel.getAttribute('data-panel') !== tab.getAttribute('data-tab');
      });
    });
  });

  form.querySelectorAll('[data-choice]').forEach(function (button) {
    button.addEventListener('click', function (event) {
      event.preventDefault();
      field(button.getAttribute('data-choice')).value = button.getAttribute('data-value');
      if (button.hasAttribute('data-width')) {
        field('width').value = button.getAttribute('data-width');
        field('height').value = button.getAttribute('data-height');
      }
      syncControls();
      refresh();
    });
  });

  form.addEventListener('input', function () { syncControls(); refresh(); });
  form.addEventListener('change', refresh);

  document.getElementById('builder-reset').addEventListener('click', function () {
    fetch('/api/widget/defaults').then(function (res) { return res.json(); }).then(function (defaults) {
      fill(defaults);
      refresh();
    }).catch(function (err) {
      console.error('Failed to load defaults:', err.message || err);
      showNotice('Defaults could not be loaded.');
    });
  });

  document.getElementById('embed-generate').addEventListener('click', function () {
    post('/api/widget/embed-code', collect()).then(function (data) {
      codeBox.value = data.code;
    }).catch(function (err) {
      console.error('Failed to generate embed code:', err.message || err);
      showNotice('Embed code could not be generated.');
    });
  });

  document.getElementById('embed-copy').addEventListener('click', function () {
    if (!codeBox.value) { showNotice('Generate the embed code first.'); return; }
    if (!navigator.clipboard) { showNotice('Copy failed. Select the code and copy it manually.'); return; }
    navigator.clipboard.writeText(codeBox.value).then(function () {
      showNotice('Copied to clipboard.');
    }).catch(function (err) {
      console.error('Failed to copy embed code:', err.message || err);
      showNotice('Copy failed. Select the code and copy it manually.');
    });
  });

  download.addEventListener('click', function () {
    var url = '/api/widget/embed-code/download?config=' + (download.getAttribute('data-token') || '');
    fetch(url).then(function (res) {
      if (!res.ok) { throw new Error('HTTP ' + res.status); }
      return res.blob();
    }).then(function (blob) {
      var link = document.createElement('a');
      link.href = URL.createObjectURL(blob);
      link.download = download.getAttribute('data-filename');
      document.body.appendChild(link);
      link.click();
      link.remove();
      URL.revokeObjectURL(link.href);
    }).catch(function (err) {
      console.error('Failed to download embed code:', err.message || err);
      showNotice('Download failed. Please try again.');
    });
  });

  applied = JSON.stringify(collect());
  syncControls();
})();"#;

fn text_input(field: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="f-{field}">{label}</label>
<input id="f-{field}" type="text" data-field="{field}" data-kind="text" value="{value}">"#,
        value = escape_html(value),
    )
}

fn color_input(field: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="f-{field}">{label}</label>
<input id="f-{field}" type="color" data-field="{field}" data-kind="text" value="{value}">"#,
        value = escape_html(value),
    )
}

fn range_input(field: &str, label: &str, value: u32, (min, max, step): (u32, u32, u32)) -> String {
    format!(
        r#"<label for="f-{field}">{label}: <output data-for="{field}">{value}</output>px</label>
<input id="f-{field}" type="range" data-field="{field}" data-kind="number" min="{min}" max="{max}" step="{step}" value="{value}">"#
    )
}

fn checkbox(field: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<label class="check"><input type="checkbox" data-field="{field}" data-kind="bool"{checked}> {label}</label>"#,
        checked = if checked { " checked" } else { "" },
    )
}

/// A hidden input holding one of several choices, with a button per choice.
fn choice_row<'a>(
    field: &str,
    label: &str,
    current: &str,
    choices: impl Iterator<Item = (&'a str, String, String)>,
) -> String {
    let buttons = choices
        .map(|(value, text, extra)| {
            format!(r#"<button data-choice="{field}" data-value="{value}"{extra}>{text}</button>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<label>{label}</label>
<input type="hidden" data-field="{field}" data-kind="text" value="{current}">
<div class="row">
{buttons}
</div>"#
    )
}

fn style_panel(config: &WidgetConfig) -> String {
    let themes = ThemeMode::ALL
        .iter()
        .map(|mode| {
            let selected = if *mode == config.theme { " selected" } else { "" };
            format!(r#"<option value="{0}"{selected}>{0}</option>"#, mode.as_str())
        })
        .collect::<Vec<_>>()
        .join("");
    let swatches = COLOR_PRESETS
        .iter()
        .map(|(name, hex)| {
            format!(
                r#"<button class="swatch" title="{name}" style="background: {hex}" data-choice="primaryColor" data-value="{hex}"></button>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<label for="f-theme">Theme</label>
<select id="f-theme" data-field="theme" data-kind="text">{themes}</select>
<label>Color presets</label>
<div class="row">
{swatches}
</div>
{primary}
{background}
{text}
{radius}"#,
        primary = color_input("primaryColor", "Primary color", &config.primary_color),
        background = color_input("backgroundColor", "Background color", &config.background_color),
        text = color_input("textColor", "Text color", &config.text_color),
        radius = range_input(
            "borderRadius",
            "Border radius",
            config.border_radius,
            ranges::BORDER_RADIUS
        ),
    )
}

fn layout_panel(config: &WidgetConfig) -> String {
    let positions = choice_row(
        "position",
        "Position",
        config.position.as_str(),
        WidgetPosition::ALL
            .iter()
            .map(|p| (p.as_str(), p.label().to_string(), String::new())),
    );
    let sizes = choice_row(
        "size",
        "Size",
        config.size.as_str(),
        SizePreset::ALL.iter().map(|preset| {
            let (width, height) = preset.dimensions();
            (
                preset.as_str(),
                format!("{} ({}x{})", preset.as_str(), width, height),
                format!(r#" data-width="{width}" data-height="{height}""#),
            )
        }),
    );
    format!(
        "{positions}\n{sizes}\n{width}\n{height}",
        width = range_input("width", "Width", config.width, ranges::WIDTH),
        height = range_input("height", "Height", config.height, ranges::HEIGHT),
    )
}

fn behavior_panel(config: &WidgetConfig) -> String {
    [
        checkbox("autoOpen", "Open automatically", config.auto_open),
        checkbox("showMinimized", "Start minimized", config.show_minimized),
        checkbox("enableDragging", "Show drag handle", config.enable_dragging),
        checkbox("showHeader", "Show header", config.show_header),
        checkbox("showBranding", "Show branding", config.show_branding),
    ]
    .join("\n")
}

fn advanced_panel(config: &WidgetConfig) -> String {
    let (min, max, step) = ranges::Z_INDEX;
    format!(
        r#"{title}
{subtitle}
<label for="f-customCSS">Custom CSS</label>
<textarea id="f-customCSS" rows="6" data-field="customCSS" data-kind="text">{css}</textarea>
<label for="f-zIndex">Z-index</label>
<input id="f-zIndex" type="number" data-field="zIndex" data-kind="number" min="{min}" max="{max}" step="{step}" value="{z}">"#,
        title = text_input("customTitle", "Custom title", &config.custom_title),
        subtitle = text_input("customSubtitle", "Custom subtitle", &config.custom_subtitle),
        css = escape_html(&config.custom_css),
        z = config.z_index,
    )
}

/// Renders the builder page with `config` preloaded.
pub fn render(config: &WidgetConfig) -> String {
    let mut bridge = PreviewBridge::new();
    let src = bridge
        .update(config)
        .map(|navigation| navigation.src)
        .unwrap_or_default();
    let frame_style = place(config, initial_open_state(config)).to_css(PlacementMode::Contained);
    let token = parlor_widget::codec::encode(config);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Widget builder</title>
<style>{PAGE_STYLES}</style>
</head>
<body>
<header>
<h1>Widget builder</h1>
<button id="builder-reset" type="button">Reset to defaults</button>
</header>
<main>
<section class="card">
<div class="tabs">
<button class="active" data-tab="style">Style</button>
<button data-tab="layout">Layout</button>
<button data-tab="behavior">Behavior</button>
<button data-tab="advanced">Advanced</button>
</div>
<form id="builder-form" onsubmit="return false">
<div data-panel="style">
{style}
</div>
<div data-panel="layout" hidden>
{layout}
</div>
<div data-panel="behavior" hidden>
{behavior}
</div>
<div data-panel="advanced" hidden>
{advanced}
</div>
</form>
</section>
<section>
<div class="card">
<div class="stage">
<div class="mock"><div style="width: 40%"></div><div></div><div style="width: 70%"></div></div>
<iframe id="preview-frame" title="Widget preview" allow="microphone; autoplay" data-generation="0" style="{frame_style}" src="{src}"></iframe>
<div id="preview-loading"><div class="spinner"></div></div>
</div>
<div id="preview-status"></div>
</div>
<div class="card" style="margin-top: 24px">
<label for="embed-code">Embed code</label>
<textarea id="embed-code" rows="14" readonly></textarea>
<div class="actions">
<button id="embed-generate" type="button">Generate</button>
<button id="embed-copy" type="button">Copy</button>
<button id="embed-download" type="button" data-token="{token}" data-filename="{DOWNLOAD_FILENAME}">Download</button>
</div>
</div>
</section>
</main>
<div id="builder-notice" hidden></div>
<script>{PAGE_SCRIPT}</script>
</body>
</html>
"#,
        style = style_panel(config),
        layout = layout_panel(config),
        behavior = behavior_panel(config),
        advanced = advanced_panel(config),
        frame_style = escape_html(&frame_style),
        src = escape_html(&src),
        token = escape_html(&token),
    )
}
