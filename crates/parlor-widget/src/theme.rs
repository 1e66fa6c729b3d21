//! Effective light/dark resolution for a configured [`ThemeMode`].
//!
//! The viewer's color-scheme preference is read through an injected
//! [`EnvironmentProbe`] instead of an ambient global, so resolution stays
//! deterministic under test and during server-side rendering, where no
//! preference may be known at all.

use parlor_types::ThemeMode;

/// A resolved presentation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Class applied to the document root; light is the unclassed baseline.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "dark",
        }
    }
}

/// What an environment probe reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeReading {
    /// The environment cannot be queried yet (or at all).
    Unavailable,
    /// The environment answered but states no preference.
    NoPreference,
    Prefers(ColorScheme),
}

/// Capability to read the viewer's preferred color scheme.
pub trait EnvironmentProbe {
    fn read(&self) -> ProbeReading;
}

/// A fixed reading is its own probe.
impl EnvironmentProbe for ProbeReading {
    fn read(&self) -> ProbeReading {
        *self
    }
}

/// Probe backed by the `Sec-CH-Prefers-Color-Scheme` client hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientHintProbe(ProbeReading);

impl ClientHintProbe {
    /// Request header carrying the hint.
    pub const HEADER: &'static str = "sec-ch-prefers-color-scheme";

    /// Builds a probe from the raw header value, if the browser sent one.
    ///
    /// The value is a structured-field string, usually quoted (`"dark"`).
    pub fn from_header(value: Option<&str>) -> Self {
        let reading = match value.map(|v| v.trim().trim_matches('"').to_ascii_lowercase()) {
            None => ProbeReading::Unavailable,
            Some(v) if v == "dark" => ProbeReading::Prefers(ColorScheme::Dark),
            Some(v) if v == "light" => ProbeReading::Prefers(ColorScheme::Light),
            Some(_) => ProbeReading::NoPreference,
        };
        Self(reading)
    }
}

impl EnvironmentProbe for ClientHintProbe {
    fn read(&self) -> ProbeReading {
        self.0
    }
}

/// Resolves a theme mode against the environment.
///
/// `auto` fails open to light when the probe is unavailable or reports no
/// preference.
pub fn resolve(mode: ThemeMode, probe: &dyn EnvironmentProbe) -> ColorScheme {
    match mode {
        ThemeMode::Light => ColorScheme::Light,
        ThemeMode::Dark => ColorScheme::Dark,
        ThemeMode::Auto => resolve_auto(probe.read()),
    }
}

fn resolve_auto(reading: ProbeReading) -> ColorScheme {
    match reading {
        ProbeReading::Prefers(ColorScheme::Dark) => ColorScheme::Dark,
        _ => ColorScheme::Light,
    }
}

/// Theme resolution for one document load.
///
/// An `auto` theme first resolved without a probe is re-evaluated exactly
/// once, the first time the probe becomes available; every later refresh is a
/// no-op, so the scheme changes at most once per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSession {
    mode: ThemeMode,
    scheme: ColorScheme,
    awaiting_probe: bool,
}

impl ThemeSession {
    pub fn start(mode: ThemeMode, probe: &dyn EnvironmentProbe) -> Self {
        let reading = probe.read();
        Self {
            mode,
            scheme: resolve(mode, &reading),
            awaiting_probe: mode == ThemeMode::Auto && reading == ProbeReading::Unavailable,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Whether the one deferred re-evaluation is still pending.
    pub fn awaiting_probe(&self) -> bool {
        self.awaiting_probe
    }

    /// Re-reads the probe if the initial read was unavailable.
    ///
    /// Returns the new scheme when the re-evaluation changed it.
    pub fn refresh(&mut self, probe: &dyn EnvironmentProbe) -> Option<ColorScheme> {
        if !self.awaiting_probe {
            return None;
        }
        let reading = probe.read();
        if reading == ProbeReading::Unavailable {
            return None;
        }
        self.awaiting_probe = false;
        let next = resolve_auto(reading);
        if next == self.scheme {
            return None;
        }
        tracing::debug!(scheme = next.as_str(), "auto theme settled after deferred probe");
        self.scheme = next;
        Some(next)
    }
}
