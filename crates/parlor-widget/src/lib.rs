//! Widget configuration contract and embedded runtime for Parlor.
//!
//! - [`codec`] turns a [`WidgetConfig`](parlor_types::WidgetConfig) into a
//!   URL-safe token and back, tolerating malformed input.
//! - [`theme`] resolves light/dark presentation through an injected probe.
//! - [`layout`] derives corner, size, radius, and stacking from configuration
//!   and lifecycle state.
//! - [`runtime`] is the embed document's `Loading -> Ready(Minimized <-> Expanded)`
//!   state machine; [`document`] renders it.
//! - [`snippet`] generates the host-page embed snippet from the same layout
//!   contract.
//! - [`preview`] keeps a builder preview iframe in step with edits by
//!   re-navigating it.

pub mod codec;
pub mod document;
pub mod error;
pub mod layout;
pub mod preview;
pub mod runtime;
pub mod snippet;
pub mod theme;

pub use error::{CodecError, RuntimeError, SnippetError};
pub use layout::{place, CornerRadius, Placement, PlacementMode};
pub use preview::{preview_src, Navigation, PreviewBridge};
pub use runtime::{initial_open_state, EmbedRequest, LoadPhase, OpenState, WidgetRuntime};
pub use snippet::EmbedScriptGenerator;
pub use theme::{ClientHintProbe, ColorScheme, EnvironmentProbe, ProbeReading, ThemeSession};
