//! On-screen placement of the widget for a given lifecycle state.
//!
//! [`place`] is the single layout contract shared by the embed runtime and the
//! generated host snippet. It is a pure function of its inputs.

use parlor_types::{WidgetConfig, WidgetPosition, EDGE_OFFSET_PX, LAUNCHER_SIZE_PX};

use crate::runtime::OpenState;

/// Corner rounding of the widget box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerRadius {
    /// Fully round, used by the launcher.
    Circle,
    Px(u32),
}

impl CornerRadius {
    pub fn css(self) -> String {
        match self {
            Self::Circle => "50%".to_string(),
            Self::Px(px) => format!("{px}px"),
        }
    }
}

/// How a [`Placement`] is applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Fixed to a viewport corner above page content.
    Overlay,
    /// Anchored to a corner of the nearest positioned container (builder stage).
    Contained,
    /// Rendered in normal flow inside its container (builder preview).
    Inline,
}

impl PlacementMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
            Self::Contained => "contained",
            Self::Inline => "inline",
        }
    }
}

/// Derived placement of the widget box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub anchor: WidgetPosition,
    /// Distance from both anchored edges, in pixels.
    pub offset: u32,
    pub width: u32,
    pub height: u32,
    pub radius: CornerRadius,
    pub z_index: i32,
}

/// Computes the placement for `config` in lifecycle state `open`.
pub fn place(config: &WidgetConfig, open: OpenState) -> Placement {
    let (width, height, radius) = match open {
        OpenState::Minimized => (LAUNCHER_SIZE_PX, LAUNCHER_SIZE_PX, CornerRadius::Circle),
        OpenState::Expanded => (
            config.width,
            config.height,
            CornerRadius::Px(config.border_radius),
        ),
    };
    Placement {
        anchor: config.position,
        offset: EDGE_OFFSET_PX,
        width,
        height,
        radius,
        z_index: config.z_index,
    }
}

impl Placement {
    /// The two anchored edges with their offsets, vertical edge first.
    pub fn edges(&self) -> [(&'static str, u32); 2] {
        [
            (self.anchor.vertical_edge(), self.offset),
            (self.anchor.horizontal_edge(), self.offset),
        ]
    }

    /// CSS declarations for the widget box, in a fixed order.
    pub fn declarations(&self, mode: PlacementMode) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(8);
        match mode {
            PlacementMode::Overlay | PlacementMode::Contained => {
                let position = if mode == PlacementMode::Overlay {
                    "fixed"
                } else {
                    "absolute"
                };
                out.push(("position", position.to_string()));
                out.push(("z-index", self.z_index.to_string()));
                for (edge, offset) in self.edges() {
                    out.push((edge, format!("{offset}px")));
                }
            }
            PlacementMode::Inline => out.push(("position", "relative".to_string())),
        }
        out.push(("width", format!("{}px", self.width)));
        out.push(("height", format!("{}px", self.height)));
        out.push(("border-radius", self.radius.css()));
        out
    }

    /// Declarations joined into an inline `style` attribute value.
    pub fn to_css(&self, mode: PlacementMode) -> String {
        self.declarations(mode)
            .into_iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
