use crate::core::{
    bounds::Bounds,
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};

/// Input events the network map reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer entered a hub marker; `client` is in page coordinates
    PointerEnter { hub_id: String, client: Point },
    /// Pointer left the hovered marker
    PointerLeave,
    /// Click in container-relative pixels
    Click { position: Point },
    /// Zoom-in button
    ZoomIn,
    /// Zoom-out button
    ZoomOut,
    /// A pan/zoom gesture finished
    MoveEnd { center: LatLng, zoom: f64 },
    /// The container moved or was resized; client rectangle
    Resize { container: Bounds },
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Events emitted by the map to registered listeners
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Center or zoom changed
    ViewChanged { center: LatLng, zoom: f64 },
    /// Hovered hub changed; `None` once the tooltip is cleared
    HoverChanged { hub_id: Option<String> },
    /// Country outlines arrived
    GeographyLoaded { countries: usize },
    /// The atlas fetch failed; the placeholder stays
    GeographyFailed { reason: String },
}

impl MapEvent {
    /// Listener key for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::HoverChanged { .. } => "hoverchanged",
            MapEvent::GeographyLoaded { .. } => "geographyloaded",
            MapEvent::GeographyFailed { .. } => "geographyfailed",
        }
    }
}
