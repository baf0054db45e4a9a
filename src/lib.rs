//! # hubmap
//!
//! Hub network map engine.
//!
//! Builds a synthetic logistics network from a fixed table of named hubs
//! (every pair of hubs within a great-circle distance threshold gets an
//! arc), keeps an interactive pan/zoom viewport and hover tooltip, and
//! composes country polygons, arcs and hub markers into a scene that can
//! be written out as SVG.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod network;
pub mod prelude;
pub mod rendering;
pub mod spatial;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    builder::NetworkMapBuilder,
    config::NetworkMapConfig,
    geo::{haversine_km, LatLng, Point},
    map::NetworkMap,
    viewport::Viewport,
};

pub use network::{
    graph::{build_connections, Connection, NetworkCache},
    hub::{Hub, HubTable},
};

pub use data::{
    geography::{CountryFeature, Geography, GeographyState},
    loader::{GeographySource, HttpGeographySource, StaticGeographySource},
};

pub use input::{
    events::{EventHandled, InputEvent, MapEvent},
    handler::InputHandler,
};

pub use rendering::{
    projection::{EqualEarth, Orthographic, Projection},
    scene::Scene,
    svg::SvgRenderer,
};

pub use ui::tooltip::{HoverState, HoverTarget};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid hub: {0}")]
    InvalidHub(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Loader error: {0}")]
    Loader(String),
}

/// Error type alias for convenience
pub type Error = MapError;
