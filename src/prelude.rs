//! Prelude module for common hubmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use hubmap::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    builder::NetworkMapBuilder,
    config::{
        AtlasResolution, GeographyConfig, NetworkConfig, NetworkMapConfig, RenderConfig,
        ViewportConfig,
    },
    geo::{haversine_km, LatLng, Point},
    map::NetworkMap,
    viewport::{Transform, Viewport},
};

pub use crate::network::{
    graph::{build_connections, Connection, NetworkCache},
    hub::{Hub, HubTable},
};

pub use crate::data::{
    geography::{CountryFeature, Geography, GeographyState},
    loader::{GeographyLoader, GeographySource, HttpGeographySource, StaticGeographySource},
};

pub use crate::input::{
    events::{EventHandled, InputEvent, MapEvent},
    handler::{Action, InputHandler},
};

pub use crate::layers::{ArcPath, CountryShape, MarkerGlyph, MarkerKind};

pub use crate::rendering::{
    projection::{EqualEarth, Orthographic, Projection},
    scene::{MapScene, RenderPass, Scene},
    svg::SvgRenderer,
};

pub use crate::ui::{HoverState, HoverTarget, ZoomAction, ZoomControls};

pub use crate::{MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
