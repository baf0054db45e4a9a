//! Core constants for the hub network map.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Mean Earth radius used by the haversine distance, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance threshold used by the network builder when none is given.
pub const DEFAULT_CONNECTION_THRESHOLD_KM: f64 = 4000.0;

/// Distance threshold the network map section is rendered with.
pub const NETWORK_MAP_THRESHOLD_KM: f64 = 6500.0;

/// Multiplier applied by one press of the zoom-in / zoom-out control.
pub const ZOOM_STEP_FACTOR: f64 = 1.5;

/// Lower zoom bound for the zoom controls.
pub const MIN_ZOOM: f64 = 1.0;

/// Upper zoom bound for the zoom controls and gestures.
pub const MAX_ZOOM: f64 = 6.0;

/// Initial pan target as `(lng, lat)`.
pub const DEFAULT_CENTER_LNG_LAT: (f64, f64) = (0.0, -55.0);

/// Canvas size of the composable map, in SVG user units.
pub const CANVAS_SIZE: (f64, f64) = (800.0, 600.0);

/// Scale handed to the world projection.
pub const PROJECTION_SCALE: f64 = 120.0;

/// How far (in projected pixels) an arc's control point is pulled upwards.
pub const ARC_LIFT_PX: f64 = 50.0;

/// Offset of the tooltip anchor from the hovered pointer position.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -30.0);

/// Text shown while the geography payload has not arrived.
pub const LOADING_PLACEHOLDER: &str = "INITIALIZING GLOBAL UPLINK...";

/// World atlas CDN root; the resolution file name is appended.
pub const WORLD_ATLAS_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2";

/// TopoJSON object holding country geometries in the world atlas.
pub const WORLD_ATLAS_COUNTRIES_OBJECT: &str = "countries";
