use crate::core::{
    config::ViewportConfig,
    constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP_FACTOR},
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: pan center and zoom
///
/// The zoom controls keep `min_zoom <= zoom <= max_zoom`. Completed pan and
/// zoom gestures overwrite the state as reported through
/// [`Viewport::set_viewport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The pan target in geographical coordinates
    pub center: LatLng,
    /// The current zoom level (1.0 = whole canvas)
    pub zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_factor: f64,
}

/// Zoomable group transform: translate, then scale around the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation in pixels
    pub translate: Point,
    /// Scale factor (1.0 = no scaling)
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Point::new(0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn new(translate: Point, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is effectively an identity transform
    pub fn is_identity(&self) -> bool {
        (self.scale - 1.0).abs() < 0.001
            && self.translate.x.abs() < 0.1
            && self.translate.y.abs() < 0.1
    }

    /// Maps a point from group-local space to canvas space
    pub fn apply(&self, point: &Point) -> Point {
        point.multiply(self.scale).add(&self.translate)
    }

    /// SVG `transform` attribute value
    pub fn to_svg(&self) -> String {
        format!(
            "translate({:.3} {:.3}) scale({:.4})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

impl Viewport {
    /// Creates a viewport with the default zoom limits
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_factor: ZOOM_STEP_FACTOR,
        }
    }

    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.default_center, config.default_zoom).with_zoom_limits(
            config.min_zoom,
            config.max_zoom,
            config.zoom_factor,
        )
    }

    /// Sets the zoom limits and the per-step factor of the zoom controls
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64, zoom_factor: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom_factor = zoom_factor;
        self
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Whether the zoom lies within `min_zoom..=max_zoom` (false for NaN)
    pub fn zoom_within_limits(&self) -> bool {
        self.zoom >= self.min_zoom && self.zoom <= self.max_zoom
    }

    /// Zooms in by one step. Returns whether the zoom changed.
    ///
    /// An overshooting step lands exactly on `max_zoom`, so the control
    /// always reaches the upper bound.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom >= self.max_zoom {
            return false;
        }
        self.zoom = (self.zoom * self.zoom_factor).min(self.max_zoom);
        true
    }

    /// Zooms out by one step, never below `min_zoom`. Returns whether the zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom <= self.min_zoom {
            return false;
        }
        self.zoom = (self.zoom / self.zoom_factor).max(self.min_zoom);
        true
    }

    /// Absorbs a completed pan/zoom gesture. Both fields are overwritten as
    /// reported; the gesture handler is responsible for its own limits.
    pub fn set_viewport(&mut self, center: LatLng, zoom: f64) -> bool {
        let changed = self.center != center || self.zoom != zoom;
        self.center = center;
        self.zoom = zoom;
        changed
    }

    /// Transform placing `projected_center` in the middle of a
    /// `width` x `height` canvas at the current zoom.
    ///
    /// Falls back to the canvas center when the pan target has no
    /// projection, which keeps the map centred rather than blank.
    pub fn transform(&self, projected_center: Option<Point>, width: f64, height: f64) -> Transform {
        let canvas_center = Point::new(width / 2.0, height / 2.0);
        let focus = projected_center
            .filter(Point::is_finite)
            .unwrap_or(canvas_center);
        Transform::new(canvas_center.subtract(&focus.multiply(self.zoom)), self.zoom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}
