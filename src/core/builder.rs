//! Map builder for fluent API configuration
//!
//! Every part has a default matching the global operations map: the
//! thirteen-hub table, a 6500 km threshold and an Equal Earth projection
//! on an 800x600 canvas.

use crate::{
    core::{
        bounds::Bounds,
        config::{AtlasResolution, NetworkMapConfig},
        geo::LatLng,
        map::NetworkMap,
        viewport::Viewport,
    },
    network::hub::HubTable,
    rendering::projection::{EqualEarth, Orthographic, Projection},
    MapError, Result,
};

/// Builder for creating and configuring [`NetworkMap`] instances
pub struct NetworkMapBuilder {
    config: NetworkMapConfig,
    hubs: Option<HubTable>,
    /// Initial viewport; taken from the config when unset
    viewport: Option<Viewport>,
    projection: Option<Box<dyn Projection>>,
    /// Container client rectangle; the canvas at the origin when unset
    container: Option<Bounds>,
}

impl NetworkMapBuilder {
    pub fn new() -> Self {
        Self {
            config: NetworkMapConfig::default(),
            hubs: None,
            viewport: None,
            projection: None,
            container: None,
        }
    }

    /// Replaces the whole configuration
    pub fn with_config(mut self, config: NetworkMapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_hubs(mut self, hubs: HubTable) -> Self {
        self.hubs = Some(hubs);
        self
    }

    /// Set the connection distance threshold in kilometres
    pub fn with_threshold(mut self, threshold_km: f64) -> Self {
        self.config.network.threshold_km = threshold_km;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Set the initial center and zoom, keeping the configured zoom limits
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.config.viewport.default_center = center;
        self.config.viewport.default_zoom = zoom;
        self.viewport = None;
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.config.viewport.min_zoom = min_zoom;
        self.config.viewport.max_zoom = max_zoom;
        self
    }

    pub fn with_projection(mut self, projection: Box<dyn Projection>) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Set the canvas size in pixels
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.config.render.width = width;
        self.config.render.height = height;
        self
    }

    pub fn with_container(mut self, container: Bounds) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_atlas_resolution(mut self, resolution: AtlasResolution) -> Self {
        self.config.geography.resolution = resolution;
        self
    }

    /// Show or hide the zoom buttons
    pub fn with_zoom_controls(mut self, enabled: bool) -> Self {
        self.config.render.show_controls = enabled;
        self
    }

    /// Show or hide the telemetry panel
    pub fn with_hud(mut self, enabled: bool) -> Self {
        self.config.render.show_hud = enabled;
        self
    }

    /// Validates the configuration and assembles the map
    pub fn build(self) -> Result<NetworkMap> {
        self.config.validate()?;

        let render = &self.config.render;
        let projection = self.projection.unwrap_or_else(|| {
            Box::new(EqualEarth::new(
                render.projection_scale,
                render.width,
                render.height,
            ))
        });
        let container = self
            .container
            .unwrap_or_else(|| Bounds::from_origin_and_size(0.0, 0.0, render.width, render.height));
        let viewport = self
            .viewport
            .unwrap_or_else(|| Viewport::from_config(&self.config.viewport));
        if !viewport.zoom_within_limits() {
            return Err(MapError::InvalidConfig(format!(
                "initial zoom {} lies outside {}..={}",
                viewport.zoom,
                viewport.min_zoom(),
                viewport.max_zoom()
            )));
        }
        let hubs = self.hubs.unwrap_or_else(HubTable::global_operations);

        Ok(NetworkMap::from_parts(
            hubs,
            self.config,
            viewport,
            projection,
            Some(container),
        ))
    }
}

impl Default for NetworkMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience presets
impl NetworkMapBuilder {
    /// The global operations section as shipped
    pub fn global_operations() -> Self {
        Self::new()
    }

    /// Orthographic globe facing `facing`, with the viewport centred there
    pub fn globe(facing: LatLng) -> Self {
        let config = NetworkMapConfig::default();
        let render = &config.render;
        let radius = render.width.min(render.height) / 2.0 - 20.0;
        let projection = Orthographic::new(radius, render.width, render.height, facing);

        Self::new()
            .with_projection(Box::new(projection))
            .with_center_and_zoom(facing, 1.0)
    }

    /// Static poster: no zoom buttons, no telemetry panel
    pub fn poster(width: f64, height: f64) -> Self {
        Self::new()
            .with_size(width, height)
            .with_zoom_controls(false)
            .with_hud(false)
    }
}
