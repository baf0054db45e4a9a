//! Composition of one frame of the network map.
//!
//! A [`RenderPass`] borrows everything a frame depends on and produces a
//! [`Scene`]: either the loading placeholder, or the projected countries,
//! arcs and markers under the zoom transform plus the overlays drawn in
//! container space.

use crate::{
    core::{config::RenderConfig, geo::Point, viewport::Transform, viewport::Viewport},
    data::geography::GeographyState,
    layers::{ArcPath, CountryShape, MarkerGlyph, MarkerKind},
    network::{graph::Connection, hub::HubTable},
    rendering::{
        context::{LineRenderStyle, PolygonRenderStyle},
        projection::Projection,
    },
    spatial::Culling,
    ui::{HoverTarget, TelemetryHud, ZoomControls},
};

pub const TOOLTIP_HEADING: &str = "Active Locations";

/// Hover card, positioned in container pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayer {
    pub anchor: Point,
    pub heading: &'static str,
    pub title: String,
    pub subtitle: String,
}

impl TooltipLayer {
    pub fn for_target(target: &HoverTarget, offset: Point) -> Self {
        Self {
            anchor: target.anchor(offset),
            heading: TOOLTIP_HEADING,
            title: target.hub.name.clone(),
            subtitle: target.hub.country.clone(),
        }
    }
}

/// Everything drawn once geography is available
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub width: f64,
    pub height: f64,
    /// Applied to countries, arcs and markers
    pub transform: Transform,
    pub countries: Vec<CountryShape>,
    /// In connection order, which is also paint order
    pub arcs: Vec<ArcPath>,
    pub markers: Vec<MarkerGlyph>,
    pub tooltip: Option<TooltipLayer>,
    pub controls: Option<ZoomControls>,
    pub hud: Option<TelemetryHud>,
    pub country_style: PolygonRenderStyle,
    pub arc_style: LineRenderStyle,
}

impl MapScene {
    /// The marker under a point in container pixels, topmost first
    pub fn marker_at(&self, point: &Point) -> Option<&MarkerGlyph> {
        let local = Point::new(
            (point.x - self.transform.translate.x) / self.transform.scale,
            (point.y - self.transform.translate.y) / self.transform.scale,
        );
        self.markers.iter().rev().find(|marker| marker.hit_test(&local))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Loading {
        width: f64,
        height: f64,
        message: &'static str,
    },
    Map(MapScene),
}

impl Scene {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn as_map(&self) -> Option<&MapScene> {
        match self {
            Self::Map(scene) => Some(scene),
            Self::Loading { .. } => None,
        }
    }

    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Loading { width, height, .. } => (*width, *height),
            Self::Map(scene) => (scene.width, scene.height),
        }
    }
}

/// Inputs of a single frame
pub struct RenderPass<'a> {
    pub viewport: &'a Viewport,
    pub geography: &'a GeographyState,
    pub connections: &'a [Connection],
    pub hubs: &'a HubTable,
    pub hover: Option<&'a HoverTarget>,
    pub projection: &'a dyn Projection,
    pub config: &'a RenderConfig,
}

impl<'a> RenderPass<'a> {
    pub fn compose(&self) -> Scene {
        let config = self.config;

        let Some(geography) = self.geography.geography() else {
            return Scene::Loading {
                width: config.width,
                height: config.height,
                message: crate::constants::LOADING_PLACEHOLDER,
            };
        };

        let transform = self.viewport.transform(
            self.projection.project(self.viewport.center),
            config.width,
            config.height,
        );

        let countries: Vec<CountryShape> = geography
            .countries
            .iter()
            .enumerate()
            .filter_map(|(position, country)| {
                CountryShape::project(country, position, self.projection)
            })
            .filter(|shape| {
                Culling::visible_on_canvas(&transform, &shape.bounds, config.width, config.height)
            })
            .collect();

        let arcs: Vec<ArcPath> = self
            .connections
            .iter()
            .filter_map(|connection| {
                let arc = ArcPath::from_connection(connection, self.projection, config.arc_lift_px);
                if arc.is_none() {
                    log::trace!("Skipping arc {}: endpoint not projectable", connection.id);
                }
                arc
            })
            .collect();

        let markers: Vec<MarkerGlyph> = self
            .hubs
            .iter()
            .filter_map(|hub| {
                let marker = MarkerGlyph::from_hub(hub, self.projection, MarkerKind::Pulse);
                if marker.is_none() {
                    log::trace!("Skipping marker {}: not projectable", hub.id);
                }
                marker
            })
            .collect();

        log::debug!(
            "Composed scene: {} countries, {} arcs, {} markers at zoom {}",
            countries.len(),
            arcs.len(),
            markers.len(),
            self.viewport.zoom
        );

        Scene::Map(MapScene {
            width: config.width,
            height: config.height,
            transform,
            countries,
            arcs,
            markers,
            tooltip: self
                .hover
                .map(|target| TooltipLayer::for_target(target, config.tooltip_offset)),
            controls: config
                .show_controls
                .then(|| ZoomControls::layout(config.width)),
            hud: config.show_hud.then(|| TelemetryHud::layout(config.height)),
            country_style: config.country_style.clone(),
            arc_style: config.arc_style.clone(),
        })
    }
}
