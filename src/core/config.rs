//! Configuration for the network map
//!
//! Every section has defaults matching the shipped global operations map,
//! so a configuration document only needs to name the values it changes.
//! Atlas detail is chosen through presets which resolve to a download URL.

use crate::{
    core::{
        constants::{
            ARC_LIFT_PX, CANVAS_SIZE, DEFAULT_CENTER_LNG_LAT, MAX_ZOOM, MIN_ZOOM,
            NETWORK_MAP_THRESHOLD_KM, PROJECTION_SCALE, TOOLTIP_OFFSET, WORLD_ATLAS_BASE_URL,
            ZOOM_STEP_FACTOR,
        },
        geo::{LatLng, Point},
    },
    rendering::context::{LineRenderStyle, PolygonRenderStyle},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Detail level of the world atlas download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtlasResolution {
    /// 1:110m, smallest payload
    Coarse,
    /// 1:50m, the level the map section ships with
    #[default]
    Standard,
    /// 1:10m, large payload
    Fine,
}

impl AtlasResolution {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Coarse => "countries-110m.json",
            Self::Standard => "countries-50m.json",
            Self::Fine => "countries-10m.json",
        }
    }

    pub fn resolve_url(&self) -> String {
        format!("{}/{}", WORLD_ATLAS_BASE_URL, self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Hubs at most this far apart (km) are connected
    pub threshold_km: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            threshold_km: NETWORK_MAP_THRESHOLD_KM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub default_center: LatLng,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_factor: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let (lng, lat) = DEFAULT_CENTER_LNG_LAT;
        Self {
            default_center: LatLng::from_lng_lat(lng, lat),
            default_zoom: MIN_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_factor: ZOOM_STEP_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub projection_scale: f64,
    /// Upward pull of each arc's control point, in projected pixels
    pub arc_lift_px: f64,
    pub tooltip_offset: Point,
    pub country_style: PolygonRenderStyle,
    pub arc_style: LineRenderStyle,
    pub show_controls: bool,
    pub show_hud: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_SIZE.0,
            height: CANVAS_SIZE.1,
            projection_scale: PROJECTION_SCALE,
            arc_lift_px: ARC_LIFT_PX,
            tooltip_offset: Point::new(TOOLTIP_OFFSET.0, TOOLTIP_OFFSET.1),
            country_style: PolygonRenderStyle::default(),
            arc_style: LineRenderStyle::default(),
            show_controls: true,
            show_hud: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographyConfig {
    pub resolution: AtlasResolution,
    /// Overrides the preset URL when set
    pub url: Option<String>,
}

impl GeographyConfig {
    pub fn url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| self.resolution.resolve_url())
    }
}

/// Complete network map configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkMapConfig {
    pub network: NetworkConfig,
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
    pub geography: GeographyConfig,
}

impl NetworkMapConfig {
    /// Parses and validates a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.network.threshold_km.is_finite() {
            return Err(MapError::InvalidConfig(
                "network.threshold_km must be finite".to_string(),
            ));
        }

        let viewport = &self.viewport;
        if !(viewport.min_zoom > 0.0 && viewport.min_zoom <= viewport.max_zoom) {
            return Err(MapError::InvalidConfig(format!(
                "zoom range {}..={} is empty or non-positive",
                viewport.min_zoom, viewport.max_zoom
            )));
        }
        if !(viewport.default_zoom >= viewport.min_zoom && viewport.default_zoom <= viewport.max_zoom)
        {
            return Err(MapError::InvalidConfig(format!(
                "viewport.default_zoom {} lies outside {}..={}",
                viewport.default_zoom, viewport.min_zoom, viewport.max_zoom
            )));
        }
        if !(viewport.zoom_factor > 1.0) {
            return Err(MapError::InvalidConfig(format!(
                "viewport.zoom_factor must exceed 1, got {}",
                viewport.zoom_factor
            )));
        }

        let render = &self.render;
        if !(render.width > 0.0 && render.height > 0.0 && render.projection_scale > 0.0) {
            return Err(MapError::InvalidConfig(
                "render size and projection scale must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_network_section() {
        let config = NetworkMapConfig::default();
        assert_eq!(config.network.threshold_km, 6500.0);
        assert_eq!(config.viewport.max_zoom, 6.0);
        assert_eq!(config.viewport.zoom_factor, 1.5);
        assert_eq!(config.viewport.default_center, LatLng::new(-55.0, 0.0));
        assert_eq!(config.render.projection_scale, 120.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_atlas_presets() {
        assert_eq!(
            GeographyConfig::default().url(),
            "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-50m.json"
        );
        assert!(AtlasResolution::Coarse.resolve_url().ends_with("countries-110m.json"));

        let custom = GeographyConfig {
            resolution: AtlasResolution::Fine,
            url: Some("http://localhost/atlas.json".to_string()),
        };
        assert_eq!(custom.url(), "http://localhost/atlas.json");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = NetworkMapConfig::from_json(
            r#"{
                "network": { "threshold_km": 4500 },
                "geography": { "resolution": "coarse" },
                "render": { "show_hud": false }
            }"#,
        )
        .unwrap();

        assert_eq!(config.network.threshold_km, 4500.0);
        assert_eq!(config.geography.resolution, AtlasResolution::Coarse);
        assert!(!config.render.show_hud);
        assert_eq!(config.render.arc_lift_px, 50.0);
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn test_invalid_zoom_range_rejected() {
        let result = NetworkMapConfig::from_json(
            r#"{ "viewport": { "min_zoom": 4.0, "max_zoom": 2.0 } }"#,
        );
        assert!(matches!(result, Err(MapError::InvalidConfig(_))));

        let result = NetworkMapConfig::from_json(r#"{ "viewport": { "zoom_factor": 1.0 } }"#);
        assert!(matches!(result, Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_zoom_outside_limits_rejected() {
        for json in [
            r#"{ "viewport": { "default_zoom": 0.25 } }"#,
            r#"{ "viewport": { "default_zoom": 40 } }"#,
        ] {
            let result = NetworkMapConfig::from_json(json);
            assert!(matches!(result, Err(MapError::InvalidConfig(_))), "{}", json);
        }

        let mut config = NetworkMapConfig::default();
        config.viewport.default_zoom = f64::NAN;
        assert!(matches!(config.validate(), Err(MapError::InvalidConfig(_))));

        config.viewport.default_zoom = 6.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let result = NetworkMapConfig::from_json("{ not json");
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }
}
