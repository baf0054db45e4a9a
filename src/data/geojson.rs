use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// GeoJSON feature types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<FxHashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
///
/// A bare geometry carries its own geometry type as `type`, so it cannot be
/// told apart by a single tag; [`GeoJson::from_value`] dispatches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoJson {
    Document(GeoJsonDocument),
    Geometry(GeoJsonGeometry),
}

/// Feature-bearing GeoJSON roots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonDocument {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

pub(crate) fn ring_to_line_string(ring: &[[f64; 2]]) -> LineString<f64> {
    ring.iter()
        .map(|&[x, y]| Coord { x, y })
        .collect::<Vec<_>>()
        .into()
}

pub(crate) fn rings_to_polygon(rings: &[Vec<[f64; 2]>]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    Some(Polygon::new(
        ring_to_line_string(exterior),
        interiors.iter().map(|ring| ring_to_line_string(ring)).collect(),
    ))
}

impl GeoJsonGeometry {
    /// Areal part of the geometry; `None` for points and lines
    pub fn to_multi_polygon(&self) -> Option<MultiPolygon<f64>> {
        let polygons: Vec<Polygon<f64>> = match self {
            Self::Polygon { coordinates } => rings_to_polygon(coordinates).into_iter().collect(),
            Self::MultiPolygon { coordinates } => coordinates
                .iter()
                .filter_map(|rings| rings_to_polygon(rings))
                .collect(),
            Self::GeometryCollection { geometries } => geometries
                .iter()
                .filter_map(GeoJsonGeometry::to_multi_polygon)
                .flat_map(|multi| multi.0)
                .collect(),
            _ => Vec::new(),
        };

        (!polygons.is_empty()).then(|| MultiPolygon::new(polygons))
    }
}

impl GeoJsonFeature {
    /// String form of the feature id (numbers are formatted)
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().and_then(value_to_string)
    }

    pub fn property_string(&self, key: &str) -> Option<String> {
        self.properties
            .as_ref()
            .and_then(|properties| properties.get(key))
            .and_then(value_to_string)
    }
}

pub(crate) fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl GeoJson {
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        match value.get("type").and_then(|kind| kind.as_str()) {
            Some("Feature" | "FeatureCollection") => {
                serde_json::from_value(value).map(Self::Document)
            }
            _ => serde_json::from_value(value).map(Self::Geometry),
        }
    }

    /// All features, with a bare geometry wrapped as an anonymous feature
    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            Self::Document(GeoJsonDocument::Feature(feature)) => vec![feature],
            Self::Document(GeoJsonDocument::FeatureCollection { features }) => features,
            Self::Geometry(geometry) => vec![GeoJsonFeature {
                id: None,
                geometry: Some(geometry),
                properties: None,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let geojson = GeoJson::from_value(serde_json::json!(
            {
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "id": 4,
                    "properties": { "name": "Square" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
                    }
                }]
            }
        ))
        .unwrap();

        let features = geojson.into_features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id_string().as_deref(), Some("4"));
        assert_eq!(features[0].property_string("name").as_deref(), Some("Square"));

        let shape = features[0].geometry.as_ref().unwrap().to_multi_polygon().unwrap();
        assert_eq!(shape.0.len(), 1);
        assert_eq!(shape.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn test_bare_geometry_becomes_anonymous_feature() {
        let geojson = GeoJson::from_value(serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 0]]]
        }))
        .unwrap();
        assert!(matches!(geojson, GeoJson::Geometry(GeoJsonGeometry::Polygon { .. })));

        let features = geojson.into_features();
        assert_eq!(features.len(), 1);
        assert!(features[0].id_string().is_none());
        assert!(features[0].geometry.as_ref().unwrap().to_multi_polygon().is_some());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(GeoJson::from_value(serde_json::json!({ "type": "Sphere" })).is_err());
    }

    #[test]
    fn test_points_have_no_area() {
        let point = GeoJsonGeometry::Point {
            coordinates: [1.0, 2.0],
        };
        assert!(point.to_multi_polygon().is_none());
    }

    #[test]
    fn test_multi_polygon_keeps_holes() {
        let geometry = GeoJsonGeometry::MultiPolygon {
            coordinates: vec![vec![
                vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]],
                vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]],
            ]],
        };
        let shape = geometry.to_multi_polygon().unwrap();
        assert_eq!(shape.0[0].interiors().len(), 1);
    }
}
