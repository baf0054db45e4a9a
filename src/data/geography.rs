use crate::{
    core::constants::WORLD_ATLAS_COUNTRIES_OBJECT,
    data::{geojson::GeoJson, topojson::Topology},
    MapError, Result,
};
use geo::BoundingRect;
use geo_types::{MultiPolygon, Rect};
use std::sync::Arc;

/// One country outline
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    pub id: Option<String>,
    pub name: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

impl CountryFeature {
    /// Stable render key: id when present, then name, then position
    pub fn key(&self, position: usize) -> String {
        match (&self.id, &self.name) {
            (Some(id), _) => format!("{}_{}", id, position),
            (None, Some(name)) => format!("{}_{}", name, position),
            (None, None) => format!("geo_{}", position),
        }
    }
}

/// Decoded world geography, treated as opaque polygons by the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geography {
    pub countries: Vec<CountryFeature>,
}

impl Geography {
    pub fn new(countries: Vec<CountryFeature>) -> Self {
        Self { countries }
    }

    /// Accepts either a TopoJSON topology or a GeoJSON document
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        match value.get("type").and_then(|kind| kind.as_str()) {
            Some("Topology") => Self::from_topology(&Topology::from_value(value)?),
            Some(_) => Self::from_geojson(GeoJson::from_value(value)?),
            None => Err(MapError::ParseError(
                "geography payload has no 'type' member".to_string(),
            )),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Reads the `countries` object, or the only object of a single-object topology
    pub fn from_topology(topology: &Topology) -> Result<Self> {
        let object = if topology.objects.contains_key(WORLD_ATLAS_COUNTRIES_OBJECT)
            || topology.objects.len() != 1
        {
            WORLD_ATLAS_COUNTRIES_OBJECT
        } else {
            topology
                .objects
                .keys()
                .next()
                .map(String::as_str)
                .unwrap_or(WORLD_ATLAS_COUNTRIES_OBJECT)
        };

        let countries = topology
            .shapes(object)?
            .into_iter()
            .map(|shape| CountryFeature {
                id: shape.id,
                name: shape.name,
                geometry: shape.geometry,
            })
            .collect();
        Ok(Self { countries })
    }

    pub fn from_geojson(geojson: GeoJson) -> Result<Self> {
        let countries = geojson
            .into_features()
            .into_iter()
            .filter_map(|feature| {
                let geometry = feature.geometry.as_ref()?.to_multi_polygon()?;
                Some(CountryFeature {
                    id: feature.id_string(),
                    name: feature.property_string("name"),
                    geometry,
                })
            })
            .collect();
        Ok(Self { countries })
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Longitude/latitude extent of all countries
    pub fn extent(&self) -> Option<Rect<f64>> {
        self.countries
            .iter()
            .filter_map(|country| country.geometry.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    geo_types::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    geo_types::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            })
    }
}

/// Availability of the geography payload
///
/// A failed load is never retried; the map keeps showing its placeholder.
#[derive(Debug, Clone, Default)]
pub enum GeographyState {
    #[default]
    Loading,
    Ready(Arc<Geography>),
    Failed(String),
}

impl GeographyState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn geography(&self) -> Option<&Arc<Geography>> {
        match self {
            Self::Ready(geography) => Some(geography),
            _ => None,
        }
    }
}
