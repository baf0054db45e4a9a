use crate::{core::geo::LatLng, MapError, Result};
use fxhash::{FxHashMap, FxHasher};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A named geographic point of interest used as a network node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: String,
    pub coordinates: LatLng,
    pub name: String,
    pub country: String,
}

impl Hub {
    pub fn new(
        id: impl Into<String>,
        coordinates: LatLng,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            coordinates,
            name: name.into(),
            country: country.into(),
        }
    }
}

/// Ordered, read-only set of hubs keyed by id
///
/// Enumeration order is insertion order; it decides connection ids and the
/// order arcs are drawn in.
#[derive(Debug, Clone, Default)]
pub struct HubTable {
    hubs: Vec<Hub>,
    index: FxHashMap<String, usize>,
}

static DEFAULT_HUBS: Lazy<HubTable> = Lazy::new(|| {
    let entry = |id: &str, lng: f64, lat: f64, name: &str, country: &str| {
        Hub::new(id, LatLng::from_lng_lat(lng, lat), name, country)
    };

    HubTable::from_unique(vec![
        entry("dubai", 55.2708, 25.2048, "Dubai", "United Arab Emirates"),
        entry("lagos", 3.3792, 6.5244, "Lagos", "Nigeria"),
        entry("tokyo", 139.6503, 35.6762, "Tokyo", "Japan"),
        entry("london", -0.1276, 51.5072, "London", "United Kingdom"),
        entry("moscow", 37.6173, 55.7558, "Moscow", "Russia"),
        entry("beijing", 116.4074, 39.9042, "Beijing", "China"),
        entry("newYork", -74.006, 40.7128, "New York", "USA"),
        entry("brasilia", -47.8822, -15.7942, "Brasília", "Brazil"),
        entry("canberra", 149.1287, -35.2820, "Canberra", "Australia"),
        entry("capeTown", 18.4241, -33.9249, "Cape Town", "South Africa"),
        entry("singapore", 103.8198, 1.3521, "Singapore", "Singapore"),
        entry("addisAbaba", 38.7421, 9.0227, "Addis Ababa", "Ethiopia"),
        entry("antananarivo", 47.5315, -18.8792, "Antananarivo", "Madagascar"),
    ])
});

impl HubTable {
    /// Builds a table, rejecting empty or duplicate ids
    pub fn new(hubs: Vec<Hub>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (position, hub) in hubs.iter().enumerate() {
            if hub.id.is_empty() {
                return Err(MapError::InvalidHub(format!(
                    "hub at position {} has an empty id",
                    position
                )));
            }
            if index.insert(hub.id.clone(), position).is_some() {
                return Err(MapError::InvalidHub(format!("duplicate hub id '{}'", hub.id)));
            }
        }
        Ok(Self { hubs, index })
    }

    /// Parses a JSON array of hubs
    pub fn from_json(json: &str) -> Result<Self> {
        let hubs: Vec<Hub> = serde_json::from_str(json)?;
        Self::new(hubs)
    }

    fn from_unique(hubs: Vec<Hub>) -> Self {
        let index = hubs
            .iter()
            .enumerate()
            .map(|(position, hub)| (hub.id.clone(), position))
            .collect();
        Self { hubs, index }
    }

    /// The thirteen hubs of the global operations map
    pub fn global_operations() -> Self {
        DEFAULT_HUBS.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Hub> {
        self.index.get(id).map(|&position| &self.hubs[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hub> {
        self.hubs.iter()
    }

    pub fn as_slice(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    /// Identity of the table's contents, used as a memoization key
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for hub in &self.hubs {
            hub.id.hash(&mut hasher);
            hub.coordinates.lat.to_bits().hash(&mut hasher);
            hub.coordinates.lng.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl<'a> IntoIterator for &'a HubTable {
    type Item = &'a Hub;
    type IntoIter = std::slice::Iter<'a, Hub>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
