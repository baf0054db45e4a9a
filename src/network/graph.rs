use crate::{
    core::{constants::DEFAULT_CONNECTION_THRESHOLD_KM, geo::LatLng},
    network::hub::{Hub, HubTable},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A derived edge between two hubs within the distance threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// `"{from_id}-{to_id}"`, ids in table order
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub from: LatLng,
    pub to: LatLng,
    pub distance_km: f64,
}

/// Connects every pair of hubs at most `threshold_km` apart.
///
/// Pairs are visited as `(i, j)` with `j > i` in table order and the output
/// keeps that order, which is also the order arcs are stacked when drawn.
pub fn build_connections(hubs: &HubTable, threshold_km: f64) -> Vec<Connection> {
    let mut connections = Vec::new();
    // Coincident hubs stay unconnected at a zero threshold
    if !(threshold_km > 0.0) {
        return connections;
    }

    let hubs = hubs.as_slice();

    for (i, first) in hubs.iter().enumerate() {
        for second in &hubs[i + 1..] {
            let distance_km = first.coordinates.distance_to(&second.coordinates);

            if distance_km <= threshold_km {
                connections.push(Connection {
                    id: format!("{}-{}", first.id, second.id),
                    from_id: first.id.clone(),
                    to_id: second.id.clone(),
                    from: first.coordinates,
                    to: second.coordinates,
                    distance_km,
                });
            }
        }
    }

    connections
}

/// [`build_connections`] with the stock 4000 km threshold
pub fn build_default_connections(hubs: &HubTable) -> Vec<Connection> {
    build_connections(hubs, DEFAULT_CONNECTION_THRESHOLD_KM)
}

/// Memoizes the network of the most recent (hub table, threshold)
///
/// Only one network is held; asking for another table or threshold
/// replaces it. A fingerprint match is confirmed against the stored hubs.
#[derive(Debug, Default)]
pub struct NetworkCache {
    current: Option<CachedNetwork>,
    builds: usize,
}

#[derive(Debug)]
struct CachedNetwork {
    fingerprint: u64,
    threshold_bits: u64,
    hubs: Vec<Hub>,
    connections: Arc<[Connection]>,
}

impl CachedNetwork {
    fn matches(&self, fingerprint: u64, hubs: &HubTable, threshold_km: f64) -> bool {
        self.fingerprint == fingerprint
            && self.threshold_bits == threshold_km.to_bits()
            && self.hubs.as_slice() == hubs.as_slice()
    }
}

impl NetworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, hubs: &HubTable, threshold_km: f64) -> Arc<[Connection]> {
        let fingerprint = hubs.fingerprint();
        if let Some(cached) = &self.current {
            if cached.matches(fingerprint, hubs, threshold_km) {
                return cached.connections.clone();
            }
        }

        let connections: Arc<[Connection]> = build_connections(hubs, threshold_km).into();
        log::debug!(
            "Built network of {} connections over {} hubs (threshold {} km)",
            connections.len(),
            hubs.len(),
            threshold_km
        );
        self.builds += 1;
        self.current = Some(CachedNetwork {
            fingerprint,
            threshold_bits: threshold_km.to_bits(),
            hubs: hubs.as_slice().to_vec(),
            connections: connections.clone(),
        });
        connections
    }

    /// How many times a network has been built
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
