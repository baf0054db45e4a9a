//! Geography payloads: GeoJSON and TopoJSON decoding, and the async loader

pub mod geography;
pub mod geojson;
pub mod loader;
pub mod topojson;
