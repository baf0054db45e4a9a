//! TopoJSON decoding
//!
//! The world atlas ships as a quantized TopoJSON topology: shared arcs are
//! delta-encoded integer positions mapped back to degrees by the topology
//! transform, and polygons reference arcs by index (`!i` for arc `i`
//! traversed backwards).

use crate::{data::geojson::value_to_string, MapError, Result};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<TopoTransform>,
    pub objects: BTreeMap<String, TopoGeometry>,
    pub arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TopoTransform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// Any TopoJSON geometry object; `type` may be null for empty features
#[derive(Debug, Clone, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub arcs: Option<serde_json::Value>,
    #[serde(default)]
    pub geometries: Option<Vec<TopoGeometry>>,
}

/// One areal geometry decoded out of a topology object
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedShape {
    pub id: Option<String>,
    pub name: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

type Ring = Vec<i64>;

impl Topology {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Arcs with the delta encoding and quantization transform undone
    pub fn decoded_arcs(&self) -> Vec<Vec<Coord<f64>>> {
        self.arcs
            .iter()
            .map(|arc| match self.transform {
                Some(transform) => {
                    let (mut x, mut y) = (0.0, 0.0);
                    arc.iter()
                        .filter(|position| position.len() >= 2)
                        .map(|position| {
                            x += position[0];
                            y += position[1];
                            Coord {
                                x: x * transform.scale[0] + transform.translate[0],
                                y: y * transform.scale[1] + transform.translate[1],
                            }
                        })
                        .collect()
                }
                None => arc
                    .iter()
                    .filter(|position| position.len() >= 2)
                    .map(|position| Coord {
                        x: position[0],
                        y: position[1],
                    })
                    .collect(),
            })
            .collect()
    }

    /// Decodes every areal geometry of the named object, in order
    pub fn shapes(&self, object: &str) -> Result<Vec<DecodedShape>> {
        let root = self.objects.get(object).ok_or_else(|| {
            MapError::ParseError(format!(
                "topology has no object '{}' (available: {})",
                object,
                self.objects.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })?;

        let arcs = self.decoded_arcs();
        let mut shapes = Vec::new();
        collect_shapes(root, &arcs, &mut shapes)?;
        Ok(shapes)
    }
}

fn collect_shapes(
    geometry: &TopoGeometry,
    arcs: &[Vec<Coord<f64>>],
    shapes: &mut Vec<DecodedShape>,
) -> Result<()> {
    let polygons = match geometry.kind.as_deref() {
        Some("GeometryCollection") => {
            for child in geometry.geometries.iter().flatten() {
                collect_shapes(child, arcs, shapes)?;
            }
            return Ok(());
        }
        Some("Polygon") => {
            let rings: Vec<Ring> = arc_refs(geometry)?;
            vec![polygon(&rings, arcs)?]
        }
        Some("MultiPolygon") => {
            let polygons: Vec<Vec<Ring>> = arc_refs(geometry)?;
            polygons
                .iter()
                .map(|rings| polygon(rings, arcs))
                .collect::<Result<Vec<_>>>()?
        }
        // Points, lines and null geometries carry no area
        _ => return Ok(()),
    };

    shapes.push(DecodedShape {
        id: geometry.id.as_ref().and_then(value_to_string),
        name: geometry
            .properties
            .as_ref()
            .and_then(|properties| properties.get("name"))
            .and_then(value_to_string),
        geometry: MultiPolygon::new(polygons.into_iter().flatten().collect()),
    });
    Ok(())
}

fn arc_refs<T: serde::de::DeserializeOwned>(geometry: &TopoGeometry) -> Result<T> {
    let arcs = geometry.arcs.clone().ok_or_else(|| {
        MapError::ParseError(format!(
            "{} without arcs",
            geometry.kind.as_deref().unwrap_or("geometry")
        ))
    })?;
    Ok(serde_json::from_value(arcs)?)
}

fn polygon(rings: &[Ring], arcs: &[Vec<Coord<f64>>]) -> Result<Option<Polygon<f64>>> {
    let mut decoded = rings.iter().map(|ring| stitch_ring(ring, arcs));
    let exterior = match decoded.next() {
        Some(ring) => ring?,
        None => return Ok(None),
    };
    let interiors = decoded.collect::<Result<Vec<_>>>()?;
    Ok(Some(Polygon::new(exterior, interiors)))
}

/// Joins arcs end to end; consecutive arcs share their junction point
fn stitch_ring(ring: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::new();

    for &index in ring {
        let (position, reversed) = if index >= 0 {
            (index as usize, false)
        } else {
            (!index as usize, true)
        };
        let arc = arcs.get(position).ok_or_else(|| {
            MapError::ParseError(format!(
                "arc index {} out of range ({} arcs)",
                index,
                arcs.len()
            ))
        })?;

        points.pop();
        if reversed {
            points.extend(arc.iter().rev());
        } else {
            points.extend(arc.iter());
        }
    }

    Ok(points.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::TWO_SQUARES;

    fn topology() -> Topology {
        Topology::from_value(serde_json::from_str(TWO_SQUARES).unwrap()).unwrap()
    }

    #[test]
    fn test_arcs_are_delta_decoded_and_transformed() {
        let arcs = topology().decoded_arcs();
        assert_eq!(arcs.len(), 3);
        assert_eq!(arcs[0], vec![Coord { x: 11.0, y: 20.0 }, Coord { x: 11.0, y: 21.0 }]);
        assert_eq!(arcs[1][3], Coord { x: 11.0, y: 20.0 });
    }

    #[test]
    fn test_shapes_stitch_rings() {
        let shapes = topology().shapes("countries").unwrap();
        assert_eq!(shapes.len(), 2);

        let west = &shapes[0];
        assert_eq!(west.id.as_deref(), Some("001"));
        assert_eq!(west.name.as_deref(), Some("West"));
        let ring: Vec<Coord<f64>> = west.geometry.0[0].exterior().0.clone();
        assert_eq!(
            ring,
            vec![
                Coord { x: 11.0, y: 20.0 },
                Coord { x: 11.0, y: 21.0 },
                Coord { x: 10.0, y: 21.0 },
                Coord { x: 10.0, y: 20.0 },
                Coord { x: 11.0, y: 20.0 },
            ]
        );
    }

    #[test]
    fn test_reversed_arc_reference() {
        let shapes = topology().shapes("countries").unwrap();
        let east = &shapes[1];
        assert_eq!(east.id.as_deref(), Some("2"));

        let ring = &east.geometry.0[0].exterior().0;
        assert_eq!(ring.first(), Some(&Coord { x: 11.0, y: 20.0 }));
        assert_eq!(ring[2], Coord { x: 12.0, y: 21.0 });
        assert_eq!(ring.last(), Some(&Coord { x: 11.0, y: 20.0 }));
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn test_missing_object_and_bad_arc_index() {
        let topology = topology();
        assert!(matches!(topology.shapes("land"), Err(MapError::ParseError(_))));

        let arcs = topology.decoded_arcs();
        assert!(stitch_ring(&[7], &arcs).is_err());
    }
}
