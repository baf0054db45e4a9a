use crate::{
    core::{bounds::Bounds, geo::Point},
    data::geography::CountryFeature,
    rendering::projection::Projection,
};
use geo_types::LineString;

/// A projected country outline ready to be filled
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub key: String,
    pub name: Option<String>,
    /// SVG path data, one closed subpath per ring
    pub path: String,
    /// Projected extent
    pub bounds: Bounds,
}

impl CountryShape {
    /// Projects every ring of the country. Points without a projection are
    /// dropped; rings left with fewer than three points are skipped, and a
    /// country with no drawable ring yields `None`.
    pub fn project(
        country: &CountryFeature,
        position: usize,
        projection: &dyn Projection,
    ) -> Option<Self> {
        let mut path = String::new();
        let mut bounds = Bounds::empty();

        for polygon in &country.geometry.0 {
            let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
            for ring in rings {
                let points = project_ring(ring, projection);
                if points.len() < 3 {
                    continue;
                }
                append_subpath(&mut path, &points);
                for point in &points {
                    bounds.extend(point);
                }
            }
        }

        if path.is_empty() {
            log::trace!("Country {} has no drawable ring", country.key(position));
            return None;
        }

        Some(Self {
            key: country.key(position),
            name: country.name.clone(),
            path,
            bounds,
        })
    }
}

fn project_ring(ring: &LineString<f64>, projection: &dyn Projection) -> Vec<Point> {
    ring.coords()
        .filter_map(|&coord| projection.project(coord.into()))
        .collect()
}

fn append_subpath(path: &mut String, points: &[Point]) {
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{}{:.2},{:.2}", command, point.x, point.y));
    }
    path.push('Z');
}
