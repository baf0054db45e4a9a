use crate::{core::geo::Point, network::graph::Connection, rendering::projection::Projection};

/// A connection drawn as a quadratic curve between two projected hubs
///
/// The control point is the projected midpoint lifted by a fixed number of
/// pixels. The bend is cosmetic; it does not follow the great circle.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPath {
    pub id: String,
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl ArcPath {
    /// `None` when either end has no projection
    pub fn from_connection(
        connection: &Connection,
        projection: &dyn Projection,
        lift_px: f64,
    ) -> Option<Self> {
        let start = projection.project(connection.from)?;
        let end = projection.project(connection.to)?;
        Some(Self::between(connection.id.clone(), start, end, lift_px))
    }

    pub fn between(id: String, start: Point, end: Point, lift_px: f64) -> Self {
        let midpoint = start.midpoint(&end);
        Self {
            id,
            start,
            control: Point::new(midpoint.x, midpoint.y - lift_px),
            end,
        }
    }

    /// SVG path data: `M start Q control end`
    pub fn path_data(&self) -> String {
        format!(
            "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }

    /// Point on the curve at `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        self.start
            .multiply(u * u)
            .add(&self.control.multiply(2.0 * u * t))
            .add(&self.end.multiply(t * t))
    }
}
