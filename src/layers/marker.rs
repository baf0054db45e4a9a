use crate::{
    core::geo::Point, network::hub::Hub, rendering::context::PointRenderStyle,
    rendering::projection::Projection,
};

/// Closed set of marker shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerKind {
    /// Transparent hit target, pinging blue ring and white core
    #[default]
    Pulse,
    /// Single white dot
    Dot,
}

/// One concentric circle of a marker glyph
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRing {
    pub style: PointRenderStyle,
    pub animated: bool,
}

impl MarkerKind {
    /// Circles drawn for this kind, back to front
    pub fn rings(&self) -> Vec<MarkerRing> {
        let ring = |fill: &str, radius, animated| MarkerRing {
            style: PointRenderStyle::new(fill, radius),
            animated,
        };

        match self {
            Self::Pulse => vec![
                ring("transparent", 6.0, false),
                ring("#60a5fa", 3.0, true),
                ring("white", 2.0, false),
            ],
            Self::Dot => vec![ring("white", 2.0, false)],
        }
    }

    /// Radius of the pointer hit area
    pub fn hit_radius(&self) -> f64 {
        self.rings()
            .iter()
            .map(|ring| ring.style.radius)
            .fold(0.0, f64::max)
    }
}

/// A hub marker at its projected position
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGlyph {
    pub hub_id: String,
    pub position: Point,
    pub kind: MarkerKind,
}

impl MarkerGlyph {
    /// `None` when the hub has no projection
    pub fn from_hub(hub: &Hub, projection: &dyn Projection, kind: MarkerKind) -> Option<Self> {
        let position = projection.project(hub.coordinates)?;
        Some(Self {
            hub_id: hub.id.clone(),
            position,
            kind,
        })
    }

    /// Whether a point in the same space as `position` hits the marker
    pub fn hit_test(&self, point: &Point) -> bool {
        self.position.distance_to(point) <= self.kind.hit_radius()
    }
}
