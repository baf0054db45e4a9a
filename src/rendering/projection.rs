//! Map projections from geographic coordinates to canvas pixels.
//!
//! The renderer receives its projection explicitly, so arc and marker
//! geometry can be checked against any implementation of [`Projection`].

use crate::core::geo::{LatLng, Point};

/// Mapping from geographic coordinates to canvas pixels
pub trait Projection: Send + Sync {
    /// Projects a coordinate, or `None` when it has no position in this
    /// projection (clipped away, or a non-finite input)
    fn project(&self, lat_lng: LatLng) -> Option<Point>;

    fn name(&self) -> &'static str;
}

impl<P: Projection + ?Sized> Projection for Box<P> {
    fn project(&self, lat_lng: LatLng) -> Option<Point> {
        (**self).project(lat_lng)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

fn finite(point: Point) -> Option<Point> {
    point.is_finite().then_some(point)
}

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;

/// Equal Earth pseudocylindrical projection (Šavrič, Patterson & Jenny 2018)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqualEarth {
    pub scale: f64,
    pub translate: Point,
}

impl EqualEarth {
    /// Projection centred on a `width` x `height` canvas
    pub fn new(scale: f64, width: f64, height: f64) -> Self {
        Self {
            scale,
            translate: Point::new(width / 2.0, height / 2.0),
        }
    }

    /// Unit-sphere projection of `(lambda, phi)` in radians
    fn raw(lambda: f64, phi: f64) -> (f64, f64) {
        let m = 3f64.sqrt() / 2.0;
        let l = (m * phi.sin()).asin();
        let l2 = l * l;
        let l6 = l2 * l2 * l2;

        let x = lambda * l.cos() / (m * (A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2)));
        let y = l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2));
        (x, y)
    }
}

impl Projection for EqualEarth {
    fn project(&self, lat_lng: LatLng) -> Option<Point> {
        let (x, y) = Self::raw(lat_lng.lng.to_radians(), lat_lng.lat.to_radians());
        finite(Point::new(
            self.translate.x + x * self.scale,
            self.translate.y - y * self.scale,
        ))
    }

    fn name(&self) -> &'static str {
        "equal-earth"
    }
}

/// Orthographic globe view; the far hemisphere is clipped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    pub scale: f64,
    pub translate: Point,
    /// Point of the globe facing the viewer
    pub rotation: LatLng,
}

impl Orthographic {
    pub fn new(scale: f64, width: f64, height: f64, rotation: LatLng) -> Self {
        Self {
            scale,
            translate: Point::new(width / 2.0, height / 2.0),
            rotation,
        }
    }
}

impl Projection for Orthographic {
    fn project(&self, lat_lng: LatLng) -> Option<Point> {
        let phi = lat_lng.lat.to_radians();
        let phi0 = self.rotation.lat.to_radians();
        let delta_lambda = (lat_lng.lng - self.rotation.lng).to_radians();

        let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * delta_lambda.cos();
        if !(cos_c >= 0.0) {
            log::trace!("{:?} is on the far side of the globe", lat_lng);
            return None;
        }

        let x = phi.cos() * delta_lambda.sin();
        let y = phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * delta_lambda.cos();
        finite(Point::new(
            self.translate.x + x * self.scale,
            self.translate.y - y * self.scale,
        ))
    }

    fn name(&self) -> &'static str {
        "orthographic"
    }
}
