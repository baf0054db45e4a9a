use crate::core::{bounds::Bounds, viewport::Transform};

/// Screen-space culling of projected shapes against the canvas.
///
/// Shapes are kept in projection space; the zoom transform is applied to
/// their bounds before testing, so a pan or zoom changes what survives
/// without re-projecting anything.
pub struct Culling;

impl Culling {
    /// Returns `true` if the rectangle is at least partially inside the canvas.
    pub fn aabb_intersects(canvas: &Bounds, target: &Bounds) -> bool {
        canvas.intersects(target)
    }

    /// Maps projected bounds through the zoom transform
    pub fn transform_bounds(transform: &Transform, bounds: &Bounds) -> Bounds {
        // Scale is positive, so corners map to corners
        Bounds::new(transform.apply(&bounds.min), transform.apply(&bounds.max))
    }

    /// Whether projected bounds land on a `width` x `height` canvas once
    /// the zoom transform is applied
    pub fn visible_on_canvas(transform: &Transform, bounds: &Bounds, width: f64, height: f64) -> bool {
        let canvas = Bounds::from_origin_and_size(0.0, 0.0, width, height);
        Self::aabb_intersects(&canvas, &Self::transform_bounds(transform, bounds))
    }
}
