//! Drawable layers of the network map, in paint order:
//! country polygons, connection arcs, hub markers.

pub mod arc;
pub mod country;
pub mod marker;

pub use arc::ArcPath;
pub use country::CountryShape;
pub use marker::{MarkerGlyph, MarkerKind};
