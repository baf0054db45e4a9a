pub mod context;
pub mod projection;
pub mod scene;
pub mod svg;

pub use context::{LineRenderStyle, PointRenderStyle, PolygonRenderStyle};
pub use projection::{EqualEarth, Orthographic, Projection};
pub use scene::{MapScene, RenderPass, Scene, TooltipLayer};
pub use svg::SvgRenderer;
