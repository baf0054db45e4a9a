pub mod controls;
pub mod tooltip;

pub use controls::{TelemetryHud, ZoomAction, ZoomControls};
pub use tooltip::{HoverState, HoverTarget};
