use crate::core::{bounds::Bounds, geo::Point};

/// Which way a zoom button steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomButton {
    pub action: ZoomAction,
    pub title: &'static str,
    pub glyph: &'static str,
    /// Hit area in container pixels
    pub bounds: Bounds,
}

/// Zoom in / zoom out buttons stacked in the top-right corner
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomControls {
    pub buttons: Vec<ZoomButton>,
    pub visible: bool,
}

impl ZoomControls {
    const MARGIN: f64 = 24.0;
    const SIZE: f64 = 36.0;
    const GAP: f64 = 8.0;

    /// Lays the buttons out for a container `width` pixels wide
    pub fn layout(width: f64) -> Self {
        let left = width - Self::MARGIN - Self::SIZE;
        let button = |action, title, glyph, top| ZoomButton {
            action,
            title,
            glyph,
            bounds: Bounds::from_origin_and_size(left, top, Self::SIZE, Self::SIZE),
        };

        Self {
            buttons: vec![
                button(ZoomAction::In, "Zoom In", "+", Self::MARGIN),
                button(
                    ZoomAction::Out,
                    "Zoom Out",
                    "\u{2212}",
                    Self::MARGIN + Self::SIZE + Self::GAP,
                ),
            ],
            visible: true,
        }
    }

    /// The button under a container-relative point, if any
    pub fn hit_test(&self, point: &Point) -> Option<ZoomAction> {
        if !self.visible {
            return None;
        }
        self.buttons
            .iter()
            .find(|button| button.bounds.contains(point))
            .map(|button| button.action)
    }
}

/// Decorative telemetry panel in the bottom-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryHud {
    pub origin: Point,
    pub status: &'static str,
    pub lines: [&'static str; 3],
}

impl TelemetryHud {
    pub fn layout(height: f64) -> Self {
        Self {
            origin: Point::new(24.0, height - 24.0 - 72.0),
            status: "LIVE TELEMETRY ACTIVE",
            lines: ["NODE_ID: 4882-X", "TRAFFIC: OPTIMAL", "LATENCY: 24ms"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_hug_top_right() {
        let controls = ZoomControls::layout(800.0);
        let zoom_in = &controls.buttons[0];

        assert_eq!(zoom_in.bounds.max.x, 776.0);
        assert_eq!(zoom_in.bounds.min.y, 24.0);
        assert!(controls.buttons[1].bounds.min.y > zoom_in.bounds.max.y);
    }

    #[test]
    fn test_hit_test() {
        let mut controls = ZoomControls::layout(800.0);
        assert_eq!(controls.hit_test(&Point::new(760.0, 40.0)), Some(ZoomAction::In));
        assert_eq!(controls.hit_test(&Point::new(760.0, 85.0)), Some(ZoomAction::Out));
        assert_eq!(controls.hit_test(&Point::new(100.0, 40.0)), None);

        controls.visible = false;
        assert_eq!(controls.hit_test(&Point::new(760.0, 40.0)), None);
    }
}
