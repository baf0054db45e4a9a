use serde::{Deserialize, Serialize};

/// Styles for different rendering primitives
///
/// Colors are CSS color strings so they can be written straight into SVG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRenderStyle {
    pub fill_color: String,
    pub radius: f64,
}

impl PointRenderStyle {
    pub fn new(fill_color: impl Into<String>, radius: f64) -> Self {
        Self {
            fill_color: fill_color.into(),
            radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineRenderStyle {
    pub color: String,
    pub width: f64,
    pub dash_pattern: Vec<f64>,
    /// Adds the pulsing opacity animation
    pub pulse: bool,
}

impl Default for LineRenderStyle {
    fn default() -> Self {
        Self {
            color: "rgba(96, 165, 250, 0.5)".to_string(),
            width: 2.0,
            dash_pattern: vec![4.0, 4.0],
            pulse: true,
        }
    }
}

impl LineRenderStyle {
    /// `stroke-dasharray` value, or `None` for a solid line
    pub fn dash_array(&self) -> Option<String> {
        if self.dash_pattern.is_empty() {
            return None;
        }
        Some(
            self.dash_pattern
                .iter()
                .map(|segment| format!("{}", segment))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonRenderStyle {
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
}

impl Default for PolygonRenderStyle {
    fn default() -> Self {
        Self {
            fill_color: "#1e293b".to_string(),
            stroke_color: "#334155".to_string(),
            stroke_width: 0.5,
        }
    }
}
