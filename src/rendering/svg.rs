//! Serialises a [`Scene`] into a standalone SVG document.

use crate::{
    layers::MarkerGlyph,
    rendering::scene::{MapScene, Scene, TooltipLayer},
    ui::{TelemetryHud, ZoomControls},
    MapError, Result,
};
use std::fmt::Write;

const BACKGROUND: &str = "#0f172a";
const ACCENT: &str = "#60a5fa";
const MUTED_TEXT: &str = "#94a3b8";

#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// Emit SMIL animations for pulsing arcs and pinging markers
    pub animate: bool,
    pub title: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            animate: true,
            title: "Global Operations Network".to_string(),
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn render(&self, scene: &Scene) -> Result<String> {
        let mut out = String::with_capacity(64 * 1024);
        self.write_scene(&mut out, scene)
            .map_err(|e| MapError::Render(e.to_string()))?;
        Ok(out)
    }

    fn write_scene(&self, s: &mut String, scene: &Scene) -> std::fmt::Result {
        let (w, h) = scene.size();
        writeln!(s, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        writeln!(s, "  <title>{}</title>", escape(&self.title))?;
        writeln!(s, r#"  <rect width="{w}" height="{h}" fill="{BACKGROUND}"/>"#)?;

        match scene {
            Scene::Loading { message, .. } => {
                writeln!(
                    s,
                    r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" fill="{MUTED_TEXT}" font-family="monospace" font-size="12" letter-spacing="2">{}</text>"#,
                    w / 2.0,
                    h / 2.0,
                    escape(message)
                )?;
            }
            Scene::Map(map) => self.write_map(s, map)?,
        }

        writeln!(s, "</svg>")
    }

    fn write_map(&self, s: &mut String, map: &MapScene) -> std::fmt::Result {
        write_defs(s)?;

        writeln!(s, r#"  <g transform="{}">"#, map.transform.to_svg())?;

        let country = &map.country_style;
        writeln!(
            s,
            r#"    <g class="countries" fill="{}" stroke="{}" stroke-width="{}">"#,
            country.fill_color, country.stroke_color, country.stroke_width
        )?;
        for shape in &map.countries {
            match &shape.name {
                Some(name) => writeln!(
                    s,
                    r#"      <path data-key="{}" d="{}"><title>{}</title></path>"#,
                    escape(&shape.key),
                    shape.path,
                    escape(name)
                )?,
                None => writeln!(s, r#"      <path data-key="{}" d="{}"/>"#, escape(&shape.key), shape.path)?,
            }
        }
        writeln!(s, "    </g>")?;

        self.write_arcs(s, map)?;

        writeln!(s, r#"    <g class="hubs">"#)?;
        for marker in &map.markers {
            self.write_marker(s, marker)?;
        }
        writeln!(s, "    </g>")?;
        writeln!(s, "  </g>")?;

        if let Some(tooltip) = &map.tooltip {
            write_tooltip(s, tooltip)?;
        }
        if let Some(controls) = &map.controls {
            write_controls(s, controls)?;
        }
        if let Some(hud) = &map.hud {
            write_hud(s, hud)?;
        }
        Ok(())
    }

    fn write_arcs(&self, s: &mut String, map: &MapScene) -> std::fmt::Result {
        let style = &map.arc_style;
        write!(
            s,
            r#"    <g class="connections" fill="none" stroke="{}" stroke-width="{}" filter="url(#glow)""#,
            style.color, style.width
        )?;
        if let Some(dash) = style.dash_array() {
            write!(s, r#" stroke-dasharray="{dash}""#)?;
        }
        writeln!(s, ">")?;

        for arc in &map.arcs {
            if self.animate && style.pulse {
                writeln!(
                    s,
                    r#"      <path data-id="{}" d="{}"><animate attributeName="opacity" values="0.4;1;0.4" dur="2s" repeatCount="indefinite"/></path>"#,
                    escape(&arc.id),
                    arc.path_data()
                )?;
            } else {
                writeln!(s, r#"      <path data-id="{}" d="{}"/>"#, escape(&arc.id), arc.path_data())?;
            }
        }
        writeln!(s, "    </g>")
    }

    fn write_marker(&self, s: &mut String, marker: &MarkerGlyph) -> std::fmt::Result {
        let (x, y) = (marker.position.x, marker.position.y);
        writeln!(s, r#"      <g data-hub="{}">"#, escape(&marker.hub_id))?;
        for ring in marker.kind.rings() {
            let r = ring.style.radius;
            if ring.animated && self.animate {
                writeln!(
                    s,
                    r#"        <circle cx="{x:.2}" cy="{y:.2}" r="{r}" fill="{}"><animate attributeName="r" values="{r};{};{r}" dur="1.5s" repeatCount="indefinite"/><animate attributeName="opacity" values="1;0;1" dur="1.5s" repeatCount="indefinite"/></circle>"#,
                    ring.style.fill_color,
                    r * 2.0
                )?;
            } else {
                writeln!(
                    s,
                    r#"        <circle cx="{x:.2}" cy="{y:.2}" r="{r}" fill="{}"/>"#,
                    ring.style.fill_color
                )?;
            }
        }
        writeln!(s, "      </g>")
    }
}

fn write_defs(s: &mut String) -> std::fmt::Result {
    writeln!(s, "  <defs>")?;
    writeln!(
        s,
        r#"    <filter id="glow" x="-50%" y="-50%" width="200%" height="200%">"#
    )?;
    writeln!(s, r#"      <feGaussianBlur stdDeviation="2" result="blur"/>"#)?;
    writeln!(
        s,
        r#"      <feMerge><feMergeNode in="blur"/><feMergeNode in="SourceGraphic"/></feMerge>"#
    )?;
    writeln!(s, "    </filter>")?;
    writeln!(s, "  </defs>")
}

fn write_tooltip(s: &mut String, tooltip: &TooltipLayer) -> std::fmt::Result {
    let (x, y) = (tooltip.anchor.x, tooltip.anchor.y);
    writeln!(s, r#"  <g class="tooltip" transform="translate({x:.2} {y:.2})">"#)?;
    writeln!(
        s,
        r#"    <rect width="180" height="64" rx="6" fill="{BACKGROUND}" fill-opacity="0.9" stroke="{ACCENT}" stroke-opacity="0.3"/>"#
    )?;
    writeln!(
        s,
        r#"    <text x="12" y="18" fill="{ACCENT}" font-family="monospace" font-size="9" letter-spacing="1">{}</text>"#,
        escape(&tooltip.heading.to_uppercase())
    )?;
    writeln!(
        s,
        r#"    <text x="12" y="36" fill="white" font-family="sans-serif" font-size="13" font-weight="bold">{}</text>"#,
        escape(&tooltip.title)
    )?;
    writeln!(
        s,
        r#"    <text x="12" y="52" fill="{MUTED_TEXT}" font-family="sans-serif" font-size="11">{}</text>"#,
        escape(&tooltip.subtitle)
    )?;
    writeln!(s, "  </g>")
}

fn write_controls(s: &mut String, controls: &ZoomControls) -> std::fmt::Result {
    if !controls.visible {
        return Ok(());
    }
    writeln!(s, r#"  <g class="zoom-controls">"#)?;
    for button in &controls.buttons {
        let b = &button.bounds;
        let center = b.center();
        writeln!(
            s,
            r##"    <g><title>{}</title><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="4" fill="{BACKGROUND}" stroke="#334155"/><text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="central" fill="white" font-size="18">{}</text></g>"##,
            button.title,
            b.min.x,
            b.min.y,
            b.width(),
            b.height(),
            center.x,
            center.y,
            button.glyph
        )?;
    }
    writeln!(s, "  </g>")
}

fn write_hud(s: &mut String, hud: &TelemetryHud) -> std::fmt::Result {
    let (x, y) = (hud.origin.x, hud.origin.y);
    writeln!(
        s,
        r#"  <g class="telemetry" transform="translate({x:.1} {y:.1})" font-family="monospace" font-size="10">"#
    )?;
    writeln!(s, r##"    <circle cx="4" cy="8" r="3" fill="#22c55e"/>"##)?;
    writeln!(s, r#"    <text x="14" y="12" fill="{ACCENT}">{}</text>"#, hud.status)?;
    for (i, line) in hud.lines.iter().enumerate() {
        writeln!(
            s,
            r#"    <text x="0" y="{}" fill="{MUTED_TEXT}">{}</text>"#,
            30 + i * 16,
            line
        )?;
    }
    writeln!(s, "  </g>")
}

/// Escapes text for use in element content and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{config::RenderConfig, geo::Point, viewport::Transform},
        layers::{ArcPath, MarkerKind},
        rendering::context::{LineRenderStyle, PolygonRenderStyle},
    };

    fn map_scene() -> MapScene {
        MapScene {
            width: 800.0,
            height: 600.0,
            transform: Transform::identity(),
            countries: Vec::new(),
            arcs: vec![ArcPath::between(
                "dubai-london".to_string(),
                Point::new(0.0, 0.0),
                Point::new(100.0, 20.0),
                50.0,
            )],
            markers: vec![MarkerGlyph {
                hub_id: "dubai".to_string(),
                position: Point::new(10.0, 20.0),
                kind: MarkerKind::Pulse,
            }],
            tooltip: Some(TooltipLayer {
                anchor: Point::new(110.0, 30.0),
                heading: "Active Locations",
                title: "Dubai".to_string(),
                subtitle: "Trinidad & Tobago".to_string(),
            }),
            controls: Some(ZoomControls::layout(800.0)),
            hud: None,
            country_style: PolygonRenderStyle::default(),
            arc_style: LineRenderStyle::default(),
        }
    }

    #[test]
    fn test_loading_placeholder() {
        let config = RenderConfig::default();
        let scene = Scene::Loading {
            width: config.width,
            height: config.height,
            message: crate::constants::LOADING_PLACEHOLDER,
        };
        let svg = SvgRenderer::new().render(&scene).unwrap();

        assert!(svg.contains("INITIALIZING GLOBAL UPLINK..."));
        assert!(!svg.contains("<path"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_map_document() {
        let svg = SvgRenderer::new().render(&Scene::Map(map_scene())).unwrap();

        assert!(svg.contains(r#"<filter id="glow""#));
        assert!(svg.contains(r#"stroke-dasharray="4 4""#));
        assert!(svg.contains(r#"stroke="rgba(96, 165, 250, 0.5)""#));
        assert!(svg.contains(r#"d="M 0.00 0.00 Q 50.00 -40.00 100.00 20.00""#));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("ACTIVE LOCATIONS"));
        assert!(svg.contains("Trinidad &amp; Tobago"));
        assert!(svg.contains("Zoom In"));
    }

    #[test]
    fn test_static_output_has_no_animation() {
        let svg = SvgRenderer::new()
            .with_animation(false)
            .render(&Scene::Map(map_scene()))
            .unwrap();
        assert!(!svg.contains("<animate"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&apos;");
    }
}
