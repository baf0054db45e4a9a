use anyhow::Context;
use hubmap::{
    HttpGeographySource, MapEvent, NetworkMapBuilder, NetworkMapConfig, SvgRenderer,
};
use std::{path::PathBuf, sync::Arc, time::Duration};

const DEFAULT_OUTPUT: &str = "network-map.svg";

/// Renders the global operations network map to an SVG file
///
/// Usage: `hubmap-app [OUTPUT.svg]`. Set `HUBMAP_CONFIG` to a JSON
/// configuration file to override the defaults.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let config = match std::env::var_os("HUBMAP_CONFIG") {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", PathBuf::from(&path).display()))?;
            NetworkMapConfig::from_json(&json).context("parsing config")?
        }
        None => NetworkMapConfig::default(),
    };

    let url = config.geography.url();
    let mut map = NetworkMapBuilder::new()
        .with_config(config)
        .build()
        .context("building network map")?;

    map.on("geographyloaded", |event| {
        if let MapEvent::GeographyLoaded { countries } = event {
            log::info!("Geography ready: {} countries", countries);
        }
    });
    map.on("geographyfailed", |event| {
        if let MapEvent::GeographyFailed { reason } = event {
            log::warn!("Rendering placeholder only: {}", reason);
        }
    });

    map.load_geography(Arc::new(HttpGeographySource::new(url)));
    while !map.poll_geography() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    map.process_events();

    let connections = map.connections();
    log::info!(
        "{} hubs, {} connections within {} km",
        map.hubs().len(),
        connections.len(),
        map.threshold_km()
    );

    let svg = map
        .render_svg(&SvgRenderer::new())
        .context("rendering network map")?;
    std::fs::write(&output, svg).with_context(|| format!("writing {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}
