use hubmap::prelude::*;
#[cfg(feature = "tokio-runtime")]
use std::time::Duration;

/// Two small countries as plain GeoJSON, one near Lagos and one near Tokyo
const COUNTRIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "id": "566", "properties": { "name": "Nigeria" },
          "geometry": { "type": "Polygon",
                        "coordinates": [[[3, 4], [14, 4], [14, 13], [3, 13], [3, 4]]] } },
        { "type": "Feature", "id": "392", "properties": { "name": "Japan" },
          "geometry": { "type": "MultiPolygon",
                        "coordinates": [[[[130, 31], [141, 31], [141, 41], [130, 41], [130, 31]]]] } }
    ]
}"#;

#[cfg(feature = "tokio-runtime")]
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(feature = "tokio-runtime")]
async fn wait_for_geography(map: &mut NetworkMap) {
    for _ in 0..200 {
        if map.poll_geography() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("geography load did not finish");
}

/// Loads a static payload through the async loader and renders the full map
#[cfg(feature = "tokio-runtime")]
#[tokio::test]
async fn test_static_geography_renders_full_map() {
    init_logging();
    let mut map = NetworkMapBuilder::new().build().unwrap();

    map.load_geography(Arc::new(StaticGeographySource::new(COUNTRIES)));
    assert!(map.scene().is_loading());

    wait_for_geography(&mut map).await;
    assert!(map.geography_state().is_ready());

    let scene = map.scene();
    let layers = scene.as_map().unwrap();
    assert_eq!(layers.countries.len(), 2);
    assert_eq!(layers.arcs.len(), 25);
    assert_eq!(layers.markers.len(), 13);

    let svg = map.render_svg(&SvgRenderer::new()).unwrap();
    assert_eq!(svg.matches("data-id=").count(), 25);
    assert_eq!(svg.matches("data-hub=").count(), 13);
    assert!(svg.contains("<title>Nigeria</title>"));
    assert!(!svg.contains("INITIALIZING GLOBAL UPLINK..."));
}

/// A broken payload leaves the placeholder up and reports the failure
#[cfg(feature = "tokio-runtime")]
#[tokio::test]
async fn test_failed_geography_keeps_placeholder() {
    init_logging();
    let mut map = NetworkMapBuilder::new().build().unwrap();

    map.load_geography(Arc::new(StaticGeographySource::new("{ not json")));
    wait_for_geography(&mut map).await;

    assert!(matches!(map.geography_state(), GeographyState::Failed(_)));
    let events = map.process_events();
    assert!(matches!(events.as_slice(), [MapEvent::GeographyFailed { .. }]));

    let svg = map.render_svg(&SvgRenderer::new()).unwrap();
    assert!(svg.contains("INITIALIZING GLOBAL UPLINK..."));
    assert!(!svg.contains("data-hub="));

    // Never retried
    assert!(!map.poll_geography());
}

#[test]
fn test_hover_tooltip_scenario() {
    let mut map = NetworkMapBuilder::new()
        .with_container(Bounds::from_origin_and_size(50.0, 20.0, 800.0, 600.0))
        .build()
        .unwrap();
    map.set_geography(Geography::from_json_str(COUNTRIES).unwrap());

    map.handle_input(InputEvent::PointerEnter {
        hub_id: "tokyo".to_string(),
        client: Point::new(150.0, 80.0),
    });
    assert_eq!(map.hover_target().unwrap().position, Point::new(100.0, 60.0));

    let tooltip = map.scene().as_map().unwrap().tooltip.clone().unwrap();
    assert_eq!(tooltip.anchor, Point::new(110.0, 30.0));
    assert_eq!(tooltip.title, "Tokyo");
    assert_eq!(tooltip.subtitle, "Japan");

    map.handle_input(InputEvent::PointerLeave);
    assert!(map.scene().as_map().unwrap().tooltip.is_none());
}

#[test]
fn test_zoom_buttons_drive_viewport() {
    let mut map = NetworkMapBuilder::new().build().unwrap();
    let controls = ZoomControls::layout(map.config().render.width);
    let zoom_in = controls.buttons[0].bounds.center();
    let zoom_out = controls.buttons[1].bounds.center();

    for _ in 0..10 {
        map.handle_input(InputEvent::Click { position: zoom_in });
    }
    assert_eq!(map.viewport().zoom, 6.0);

    for _ in 0..10 {
        map.handle_input(InputEvent::Click { position: zoom_out });
    }
    assert_eq!(map.viewport().zoom, 1.0);

    // 5 steps up and 5 down; the overflowing clicks change nothing
    assert_eq!(map.process_events().len(), 10);
}

#[test]
fn test_move_end_pans_the_group() {
    let mut map = NetworkMapBuilder::new().build().unwrap();
    map.set_geography(Geography::from_json_str(COUNTRIES).unwrap());
    let before = map.scene().as_map().unwrap().transform;

    map.handle_input(InputEvent::MoveEnd {
        center: LatLng::from_lng_lat(139.65, 35.68),
        zoom: 3.0,
    });
    let scene = map.scene();
    let after = scene.as_map().unwrap();

    assert_ne!(before, after.transform);
    assert_eq!(after.transform.scale, 3.0);

    // Tokyo lands in the middle of the canvas
    let tokyo = after.markers.iter().find(|m| m.hub_id == "tokyo").unwrap();
    let on_screen = after.transform.apply(&tokyo.position);
    assert!(on_screen.distance_to(&Point::new(400.0, 300.0)) < 1.0);
}

#[test]
fn test_globe_hides_far_side() {
    let mut map = NetworkMapBuilder::globe(LatLng::from_lng_lat(-170.0, 0.0))
        .build()
        .unwrap();
    map.set_geography(Geography::from_json_str(COUNTRIES).unwrap());

    let scene = map.scene();
    let layers = scene.as_map().unwrap();
    let marker_ids: Vec<&str> = layers.markers.iter().map(|m| m.hub_id.as_str()).collect();

    assert!(marker_ids.contains(&"tokyo"));
    assert!(!marker_ids.contains(&"london"));
    assert!(!marker_ids.contains(&"lagos"));
    assert!(layers.arcs.len() < 25);
    // Nigeria is behind the globe
    assert!(layers.countries.iter().all(|c| c.name.as_deref() != Some("Nigeria")));
}

#[test]
fn test_config_round_trip() {
    let mut config = NetworkMapConfig::default();
    config.network.threshold_km = 5000.0;
    config.geography.resolution = AtlasResolution::Fine;
    config.render.show_hud = false;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed = NetworkMapConfig::from_json(&json).unwrap();
    assert_eq!(parsed, config);

    let mut map = NetworkMapBuilder::new().with_config(parsed).build().unwrap();
    assert!(map.connections().len() < 25);
    assert!(map.scene().is_loading());
}
