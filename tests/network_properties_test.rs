use geo::HaversineDistance;
use hubmap::{build_connections, haversine_km, Hub, HubTable, LatLng, Viewport};
use std::collections::HashSet;

fn hubs() -> HubTable {
    HubTable::global_operations()
}

fn hub(id: &str) -> LatLng {
    hubs().get(id).unwrap().coordinates
}

#[test]
fn test_distance_identity_and_symmetry() {
    let table = hubs();
    for a in table.iter() {
        assert_eq!(haversine_km(a.coordinates, a.coordinates), 0.0);
        for b in table.iter() {
            let ab = haversine_km(a.coordinates, b.coordinates);
            let ba = haversine_km(b.coordinates, a.coordinates);
            assert!((ab - ba).abs() < 1e-9, "{} <-> {}", a.id, b.id);
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn test_triangle_inequality() {
    let table = hubs();
    for a in table.iter() {
        for b in table.iter() {
            for c in table.iter() {
                let ac = haversine_km(a.coordinates, c.coordinates);
                let via_b = haversine_km(a.coordinates, b.coordinates)
                    + haversine_km(b.coordinates, c.coordinates);
                assert!(ac <= via_b + 1e-6, "{} -> {} -> {}", a.id, b.id, c.id);
            }
        }
    }
}

#[test]
fn test_matches_geo_haversine() {
    let table = hubs();
    for a in table.iter() {
        for b in table.iter() {
            let ours = haversine_km(a.coordinates, b.coordinates);
            let from = geo::Point::new(a.coordinates.lng, a.coordinates.lat);
            let to = geo::Point::new(b.coordinates.lng, b.coordinates.lat);
            let theirs = from.haversine_distance(&to) / 1000.0;
            // Radii differ by 8.8 m
            assert!((ours - theirs).abs() <= theirs * 1e-5 + 1e-9);
        }
    }
}

#[test]
fn test_dubai_london() {
    let distance = haversine_km(hub("dubai"), hub("london"));
    assert!((distance - 5473.0).abs() < 10.0, "got {}", distance);

    let pair = HubTable::new(vec![
        hubs().get("dubai").unwrap().clone(),
        hubs().get("london").unwrap().clone(),
    ])
    .unwrap();

    let connections = build_connections(&pair, 6500.0);
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].id, "dubai-london");
    assert!(build_connections(&pair, 1000.0).is_empty());
}

#[test]
fn test_threshold_extremes() {
    let table = hubs();
    let n = table.len();

    assert!(build_connections(&table, 0.0).is_empty());
    assert!(build_connections(&table, -1.0).is_empty());
    assert_eq!(build_connections(&table, 20_016.0).len(), n * (n - 1) / 2);
}

#[test]
fn test_no_self_or_duplicate_pairs() {
    let connections = build_connections(&hubs(), 20_016.0);
    let mut seen = HashSet::new();

    for connection in &connections {
        assert_ne!(connection.from_id, connection.to_id);
        let mut pair = [connection.from_id.clone(), connection.to_id.clone()];
        pair.sort();
        assert!(seen.insert(pair), "duplicate {}", connection.id);
    }
}

#[test]
fn test_default_network_at_6500_km() {
    let connections = build_connections(&hubs(), 6500.0);
    let ids: Vec<&str> = connections.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(ids.len(), 25);
    assert_eq!(&ids[..3], &["dubai-lagos", "dubai-london", "dubai-moscow"]);
    assert_eq!(ids.last(), Some(&"addisAbaba-antananarivo"));
    assert!(connections.iter().all(|c| c.distance_km <= 6500.0));
}

#[test]
fn test_small_tables() {
    let empty = HubTable::default();
    assert!(build_connections(&empty, 6500.0).is_empty());

    let single = HubTable::new(vec![Hub::new("solo", LatLng::new(0.0, 0.0), "Solo", "Nowhere")])
        .unwrap();
    assert!(build_connections(&single, 6500.0).is_empty());
}

#[test]
fn test_zoom_in_sequence_clamps_at_max() {
    let mut viewport = Viewport::default();
    let mut levels = vec![viewport.zoom];
    while viewport.zoom_in() {
        levels.push(viewport.zoom);
    }

    assert_eq!(levels, vec![1.0, 1.5, 2.25, 3.375, 5.0625, 6.0]);
    assert!(!viewport.zoom_in());
    assert_eq!(viewport.zoom, 6.0);
}

#[test]
fn test_zoom_stays_in_bounds() {
    let mut viewport = Viewport::default();
    for step in 0..20 {
        if step % 3 == 0 {
            viewport.zoom_out();
        } else {
            viewport.zoom_in();
        }
        assert!(viewport.zoom >= 1.0 && viewport.zoom <= 6.0);
    }

    while viewport.zoom_out() {}
    assert_eq!(viewport.zoom, 1.0);
}

#[test]
fn test_set_viewport_overwrites_unconditionally() {
    let mut viewport = Viewport::default();
    let center = LatLng::from_lng_lat(120.0, 30.0);

    assert!(viewport.set_viewport(center, 9.0));
    assert_eq!(viewport.center, center);
    assert_eq!(viewport.zoom, 9.0);
}
