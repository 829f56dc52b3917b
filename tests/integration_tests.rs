use quadtile::config::{EARTH_EQUATOR_LENGTH, HALF_EQUATOR};
use quadtile::{
    GeoRecord, IndexBuilder, IndexConfig, Place, QuadTree, TileIndex, TileLoader, project,
    tile_path,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Small office dataset spread over a few cities.
fn offices() -> Vec<Place> {
    let cities = [
        (37.6173, 55.7558, "Moscow"),
        (30.3351, 59.9343, "Saint Petersburg"),
        (60.6057, 56.8389, "Yekaterinburg"),
        (82.9346, 55.0084, "Novosibirsk"),
        (49.1221, 55.7887, "Kazan"),
    ];

    let mut places = Vec::new();
    let mut id = 0;
    for (lng, lat, city) in cities {
        for i in 0..40 {
            let offset = i as f64 * 0.003;
            places.push(Place::new(
                id,
                lng + offset,
                lat - offset / 2.0,
                format!("{}, office {}", city, i),
            ));
            id += 1;
        }
    }
    places
}

#[test]
fn test_small_domain_scenario() {
    let mut tree = QuadTree::new(1000.0, 1000.0, 2, 3);

    tree.insert(10.0, 10.0, "a");
    tree.insert(20.0, 20.0, "b");
    assert!(tree.root().is_leaf());
    assert_eq!(tree.collect(), vec![&"a", &"b"]);

    tree.insert(600.0, 600.0, "c");
    tree.insert(900.0, 700.0, "d");
    assert!(!tree.root().is_leaf());

    // (600, 600) and (900, 700) are both south-east of the center.
    assert_eq!(tree.get_subtree("3").unwrap().collect(), vec![&"c", &"d"]);
    assert_eq!(tree.get_subtree("0").unwrap().collect(), vec![&"a", &"b"]);
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_tile_path_addresses_tile_center() {
    let mut tree = QuadTree::new(1000.0, 1000.0, 1, 4);
    for (i, (x, y)) in [(100.0, 100.0), (900.0, 100.0), (100.0, 900.0), (900.0, 900.0)]
        .into_iter()
        .enumerate()
    {
        tree.insert(x, y, i);
    }
    // Center of tile (1, 2) in a 4x4 grid.
    tree.insert(375.0, 625.0, 99);

    let path = tile_path(1, 2, 2);
    assert_eq!(path.to_string(), "21");
    assert_eq!(tree.locate(375.0, 625.0), path);
    assert!(tree.subtree(&path).iter().any(|id| *id == 99));
}

#[test]
fn test_build_and_query_offices() {
    init_logging();

    let dataset = offices();
    let index = IndexBuilder::new().max_items(10).build(dataset.clone()).unwrap();
    assert_eq!(index.len(), dataset.len());

    let stats = index.stats();
    assert_eq!(stats.object_count, dataset.len());
    assert!(stats.depth > 1);
    assert!(stats.depth <= index.config().max_depth);

    // Every record is found in the zoom-10 tile containing it.
    let zoom = 10u8;
    let tile_size = EARTH_EQUATOR_LENGTH / f64::from(1u32 << zoom);
    for place in &dataset {
        let planar = project(place.lng.unwrap(), place.lat.unwrap());
        let (x, y) = ((planar.x / tile_size) as u32, (planar.y / tile_size) as u32);
        let found = index.query(x, y, zoom);
        assert!(
            found.iter().any(|p| p.id == place.id),
            "office {} missing from tile ({}, {}, {})",
            place.id,
            x,
            y,
            zoom
        );
    }

    // All offices sit in the north-east quadrant of the world.
    assert_eq!(index.query(1, 0, 1).len(), dataset.len());
    assert!(index.query(0, 0, 1).is_empty());
    assert!(index.query(1, 1, 1).is_empty());
}

#[test]
fn test_config_file_drives_builder() {
    let config = IndexConfig::from_json(r#"{ "max_items": 5, "max_depth": 6 }"#).unwrap();
    assert_eq!(config.width, EARTH_EQUATOR_LENGTH);

    let index = IndexBuilder::new().config(config).build(offices()).unwrap();
    assert!(index.stats().depth <= 6);
    assert_eq!(index.len(), 200);
}

#[test]
fn test_path_queries_agree_with_tile_queries() {
    let index = IndexBuilder::new().max_items(8).build(offices()).unwrap();

    for zoom in 0..=6u8 {
        let side = 1u32 << zoom;
        for x in 0..side {
            for y in 0..side {
                let path = tile_path(x, y, zoom);
                let by_tile: Vec<u64> = index.query(x, y, zoom).iter().map(|p| p.id).collect();
                let by_path: Vec<u64> = index
                    .get(&path.to_string())
                    .unwrap()
                    .iter()
                    .map(|p| p.id)
                    .collect();
                assert_eq!(by_tile, by_path);
            }
        }
    }
}

#[test]
fn test_loader_walks_zoom_levels() {
    init_logging();

    let index = IndexBuilder::new().max_items(10).build(offices()).unwrap();
    let mut loader = TileLoader::new(&index);

    // Zoom into Moscow the way a map client would.
    let moscow = project(37.6173, 55.7558);
    let mut received = 0;
    for zoom in [12u8, 10, 8, 4, 0] {
        let tile_size = EARTH_EQUATOR_LENGTH / f64::from(1u32 << zoom);
        let (x, y) = ((moscow.x / tile_size) as u32, (moscow.y / tile_size) as u32);
        let fresh = loader.load(x, y, zoom);

        for place in &fresh {
            assert!(loader.has_seen(&place.id()));
        }
        received += fresh.len();

        // Reloading never returns anything new.
        assert!(loader.load(x, y, zoom).is_empty());
    }

    // The whole-world tile completes the set exactly once.
    assert_eq!(received, 200);
    assert_eq!(loader.seen_count(), 200);
}

#[test]
fn test_geojson_export_of_tile() {
    let index = TileIndex::build(offices()).unwrap();
    let collection = index.query_geojson(0, 0, 0).unwrap();
    assert_eq!(collection.features.len(), 200);
    assert!(collection.features.iter().all(|f| f.geometry.is_some()));
    assert!(
        collection
            .features
            .iter()
            .any(|f| f.property("id") == Some(&serde_json::json!(0)))
    );

    let text = quadtile::geojson::to_geojson_string(index.query(1, 0, 1)).unwrap();
    assert!(text.contains("FeatureCollection"));
    assert!(text.contains("Kazan, office 0"));
}

#[test]
fn test_projection_origin_is_domain_center() {
    let center = project(0.0, 0.0);
    assert_eq!(center.x, HALF_EQUATOR);
    assert!((center.y - HALF_EQUATOR).abs() < 1e-6);
}
