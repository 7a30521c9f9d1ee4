//! Integration tests for whole-city generation
//!
//! These tests verify the complete pipeline:
//! - Config and catalog loading from the files under data/
//! - Road carving followed by the building/tree/tile sweep
//! - Placement output written to and read back from JSON
//!
//! Runs are seeded, so every expectation holds for the exact same city on
//! every run.

use std::path::PathBuf;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cityforge::catalog::{ModelCatalog, Part};
use cityforge::city::{generate_city, generate_with_rng, render_grid, CityGenerator};
use cityforge::core::CityConfig;
use cityforge::roads::carve_network;
use cityforge::scene::{PlacementFile, PlacementMetadata, PlacementRecorder};
use cityforge::spatial::{CellState, CityGrid};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn seeded(seed: u64) -> CityConfig {
    CityConfig {
        seed: Some(seed),
        ..CityConfig::default()
    }
}

// ============================================================================
// Data files
// ============================================================================

#[test]
fn test_sample_config_matches_defaults() {
    let config = CityConfig::load_from_toml(&data_path("city.toml")).unwrap();
    assert_eq!(config, CityConfig::default());
}

#[test]
fn test_sample_catalog_matches_builtin() {
    let loaded = ModelCatalog::load_from_toml(&data_path("catalog.toml")).unwrap();
    let builtin = ModelCatalog::with_defaults();

    for part in Part::ALL {
        let a = loaded.model(part).unwrap();
        let b = builtin.model(part).unwrap();
        assert_eq!(a.styles().collect::<Vec<_>>(), b.styles().collect::<Vec<_>>(), "{part}");
        for style in b.styles() {
            assert_eq!(a.variants(style), b.variants(style), "{part} style {style}");
            let (ha, hb) = (a.height(style).unwrap(), b.height(style).unwrap());
            assert!((ha - hb).length() < 1e-6, "{part} style {style}");
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Full default city: every placement accounted for in the summary
#[test]
fn test_default_city() {
    let catalog = ModelCatalog::with_defaults();
    let mut recorder = PlacementRecorder::new();
    let city = generate_city(&seeded(2024), &catalog, &mut recorder).unwrap();
    let summary = &city.summary;

    assert_eq!(summary.city_size, 30);
    assert!(summary.road_cells >= 1);
    assert_eq!(summary.placements, recorder.len());

    let roads = city.grid.count(CellState::RoadH) + city.grid.count(CellState::RoadV);
    assert_eq!(summary.road_cells, roads);
    assert_eq!(summary.building_cells, city.grid.count(CellState::Claimed));

    let tiles = recorder.with_prefix("road_").count()
        + recorder.with_prefix("crosswalk_").count()
        + recorder.with_prefix("crossing_").count();
    assert_eq!(tiles, roads);
}

#[test]
fn test_instance_names_are_unique() {
    let catalog = ModelCatalog::with_defaults();
    let config = CityConfig {
        city_size: 40,
        max_floors: 9,
        building_chance: 80,
        fork_chance: 70,
        ..seeded(5)
    };
    let mut recorder = PlacementRecorder::new();
    generate_city(&config, &catalog, &mut recorder).unwrap();

    let mut names: Vec<_> = recorder.placements().iter().map(|p| p.name.as_str()).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn test_single_cell_city() {
    let catalog = ModelCatalog::with_defaults();
    let config = CityConfig {
        city_size: 1,
        ..seeded(9)
    };
    let mut recorder = PlacementRecorder::new();
    let city = generate_city(&config, &catalog, &mut recorder).unwrap();

    assert_eq!(render_grid(&city.grid), "-\n");
    assert_eq!(recorder.len(), 1);
    // Out-of-bounds on both sides: ahead counts first
    assert_eq!(recorder.placements()[0].name, "crossing_0_0");
    assert_eq!(recorder.placements()[0].variant.as_str(), "in/roadTile_038.obj");
}

#[test]
fn test_no_buildings_without_roads_nearby() {
    let catalog = ModelCatalog::with_defaults();
    let config = CityConfig {
        city_size: 20,
        fork_chance: 0,
        building_chance: 100,
        ..seeded(3)
    };
    let mut recorder = PlacementRecorder::new();
    let city = generate_city(&config, &catalog, &mut recorder).unwrap();

    // Only the straight trunk in row 10: buildings can only start in rows 9 and 11
    for (cell, state) in city.grid.iter() {
        if state == CellState::Claimed {
            assert!((9..=13).contains(&cell.x), "{:?}", cell);
        }
    }
    assert!(city.summary.buildings > 0);
    assert_eq!(city.summary.trees, 0);
}

#[test]
fn test_placement_file_round_trip_on_disk() {
    let catalog = ModelCatalog::with_defaults();
    let generator = CityGenerator::new(&seeded(11), &catalog).unwrap();
    let mut recorder = PlacementRecorder::new();
    let city = generator.generate(&mut recorder).unwrap();

    let metadata = PlacementMetadata {
        created_by: Some("city_integration".into()),
        seed: city.summary.seed,
        city_size: Some(city.summary.city_size),
    };
    let file = recorder.into_file(Some(metadata));

    let path = std::env::temp_dir().join(format!("cityforge_{}.json", std::process::id()));
    file.write(&path).unwrap();
    let loaded = PlacementFile::read(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, file);
    assert_eq!(loaded.metadata.unwrap().seed, Some(11));
}

#[test]
fn test_custom_catalog_missing_style_aborts() {
    let catalog = ModelCatalog::parse_toml(
        r#"
        [[parts]]
        name = "road"
        [[parts.styles]]
        style = 0
        variants = ["r.obj", "rc.obj"]

        [[parts]]
        name = "crossing"
        [[parts.styles]]
        style = 0
        variants = ["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8"]
        "#,
    )
    .unwrap();

    let config = CityConfig {
        building_chance: 100,
        ..seeded(1)
    };
    let mut recorder = PlacementRecorder::new();
    let err = generate_city(&config, &catalog, &mut recorder).unwrap_err();
    assert!(err.to_string().contains("Missing model variant"));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_same_seed_same_placements(size in 1usize..25, fork in 0u32..=100, seed in any::<u64>()) {
        let catalog = ModelCatalog::with_defaults();
        let config = CityConfig { city_size: size, fork_chance: fork, max_floors: 8, ..seeded(seed) };

        let mut first = PlacementRecorder::new();
        let mut second = PlacementRecorder::new();
        let a = generate_city(&config, &catalog, &mut first).unwrap();
        let b = generate_city(&config, &catalog, &mut second).unwrap();

        prop_assert_eq!(first.placements(), second.placements());
        prop_assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn prop_sweep_never_rewrites_roads(size in 1usize..25, fork in 0u32..=100, seed in any::<u64>()) {
        let catalog = ModelCatalog::with_defaults();
        let config = CityConfig { city_size: size, fork_chance: fork, building_chance: 70, max_floors: 8, ..seeded(seed) };

        // The sweep starts from exactly the network carved with the same stream
        let mut roads_only = CityGrid::new(size);
        carve_network(&mut roads_only, fork, &mut ChaCha8Rng::seed_from_u64(seed));

        let mut recorder = PlacementRecorder::new();
        let city = generate_with_rng(&config, &catalog, &mut recorder, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();

        for ((cell, before), (_, after)) in roads_only.iter().zip(city.grid.iter()) {
            match before {
                CellState::RoadH | CellState::RoadV => prop_assert_eq!(after, before, "{:?}", cell),
                CellState::Empty => prop_assert!(matches!(after, CellState::Empty | CellState::Claimed)),
                CellState::Claimed => prop_assert!(false, "claimed before the sweep"),
            }
        }
    }
}
