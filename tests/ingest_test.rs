//! End-to-end ingestion tests against a synthetic SDE directory tree.
//!
//! Each test builds the on-disk layout the parser expects
//! (`universe/eve/<region>/<constellation>/<system>` plus the flat bsd/fsd
//! auxiliary files), runs the full pipeline and verifies the resulting
//! SQLite database.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use eve_universe_db::ingest::{run_ingest, IngestOptions};
use eve_universe_db::ui::SilentUi;

// =============================================================================
// Fixture
// =============================================================================

const REGION_YAML: &str = r#"
regionID: 10000001
center: [10.0, 20.0, 30.0]
min: [0.0, 0.0, 0.0]
max: [20.0, 40.0, 60.0]
descriptionID: 1
nameID: 2
nebula: 3
wormholeClassID: 0
"#;

const CONSTELLATION_YAML: &str = r#"
constellationID: 20000001
center: [10.0, 20.0, 30.0]
min: [0.0, 0.0, 0.0]
max: [20.0, 40.0, 60.0]
nameID: 4
radius: 5000000
"#;

fn system_yaml(planet_radius: u64) -> String {
    format!(
        r#"
solarSystemID: 30000001
center: [1.0, 2.0, 3.0]
min: [0.0, 0.0, 0.0]
max: [2.0, 4.0, 6.0]
radius: 1000000
security: 0.9
luminosity: 0.03
border: true
corridor: false
fringe: false
hub: true
international: false
regional: true
solarSystemNameID: 5
sunTypeID: 6
wormholeClassID: 0
star:
  id: 40000001
  radius: 300000
  typeID: 6
  statistics:
    age: 30000000000
    spectralClass: G5 V
    temperature: 5778
planets:
  50000001:
    celestialIndex: 1
    typeID: 11
    radius: {planet_radius}
    position: [4.0, 5.0, 6.0]
    planetAttributes:
      heightMap1: 3903
      heightMap2: 3904
      population: false
      shaderPreset: 332
    statistics:
      density: 5.5
      orbitRadius: 46000000000
"#
    )
}

const NAMES_YAML: &str = r#"
- itemID: 10000001
  itemName: Region1
- itemID: 20000001
  itemName: Constellation1
- itemID: 30000001
  itemName: System1
- itemID: 50000001
  itemName: Planet1
"#;

const STATIONS_YAML: &str = r#"
- stationID: 61000001
  stationName: Station Alpha
  solarSystemID: 30000001
  constellationID: 20000001
  regionID: 10000001
  corporationID: 1000035
  operationID: 26
  stationTypeID: 1531
  security: 0.9
  dockingCostPerVolume: 0.0
  maxShipVolumeDockable: 50000000
  officeRentalCost: 10000
  reprocessingEfficiency: 0.5
  reprocessingHangarFlag: 4
  reprocessingStationsTake: 0.05
  x: 7.0
  y: 8.0
  z: 9.0
- stationID: 61000002
  stationName: Orphan Station
  solarSystemID: 99999999
  x: 0.0
  y: 0.0
  z: 0.0
"#;

const RESOURCES_YAML: &str = r#"
50000001:
  workforce: 42000
40000001:
  power: 17
77777777:
  power: 1
  workforce: 1
"#;

struct Fixture {
    _dir: TempDir,
    sde_dir: PathBuf,
    db_path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        Self::with_planet_radius(100)
    }

    fn with_planet_radius(radius: u64) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let sde_dir = dir.path().join("sde");
        let db_path = dir.path().join("universe.db");
        write_sde(&sde_dir, radius);
        Self {
            _dir: dir,
            sde_dir,
            db_path,
        }
    }

    fn run(&self) -> eve_universe_db::IngestSummary {
        self.run_with(IngestOptions::default())
    }

    fn run_with(&self, options: IngestOptions) -> eve_universe_db::IngestSummary {
        run_ingest(&self.sde_dir, &self.db_path, options, &mut SilentUi::new())
            .expect("Ingestion failed")
    }

    fn connection(&self) -> Connection {
        Connection::open(&self.db_path).expect("Failed to open test database")
    }

    fn rewrite_system(&self, planet_radius: u64) {
        let path = self
            .sde_dir
            .join("universe/eve/Region1/Constellation1/System1/solarSystem.yaml");
        fs::write(path, system_yaml(planet_radius)).unwrap();
    }
}

fn write_sde(sde_dir: &Path, planet_radius: u64) {
    let system_dir = sde_dir.join("universe/eve/Region1/Constellation1/System1");
    fs::create_dir_all(&system_dir).unwrap();
    fs::create_dir_all(sde_dir.join("bsd")).unwrap();
    fs::create_dir_all(sde_dir.join("fsd")).unwrap();

    fs::write(
        sde_dir.join("universe/eve/Region1/region.yaml"),
        REGION_YAML,
    )
    .unwrap();
    fs::write(
        sde_dir.join("universe/eve/Region1/Constellation1/constellation.yaml"),
        CONSTELLATION_YAML,
    )
    .unwrap();
    fs::write(system_dir.join("solarSystem.yaml"), system_yaml(planet_radius)).unwrap();

    fs::write(sde_dir.join("bsd/invNames.yaml"), NAMES_YAML).unwrap();
    fs::write(sde_dir.join("bsd/staStations.yaml"), STATIONS_YAML).unwrap();
    fs::write(sde_dir.join("fsd/planetResources.yaml"), RESOURCES_YAML).unwrap();
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_single_system_dataset_round_trips() {
    let fixture = Fixture::new();
    let summary = fixture.run();

    assert_eq!(summary.regions, 1);
    assert_eq!(summary.constellations, 1);
    assert_eq!(summary.systems, 1);
    assert_eq!(summary.planets, 1);

    let conn = fixture.connection();
    assert_eq!(count(&conn, "regions"), 1);
    assert_eq!(count(&conn, "constellations"), 1);
    assert_eq!(count(&conn, "solar_systems"), 1);
    assert_eq!(count(&conn, "stars"), 1);
    assert_eq!(count(&conn, "planets"), 1);
    assert_eq!(count(&conn, "moons"), 0);
    assert_eq!(count(&conn, "asteroid_belts"), 0);

    // Stored vector decodes back to the exact source components.
    let position: String = conn
        .query_row("SELECT position FROM planets WHERE id = 50000001", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(position, "4.0,5.0,6.0");

    let center: String = conn
        .query_row("SELECT center FROM solar_systems WHERE id = 30000001", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(center, "1.0,2.0,3.0");

    let name: String = conn
        .query_row("SELECT name FROM solar_systems WHERE id = 30000001", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(name, "System1");

    let hub: i64 = conn
        .query_row("SELECT hub FROM solar_systems WHERE id = 30000001", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(hub, 1);

    let spectral: String = conn
        .query_row(
            "SELECT stat_spectral_class FROM stars WHERE id = 40000001",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(spectral, "G5 V");
}

#[test]
fn test_rerun_with_changed_field_updates_in_place() {
    let fixture = Fixture::with_planet_radius(100);
    fixture.run();

    fixture.rewrite_system(200);
    fixture.run();

    let conn = fixture.connection();
    assert_eq!(count(&conn, "planets"), 1);

    let radius: String = conn
        .query_row("SELECT radius FROM planets WHERE id = 50000001", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(radius, "200");
}

#[test]
fn test_station_overlay_attachment_and_drop() {
    let fixture = Fixture::new();
    let summary = fixture.run();

    // The record pointing at the absent system 99999999 is dropped without
    // error and without creating a phantom system.
    assert_eq!(summary.stations_attached, 1);

    let conn = fixture.connection();
    assert_eq!(count(&conn, "stations"), 1);
    assert_eq!(count(&conn, "solar_systems"), 1);

    let (name, system_id): (String, i64) = conn
        .query_row(
            "SELECT name, solar_system_id FROM stations WHERE id = 61000001",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "Station Alpha");
    assert_eq!(system_id, 30000001);
}

#[test]
fn test_resource_overlay_merged_into_bodies() {
    let fixture = Fixture::new();
    let summary = fixture.run();

    // 77777777 matches neither planets nor stars and is ignored.
    assert_eq!(summary.resources_matched, 2);

    let conn = fixture.connection();
    let workforce: i64 = conn
        .query_row("SELECT workforce FROM planets WHERE id = 50000001", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(workforce, 42000);

    let power: i64 = conn
        .query_row("SELECT power FROM stars WHERE id = 40000001", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(power, 17);
}

#[test]
fn test_batch_boundaries_do_not_affect_row_counts() {
    // 6 entities (region, constellation, system, star, planet, station)
    // with a threshold of 2: three full batches.
    let fixture = Fixture::new();
    let summary = fixture.run_with(IngestOptions {
        batch_size: 2,
        replace: false,
    });

    assert_eq!(summary.export.rows, 6);
    assert_eq!(summary.export.batches, 3);

    let conn = fixture.connection();
    assert_eq!(
        count(&conn, "regions")
            + count(&conn, "constellations")
            + count(&conn, "solar_systems")
            + count(&conn, "stars")
            + count(&conn, "planets")
            + count(&conn, "stations"),
        6
    );
}

#[test]
fn test_replace_mode_rebuilds_database() {
    let fixture = Fixture::new();
    fixture.run();
    let summary = fixture.run_with(IngestOptions {
        batch_size: 10_000,
        replace: true,
    });

    assert_eq!(summary.export.rows, 6);
    let conn = fixture.connection();
    assert_eq!(count(&conn, "planets"), 1);
}

#[test]
fn test_missing_universe_tree_is_fatal() {
    let fixture = Fixture::new();
    fs::remove_dir_all(fixture.sde_dir.join("universe")).unwrap();

    // Without the containment tree there is nothing to ingest; an empty
    // database must not pass as a successful run.
    let result = run_ingest(
        &fixture.sde_dir,
        &fixture.db_path,
        IngestOptions::default(),
        &mut SilentUi::new(),
    );
    assert!(result.is_err());
    assert!(!fixture.db_path.exists());
}

#[test]
fn test_missing_overlay_file_is_fatal() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.sde_dir.join("fsd/planetResources.yaml")).unwrap();

    let result = run_ingest(
        &fixture.sde_dir,
        &fixture.db_path,
        IngestOptions::default(),
        &mut SilentUi::new(),
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_name_dictionary_is_fatal() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.sde_dir.join("bsd/invNames.yaml")).unwrap();

    let result = run_ingest(
        &fixture.sde_dir,
        &fixture.db_path,
        IngestOptions::default(),
        &mut SilentUi::new(),
    );
    assert!(result.is_err());
}
