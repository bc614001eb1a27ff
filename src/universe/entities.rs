//! The universe containment tree: Region -> Constellation -> SolarSystem ->
//! {Star, Planet -> {Moon, AsteroidBelt}}, plus Stations attached to systems
//! by the overlay pass.
//!
//! All identifiers are the stable SDE item ids and double as primary keys in
//! the output database. Entities are rebuilt from scratch on every run; the
//! only post-parse mutations are the overlay fields (Planet.workforce,
//! Star.power, SolarSystem.stations).

use rust_decimal::Decimal;

use crate::types::DecVector3;

#[derive(Debug, Default)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub center: DecVector3,
    pub min: DecVector3,
    pub max: DecVector3,
    pub description_id: i64,
    // Not present in the SDE region documents; kept as an always-zero
    // placeholder until a source is identified.
    pub faction_id: i64,
    pub name_id: i64,
    pub nebula: i64,
    pub wormhole_class_id: i64,
    pub constellations: Vec<Constellation>,
}

#[derive(Debug, Default)]
pub struct Constellation {
    pub id: i64,
    pub name: String,
    pub center: DecVector3,
    pub min: DecVector3,
    pub max: DecVector3,
    pub name_id: i64,
    pub radius: Decimal,
    pub solar_systems: Vec<SolarSystem>,
}

#[derive(Debug, Default)]
pub struct SolarSystem {
    pub id: i64,
    pub name: String,
    pub center: DecVector3,
    pub min: DecVector3,
    pub max: DecVector3,
    pub radius: Decimal,
    pub security: f64,
    pub luminosity: f64,
    pub border: bool,
    pub corridor: bool,
    pub fringe: bool,
    pub hub: bool,
    pub international: bool,
    pub regional: bool,
    pub name_id: i64,
    pub sun_type_id: i64,
    pub wormhole_class_id: i64,
    pub star: Star,
    pub planets: Vec<Planet>,
    /// Populated by the station overlay after the tree is built.
    pub stations: Vec<Station>,
}

#[derive(Debug, Default)]
pub struct Star {
    pub id: i64,
    pub radius: Decimal,
    pub type_id: i64,
    /// Filled by the resource overlay; zero until then.
    pub power: i64,
    pub statistics: Statistics,
}

#[derive(Debug, Default)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub position: DecVector3,
    pub radius: Decimal,
    pub type_id: i64,
    pub celestial_index: i64,
    /// Filled by the resource overlay; zero until then.
    pub workforce: i64,
    pub attributes: PlanetAttributes,
    pub statistics: Statistics,
    pub asteroid_belts: Vec<AsteroidBelt>,
    pub moons: Vec<Moon>,
}

#[derive(Debug, Default)]
pub struct Moon {
    pub id: i64,
    pub name: String,
    pub position: DecVector3,
    pub radius: Decimal,
    pub type_id: i64,
    pub statistics: Statistics,
}

#[derive(Debug, Default)]
pub struct AsteroidBelt {
    pub id: i64,
    pub position: DecVector3,
    pub type_id: i64,
    pub statistics: Statistics,
}

/// NPC station, produced entirely from the flat `bsd/staStations.yaml`
/// overlay rather than the hierarchical tree.
#[derive(Debug, Default)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub constellation_id: i64,
    pub corporation_id: i64,
    pub region_id: i64,
    pub solar_system_id: i64,
    pub operation_id: i64,
    pub station_type_id: i64,
    pub docking_cost_per_volume: f64,
    pub max_ship_volume_dockable: f64,
    pub office_rental_cost: f64,
    pub reprocessing_efficiency: f64,
    pub reprocessing_hangar_flag: i64,
    pub reprocessing_stations_take: f64,
    pub security: f64,
    pub position: DecVector3,
}

/// Orbital-body statistics. A value object with no identity of its own;
/// always present on the owner, default-valued when the source omits the
/// section.
#[derive(Debug, Default)]
pub struct Statistics {
    pub age: Decimal,
    pub density: f64,
    pub eccentricity: f64,
    pub escape_velocity: f64,
    pub fragmented: bool,
    pub life: f64,
    pub locked: bool,
    pub mass_dust: f64,
    pub mass_gas: f64,
    pub orbit_period: Decimal,
    pub orbit_radius: Decimal,
    pub pressure: f64,
    pub radius: Decimal,
    pub rotation_rate: f64,
    pub spectral_class: String,
    pub surface_gravity: f64,
    pub temperature: f64,
}

/// Planet rendering attributes; structurally required for every planet.
#[derive(Debug, Default)]
pub struct PlanetAttributes {
    pub height_map_1: i64,
    pub height_map_2: i64,
    pub population: bool,
    pub shader_preset: i64,
}
