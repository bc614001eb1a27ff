//! Parse the nested universe tree from the SDE directory layout
//! `universe/eve/<region>/<constellation>/<system>`.
//!
//! Traversal is depth-first, region-major: a region's constellations and
//! systems are fully parsed before the next region begins, so the per-kind
//! identifier lookups are complete before any overlay runs.

use anyhow::{ensure, Context, Result};
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::names::NameDictionary;
use crate::parser::walker;
use crate::ui::{Phase, Ui};
use crate::universe::entities::*;

/// Shared parse state: the name dictionary plus the per-kind identifier
/// lookups the overlay passes resolve against. Written only during the
/// single tree pass, read-only afterwards.
pub struct IngestContext {
    pub names: NameDictionary,
    pub systems: HashSet<i64>,
    pub planets: HashSet<i64>,
    pub stars: HashSet<i64>,
}

impl IngestContext {
    pub fn new(names: NameDictionary) -> Self {
        Self {
            names,
            systems: HashSet::new(),
            planets: HashSet::new(),
            stars: HashSet::new(),
        }
    }
}

/// Find all files with the given name beneath a directory, sorted for
/// deterministic traversal order. Any unreadable subtree aborts the walk;
/// skipping it would produce a silently incomplete tree.
fn find_files(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
        if entry.file_type().is_file() && entry.file_name() == file_name {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Parse the full containment tree. Any discovered region, constellation or
/// system file that fails to read or parse aborts the run; the tree cannot
/// be considered complete without it.
pub fn parse_universe(
    sde_dir: &Path,
    ctx: &mut IngestContext,
    ui: &mut impl Ui,
) -> Result<Vec<Region>> {
    ui.set_phase(Phase::Parsing);

    let universe_root = sde_dir.join("universe").join("eve");
    ensure!(
        universe_root.is_dir(),
        "Universe tree not found at {:?}",
        universe_root
    );
    let region_files = find_files(&universe_root, "region.yaml")?;
    let total = region_files.len() as u64;

    let mut regions = Vec::with_capacity(region_files.len());

    for (i, region_file) in region_files.iter().enumerate() {
        let mut region = parse_region_file(region_file, ctx)
            .with_context(|| format!("Failed to parse region: {:?}", region_file))?;

        let region_dir = region_file
            .parent()
            .with_context(|| format!("No parent directory for {:?}", region_file))?;

        for constellation_file in find_files(region_dir, "constellation.yaml")? {
            let mut constellation = parse_constellation_file(&constellation_file, ctx)
                .with_context(|| {
                    format!("Failed to parse constellation: {:?}", constellation_file)
                })?;

            let constellation_dir = constellation_file
                .parent()
                .with_context(|| format!("No parent directory for {:?}", constellation_file))?;

            for system_file in find_files(constellation_dir, "solarSystem.yaml")? {
                let system = parse_system_file(&system_file, ctx)
                    .with_context(|| format!("Failed to parse system: {:?}", system_file))?;
                constellation.solar_systems.push(system);
            }

            region.constellations.push(constellation);
        }

        ui.set_progress(i as u64 + 1, total, region.name.clone());
        regions.push(region);
    }

    ui.clear_progress();
    ui.log(format!("Parsed {} regions", regions.len()));

    Ok(regions)
}

fn parse_region_file(path: &Path, ctx: &IngestContext) -> Result<Region> {
    let root = walker::load_document(path)?;

    let id = walker::require_i64(&root, "regionID")?;
    let name = ctx.names.require(id)?.to_string();

    Ok(Region {
        id,
        name,
        center: walker::vector3(&root, "center")?,
        min: walker::vector3(&root, "min")?,
        max: walker::vector3(&root, "max")?,
        description_id: walker::get(&root, "descriptionID", walker::parse_i64),
        faction_id: 0,
        name_id: walker::get(&root, "nameID", walker::parse_i64),
        nebula: walker::get(&root, "nebula", walker::parse_i64),
        wormhole_class_id: walker::get(&root, "wormholeClassID", walker::parse_i64),
        constellations: Vec::new(),
    })
}

fn parse_constellation_file(path: &Path, ctx: &IngestContext) -> Result<Constellation> {
    let root = walker::load_document(path)?;

    let id = walker::require_i64(&root, "constellationID")?;
    let name = ctx.names.require(id)?.to_string();

    Ok(Constellation {
        id,
        name,
        center: walker::vector3(&root, "center")?,
        min: walker::vector3(&root, "min")?,
        max: walker::vector3(&root, "max")?,
        name_id: walker::get(&root, "nameID", walker::parse_i64),
        radius: walker::get(&root, "radius", walker::parse_decimal),
        solar_systems: Vec::new(),
    })
}

fn parse_system_file(path: &Path, ctx: &mut IngestContext) -> Result<SolarSystem> {
    let root = walker::load_document(path)?;

    let id = walker::require_i64(&root, "solarSystemID")?;
    let name = ctx.names.require(id)?.to_string();

    let mut system = SolarSystem {
        id,
        name,
        center: walker::vector3(&root, "center")?,
        min: walker::vector3(&root, "min")?,
        max: walker::vector3(&root, "max")?,
        radius: walker::get(&root, "radius", walker::parse_decimal),
        security: walker::get(&root, "security", walker::parse_f64),
        luminosity: walker::get(&root, "luminosity", walker::parse_f64),
        border: walker::get(&root, "border", walker::parse_bool),
        corridor: walker::get(&root, "corridor", walker::parse_bool),
        fringe: walker::get(&root, "fringe", walker::parse_bool),
        hub: walker::get(&root, "hub", walker::parse_bool),
        international: walker::get(&root, "international", walker::parse_bool),
        regional: walker::get(&root, "regional", walker::parse_bool),
        name_id: walker::get(&root, "solarSystemNameID", walker::parse_i64),
        sun_type_id: walker::get(&root, "sunTypeID", walker::parse_i64),
        wormhole_class_id: walker::get(&root, "wormholeClassID", walker::parse_i64),
        star: Star::default(),
        planets: Vec::new(),
        stations: Vec::new(),
    };

    ctx.systems.insert(id);

    // Exactly one star, required.
    let star_node = walker::require_mapping(&root, "star")?;
    system.star = parse_star(star_node, ctx)?;

    // Planet-less systems are valid (starless wormhole systems exist).
    if root.get("planets").map_or(true, |p| !p.is_mapping()) {
        eprintln!("{} has no planets", system.name);
    }
    for (planet_id, node) in walker::child_entries(&root, "planets")? {
        system.planets.push(parse_planet(planet_id, node, ctx)?);
    }

    Ok(system)
}

fn parse_star(node: &Value, ctx: &mut IngestContext) -> Result<Star> {
    let id = walker::require_i64(node, "id")?;

    let star = Star {
        id,
        radius: walker::get(node, "radius", walker::parse_decimal),
        type_id: walker::get(node, "typeID", walker::parse_i64),
        power: 0,
        statistics: parse_statistics(node),
    };

    ctx.stars.insert(id);
    Ok(star)
}

fn parse_planet(id: i64, node: &Value, ctx: &mut IngestContext) -> Result<Planet> {
    let name = ctx.names.require(id)?.to_string();

    let attributes_node = walker::require_mapping(node, "planetAttributes")
        .with_context(|| format!("Planet {}", id))?;

    let mut planet = Planet {
        id,
        name,
        position: walker::vector3(node, "position")?,
        radius: walker::get(node, "radius", walker::parse_decimal),
        type_id: walker::get(node, "typeID", walker::parse_i64),
        celestial_index: walker::get(node, "celestialIndex", walker::parse_i64),
        workforce: 0,
        attributes: parse_planet_attributes(attributes_node),
        statistics: parse_statistics(node),
        asteroid_belts: Vec::new(),
        moons: Vec::new(),
    };

    ctx.planets.insert(id);

    for (belt_id, belt_node) in walker::child_entries(node, "asteroidBelts")? {
        planet.asteroid_belts.push(parse_asteroid_belt(belt_id, belt_node)?);
    }

    for (moon_id, moon_node) in walker::child_entries(node, "moons")? {
        planet.moons.push(parse_moon(moon_id, moon_node, ctx)?);
    }

    Ok(planet)
}

fn parse_moon(id: i64, node: &Value, ctx: &IngestContext) -> Result<Moon> {
    Ok(Moon {
        id,
        name: ctx.names.require(id)?.to_string(),
        position: walker::vector3(node, "position")?,
        radius: walker::get(node, "radius", walker::parse_decimal),
        type_id: walker::get(node, "typeID", walker::parse_i64),
        statistics: parse_statistics(node),
    })
}

fn parse_asteroid_belt(id: i64, node: &Value) -> Result<AsteroidBelt> {
    Ok(AsteroidBelt {
        id,
        position: walker::vector3(node, "position")?,
        type_id: walker::get(node, "typeID", walker::parse_i64),
        statistics: parse_statistics(node),
    })
}

/// Parse the optional `statistics` section of a body node, defaulting the
/// whole block when absent.
fn parse_statistics(owner: &Value) -> Statistics {
    let Some(node) = owner.get("statistics") else {
        return Statistics::default();
    };

    Statistics {
        age: walker::get(node, "age", walker::parse_decimal),
        density: walker::get(node, "density", walker::parse_f64),
        eccentricity: walker::get(node, "eccentricity", walker::parse_f64),
        escape_velocity: walker::get(node, "escapeVelocity", walker::parse_f64),
        fragmented: walker::get(node, "fragmented", walker::parse_bool),
        life: walker::get(node, "life", walker::parse_f64),
        locked: walker::get(node, "locked", walker::parse_bool),
        mass_dust: walker::get(node, "massDust", walker::parse_f64),
        mass_gas: walker::get(node, "massGas", walker::parse_f64),
        orbit_period: walker::get(node, "orbitPeriod", walker::parse_decimal),
        orbit_radius: walker::get(node, "orbitRadius", walker::parse_decimal),
        pressure: walker::get(node, "pressure", walker::parse_f64),
        radius: walker::get(node, "radius", walker::parse_decimal),
        rotation_rate: walker::get(node, "rotationRate", walker::parse_f64),
        spectral_class: walker::get(node, "spectralClass", walker::parse_string),
        surface_gravity: walker::get(node, "surfaceGravity", walker::parse_f64),
        temperature: walker::get(node, "temperature", walker::parse_f64),
    }
}

fn parse_planet_attributes(node: &Value) -> PlanetAttributes {
    PlanetAttributes {
        height_map_1: walker::get(node, "heightMap1", walker::parse_i64),
        height_map_2: walker::get(node, "heightMap2", walker::parse_i64),
        population: walker::get(node, "population", walker::parse_bool),
        shader_preset: walker::get(node, "shaderPreset", walker::parse_i64),
    }
}
