//! Post-tree enrichment passes. Both overlays are flat, identifier-keyed
//! files merged into the already-built tree; they run only after the
//! per-kind lookups are fully populated and are order-insensitive between
//! themselves. A missing overlay file is fatal for the run.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::parser::walker;
use crate::universe::entities::{Region, Station};
use crate::universe::parse::IngestContext;

/// Merge NPC stations from `bsd/staStations.yaml` into their owning solar
/// systems. The file lists every station in the cluster, including ones in
/// system kinds the tree walk does not ingest; records whose system id is
/// not in the systems lookup are dropped by design, not reported.
pub fn apply_station_overlay(
    sde_dir: &Path,
    regions: &mut [Region],
    ctx: &IngestContext,
) -> Result<usize> {
    let path = sde_dir.join("bsd").join("staStations.yaml");
    let root = walker::load_document(&path)
        .with_context(|| format!("Failed to load station list: {:?}", path))?;

    let Some(records) = root.as_sequence() else {
        bail!("Station list is not a sequence: {:?}", path);
    };

    let mut by_system: HashMap<i64, Vec<Station>> = HashMap::new();
    let mut attached = 0;

    for record in records {
        let station = parse_station(record)?;
        if ctx.systems.contains(&station.solar_system_id) {
            attached += 1;
            by_system
                .entry(station.solar_system_id)
                .or_default()
                .push(station);
        }
    }

    for_each_system(regions, |system| {
        if let Some(stations) = by_system.remove(&system.id) {
            system.stations = stations;
        }
    });

    Ok(attached)
}

fn parse_station(node: &serde_yaml::Value) -> Result<Station> {
    let id = walker::require_i64(node, "stationID")?;

    Ok(Station {
        id,
        name: walker::get(node, "stationName", walker::parse_string),
        constellation_id: walker::get(node, "constellationID", walker::parse_i64),
        corporation_id: walker::get(node, "corporationID", walker::parse_i64),
        region_id: walker::get(node, "regionID", walker::parse_i64),
        solar_system_id: walker::get(node, "solarSystemID", walker::parse_i64),
        operation_id: walker::get(node, "operationID", walker::parse_i64),
        station_type_id: walker::get(node, "stationTypeID", walker::parse_i64),
        docking_cost_per_volume: walker::get(node, "dockingCostPerVolume", walker::parse_f64),
        max_ship_volume_dockable: walker::get(node, "maxShipVolumeDockable", walker::parse_f64),
        office_rental_cost: walker::get(node, "officeRentalCost", walker::parse_f64),
        reprocessing_efficiency: walker::get(node, "reprocessingEfficiency", walker::parse_f64),
        reprocessing_hangar_flag: walker::get(node, "reprocessingHangarFlag", walker::parse_i64),
        reprocessing_stations_take: walker::get(node, "reprocessingStationsTake", walker::parse_f64),
        security: walker::get(node, "security", walker::parse_f64),
        position: station_position(node)?,
    })
}

/// Station coordinates are flat `x`/`y`/`z` scalars rather than a sequence.
fn station_position(node: &serde_yaml::Value) -> Result<crate::types::DecVector3> {
    Ok(crate::types::DecVector3::new(
        walker::get(node, "x", walker::parse_decimal),
        walker::get(node, "y", walker::parse_decimal),
        walker::get(node, "z", walker::parse_decimal),
    ))
}

/// Merge `fsd/planetResources.yaml` power/workforce figures into the bodies
/// they describe: workforce onto planets, power onto stars. An id matching
/// neither lookup is silently ignored.
pub fn apply_resource_overlay(
    sde_dir: &Path,
    regions: &mut [Region],
    ctx: &IngestContext,
) -> Result<usize> {
    let path = sde_dir.join("fsd").join("planetResources.yaml");
    let root = walker::load_document(&path)
        .with_context(|| format!("Failed to load planet resources: {:?}", path))?;

    let mut planet_workforce: HashMap<i64, i64> = HashMap::new();
    let mut star_power: HashMap<i64, i64> = HashMap::new();

    for (id, node) in walker::root_entries(&root)? {
        let power = walker::get(node, "power", walker::parse_i64);
        let workforce = walker::get(node, "workforce", walker::parse_i64);

        if ctx.planets.contains(&id) {
            planet_workforce.insert(id, workforce);
        }
        if ctx.stars.contains(&id) {
            star_power.insert(id, power);
        }
    }

    let matched = planet_workforce.len() + star_power.len();

    for_each_system(regions, |system| {
        if let Some(power) = star_power.get(&system.star.id) {
            system.star.power = *power;
        }
        for planet in &mut system.planets {
            if let Some(workforce) = planet_workforce.get(&planet.id) {
                planet.workforce = *workforce;
            }
        }
    });

    Ok(matched)
}

fn for_each_system(
    regions: &mut [Region],
    mut f: impl FnMut(&mut crate::universe::entities::SolarSystem),
) {
    for region in regions {
        for constellation in &mut region.constellations {
            for system in &mut constellation.solar_systems {
                f(system);
            }
        }
    }
}
