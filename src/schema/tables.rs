//! Static table definitions for the universe database, one per entity kind.
//!
//! Column order here is load-bearing: the row builders in `writer::rows`
//! emit values in exactly this order. The `stat_` block mirrors the
//! `statistics` section of the source documents and is inlined into each
//! owning body's table; `attr_` mirrors `planetAttributes`.

use super::types::{Column, ColumnType::*, ForeignKey, TableSchema};

pub const REGIONS: TableSchema = TableSchema {
    name: "regions",
    columns: &[
        Column::required("id", Integer),
        Column::required("name", Text),
        Column::required("center", Vector),
        Column::required("min", Vector),
        Column::required("max", Vector),
        Column::new("description_id", Integer),
        Column::new("faction_id", Integer),
        Column::new("name_id", Integer),
        Column::new("nebula", Integer),
        Column::new("wormhole_class_id", Integer),
    ],
    foreign_keys: &[],
};

pub const CONSTELLATIONS: TableSchema = TableSchema {
    name: "constellations",
    columns: &[
        Column::required("id", Integer),
        Column::required("region_id", Integer),
        Column::required("name", Text),
        Column::required("center", Vector),
        Column::required("min", Vector),
        Column::required("max", Vector),
        Column::new("radius", Decimal),
        Column::new("name_id", Integer),
    ],
    foreign_keys: &[ForeignKey::new("region_id", "regions")],
};

pub const SOLAR_SYSTEMS: TableSchema = TableSchema {
    name: "solar_systems",
    columns: &[
        Column::required("id", Integer),
        Column::required("constellation_id", Integer),
        Column::required("name", Text),
        Column::required("center", Vector),
        Column::required("min", Vector),
        Column::required("max", Vector),
        Column::new("radius", Decimal),
        Column::new("security", Real),
        Column::new("luminosity", Real),
        Column::new("border", Boolean),
        Column::new("corridor", Boolean),
        Column::new("fringe", Boolean),
        Column::new("hub", Boolean),
        Column::new("international", Boolean),
        Column::new("regional", Boolean),
        Column::new("name_id", Integer),
        Column::new("sun_type_id", Integer),
        Column::new("wormhole_class_id", Integer),
    ],
    foreign_keys: &[ForeignKey::new("constellation_id", "constellations")],
};

pub const STARS: TableSchema = TableSchema {
    name: "stars",
    columns: &[
        Column::required("id", Integer),
        Column::required("solar_system_id", Integer),
        Column::new("radius", Decimal),
        Column::new("type_id", Integer),
        Column::new("power", Integer),
        Column::new("stat_age", Decimal),
        Column::new("stat_density", Real),
        Column::new("stat_eccentricity", Real),
        Column::new("stat_escape_velocity", Real),
        Column::new("stat_fragmented", Boolean),
        Column::new("stat_life", Real),
        Column::new("stat_locked", Boolean),
        Column::new("stat_mass_dust", Real),
        Column::new("stat_mass_gas", Real),
        Column::new("stat_orbit_period", Decimal),
        Column::new("stat_orbit_radius", Decimal),
        Column::new("stat_pressure", Real),
        Column::new("stat_radius", Decimal),
        Column::new("stat_rotation_rate", Real),
        Column::new("stat_spectral_class", Text),
        Column::new("stat_surface_gravity", Real),
        Column::new("stat_temperature", Real),
    ],
    foreign_keys: &[ForeignKey::new("solar_system_id", "solar_systems")],
};

pub const PLANETS: TableSchema = TableSchema {
    name: "planets",
    columns: &[
        Column::required("id", Integer),
        Column::required("solar_system_id", Integer),
        Column::required("name", Text),
        Column::required("position", Vector),
        Column::new("radius", Decimal),
        Column::new("type_id", Integer),
        Column::new("celestial_index", Integer),
        Column::new("workforce", Integer),
        Column::new("attr_height_map_1", Integer),
        Column::new("attr_height_map_2", Integer),
        Column::new("attr_population", Boolean),
        Column::new("attr_shader_preset", Integer),
        Column::new("stat_age", Decimal),
        Column::new("stat_density", Real),
        Column::new("stat_eccentricity", Real),
        Column::new("stat_escape_velocity", Real),
        Column::new("stat_fragmented", Boolean),
        Column::new("stat_life", Real),
        Column::new("stat_locked", Boolean),
        Column::new("stat_mass_dust", Real),
        Column::new("stat_mass_gas", Real),
        Column::new("stat_orbit_period", Decimal),
        Column::new("stat_orbit_radius", Decimal),
        Column::new("stat_pressure", Real),
        Column::new("stat_radius", Decimal),
        Column::new("stat_rotation_rate", Real),
        Column::new("stat_spectral_class", Text),
        Column::new("stat_surface_gravity", Real),
        Column::new("stat_temperature", Real),
    ],
    foreign_keys: &[ForeignKey::new("solar_system_id", "solar_systems")],
};

pub const MOONS: TableSchema = TableSchema {
    name: "moons",
    columns: &[
        Column::required("id", Integer),
        Column::required("planet_id", Integer),
        Column::required("name", Text),
        Column::required("position", Vector),
        Column::new("radius", Decimal),
        Column::new("type_id", Integer),
        Column::new("stat_age", Decimal),
        Column::new("stat_density", Real),
        Column::new("stat_eccentricity", Real),
        Column::new("stat_escape_velocity", Real),
        Column::new("stat_fragmented", Boolean),
        Column::new("stat_life", Real),
        Column::new("stat_locked", Boolean),
        Column::new("stat_mass_dust", Real),
        Column::new("stat_mass_gas", Real),
        Column::new("stat_orbit_period", Decimal),
        Column::new("stat_orbit_radius", Decimal),
        Column::new("stat_pressure", Real),
        Column::new("stat_radius", Decimal),
        Column::new("stat_rotation_rate", Real),
        Column::new("stat_spectral_class", Text),
        Column::new("stat_surface_gravity", Real),
        Column::new("stat_temperature", Real),
    ],
    foreign_keys: &[ForeignKey::new("planet_id", "planets")],
};

pub const ASTEROID_BELTS: TableSchema = TableSchema {
    name: "asteroid_belts",
    columns: &[
        Column::required("id", Integer),
        Column::required("planet_id", Integer),
        Column::required("position", Vector),
        Column::new("type_id", Integer),
        Column::new("stat_age", Decimal),
        Column::new("stat_density", Real),
        Column::new("stat_eccentricity", Real),
        Column::new("stat_escape_velocity", Real),
        Column::new("stat_fragmented", Boolean),
        Column::new("stat_life", Real),
        Column::new("stat_locked", Boolean),
        Column::new("stat_mass_dust", Real),
        Column::new("stat_mass_gas", Real),
        Column::new("stat_orbit_period", Decimal),
        Column::new("stat_orbit_radius", Decimal),
        Column::new("stat_pressure", Real),
        Column::new("stat_radius", Decimal),
        Column::new("stat_rotation_rate", Real),
        Column::new("stat_spectral_class", Text),
        Column::new("stat_surface_gravity", Real),
        Column::new("stat_temperature", Real),
    ],
    foreign_keys: &[ForeignKey::new("planet_id", "planets")],
};

pub const STATIONS: TableSchema = TableSchema {
    name: "stations",
    columns: &[
        Column::required("id", Integer),
        Column::required("solar_system_id", Integer),
        Column::required("name", Text),
        Column::new("constellation_id", Integer),
        Column::new("corporation_id", Integer),
        Column::new("region_id", Integer),
        Column::new("operation_id", Integer),
        Column::new("station_type_id", Integer),
        Column::new("docking_cost_per_volume", Real),
        Column::new("max_ship_volume_dockable", Real),
        Column::new("office_rental_cost", Real),
        Column::new("reprocessing_efficiency", Real),
        Column::new("reprocessing_hangar_flag", Integer),
        Column::new("reprocessing_stations_take", Real),
        Column::new("security", Real),
        Column::required("position", Vector),
    ],
    foreign_keys: &[ForeignKey::new("solar_system_id", "solar_systems")],
};

/// All tables in creation order (parents before children).
pub const ALL_TABLES: &[&TableSchema] = &[
    &REGIONS,
    &CONSTELLATIONS,
    &SOLAR_SYSTEMS,
    &STARS,
    &PLANETS,
    &MOONS,
    &ASTEROID_BELTS,
    &STATIONS,
];

/// List all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_keyed_on_id() {
        for table in ALL_TABLES {
            assert_eq!(table.columns[0].name, "id", "table {}", table.name);
        }
    }

    #[test]
    fn test_foreign_keys_reference_known_tables() {
        let names = table_names();
        for table in ALL_TABLES {
            for fk in table.foreign_keys {
                assert!(
                    names.contains(&fk.references_table),
                    "{} references unknown table {}",
                    table.name,
                    fk.references_table
                );
            }
        }
    }
}
