//! Row builders: one function per entity kind, emitting values in the exact
//! column order declared in `schema::tables`.

use rust_decimal::Decimal;

use crate::types::DecVector3;
use crate::universe::entities::*;

#[derive(Debug, Clone)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Integer(if v { 1 } else { 0 })
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<&Decimal> for SqlValue {
    fn from(v: &Decimal) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<&DecVector3> for SqlValue {
    fn from(v: &DecVector3) -> Self {
        SqlValue::Text(v.to_delimited())
    }
}

fn statistics_values(s: &Statistics, out: &mut Vec<SqlValue>) {
    out.push((&s.age).into());
    out.push(s.density.into());
    out.push(s.eccentricity.into());
    out.push(s.escape_velocity.into());
    out.push(s.fragmented.into());
    out.push(s.life.into());
    out.push(s.locked.into());
    out.push(s.mass_dust.into());
    out.push(s.mass_gas.into());
    out.push((&s.orbit_period).into());
    out.push((&s.orbit_radius).into());
    out.push(s.pressure.into());
    out.push((&s.radius).into());
    out.push(s.rotation_rate.into());
    out.push(s.spectral_class.as_str().into());
    out.push(s.surface_gravity.into());
    out.push(s.temperature.into());
}

pub fn region_row(r: &Region) -> Vec<SqlValue> {
    vec![
        r.id.into(),
        r.name.as_str().into(),
        (&r.center).into(),
        (&r.min).into(),
        (&r.max).into(),
        r.description_id.into(),
        r.faction_id.into(),
        r.name_id.into(),
        r.nebula.into(),
        r.wormhole_class_id.into(),
    ]
}

pub fn constellation_row(c: &Constellation, region_id: i64) -> Vec<SqlValue> {
    vec![
        c.id.into(),
        region_id.into(),
        c.name.as_str().into(),
        (&c.center).into(),
        (&c.min).into(),
        (&c.max).into(),
        (&c.radius).into(),
        c.name_id.into(),
    ]
}

pub fn system_row(s: &SolarSystem, constellation_id: i64) -> Vec<SqlValue> {
    vec![
        s.id.into(),
        constellation_id.into(),
        s.name.as_str().into(),
        (&s.center).into(),
        (&s.min).into(),
        (&s.max).into(),
        (&s.radius).into(),
        s.security.into(),
        s.luminosity.into(),
        s.border.into(),
        s.corridor.into(),
        s.fringe.into(),
        s.hub.into(),
        s.international.into(),
        s.regional.into(),
        s.name_id.into(),
        s.sun_type_id.into(),
        s.wormhole_class_id.into(),
    ]
}

pub fn star_row(s: &Star, solar_system_id: i64) -> Vec<SqlValue> {
    let mut row = vec![
        s.id.into(),
        solar_system_id.into(),
        (&s.radius).into(),
        s.type_id.into(),
        s.power.into(),
    ];
    statistics_values(&s.statistics, &mut row);
    row
}

pub fn planet_row(p: &Planet, solar_system_id: i64) -> Vec<SqlValue> {
    let mut row = vec![
        p.id.into(),
        solar_system_id.into(),
        p.name.as_str().into(),
        (&p.position).into(),
        (&p.radius).into(),
        p.type_id.into(),
        p.celestial_index.into(),
        p.workforce.into(),
        p.attributes.height_map_1.into(),
        p.attributes.height_map_2.into(),
        p.attributes.population.into(),
        p.attributes.shader_preset.into(),
    ];
    statistics_values(&p.statistics, &mut row);
    row
}

pub fn moon_row(m: &Moon, planet_id: i64) -> Vec<SqlValue> {
    let mut row = vec![
        m.id.into(),
        planet_id.into(),
        m.name.as_str().into(),
        (&m.position).into(),
        (&m.radius).into(),
        m.type_id.into(),
    ];
    statistics_values(&m.statistics, &mut row);
    row
}

pub fn asteroid_belt_row(b: &AsteroidBelt, planet_id: i64) -> Vec<SqlValue> {
    let mut row = vec![
        b.id.into(),
        planet_id.into(),
        (&b.position).into(),
        b.type_id.into(),
    ];
    statistics_values(&b.statistics, &mut row);
    row
}

pub fn station_row(s: &Station) -> Vec<SqlValue> {
    vec![
        s.id.into(),
        s.solar_system_id.into(),
        s.name.as_str().into(),
        s.constellation_id.into(),
        s.corporation_id.into(),
        s.region_id.into(),
        s.operation_id.into(),
        s.station_type_id.into(),
        s.docking_cost_per_volume.into(),
        s.max_ship_volume_dockable.into(),
        s.office_rental_cost.into(),
        s.reprocessing_efficiency.into(),
        s.reprocessing_hangar_flag.into(),
        s.reprocessing_stations_take.into(),
        s.security.into(),
        (&s.position).into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables;

    #[test]
    fn test_row_arity_matches_schema() {
        assert_eq!(region_row(&Region::default()).len(), tables::REGIONS.columns.len());
        assert_eq!(
            constellation_row(&Constellation::default(), 1).len(),
            tables::CONSTELLATIONS.columns.len()
        );
        assert_eq!(
            system_row(&SolarSystem::default(), 1).len(),
            tables::SOLAR_SYSTEMS.columns.len()
        );
        assert_eq!(star_row(&Star::default(), 1).len(), tables::STARS.columns.len());
        assert_eq!(planet_row(&Planet::default(), 1).len(), tables::PLANETS.columns.len());
        assert_eq!(moon_row(&Moon::default(), 1).len(), tables::MOONS.columns.len());
        assert_eq!(
            asteroid_belt_row(&AsteroidBelt::default(), 1).len(),
            tables::ASTEROID_BELTS.columns.len()
        );
        assert_eq!(station_row(&Station::default()).len(), tables::STATIONS.columns.len());
    }
}
