use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use super::rows::{self, SqlValue};
use super::schema_gen::{
    generate_create_table, generate_exists, generate_indexes, generate_insert, generate_update,
};
use crate::schema::{TableSchema, ALL_TABLES};
use crate::ui::{Phase, Ui};
use crate::universe::entities::Region;

/// Default entity count per transaction. Bounds the write-ahead state of any
/// single transaction; the full export is tens of thousands of entities.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// What was durably written by an export pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub rows: u64,
    pub batches: u64,
}

/// Writes the finished universe tree into SQLite with idempotent per-entity
/// upserts, grouped into bounded transactions.
///
/// Re-running an export against a populated database updates rows in place;
/// a crash mid-run leaves earlier batches applied, which is safe because the
/// whole ingestion is re-runnable from scratch.
pub struct UniverseWriter {
    conn: Connection,
    batch_size: usize,
    pending: usize,
    stats: ExportStats,
}

impl UniverseWriter {
    /// Open (or create) the target database. With `replace` the existing
    /// file is deleted first (full-refresh mode); otherwise existing rows
    /// are overwritten one by one (merge mode).
    pub fn open(db_path: &Path, batch_size: usize, replace: bool) -> Result<Self> {
        if replace && db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }

        let conn = Connection::open(db_path).context("Failed to open database")?;

        // Optimize for bulk load
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )?;

        let writer = Self {
            conn,
            batch_size,
            pending: 0,
            stats: ExportStats::default(),
        };
        writer.create_tables()?;

        Ok(writer)
    }

    fn create_tables(&self) -> Result<()> {
        for schema in ALL_TABLES {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }
        Ok(())
    }

    /// Walk the containment tree depth-first and upsert every entity, in
    /// Region -> Constellation -> SolarSystem -> {Star, Planet -> {Moon,
    /// AsteroidBelt}} -> Station order.
    pub fn export(&mut self, regions: &[Region], ui: &mut impl Ui) -> Result<ExportStats> {
        ui.set_phase(Phase::Exporting);
        let total = count_entities(regions);

        self.begin()?;

        let result = self.export_tree(regions, total, ui);
        if result.is_err() {
            // Leave earlier batches applied; only the open one rolls back.
            self.conn.execute_batch("ROLLBACK").ok();
            return result.map(|_| self.stats);
        }

        self.conn.execute_batch("COMMIT")?;
        if self.pending > 0 {
            self.stats.batches += 1;
            self.pending = 0;
        }

        ui.clear_progress();
        ui.log(format!(
            "Exported {} rows in {} batches",
            self.stats.rows, self.stats.batches
        ));

        Ok(self.stats)
    }

    fn export_tree(&mut self, regions: &[Region], total: u64, ui: &mut impl Ui) -> Result<()> {
        for region in regions {
            self.upsert(&crate::schema::tables::REGIONS, rows::region_row(region))?;
            self.bump(total, ui)?;

            for constellation in &region.constellations {
                self.upsert(
                    &crate::schema::tables::CONSTELLATIONS,
                    rows::constellation_row(constellation, region.id),
                )?;
                self.bump(total, ui)?;

                for system in &constellation.solar_systems {
                    self.upsert(
                        &crate::schema::tables::SOLAR_SYSTEMS,
                        rows::system_row(system, constellation.id),
                    )?;
                    self.bump(total, ui)?;

                    self.upsert(
                        &crate::schema::tables::STARS,
                        rows::star_row(&system.star, system.id),
                    )?;
                    self.bump(total, ui)?;

                    for planet in &system.planets {
                        self.upsert(
                            &crate::schema::tables::PLANETS,
                            rows::planet_row(planet, system.id),
                        )?;
                        self.bump(total, ui)?;

                        for moon in &planet.moons {
                            self.upsert(
                                &crate::schema::tables::MOONS,
                                rows::moon_row(moon, planet.id),
                            )?;
                            self.bump(total, ui)?;
                        }

                        for belt in &planet.asteroid_belts {
                            self.upsert(
                                &crate::schema::tables::ASTEROID_BELTS,
                                rows::asteroid_belt_row(belt, planet.id),
                            )?;
                            self.bump(total, ui)?;
                        }
                    }

                    for station in &system.stations {
                        self.upsert(
                            &crate::schema::tables::STATIONS,
                            rows::station_row(station),
                        )?;
                        self.bump(total, ui)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Explicit two-step upsert: probe by id, then INSERT or UPDATE. Kept as
    /// two statements (rather than backend-specific upsert syntax) so the
    /// SQL stays portable across relational backends.
    fn upsert(&mut self, schema: &TableSchema, values: Vec<SqlValue>) -> Result<()> {
        let id = match &values[0] {
            SqlValue::Integer(id) => *id,
            _ => anyhow::bail!("First column of {} row is not an integer id", schema.name),
        };

        let exists: bool = self
            .conn
            .prepare_cached(&generate_exists(schema))?
            .query_row([id], |row| row.get(0))
            .with_context(|| format!("Existence probe failed for {} id {}", schema.name, id))?;

        if exists {
            let sql = generate_update(schema);
            let mut stmt = self.conn.prepare_cached(&sql)?;
            // Non-id columns in schema order, id last for the WHERE clause.
            for (idx, value) in values[1..].iter().enumerate() {
                value.bind_to(idx + 1, &mut stmt)?;
            }
            values[0].bind_to(values.len(), &mut stmt)?;
            stmt.raw_execute()
                .with_context(|| format!("Failed to update {} id {}", schema.name, id))?;
        } else {
            let sql = generate_insert(schema);
            let mut stmt = self.conn.prepare_cached(&sql)?;
            for (idx, value) in values.iter().enumerate() {
                value.bind_to(idx + 1, &mut stmt)?;
            }
            stmt.raw_execute()
                .with_context(|| format!("Failed to insert {} id {}", schema.name, id))?;
        }

        Ok(())
    }

    fn begin(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    /// Advance the per-entity counter; commit and reopen when the batch is
    /// full so no single transaction grows unbounded.
    fn bump(&mut self, total: u64, ui: &mut impl Ui) -> Result<()> {
        self.pending += 1;
        self.stats.rows += 1;

        if self.pending >= self.batch_size {
            self.conn.execute_batch("COMMIT")?;
            self.begin()?;
            self.stats.batches += 1;
            self.pending = 0;
        }

        ui.set_progress(self.stats.rows, total, "entities");
        Ok(())
    }

    /// Finalize the database (PRAGMA optimize)
    pub fn finalize(self) -> Result<()> {
        self.conn.execute("PRAGMA optimize;", [])?;
        Ok(())
    }
}

/// Total entity count of a tree, for progress reporting.
pub fn count_entities(regions: &[Region]) -> u64 {
    let mut count = 0u64;
    for region in regions {
        count += 1;
        for constellation in &region.constellations {
            count += 1;
            for system in &constellation.solar_systems {
                count += 2; // system + star
                for planet in &system.planets {
                    count += 1;
                    count += planet.moons.len() as u64;
                    count += planet.asteroid_belts.len() as u64;
                }
                count += system.stations.len() as u64;
            }
        }
    }
    count
}
