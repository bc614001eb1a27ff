//! The full ingestion pipeline: name dictionary -> universe tree ->
//! overlay merges -> batched export.

use anyhow::{Context, Result};
use std::path::Path;

use crate::names::NameDictionary;
use crate::ui::{Phase, Ui};
use crate::universe::{
    apply_resource_overlay, apply_station_overlay, parse_universe, IngestContext, Region,
};
use crate::writer::{ExportStats, UniverseWriter, DEFAULT_BATCH_SIZE};

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Entities per transaction during export.
    pub batch_size: usize,
    /// Delete the target database before exporting (full-refresh mode)
    /// instead of upserting into the existing rows (merge mode).
    pub replace: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            replace: false,
        }
    }
}

/// What an ingestion run produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestSummary {
    pub regions: usize,
    pub constellations: usize,
    pub systems: usize,
    pub planets: usize,
    pub stations_attached: usize,
    pub resources_matched: usize,
    pub export: ExportStats,
}

/// Run the whole pipeline against an extracted SDE copy.
pub fn run_ingest(
    sde_dir: &Path,
    db_path: &Path,
    options: IngestOptions,
    ui: &mut impl Ui,
) -> Result<IngestSummary> {
    let names = NameDictionary::load(sde_dir).context("Failed to load name dictionary")?;
    ui.log(format!("Loaded {} display names", names.len()));

    let mut ctx = IngestContext::new(names);
    let mut regions = parse_universe(sde_dir, &mut ctx, ui)?;

    ui.set_phase(Phase::Merging);
    let stations_attached = apply_station_overlay(sde_dir, &mut regions, &ctx)?;
    let resources_matched = apply_resource_overlay(sde_dir, &mut regions, &ctx)?;
    ui.log(format!(
        "Attached {} stations, matched {} resource records",
        stations_attached, resources_matched
    ));

    let mut writer = UniverseWriter::open(db_path, options.batch_size, options.replace)?;
    let export = writer.export(&regions, ui)?;
    writer.finalize()?;

    Ok(IngestSummary {
        regions: regions.len(),
        constellations: count_constellations(&regions),
        systems: ctx.systems.len(),
        planets: ctx.planets.len(),
        stations_attached,
        resources_matched,
        export,
    })
}

fn count_constellations(regions: &[Region]) -> usize {
    regions.iter().map(|r| r.constellations.len()).sum()
}
