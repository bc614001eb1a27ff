use anyhow::Result;
use eve_universe_db::{
    cli::{Cli, Commands},
    download::ensure_sde_downloaded,
    ingest::{run_ingest, IngestOptions},
    ui::ConsoleUi,
    writer::DEFAULT_BATCH_SIZE,
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let mut ui = ConsoleUi::new();

    match cli.command {
        Commands::Sync {
            output_db,
            force,
            cache_dir,
            batch_size,
            replace,
        } => {
            let start = Instant::now();

            let (sde_dir, checksum) = ensure_sde_downloaded(cache_dir, force, &mut ui)?;

            let options = IngestOptions {
                batch_size: batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
                replace,
            };
            let summary = run_ingest(&sde_dir, &output_db, options, &mut ui)?;

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} rows, {} batches) from SDE {} in {:.1}s",
                output_db,
                summary.export.rows,
                summary.export.batches,
                checksum,
                elapsed.as_secs_f64()
            );
        }

        Commands::Download { output, force } => {
            let (path, checksum) = ensure_sde_downloaded(output, force, &mut ui)?;
            println!("SDE {} extracted to {:?}", checksum, path);
        }

        Commands::Ingest {
            sde_dir,
            output_db,
            batch_size,
            replace,
        } => {
            let start = Instant::now();

            let options = IngestOptions {
                batch_size: batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
                replace,
            };
            let summary = run_ingest(&sde_dir, &output_db, options, &mut ui)?;

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?}: {} regions, {} constellations, {} systems, {} planets, {} stations ({} rows in {:.1}s)",
                output_db,
                summary.regions,
                summary.constellations,
                summary.systems,
                summary.planets,
                summary.stations_attached,
                summary.export.rows,
                elapsed.as_secs_f64()
            );
        }

        Commands::ListTables => {
            println!("Output tables:\n");
            for name in eve_universe_db::schema::table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}
