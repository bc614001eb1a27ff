pub mod cache;
pub mod client;
pub mod extract;

pub use cache::CacheManager;
pub use client::SdeClient;
pub use extract::extract_zip;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::ui::{Phase, Ui};

/// Guarantee a local, fully extracted copy of the current SDE and return
/// its directory. The cache is keyed on the published checksum: a matching
/// cached copy short-circuits the download unless `force` is set.
pub fn ensure_sde_downloaded(
    cache_dir: Option<PathBuf>,
    force: bool,
    ui: &mut impl Ui,
) -> Result<(PathBuf, String)> {
    ui.set_phase(Phase::Checking);

    let cache = CacheManager::new(cache_dir)?;
    let client = SdeClient::new()?;

    let checksum = client.fetch_checksum()?;
    ui.log(format!("Published SDE checksum: {}", checksum));

    let up_to_date = cache.cached_checksum().as_deref() == Some(checksum.as_str());
    if !force && up_to_date && cache.is_cached(&checksum) {
        ui.log("Cached copy is current, skipping download");
        return Ok((cache.data_dir(&checksum), checksum));
    }

    ui.set_phase(Phase::Downloading);
    let zip_path = cache.zip_path(&checksum);
    client.download_zip(&zip_path, ui)?;

    ui.set_phase(Phase::Extracting);
    let data_dir = cache.data_dir(&checksum);
    if data_dir.exists() {
        std::fs::remove_dir_all(&data_dir).context("Failed to clear stale SDE copy")?;
    }
    extract_zip(&zip_path, &data_dir, ui)?;

    cache.store_checksum(&checksum)?;
    cache.cleanup_old_copies(&checksum)?;
    std::fs::remove_file(&zip_path).ok();

    Ok((data_dir, checksum))
}
