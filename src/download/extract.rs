use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use zip::ZipArchive;

use crate::ui::Ui;

/// Extract the SDE zip into the destination directory, preserving the
/// archive's directory layout (the `universe/eve/...` nesting is what the
/// parser traverses). Entries that would escape the destination are
/// rejected.
pub fn extract_zip(zip_path: &Path, dest_dir: &Path, ui: &mut impl Ui) -> Result<()> {
    let file = File::open(zip_path).context("Failed to open zip file")?;
    let reader = BufReader::new(file);
    let mut archive = ZipArchive::new(reader).context("Failed to read zip archive")?;

    fs::create_dir_all(dest_dir).context("Failed to create destination directory")?;

    let total_files = archive.len();

    for i in 0..total_files {
        let mut entry = archive
            .by_index(i)
            .context("Failed to read file from archive")?;

        let Some(relative) = entry.enclosed_name() else {
            bail!("Archive entry escapes destination: {:?}", entry.name());
        };
        let dest_path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest_path)
                .with_context(|| format!("Failed to create directory: {:?}", dest_path))?;
        } else {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }

            let mut dest_file = File::create(&dest_path)
                .with_context(|| format!("Failed to create file: {:?}", dest_path))?;
            io::copy(&mut entry, &mut dest_file)
                .with_context(|| format!("Failed to extract: {:?}", dest_path))?;
        }

        ui.set_progress(i as u64 + 1, total_files as u64, "files");
    }

    ui.clear_progress();
    ui.log(format!("Extracted {} entries", total_files));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::SilentUi;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_extract_preserves_layout() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("sde.zip");

        let file = File::create(&zip_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file("bsd/invNames.yaml", options).unwrap();
        zip.write_all(b"[]").unwrap();
        zip.start_file("universe/eve/R/C/S/solarSystem.yaml", options)
            .unwrap();
        zip.write_all(b"solarSystemID: 1").unwrap();
        zip.finish().unwrap();

        let dest = dir.path().join("out");
        extract_zip(&zip_path, &dest, &mut SilentUi::new()).unwrap();

        assert!(dest.join("bsd/invNames.yaml").exists());
        assert!(dest.join("universe/eve/R/C/S/solarSystem.yaml").exists());
    }
}
