use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::io::{Read, Write};
use std::path::Path;

use crate::ui::Ui;

const CHECKSUM_URL: &str =
    "https://eve-static-data-export.s3-eu-west-1.amazonaws.com/tranquility/checksum";
const SDE_URL: &str =
    "https://eve-static-data-export.s3-eu-west-1.amazonaws.com/tranquility/sde.zip";

pub struct SdeClient {
    client: Client,
}

impl SdeClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("eve-universe-db")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch the published checksum of the current SDE. The checksum file
    /// lists one entry per artifact; the `sde.zip` line's first token is the
    /// hash we key the cache on.
    pub fn fetch_checksum(&self) -> Result<String> {
        let response = self
            .client
            .get(CHECKSUM_URL)
            .send()
            .context("Failed to fetch SDE checksum")?;
        let text = response.text().context("Failed to read checksum response")?;

        parse_checksum(&text).context("No sde.zip entry in checksum file")
    }

    /// Download the SDE zip file to the given path
    pub fn download_zip(&self, dest: &Path, ui: &mut impl Ui) -> Result<()> {
        let response = self
            .client
            .get(SDE_URL)
            .send()
            .context("Failed to start download")?;

        let total_size = response.content_length().unwrap_or(0);

        let mut file = std::fs::File::create(dest).context("Failed to create destination file")?;

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; 8192];
        let mut reader = response;

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .context("Failed to read from response")?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])
                .context("Failed to write to file")?;

            downloaded += bytes_read as u64;
            ui.set_progress(downloaded, total_size, format_bytes(downloaded, total_size));
        }

        ui.log("Download complete");
        Ok(())
    }
}

fn parse_checksum(text: &str) -> Option<String> {
    text.lines()
        .find(|line| line.contains("sde.zip"))
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string)
}

/// Format bytes as human-readable string
fn format_bytes(current: u64, total: u64) -> String {
    fn fmt(bytes: u64) -> String {
        if bytes >= 1_000_000_000 {
            format!("{:.1} GB", bytes as f64 / 1_000_000_000.0)
        } else if bytes >= 1_000_000 {
            format!("{:.1} MB", bytes as f64 / 1_000_000.0)
        } else if bytes >= 1_000 {
            format!("{:.1} KB", bytes as f64 / 1_000.0)
        } else {
            format!("{} B", bytes)
        }
    }
    format!("{} / {}", fmt(current), fmt(total))
}
