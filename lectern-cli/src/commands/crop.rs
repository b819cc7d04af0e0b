//! Crop command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::progress::ProgressReporter;
use lectern_core::{IiifClient, ImageFormat, ImageRequest, Quality, Region, Rotation, Size};

/// Arguments for the crop command
#[derive(Debug, Args)]
pub struct CropArgs {
    /// Image identifier on the IIIF server
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// Region: full, square, x,y,w,h or pct:x,y,w,h
    #[arg(short, long, value_name = "REGION", default_value = "full")]
    pub region: Region,

    /// Size: full, max, w,, ,h, w,h or pct:n
    #[arg(short, long, value_name = "SIZE", default_value = "max")]
    pub size: Size,

    /// Rotation in degrees, prefixed with ! to mirror
    #[arg(long, value_name = "ROTATION", default_value = "0")]
    pub rotation: Rotation,

    /// Quality: default, color, gray or bitonal
    #[arg(long, value_name = "QUALITY", default_value = "default")]
    pub quality: Quality,

    /// Format: jpg, png, gif, webp or tif
    #[arg(short, long, value_name = "FORMAT", default_value = "jpg")]
    pub format: ImageFormat,

    /// Print the Image API URL without fetching
    #[arg(long)]
    pub url_only: bool,

    /// Output file for the fetched image (default: <identifier>.<format>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// IIIF server host, e.g. iiif.nli.org.il
    #[arg(long, value_name = "HOST")]
    pub server: Option<String>,

    /// URL scheme (http or https)
    #[arg(long, value_name = "SCHEME")]
    pub scheme: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CropArgs {
    /// Execute the crop command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        let config = CliConfig::load(self.config.as_deref())?;
        let mut iiif = config.iiif.to_core();
        if let Some(server) = &self.server {
            iiif.host = server.clone();
        }
        if let Some(scheme) = &self.scheme {
            iiif = iiif.with_scheme(scheme);
        }

        let request = self.build_request();
        let url = request.url(&iiif)?;

        if self.url_only {
            println!("{url}");
            return Ok(());
        }

        let client = IiifClient::with_config(iiif)?;
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_fetch(&format!("Fetching {url}"));
        let fetched = client.fetch_image(&request);
        progress.finish();
        let fetched = fetched.map_err(|e| CliError::FetchError(e.to_string()))?;

        let (width, height) = fetched.dimensions()?;
        let path = self.output_path();
        std::fs::write(&path, &fetched.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if !self.quiet {
            println!(
                "Saved {}x{} image ({} bytes) to {}",
                width,
                height,
                fetched.bytes.len(),
                path.display()
            );
        }

        Ok(())
    }

    fn build_request(&self) -> ImageRequest {
        ImageRequest::new(&self.identifier)
            .region(self.region)
            .size(self.size)
            .rotation(self.rotation)
            .quality(self.quality)
            .format(self.format)
    }

    fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                // Slashes in ARK-style identifiers would escape the cwd
                let safe = self.identifier.replace(['/', '\\'], "_");
                PathBuf::from(format!("{safe}.{}", self.format.as_str()))
            }
        }
    }

    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_sanitizes_identifier() {
        let args = CropArgs {
            identifier: "990034/alpha".to_string(),
            region: Region::Full,
            size: Size::Max,
            rotation: Rotation::new(0.0),
            quality: Quality::Default,
            format: ImageFormat::Jpg,
            url_only: false,
            output: None,
            server: None,
            scheme: None,
            config: None,
            quiet: true,
            verbose: 0,
        };
        assert_eq!(args.output_path(), PathBuf::from("990034_alpha.jpg"));
    }
}
