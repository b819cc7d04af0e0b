//! Manifest command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::progress::ProgressReporter;
use lectern_core::{IiifClient, Manifest};

/// Arguments for the manifest command
#[derive(Debug, Args)]
pub struct ManifestArgs {
    /// Object identifier on the IIIF server
    #[arg(value_name = "IDENTIFIER", required_unless_present = "file")]
    pub identifier: Option<String>,

    /// Read the manifest from a local JSON file instead of fetching
    #[arg(long, value_name = "FILE", conflicts_with = "identifier")]
    pub file: Option<PathBuf>,

    /// IIIF server host, e.g. iiif.nli.org.il
    #[arg(short, long, value_name = "HOST")]
    pub server: Option<String>,

    /// URL scheme (http or https)
    #[arg(long, value_name = "SCHEME")]
    pub scheme: Option<String>,

    /// Print the parsed manifest as JSON instead of a summary
    #[arg(short, long)]
    pub json: bool,

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

impl ManifestArgs {
    /// Execute the manifest command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        let manifest = self.load_manifest()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        } else {
            print_summary(&manifest);
        }

        Ok(())
    }

    fn load_manifest(&self) -> Result<Manifest> {
        if let Some(path) = &self.file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Manifest::from_json(&text).context("Failed to parse manifest");
        }

        let config = CliConfig::load(self.config.as_deref())?;
        let mut iiif = config.iiif.to_core();
        if let Some(server) = &self.server {
            iiif.host = server.clone();
        }
        if let Some(scheme) = &self.scheme {
            iiif = iiif.with_scheme(scheme);
        }

        // required_unless_present guarantees the identifier here
        let identifier = self.identifier.as_deref().unwrap_or_default();
        let client = IiifClient::with_config(iiif)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_fetch(&format!("Fetching manifest for {identifier}"));
        let manifest = client.fetch_manifest(identifier);
        progress.finish();

        Ok(manifest?)
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

fn print_summary(manifest: &Manifest) {
    println!("Label:       {}", manifest.label);
    if let Some(attribution) = &manifest.attribution {
        println!("Attribution: {attribution}");
    }
    if let Some(license) = &manifest.license {
        println!("License:     {license}");
    }
    if !manifest.metadata.is_empty() {
        println!("Metadata:");
        for entry in &manifest.metadata {
            println!("  {}: {}", entry.label, entry.value_text());
        }
    }
    println!("Canvases:    {}", manifest.canvas_count());
    for (index, canvas) in manifest.canvases().enumerate() {
        let service = canvas
            .primary_image()
            .ok()
            .and_then(|image| image.service_identifier().map(str::to_string))
            .unwrap_or_else(|| "<no image service>".to_string());
        println!(
            "  [{index}] {} ({}x{}) image: {service}",
            canvas.label, canvas.width, canvas.height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_file_does_not_need_identifier() {
        let args = ManifestArgs {
            identifier: None,
            file: Some(PathBuf::from("/nonexistent/manifest.json")),
            server: None,
            scheme: None,
            json: false,
            config: None,
            quiet: true,
            verbose: 0,
        };
        let err = args.load_manifest().unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
