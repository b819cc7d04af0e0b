//! CLI command implementations

use clap::Subcommand;

pub mod crop;
pub mod entities;
pub mod generate_config;
pub mod manifest;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract named entities from text files or stdin
    Entities(entities::EntitiesArgs),

    /// Fetch and summarize a IIIF presentation manifest
    Manifest(manifest::ManifestArgs),

    /// Build a IIIF image request and fetch the image
    Crop(crop::CropArgs),

    /// Generate a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_debug_format() {
        let cmd = Commands::GenerateConfig(generate_config::GenerateConfigArgs {
            output: "lectern.toml".into(),
        });

        let debug_str = format!("{:?}", cmd);
        assert!(debug_str.contains("GenerateConfig"));
        assert!(debug_str.contains("lectern.toml"));
    }
}
