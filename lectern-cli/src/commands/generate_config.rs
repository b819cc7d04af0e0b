//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "lectern.toml")]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        let template = generate_template();

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("Configuration template written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the file to point at your IIIF server");
        println!("2. Use it for extraction or fetching:");
        println!("   lectern entities --config {} notes.txt", self.output.display());
        println!(
            "   lectern manifest --config {} IDENTIFIER",
            self.output.display()
        );

        Ok(())
    }
}

/// Generate template configuration content
fn generate_template() -> String {
    r#"# lectern configuration

[ner]
# Language for tokenization and tagging rules
language = "en"

# Extra place names recognized as GPE, on top of the built-in gazetteer
extra_gpe = [
    # "safed",
]

[iiif]
# URL scheme, http or https
scheme = "https"

# IIIF server host
host = "iiif.nli.org.il"

# Path prefix of the Presentation API, without leading or trailing slash
presentation_prefix = "delivery/iiif/presentation/2.1"

# Path prefix of the Image API
image_prefix = "delivery/iiif"

# HTTP timeout in seconds
timeout_secs = 30

[output]
# Default output format: text, json or tree
default_format = "text"

# Pretty-print JSON output
pretty_json = true
"#
    .to_string()
}
