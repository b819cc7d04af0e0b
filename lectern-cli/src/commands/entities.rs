//! Entities command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{read_stdin, resolve_patterns, FileReader};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter, TreeFormatter};
use crate::progress::ProgressReporter;
use lectern_core::NerPipeline;

/// Arguments for the entities command
#[derive(Debug, Args)]
pub struct EntitiesArgs {
    /// Input files or patterns (supports glob), or "-" for stdin
    #[arg(value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Process a literal text argument instead of files
    #[arg(short, long, value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Language for tokenization and tagging rules
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Extra place names to recognize as GPE (repeatable)
    #[arg(long = "gpe", value_name = "NAME")]
    pub extra_gpe: Vec<String>,

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

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// One entity per line as LABEL<TAB>text
    Text,
    /// JSON array of documents with entity offsets
    Json,
    /// Bracketed parse plus an ASCII entity tree
    Tree,
}

impl EntitiesArgs {
    /// Execute the entities command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting entity extraction");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let pipeline = self.build_pipeline(&config)?;
        let mut formatter = self.create_formatter(&config)?;

        if let Some(text) = &self.text {
            let output = pipeline.extract(text);
            formatter.format_document("-", &output)?;
        } else if self.input.is_empty() || self.input.iter().any(|p| p == "-") {
            let text = read_stdin()?;
            let output = pipeline.extract(&text);
            formatter.format_document("-", &output)?;
        } else {
            let files = resolve_patterns(&self.input)?;
            let mut progress = ProgressReporter::new(self.quiet || self.output.is_none());
            progress.init_files(files.len() as u64);

            for path in &files {
                let text = FileReader::read_text(path)?;
                let output = pipeline.extract(&text);
                formatter.format_document(&path.display().to_string(), &output)?;
                progress.file_completed(&path.display().to_string());
            }
            progress.finish();
        }

        formatter.finish()?;
        Ok(())
    }

    fn build_pipeline(&self, config: &CliConfig) -> Result<NerPipeline> {
        let language = self
            .language
            .clone()
            .unwrap_or_else(|| config.ner.language.clone());

        let mut extra_gpe = config.ner.extra_gpe.clone();
        extra_gpe.extend(self.extra_gpe.iter().cloned());

        let pipeline = NerPipeline::builder()
            .language(&language)
            .extra_gpe(extra_gpe)
            .build()
            .map_err(|e| CliError::ProcessingError(e.to_string()))
            .with_context(|| format!("Failed to build pipeline for language '{language}'"))?;

        Ok(pipeline)
    }

    fn create_formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            ),
            None => Box::new(std::io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, config.output.pretty_json)),
            OutputFormat::Tree => Box::new(TreeFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
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
