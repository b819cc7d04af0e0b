//! Output formatting module

use anyhow::Result;
use lectern_core::NerOutput;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the extraction result for one document
    fn format_document(&mut self, source: &str, output: &NerOutput) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;
pub mod tree;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use tree::TreeFormatter;
