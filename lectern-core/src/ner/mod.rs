//! Named entity recognition pipeline
//!
//! Three stages behind one facade: tokenization, part-of-speech tagging,
//! and entity chunking. [`NerPipeline`] ties them together and reports
//! per-run metadata.

pub mod chunker;
pub mod tag;
pub mod token;
pub mod tree;

pub use chunker::{ChunkerConfig, EntityChunker};
pub use tag::{PosTag, TaggedToken, Tagger};
pub use token::{Token, Tokenizer};
pub use tree::{Entity, EntityLabel, EntityTree, Node};

use crate::error::{CoreError, Result};
use serde::Serialize;

/// Configuration for the NER pipeline
#[derive(Debug, Clone)]
pub struct NerConfig {
    /// Language code; only English rules ship today
    pub language: String,
    /// Chunker configuration
    pub chunker: ChunkerConfig,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            chunker: ChunkerConfig::default(),
        }
    }
}

/// Main entry point for entity extraction
///
/// Runs tokenizer, tagger, and chunker in sequence over raw text.
pub struct NerPipeline {
    tokenizer: Tokenizer,
    tagger: Tagger,
    chunker: EntityChunker,
    config: NerConfig,
}

/// Rich output with metadata
#[derive(Debug, Clone, Serialize)]
pub struct NerOutput {
    /// The extracted entity tree
    pub tree: EntityTree,
    /// Per-run metadata
    pub metadata: NerMetadata,
}

/// Per-run processing metadata
#[derive(Debug, Clone, Serialize)]
pub struct NerMetadata {
    /// Number of tokens produced by the tokenizer
    pub token_count: usize,
    /// Number of entity spans in the tree
    pub entity_count: usize,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f64,
}

impl NerPipeline {
    /// Create a pipeline with default configuration (English)
    pub fn new() -> Result<Self> {
        Self::with_config(NerConfig::default())
    }

    /// Create a pipeline for a specific language code
    pub fn with_language(code: &str) -> Result<Self> {
        let config = NerConfig {
            language: code.to_string(),
            ..NerConfig::default()
        };
        Self::with_config(config)
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: NerConfig) -> Result<Self> {
        match config.language.as_str() {
            "en" | "english" => {}
            other => {
                return Err(CoreError::UnsupportedLanguage {
                    code: other.to_string(),
                })
            }
        }
        Ok(Self {
            tokenizer: Tokenizer::new(),
            tagger: Tagger::new(),
            chunker: EntityChunker::with_config(config.chunker.clone()),
            config,
        })
    }

    /// Create a builder
    pub fn builder() -> NerPipelineBuilder {
        NerPipelineBuilder::default()
    }

    /// The active configuration
    pub fn config(&self) -> &NerConfig {
        &self.config
    }

    /// Tokenize text without tagging or chunking
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text)
    }

    /// Tokenize and tag text without chunking
    pub fn tag(&self, text: &str) -> Vec<TaggedToken> {
        self.tagger.tag(&self.tokenizer.tokenize(text))
    }

    /// Run the full pipeline and return the tree with metadata
    pub fn extract(&self, text: &str) -> NerOutput {
        let start = std::time::Instant::now();

        let tokens = self.tokenizer.tokenize(text);
        let token_count = tokens.len();
        let tagged = self.tagger.tag(&tokens);
        let tree = self.chunker.chunk(&tagged);

        let metadata = NerMetadata {
            token_count,
            entity_count: tree.entity_count(),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        NerOutput { tree, metadata }
    }
}

/// Builder for [`NerPipeline`]
#[derive(Debug, Default)]
pub struct NerPipelineBuilder {
    config: NerConfig,
}

impl NerPipelineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language code
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.config.language = code.into();
        self
    }

    /// Set the maximum entity span length
    pub fn max_span(mut self, max_span: usize) -> Self {
        self.config.chunker.max_span = max_span;
        self
    }

    /// Add gazetteer entries treated as GPEs
    pub fn extra_gpe<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .chunker
            .extra_gpe
            .extend(entries.into_iter().map(Into::into));
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<NerPipeline> {
        if self.config.chunker.max_span == 0 {
            return Err(CoreError::Config(
                "max_span must be greater than 0".to_string(),
            ));
        }
        NerPipeline::with_config(self.config)
    }
}
