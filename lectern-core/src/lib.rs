//! Named-entity extraction and IIIF image retrieval
//!
//! Two independent capabilities behind one crate:
//!
//! - [`ner`]: a rule-based pipeline that tokenizes text, assigns
//!   Penn-style part-of-speech tags, and chunks tagged tokens into a
//!   labeled entity tree (person / organization / GPE / location /
//!   facility).
//! - [`iiif`]: a read-only model of IIIF Presentation 2.1 manifests, a
//!   typed IIIF Image API URL builder, and a blocking client that
//!   fetches manifests and image crops.
//!
//! # Example
//!
//! ```
//! use lectern_core::NerPipeline;
//!
//! let pipeline = NerPipeline::new()?;
//! let output = pipeline.extract("The National Library of Israel is located in Jerusalem.");
//! for entity in output.tree.entities() {
//!     println!("{}: {}", entity.label, entity.text());
//! }
//! # Ok::<(), lectern_core::CoreError>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod iiif;
pub mod ner;

// Re-export key types
pub use error::{CoreError, Result};
pub use iiif::{
    IiifClient, IiifConfig, ImageFormat, ImageRequest, Manifest, Quality, Region, Rotation, Size,
};
pub use ner::{EntityLabel, EntityTree, NerOutput, NerPipeline, PosTag, TaggedToken, Token};
