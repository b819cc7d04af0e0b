//! IIIF Presentation 2.1 manifest model
//!
//! A read-only serde view of the externally defined manifest schema:
//! manifest → sequences → canvases → image annotations → resource.
//! Unknown fields are ignored and optional fields default, so manifests
//! from different servers parse without special cases.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A presentation manifest describing one digitized object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest URI
    #[serde(rename = "@id", default)]
    pub id: String,
    /// Resource type, `sc:Manifest` for 2.1
    #[serde(rename = "@type", default)]
    pub resource_type: String,
    /// Human-readable object title
    #[serde(default)]
    pub label: String,
    /// Longer description, when present
    #[serde(default)]
    pub description: Option<String>,
    /// Holding-institution attribution line
    #[serde(default)]
    pub attribution: Option<String>,
    /// License URI, when present
    #[serde(default)]
    pub license: Option<String>,
    /// Descriptive label/value pairs
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
    /// Top-level sequences; 2.1 manifests normally carry exactly one
    #[serde(default)]
    pub sequences: Vec<Sequence>,
}

impl Manifest {
    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// All canvases across all sequences, in order
    pub fn canvases(&self) -> impl Iterator<Item = &Canvas> {
        self.sequences.iter().flat_map(|s| s.canvases.iter())
    }

    /// Total canvas count across sequences
    pub fn canvas_count(&self) -> usize {
        self.canvases().count()
    }

    /// The canvas at `index`, counting across sequences
    pub fn canvas(&self, index: usize) -> Result<&Canvas> {
        self.canvases()
            .nth(index)
            .ok_or(CoreError::MissingCanvas { index })
    }
}

/// A label/value metadata pair
///
/// Values are either plain strings or language-tagged structures, so the
/// raw JSON value is kept and flattened on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// The field label
    #[serde(default)]
    pub label: String,
    /// The raw field value
    #[serde(default)]
    pub value: Value,
}

impl MetadataEntry {
    /// The value flattened to display text
    pub fn value_text(&self) -> String {
        flatten_value(&self.value)
    }
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(map) => map
            .get("@value")
            .map(flatten_value)
            .unwrap_or_default(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// An ordered list of canvases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    /// Sequence URI
    #[serde(rename = "@id", default)]
    pub id: String,
    /// The canvases in viewing order
    #[serde(default)]
    pub canvases: Vec<Canvas>,
}

/// One page/image surface with its dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    /// Canvas URI
    #[serde(rename = "@id", default)]
    pub id: String,
    /// Human-readable canvas label, e.g. a page number
    #[serde(default)]
    pub label: String,
    /// Canvas width in pixels
    #[serde(default)]
    pub width: u32,
    /// Canvas height in pixels
    #[serde(default)]
    pub height: u32,
    /// Painting annotations carrying the image resources
    #[serde(default)]
    pub images: Vec<ImageAnnotation>,
}

impl Canvas {
    /// The first image resource painted onto this canvas
    pub fn primary_image(&self) -> Result<&ImageResource> {
        self.images
            .iter()
            .filter_map(|a| a.resource.as_ref())
            .next()
            .ok_or_else(|| CoreError::MissingImage {
                canvas: if self.label.is_empty() {
                    self.id.clone()
                } else {
                    self.label.clone()
                },
            })
    }
}

/// An annotation painting an image onto a canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnnotation {
    /// Annotation motivation, `sc:painting` for page images
    #[serde(default)]
    pub motivation: String,
    /// The painted image resource
    #[serde(default)]
    pub resource: Option<ImageResource>,
}

/// An image resource with its Image API service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResource {
    /// Direct URI of the full image
    #[serde(rename = "@id", default)]
    pub id: String,
    /// Image width in pixels
    #[serde(default)]
    pub width: u32,
    /// Image height in pixels
    #[serde(default)]
    pub height: u32,
    /// MIME format, e.g. `image/jpeg`
    #[serde(default)]
    pub format: Option<String>,
    /// The Image API service for this resource
    #[serde(default)]
    pub service: Option<ImageService>,
}

impl ImageResource {
    /// Base URL of the Image API service, trailing slash removed
    pub fn service_base(&self) -> Option<String> {
        self.service
            .as_ref()
            .filter(|s| !s.id.is_empty())
            .map(|s| s.id.trim_end_matches('/').to_string())
    }

    /// The identifier segment of the service URL
    pub fn service_identifier(&self) -> Option<&str> {
        self.service
            .as_ref()
            .and_then(|s| s.id.trim_end_matches('/').rsplit('/').next())
            .filter(|s| !s.is_empty())
    }
}

/// A IIIF Image API service reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageService {
    /// Service base URI; the image identifier is its last segment
    #[serde(rename = "@id", default)]
    pub id: String,
    /// Compliance profile, a string or an array of strings
    #[serde(default)]
    pub profile: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "@id": "https://iiif.example.org/presentation/2.1/DOC123/manifest",
        "@type": "sc:Manifest",
        "label": "Haggadah shel Pesah",
        "attribution": "The National Library of Israel",
        "description": "An illuminated manuscript.",
        "metadata": [
            {"label": "Creator", "value": "Unknown"},
            {"label": "Date", "value": ["1740", "approx."]}
        ],
        "sequences": [{
            "@id": "https://iiif.example.org/presentation/2.1/DOC123/sequence/default",
            "canvases": [{
                "@id": "https://iiif.example.org/presentation/2.1/DOC123/canvas/p1",
                "label": "p. 1",
                "width": 4000,
                "height": 6000,
                "images": [{
                    "motivation": "sc:painting",
                    "resource": {
                        "@id": "https://iiif.example.org/image/2/IMG123/full/full/0/default.jpg",
                        "width": 4000,
                        "height": 6000,
                        "format": "image/jpeg",
                        "service": {
                            "@id": "https://iiif.example.org/image/2/IMG123/",
                            "profile": "http://iiif.io/api/image/2/level2.json"
                        }
                    }
                }]
            }]
        }]
    }"#;

    #[test]
    fn test_parses_sample_manifest() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.label, "Haggadah shel Pesah");
        assert_eq!(
            manifest.attribution.as_deref(),
            Some("The National Library of Israel")
        );
        assert_eq!(manifest.canvas_count(), 1);
    }

    #[test]
    fn test_canvas_accessor_and_dimensions() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        let canvas = manifest.canvas(0).unwrap();
        assert_eq!(canvas.label, "p. 1");
        assert_eq!((canvas.width, canvas.height), (4000, 6000));
    }

    #[test]
    fn test_missing_canvas_index_is_an_error() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        let err = manifest.canvas(5).unwrap_err();
        assert!(err.to_string().contains("no canvas at index 5"));
    }

    #[test]
    fn test_primary_image_and_service() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        let resource = manifest.canvas(0).unwrap().primary_image().unwrap();
        assert_eq!(resource.format.as_deref(), Some("image/jpeg"));
        assert_eq!(
            resource.service_base().as_deref(),
            Some("https://iiif.example.org/image/2/IMG123")
        );
        assert_eq!(resource.service_identifier(), Some("IMG123"));
    }

    #[test]
    fn test_metadata_value_flattening() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.metadata[0].value_text(), "Unknown");
        assert_eq!(manifest.metadata[1].value_text(), "1740; approx.");
    }

    #[test]
    fn test_canvas_without_images_reports_missing() {
        let json = r#"{"label": "x", "sequences": [{"canvases": [{"label": "p. 9"}]}]}"#;
        let manifest = Manifest::from_json(json).unwrap();
        let err = manifest.canvas(0).unwrap().primary_image().unwrap_err();
        assert!(err.to_string().contains("p. 9"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"label": "x", "viewingDirection": "left-to-right", "logo": "l.png"}"#;
        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.label, "x");
        assert!(manifest.sequences.is_empty());
    }
}
