//! Blocking IIIF client
//!
//! Fetches presentation manifests and image crops over HTTP. One client
//! owns one endpoint configuration; the calls are plain blocking GETs.

use super::manifest::Manifest;
use super::request::ImageRequest;
use super::{IiifConfig, IDENTIFIER_SET};
use crate::error::{CoreError, Result};
use percent_encoding::utf8_percent_encode;
use std::time::Duration;

/// Client for one IIIF server
#[derive(Debug)]
pub struct IiifClient {
    http: reqwest::blocking::Client,
    config: IiifConfig,
}

/// The raw result of an image fetch
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// The URL that was fetched
    pub url: String,
    /// The response body
    pub bytes: Vec<u8>,
    /// The Content-Type header, when the server sent one
    pub content_type: Option<String>,
}

impl FetchedImage {
    /// Decode the body with the `image` crate
    pub fn decode(&self) -> Result<image::DynamicImage> {
        Ok(image::load_from_memory(&self.bytes)?)
    }

    /// Pixel dimensions of the decoded body
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let decoded = self.decode()?;
        Ok((decoded.width(), decoded.height()))
    }
}

impl IiifClient {
    /// Create a client for the default endpoint
    pub fn new() -> Result<Self> {
        Self::with_config(IiifConfig::default())
    }

    /// Create a client for a specific endpoint configuration
    pub fn with_config(config: IiifConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| CoreError::Http {
                url: config.base_url(),
                source,
            })?;
        Ok(Self { http, config })
    }

    /// The endpoint configuration
    pub fn config(&self) -> &IiifConfig {
        &self.config
    }

    /// The manifest URL for an object identifier
    pub fn manifest_url(&self, identifier: &str) -> String {
        let identifier = utf8_percent_encode(identifier, IDENTIFIER_SET);
        format!(
            "{}/{}/{}/manifest",
            self.config.base_url(),
            self.config.presentation_prefix,
            identifier
        )
    }

    /// Fetch and parse the presentation manifest for an object
    pub fn fetch_manifest(&self, identifier: &str) -> Result<Manifest> {
        let url = self.manifest_url(identifier);
        log::debug!("fetching manifest {url}");
        let body = self.get(&url)?;
        let text = String::from_utf8_lossy(&body);
        serde_json::from_str(&text).map_err(|source| CoreError::ManifestParse { url, source })
    }

    /// Fetch the image bytes for a request against the configured server
    pub fn fetch_image(&self, request: &ImageRequest) -> Result<FetchedImage> {
        let url = request.url(&self.config)?;
        self.fetch_image_url(&url)
    }

    /// Fetch the image bytes for an already-built Image API URL
    ///
    /// Used for URLs derived from a manifest's service `@id`.
    pub fn fetch_image_url(&self, url: &str) -> Result<FetchedImage> {
        log::debug!("fetching image {url}");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| CoreError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let bytes = response
            .bytes()
            .map_err(|source| CoreError::Http {
                url: url.to_string(),
                source,
            })?
            .to_vec();
        log::debug!("fetched {} bytes from {url}", bytes.len());
        Ok(FetchedImage {
            url: url.to_string(),
            bytes,
            content_type,
        })
    }

    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| CoreError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|source| CoreError::Http {
                url: url.to_string(),
                source,
            })
    }
}
