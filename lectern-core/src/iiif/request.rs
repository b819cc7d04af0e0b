//! IIIF Image API request construction
//!
//! Typed region, size, rotation, quality, and format parameters that
//! render their exact Image API path segments, and an [`ImageRequest`]
//! that assembles them into a full URL:
//! `{scheme}://{server}/{prefix}/{identifier}/{region}/{size}/{rotation}/{quality}.{format}`

use super::{IiifConfig, IDENTIFIER_SET};
use crate::error::{CoreError, Result};
use percent_encoding::utf8_percent_encode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn invalid(reason: impl Into<String>) -> CoreError {
    CoreError::InvalidImageRequest {
        reason: reason.into(),
    }
}

/// Formats a float the way the Image API expects: no trailing `.0`
fn fmt_number(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// The rectangular portion of the source image to return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Region {
    /// The whole image
    Full,
    /// The centered square cut from the image
    Square,
    /// An absolute pixel rectangle
    Absolute {
        /// Left edge in pixels
        x: u32,
        /// Top edge in pixels
        y: u32,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// A rectangle in percent of the source dimensions
    Percent {
        /// Left edge in percent
        x: f32,
        /// Top edge in percent
        y: f32,
        /// Width in percent
        width: f32,
        /// Height in percent
        height: f32,
    },
}

impl Region {
    fn validate(&self) -> Result<()> {
        match *self {
            Region::Absolute { width, height, .. } if width == 0 || height == 0 => {
                Err(invalid("region width and height must be greater than 0"))
            }
            Region::Percent { width, height, .. } if width <= 0.0 || height <= 0.0 => {
                Err(invalid("percent region width and height must be positive"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Region::Full => write!(f, "full"),
            Region::Square => write!(f, "square"),
            Region::Absolute {
                x,
                y,
                width,
                height,
            } => write!(f, "{x},{y},{width},{height}"),
            Region::Percent {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "pct:{},{},{},{}",
                fmt_number(x),
                fmt_number(y),
                fmt_number(width),
                fmt_number(height)
            ),
        }
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => return Ok(Region::Full),
            "square" => return Ok(Region::Square),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix("pct:") {
            let parts = parse_floats(rest, 4)
                .ok_or_else(|| invalid(format!("cannot parse percent region '{s}'")))?;
            return Ok(Region::Percent {
                x: parts[0],
                y: parts[1],
                width: parts[2],
                height: parts[3],
            });
        }
        let parts: Vec<u32> = s.split(',').map(|p| p.trim().parse().ok()).collect::<Option<_>>()
            .ok_or_else(|| invalid(format!("cannot parse region '{s}'")))?;
        if parts.len() != 4 {
            return Err(invalid(format!("region '{s}' needs x,y,w,h")));
        }
        Ok(Region::Absolute {
            x: parts[0],
            y: parts[1],
            width: parts[2],
            height: parts[3],
        })
    }
}

fn parse_floats(s: &str, n: usize) -> Option<Vec<f32>> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    (parts.len() == n).then_some(parts)
}

/// The scaled dimensions of the returned image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Size {
    /// The region at its native size
    Full,
    /// The largest size the server will deliver
    Max,
    /// Scale to an exact width, height to follow the aspect ratio
    Width(u32),
    /// Scale to an exact height, width to follow the aspect ratio
    Height(u32),
    /// Scale by a percentage of the region size
    Percent(f32),
    /// Scale to exact width and height, possibly distorting
    Exact {
        /// Target width in pixels
        width: u32,
        /// Target height in pixels
        height: u32,
    },
}

impl Size {
    fn validate(&self) -> Result<()> {
        match *self {
            Size::Width(0) | Size::Height(0) => Err(invalid("size must be greater than 0")),
            Size::Exact { width, height } if width == 0 || height == 0 => {
                Err(invalid("size must be greater than 0"))
            }
            Size::Percent(p) if p <= 0.0 => Err(invalid("percent size must be positive")),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Size::Full => write!(f, "full"),
            Size::Max => write!(f, "max"),
            Size::Width(w) => write!(f, "{w},"),
            Size::Height(h) => write!(f, ",{h}"),
            Size::Percent(p) => write!(f, "pct:{}", fmt_number(p)),
            Size::Exact { width, height } => write!(f, "{width},{height}"),
        }
    }
}

impl FromStr for Size {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => return Ok(Size::Full),
            "max" => return Ok(Size::Max),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix("pct:") {
            let pct: f32 = rest
                .trim()
                .parse()
                .map_err(|_| invalid(format!("cannot parse percent size '{s}'")))?;
            return Ok(Size::Percent(pct));
        }
        let parse_u32 = |p: &str| -> Result<u32> {
            p.trim()
                .parse()
                .map_err(|_| invalid(format!("cannot parse size '{s}'")))
        };
        match s.split_once(',') {
            Some((w, "")) => Ok(Size::Width(parse_u32(w)?)),
            Some(("", h)) => Ok(Size::Height(parse_u32(h)?)),
            Some((w, h)) => Ok(Size::Exact {
                width: parse_u32(w)?,
                height: parse_u32(h)?,
            }),
            None => Err(invalid(format!("cannot parse size '{s}'"))),
        }
    }
}

/// Rotation in degrees, optionally mirrored first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rotation {
    /// Clockwise rotation in degrees, 0 to 360
    pub degrees: f32,
    /// Mirror along the vertical axis before rotating
    pub mirrored: bool,
}

impl Rotation {
    /// A plain rotation by `degrees`
    pub fn new(degrees: f32) -> Self {
        Self {
            degrees,
            mirrored: false,
        }
    }

    /// A mirrored rotation by `degrees`
    pub fn mirrored(degrees: f32) -> Self {
        Self {
            degrees,
            mirrored: true,
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=360.0).contains(&self.degrees) {
            return Err(invalid(format!(
                "rotation {} outside 0-360",
                self.degrees
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mirrored {
            write!(f, "!{}", fmt_number(self.degrees))
        } else {
            write!(f, "{}", fmt_number(self.degrees))
        }
    }
}

impl FromStr for Rotation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let (mirrored, rest) = match s.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let degrees: f32 = rest
            .trim()
            .parse()
            .map_err(|_| invalid(format!("cannot parse rotation '{s}'")))?;
        Ok(Self { degrees, mirrored })
    }
}

/// The tonal rendering of the returned image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// The server's default rendering
    #[default]
    Default,
    /// Full color
    Color,
    /// Grayscale
    Gray,
    /// Black and white
    Bitonal,
}

impl Quality {
    /// The Image API path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Default => "default",
            Quality::Color => "color",
            Quality::Gray => "gray",
            Quality::Bitonal => "bitonal",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Quality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Quality::Default),
            "color" => Ok(Quality::Color),
            "gray" | "grey" => Ok(Quality::Gray),
            "bitonal" => Ok(Quality::Bitonal),
            other => Err(invalid(format!("unknown quality '{other}'"))),
        }
    }
}

/// The encoding of the returned image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG
    #[default]
    Jpg,
    /// PNG
    Png,
    /// GIF
    Gif,
    /// WebP
    Webp,
    /// TIFF
    Tif,
}

impl ImageFormat {
    /// The Image API file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Tif => "tif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "gif" => Ok(ImageFormat::Gif),
            "webp" => Ok(ImageFormat::Webp),
            "tif" | "tiff" => Ok(ImageFormat::Tif),
            other => Err(invalid(format!("unknown format '{other}'"))),
        }
    }
}

/// A complete Image API request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The image identifier on the server
    pub identifier: String,
    /// Requested region
    pub region: Region,
    /// Requested size
    pub size: Size,
    /// Requested rotation
    pub rotation: Rotation,
    /// Requested quality
    pub quality: Quality,
    /// Requested format
    pub format: ImageFormat,
}

impl ImageRequest {
    /// A request for the full image at maximum size
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            region: Region::Full,
            size: Size::Max,
            rotation: Rotation::default(),
            quality: Quality::Default,
            format: ImageFormat::Jpg,
        }
    }

    /// Set the region
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Set the size
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the quality
    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the format
    pub fn format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Check all parameters
    pub fn validate(&self) -> Result<()> {
        if self.identifier.is_empty() {
            return Err(invalid("identifier must not be empty"));
        }
        self.region.validate()?;
        self.size.validate()?;
        self.rotation.validate()?;
        Ok(())
    }

    /// The `{region}/{size}/{rotation}/{quality}.{format}` path suffix
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}/{}.{}",
            self.region, self.size, self.rotation, self.quality, self.format
        )
    }

    /// The full request URL against a configured server
    pub fn url(&self, config: &IiifConfig) -> Result<String> {
        self.validate()?;
        let identifier = utf8_percent_encode(&self.identifier, IDENTIFIER_SET);
        Ok(format!(
            "{}/{}/{}/{}",
            config.base_url(),
            config.image_prefix,
            identifier,
            self.path()
        ))
    }

    /// The full request URL against an Image API service base
    ///
    /// Used when the identifier endpoint comes straight out of a manifest
    /// (`resource.service.@id`) rather than from configuration.
    pub fn url_with_base(&self, service_base: &str) -> Result<String> {
        self.validate()?;
        Ok(format!(
            "{}/{}",
            service_base.trim_end_matches('/'),
            self.path()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_renders_canonical_url() {
        let config = IiifConfig::default();
        let url = ImageRequest::new("IMG123").url(&config).unwrap();
        assert_eq!(
            url,
            "https://iiif.nli.org.il/delivery/iiif/IMG123/full/max/0/default.jpg"
        );
    }

    #[test]
    fn test_crop_request_renders_all_segments() {
        let config = IiifConfig::for_host("example.org");
        let url = ImageRequest::new("IMG123")
            .region(Region::Absolute {
                x: 100,
                y: 200,
                width: 300,
                height: 400,
            })
            .size(Size::Width(150))
            .rotation(Rotation::new(90.0))
            .quality(Quality::Gray)
            .format(ImageFormat::Png)
            .url(&config)
            .unwrap();
        assert_eq!(
            url,
            "https://example.org/delivery/iiif/IMG123/100,200,300,400/150,/90/gray.png"
        );
    }

    #[test]
    fn test_identifier_is_percent_encoded() {
        let config = IiifConfig::for_host("example.org");
        let url = ImageRequest::new("ark:/12148/b001").url(&config).unwrap();
        assert!(url.contains("/ark%3A%2F12148%2Fb001/"));
    }

    #[test]
    fn test_percent_region_and_size() {
        let request = ImageRequest::new("x")
            .region(Region::Percent {
                x: 10.0,
                y: 10.0,
                width: 50.5,
                height: 50.0,
            })
            .size(Size::Percent(25.0));
        assert_eq!(request.path(), "pct:10,10,50.5,50/pct:25/0/default.jpg");
    }

    #[test]
    fn test_mirrored_rotation_segment() {
        let request = ImageRequest::new("x").rotation(Rotation::mirrored(180.0));
        assert_eq!(request.path(), "full/max/!180/default.jpg");
    }

    #[test]
    fn test_zero_area_region_is_rejected() {
        let config = IiifConfig::default();
        let err = ImageRequest::new("x")
            .region(Region::Absolute {
                x: 0,
                y: 0,
                width: 0,
                height: 10,
            })
            .url(&config)
            .unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn test_out_of_range_rotation_is_rejected() {
        let err = ImageRequest::new("x")
            .rotation(Rotation::new(400.0))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("outside 0-360"));
    }

    #[test]
    fn test_region_round_trips_from_str() {
        assert_eq!("full".parse::<Region>().unwrap(), Region::Full);
        assert_eq!("square".parse::<Region>().unwrap(), Region::Square);
        assert_eq!(
            "10,20,30,40".parse::<Region>().unwrap(),
            Region::Absolute {
                x: 10,
                y: 20,
                width: 30,
                height: 40
            }
        );
        assert!(matches!(
            "pct:10,10,50,50".parse::<Region>().unwrap(),
            Region::Percent { .. }
        ));
        assert!("10,20,30".parse::<Region>().is_err());
    }

    #[test]
    fn test_size_round_trips_from_str() {
        assert_eq!("max".parse::<Size>().unwrap(), Size::Max);
        assert_eq!("150,".parse::<Size>().unwrap(), Size::Width(150));
        assert_eq!(",200".parse::<Size>().unwrap(), Size::Height(200));
        assert_eq!(
            "150,200".parse::<Size>().unwrap(),
            Size::Exact {
                width: 150,
                height: 200
            }
        );
        assert_eq!("pct:25".parse::<Size>().unwrap(), Size::Percent(25.0));
        assert!("bogus".parse::<Size>().is_err());
    }

    #[test]
    fn test_rotation_parses_mirror_prefix() {
        assert_eq!("!90".parse::<Rotation>().unwrap(), Rotation::mirrored(90.0));
        assert_eq!("0".parse::<Rotation>().unwrap(), Rotation::new(0.0));
    }

    #[test]
    fn test_url_with_base_uses_service_id() {
        let url = ImageRequest::new("ignored")
            .region(Region::Square)
            .url_with_base("https://iiif.example.org/image/2/IMG123/")
            .unwrap();
        assert_eq!(
            url,
            "https://iiif.example.org/image/2/IMG123/square/max/0/default.jpg"
        );
    }
}
