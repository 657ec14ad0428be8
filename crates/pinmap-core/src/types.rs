use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs as async_fs;

use crate::{Error, Result};

/// Image extensions accepted for attachments, with their MIME types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
];

/// A WGS-84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components lie within valid map ranges.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A named point of interest persisted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Display name of the place
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Username of the account that added the pin
    pub author: String,
    /// URL of the uploaded image, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Pin {
    /// Location of the pin.
    pub fn location(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Image file attached to a new pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// File name sent with the multipart part
    pub file_name: String,
    /// MIME type derived from the extension
    pub mime_type: &'static str,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Reads an image from disk.
    ///
    /// # Errors
    /// Returns [`Error::InvalidImage`] if the file is not a supported image type,
    /// or an I/O error if it cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let mime_type = mime_for_path(path)
            .ok_or_else(|| Error::InvalidImage(format!("{} is not an image", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidImage(format!("{} has no file name", path.display())))?
            .to_owned();
        let bytes = async_fs::read(path).await?;

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}

/// Looks up the image MIME type for a path by its extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Payload for creating a pin.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPin {
    /// Display name entered by the user
    pub name: String,
    /// Clicked map location
    pub location: LatLng,
    /// Optional image upload
    pub image: Option<ImageAttachment>,
}

/// Body returned by the server after a pin was created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedPin {
    /// Human readable confirmation
    #[serde(default)]
    pub message: Option<String>,
    /// The stored pin as the server sees it
    pub pin: Pin,
}
