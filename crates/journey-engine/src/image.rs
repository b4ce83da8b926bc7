//! Embeddable image references.
//!
//! Images are kept as `data:` URLs so the journal file stays self-contained.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// A `data:<mime>;base64,<payload>` image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

/// Errors that can occur when reading or decoding images.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a base64 data URL")]
    NotDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ImageRef {
    /// Encode raw bytes as a data URL.
    pub fn from_bytes(mime: &mime::Mime, bytes: &[u8]) -> Self {
        Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// Read an image file, guessing the media type from its extension.
    pub fn from_file(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&guess_mime(path), &bytes))
    }

    /// Wrap an existing data URL after checking its shape.
    pub fn from_data_url(url: impl Into<String>) -> Result<Self, ImageError> {
        let url = url.into();
        split_data_url(&url).ok_or(ImageError::NotDataUrl)?;
        Ok(Self(url))
    }

    /// The full data URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The declared media type.
    pub fn mime(&self) -> Option<&str> {
        split_data_url(&self.0).map(|(mime, _)| mime)
    }

    /// Decode the payload back to bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        let (_, payload) = split_data_url(&self.0).ok_or(ImageError::NotDataUrl)?;
        Ok(STANDARD.decode(payload)?)
    }
}

fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    Some((mime, payload))
}

fn guess_mime(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "bmp" => mime::IMAGE_BMP,
        "webp" => "image/webp"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
