//! Project cover image, sent to the backend as a base64 data URL.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 900_000;

pub const IMAGE_TOO_LARGE_TITLE: &str = "Oops! The image size is too large";
pub const IMAGE_TOO_LARGE_BODY: &str = "Please choose an image that is 900KB or smaller.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image is {size} bytes, the limit is 900000")]
    TooLarge { size: usize },

    #[error("image is empty")]
    Empty,

    #[error("unsupported content type: {0}")]
    NotAnImage(String),

    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
}

/// A validated image: at most [`MAX_IMAGE_BYTES`], with an `image/*` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectImage {
    content_type: String,
    bytes: Vec<u8>,
}

impl ProjectImage {
    pub fn from_bytes(bytes: Vec<u8>, content_type: &str) -> Result<Self, ImageError> {
        let content_type = content_type.trim().to_lowercase();
        if !content_type.starts_with("image/") {
            return Err(ImageError::NotAnImage(content_type));
        }
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge { size: bytes.len() });
        }
        Ok(Self {
            content_type,
            bytes,
        })
    }

    /// Parse `data:<type>;base64,<payload>` as produced by a file reader.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::InvalidDataUrl("missing data: prefix".into()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| ImageError::InvalidDataUrl("missing payload".into()))?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| ImageError::InvalidDataUrl("payload is not base64".into()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| ImageError::InvalidDataUrl(e.to_string()))?;
        Self::from_bytes(bytes, content_type)
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit_inclusive() {
        assert!(ProjectImage::from_bytes(vec![1; MAX_IMAGE_BYTES], "image/jpeg").is_ok());
        assert_eq!(
            ProjectImage::from_bytes(vec![1; MAX_IMAGE_BYTES + 1], "image/jpeg"),
            Err(ImageError::TooLarge {
                size: MAX_IMAGE_BYTES + 1
            })
        );
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            ProjectImage::from_bytes(vec![1], "application/pdf"),
            Err(ImageError::NotAnImage("application/pdf".into()))
        );
        assert_eq!(ProjectImage::from_bytes(vec![], "image/png"), Err(ImageError::Empty));
    }

    #[test]
    fn test_data_url() {
        let image = ProjectImage::from_bytes(b"hello".to_vec(), "IMAGE/PNG").unwrap();
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");

        let parsed = ProjectImage::from_data_url("data:image/gif;base64,aGVsbG8=").unwrap();
        assert_eq!(parsed.content_type(), "image/gif");
        assert_eq!(parsed.len(), 5);
    }

    #[test]
    fn test_bad_data_urls() {
        assert!(ProjectImage::from_data_url("image/png;base64,aGVsbG8=").is_err());
        assert!(ProjectImage::from_data_url("data:image/png,hello").is_err());
        assert!(ProjectImage::from_data_url("data:image/png;base64,@@@").is_err());
    }
}
