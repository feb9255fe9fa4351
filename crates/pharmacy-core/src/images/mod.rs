//! Image asset rules and the manager that applies them.

mod manager;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::PLACEHOLDER_IMAGE;
use crate::ports::StorageError;

pub use manager::{ImageAssetManager, Removal};

/// Largest accepted upload: 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

const DEFAULT_EXTENSION: &str = "jpg";
const PUBLIC_OBJECT_PREFIX: &str = "/storage/v1/object/public/";

/// Storage folder an image field writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFolder {
    #[serde(rename = "featured")]
    Featured,
    #[serde(rename = "og-images")]
    OgImages,
}

impl ImageFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFolder::Featured => "featured",
            ImageFolder::OgImages => "og-images",
        }
    }
}

impl fmt::Display for ImageFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(ImageFolder::Featured),
            "og-images" => Ok(ImageFolder::OgImages),
            other => Err(format!("unknown image folder: {other}")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Invalid file type. Please upload a JPEG, PNG, GIF, or WebP image.")]
    UnsupportedType(String),

    #[error("File too large. Maximum size is 5MB.")]
    TooLarge(usize),

    #[error("Failed to upload image. Please try again.")]
    Storage(#[source] StorageError),
}

/// Check type and size before anything is sent to storage.
pub fn validate_upload(content_type: &str, size: usize) -> Result<(), ImageError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !ALLOWED_CONTENT_TYPES.contains(&essence.as_str()) {
        return Err(ImageError::UnsupportedType(content_type.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge(size));
    }
    Ok(())
}

/// Lower-cased extension of `file_name`, `jpg` when it has none.
pub fn extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Destination path: `<folder>/<unix-millis>-<suffix>.<ext>`.
pub fn object_path(folder: ImageFolder, file_name: &str, now: DateTime<Utc>, suffix: &str) -> String {
    format!(
        "{}/{}-{}.{}",
        folder,
        now.timestamp_millis(),
        suffix,
        extension(file_name)
    )
}

/// Object path encoded in a public storage URL for `bucket`.
pub fn object_path_from_public_url(public_url: &str, bucket: &str) -> Option<String> {
    let parsed = url::Url::parse(public_url).ok()?;
    let prefix = format!("{PUBLIC_OBJECT_PREFIX}{bucket}/");
    let path = parsed.path().strip_prefix(&prefix)?;

    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// What to render for an image field. Missing images show the placeholder.
pub fn preview_src(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER_IMAGE,
    }
}
