//! Media value objects and upload file validation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Encoding lifecycle of an uploaded audio-video asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioVideoMediaStatus {
    /// Uploaded, not yet picked up by the encoder.
    Pending,
    /// Encoding in progress.
    Processing,
    /// Encoded output available at `encoded_location`.
    Completed,
    /// Encoding failed.
    Failed,
}

/// Which audio-video slot of the aggregate a media belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioVideoMediaType {
    /// The trailer slot.
    Trailer,
    /// The main video slot.
    Video,
}

impl std::fmt::Display for AudioVideoMediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AudioVideoMediaType::Trailer => "trailer",
            AudioVideoMediaType::Video => "video",
        })
    }
}

/// An uploaded audio-video asset and its encoding state. Immutable: state
/// changes produce a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioVideoMedia {
    /// Content-hash derived file name.
    pub name: String,
    /// Where the raw upload lives.
    pub raw_location: String,
    /// Where the encoded output lives, once completed.
    pub encoded_location: Option<String>,
    /// Encoding lifecycle state.
    pub status: AudioVideoMediaStatus,
}

impl AudioVideoMedia {
    /// A freshly uploaded asset, waiting for the encoder.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_location: raw_location.into(),
            encoded_location: None,
            status: AudioVideoMediaStatus::Pending,
        }
    }

    /// The asset with encoding completed at `encoded_location`.
    #[must_use]
    pub fn complete(&self, encoded_location: impl Into<String>) -> Self {
        Self {
            encoded_location: Some(encoded_location.into()),
            status: AudioVideoMediaStatus::Completed,
            ..self.clone()
        }
    }

    /// The asset with encoding marked as failed.
    #[must_use]
    pub fn fail(&self) -> Self {
        Self {
            status: AudioVideoMediaStatus::Failed,
            ..self.clone()
        }
    }
}

/// A static image asset (banner, thumbnail).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMedia {
    /// Content-hash derived file name.
    pub name: String,
    /// Where the image lives.
    pub location: String,
}

/// Upload constraints for one media slot.
#[derive(Debug, Clone, Copy)]
pub struct MediaFileRules {
    /// Maximum accepted size in bytes.
    pub max_size: u64,
    /// Accepted mime types.
    pub mime_types: &'static [&'static str],
}

/// Constraints for the trailer slot.
pub const TRAILER_RULES: MediaFileRules = MediaFileRules {
    max_size: 500 * 1024 * 1024,
    mime_types: &["video/mp4"],
};

/// Constraints for the main video slot.
pub const VIDEO_RULES: MediaFileRules = MediaFileRules {
    max_size: 1024 * 1024 * 1024,
    mime_types: &["video/mp4"],
};

/// Constraints for the image slots.
pub const IMAGE_RULES: MediaFileRules = MediaFileRules {
    max_size: 2 * 1024 * 1024,
    mime_types: &["image/jpeg", "image/png", "image/gif"],
};

/// Raw upload payload before validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client.
    pub raw_name: String,
    /// Raw bytes.
    pub data: Vec<u8>,
    /// Declared mime type.
    pub mime_type: String,
}

/// Validation failure for an uploaded media file. Merged into the
/// request's notification by the upload use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidMediaFileError {
    /// The upload exceeds the slot's size ceiling.
    #[error("file size {actual} exceeds the limit of {max} bytes")]
    Size {
        /// Size of the rejected upload.
        actual: u64,
        /// The slot's ceiling.
        max: u64,
    },
    /// The declared mime type is not accepted for the slot.
    #[error("mime type {actual} is not allowed")]
    MimeType {
        /// The rejected mime type.
        actual: String,
    },
}

/// A validated upload, named by the sha256 of its content plus the
/// original extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Content-addressed file name.
    pub name: String,
    /// Declared mime type, verified against the slot rules.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl MediaFile {
    /// Validates `file` against `rules` and derives the stored name.
    ///
    /// # Errors
    ///
    /// [`InvalidMediaFileError`] when the upload breaks a size or mime
    /// constraint.
    pub fn from_upload(
        file: &UploadedFile,
        rules: &MediaFileRules,
    ) -> Result<Self, InvalidMediaFileError> {
        let size = file.data.len() as u64;
        if size > rules.max_size {
            return Err(InvalidMediaFileError::Size {
                actual: size,
                max: rules.max_size,
            });
        }
        if !rules.mime_types.contains(&file.mime_type.as_str()) {
            return Err(InvalidMediaFileError::MimeType {
                actual: file.mime_type.clone(),
            });
        }

        let hash = Sha256::digest(&file.data);
        let name = match file.raw_name.rsplit_once('.') {
            Some((_, extension)) if !extension.is_empty() => format!("{hash:x}.{extension}"),
            _ => format!("{hash:x}"),
        };
        Ok(Self {
            name,
            mime_type: file.mime_type.clone(),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(raw_name: &str, data: &[u8], mime_type: &str) -> UploadedFile {
        UploadedFile {
            raw_name: raw_name.to_owned(),
            data: data.to_vec(),
            mime_type: mime_type.to_owned(),
        }
    }

    #[test]
    fn test_valid_upload_is_named_by_content_hash_and_extension() {
        // Arrange
        let file = upload("intro.mp4", b"bytes", "video/mp4");

        // Act
        let media_file = MediaFile::from_upload(&file, &TRAILER_RULES).unwrap();

        // Assert: same content, same name; extension preserved.
        assert!(media_file.name.ends_with(".mp4"));
        assert_eq!(
            media_file,
            MediaFile::from_upload(&file, &TRAILER_RULES).unwrap()
        );
        assert_eq!(media_file.size, 5);
    }

    #[test]
    fn test_oversized_upload_is_rejected() {
        // Arrange
        let rules = MediaFileRules {
            max_size: 4,
            mime_types: &["video/mp4"],
        };
        let file = upload("intro.mp4", b"bytes", "video/mp4");

        // Act
        let err = MediaFile::from_upload(&file, &rules).unwrap_err();

        // Assert
        assert_eq!(err, InvalidMediaFileError::Size { actual: 5, max: 4 });
    }

    #[test]
    fn test_disallowed_mime_type_is_rejected() {
        // Arrange
        let file = upload("intro.mkv", b"bytes", "video/x-matroska");

        // Act
        let err = MediaFile::from_upload(&file, &VIDEO_RULES).unwrap_err();

        // Assert
        assert_eq!(
            err,
            InvalidMediaFileError::MimeType {
                actual: "video/x-matroska".to_owned()
            }
        );
    }

    #[test]
    fn test_complete_produces_a_new_value_with_encoded_location() {
        // Arrange
        let media = AudioVideoMedia::new("cafe.mp4", "123/cafe.mp4");

        // Act
        let completed = media.complete("123/cafe.encoded.mp4");

        // Assert
        assert_eq!(media.status, AudioVideoMediaStatus::Pending);
        assert_eq!(completed.status, AudioVideoMediaStatus::Completed);
        assert_eq!(
            completed.encoded_location.as_deref(),
            Some("123/cafe.encoded.mp4")
        );
    }
}
