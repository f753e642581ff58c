//! Core types returned by the service

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for one download request
///
/// Random (UUIDv4), so concurrent downloads never share an output filename
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Generate a fresh random job identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a format carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MediaType {
    /// Audio only
    Audio,
    /// Video only
    Video,
    /// Muxed audio and video
    #[serde(rename = "Audio+Video")]
    AudioVideo,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaType::Audio => "Audio",
            MediaType::Video => "Video",
            MediaType::AudioVideo => "Audio+Video",
        })
    }
}

/// One downloadable variant of a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VideoFormat {
    /// Direct media URL
    pub url: String,
    /// Human-readable quality label (e.g. "720p", "44100Hz")
    pub quality: String,
    /// Media type classification
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Container extension chosen by the site
    pub ext: String,
    /// Human-readable size, or "Unknown"
    pub filesize: String,
}

/// Normalized metadata for a parse request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,
    /// Thumbnail URL, if the site exposes one
    pub thumbnail: Option<String>,
    /// `H:MM:SS` / `M:SS`, or "Unknown"
    pub duration: String,
    /// Channel or uploader name, if known
    pub uploader: Option<String>,
    /// Formats in the order the tool reported them
    pub formats: Vec<VideoFormat>,
}

/// A finished download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DownloadedArtifact {
    /// Job this artifact belongs to
    pub job_id: JobId,
    /// File name inside the output directory, e.g. `<job>.mp4`
    pub file_name: String,
}

impl DownloadedArtifact {
    /// Path under the static mount, e.g. `/downloads/<job>.mp4`
    pub fn public_path(&self) -> String {
        format!("/downloads/{}", self.file_name)
    }
}
