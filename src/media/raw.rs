//! Raw `yt-dlp --dump-single-json` output
//!
//! Only the fields the service reads are modelled; everything else in the
//! (very large) info dict is ignored. Every field is optional because
//! extractors differ wildly in what they fill in.

use serde::Deserialize;

/// Top-level info dict for a single video
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVideoInfo {
    /// Video title
    pub title: Option<String>,
    /// Thumbnail URL
    pub thumbnail: Option<String>,
    /// Length in seconds (may be fractional)
    pub duration: Option<f64>,
    /// Uploader or channel name
    pub uploader: Option<String>,
    /// Available formats, worst to best as reported by the tool
    pub formats: Vec<RawFormat>,
}

/// One entry of the `formats` array
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFormat {
    /// Extractor-specific format identifier
    pub format_id: Option<String>,
    /// Direct media URL
    pub url: Option<String>,
    /// Container extension
    pub ext: Option<String>,
    /// Video codec, `"none"` for audio-only formats
    pub vcodec: Option<String>,
    /// Audio codec, `"none"` for video-only formats
    pub acodec: Option<String>,
    /// Extractor-provided quality label such as "720p" or "medium"
    pub format_note: Option<String>,
    /// Resolution string such as "1280x720"
    pub resolution: Option<String>,
    /// Frame height in pixels
    pub height: Option<f64>,
    /// Audio sample rate in Hz
    pub asr: Option<f64>,
    /// Exact size in bytes
    pub filesize: Option<f64>,
    /// Estimated size in bytes
    pub filesize_approx: Option<f64>,
}

/// Parse the stdout of an info dump
///
/// # Errors
///
/// Returns a description of the problem if stdout is not a JSON object or
/// carries no formats at all; the fallback loop treats either as a failed
/// attempt.
pub fn parse_info_output(stdout: &[u8]) -> Result<RawVideoInfo, String> {
    let info: RawVideoInfo = serde_json::from_slice(stdout)
        .map_err(|e| format!("malformed yt-dlp output: {}", e))?;

    if info.formats.is_empty() {
        return Err("yt-dlp output contains no formats".into());
    }

    Ok(info)
}
