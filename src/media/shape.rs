//! Mapping raw tool output onto the normalized response types

use super::raw::{RawFormat, RawVideoInfo};
use crate::types::{MediaType, VideoFormat, VideoMetadata};
use crate::utils::{format_duration, format_file_size};

/// A codec field counts only if present, non-empty, and not `"none"`
fn has_codec(codec: Option<&str>) -> bool {
    matches!(codec, Some(value) if !value.is_empty() && value != "none")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Classify a format by which codecs it declares
///
/// Returns `None` for entries with neither codec (manifests, storyboards).
#[must_use]
pub fn classify_media(vcodec: Option<&str>, acodec: Option<&str>) -> Option<MediaType> {
    match (has_codec(vcodec), has_codec(acodec)) {
        (false, false) => None,
        (false, true) => Some(MediaType::Audio),
        (true, false) => Some(MediaType::Video),
        (true, true) => Some(MediaType::AudioVideo),
    }
}

/// Quality label: format note, resolution, height, sample rate, "unknown"
#[must_use]
pub fn quality_label(format: &RawFormat) -> String {
    if let Some(note) = non_empty(format.format_note.as_deref()) {
        return note.to_string();
    }
    if let Some(resolution) = non_empty(format.resolution.as_deref()) {
        return resolution.to_string();
    }
    if let Some(height) = format.height.filter(|h| *h > 0.0) {
        return format!("{}", height as u64);
    }
    if let Some(asr) = format.asr.filter(|a| *a > 0.0) {
        return format!("{}Hz", asr as u64);
    }
    "unknown".to_string()
}

/// Human-readable size from the exact or, failing that, approximate size
#[must_use]
pub fn size_label(format: &RawFormat) -> String {
    format
        .filesize
        .or(format.filesize_approx)
        .filter(|bytes| bytes.is_finite() && *bytes >= 0.0)
        .map(|bytes| format_file_size(bytes as u64))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Normalize one format, or drop it if it has no URL or no codec
#[must_use]
pub fn shape_format(format: &RawFormat) -> Option<VideoFormat> {
    let url = non_empty(format.url.as_deref())?;
    let media_type = classify_media(format.vcodec.as_deref(), format.acodec.as_deref())?;

    Some(VideoFormat {
        url: url.to_string(),
        quality: quality_label(format),
        media_type,
        ext: non_empty(format.ext.as_deref())
            .unwrap_or("unknown")
            .to_string(),
        filesize: size_label(format),
    })
}

/// Normalize a whole info dump, keeping the tool's format order
#[must_use]
pub fn shape_metadata(info: RawVideoInfo) -> VideoMetadata {
    let duration_secs = info
        .duration
        .filter(|d| d.is_finite() && *d > 0.0)
        .map_or(0, |d| d.floor() as u64);

    let formats = info.formats.iter().filter_map(shape_format).collect();

    VideoMetadata {
        title: info.title.unwrap_or_else(|| "Untitled".to_string()),
        thumbnail: info.thumbnail,
        duration: format_duration(duration_secs),
        uploader: info.uploader,
        formats,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn raw(url: Option<&str>, vcodec: Option<&str>, acodec: Option<&str>) -> RawFormat {
        RawFormat {
            url: url.map(String::from),
            vcodec: vcodec.map(String::from),
            acodec: acodec.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_media() {
        assert_eq!(classify_media(Some("avc1"), Some("none")), Some(MediaType::Video));
        assert_eq!(classify_media(Some("avc1"), None), Some(MediaType::Video));
        assert_eq!(classify_media(Some("none"), Some("opus")), Some(MediaType::Audio));
        assert_eq!(classify_media(None, Some("mp4a")), Some(MediaType::Audio));
        assert_eq!(
            classify_media(Some("vp9"), Some("opus")),
            Some(MediaType::AudioVideo)
        );
        assert_eq!(classify_media(Some("none"), Some("none")), None);
        assert_eq!(classify_media(None, None), None);
    }

    #[test]
    fn test_quality_precedence() {
        let mut format = RawFormat {
            format_note: Some("720p60".into()),
            resolution: Some("1280x720".into()),
            height: Some(720.0),
            asr: Some(44100.0),
            ..Default::default()
        };
        assert_eq!(quality_label(&format), "720p60");

        format.format_note = Some("  ".into());
        assert_eq!(quality_label(&format), "1280x720");

        format.resolution = None;
        assert_eq!(quality_label(&format), "720");

        format.height = None;
        assert_eq!(quality_label(&format), "44100Hz");

        format.asr = None;
        assert_eq!(quality_label(&format), "unknown");
    }

    #[test]
    fn test_size_label() {
        let mut format = RawFormat {
            filesize: Some(1_048_576.0),
            filesize_approx: Some(5.0),
            ..Default::default()
        };
        assert_eq!(size_label(&format), "1 MB");

        format.filesize = None;
        assert_eq!(size_label(&format), "5 Bytes");

        format.filesize_approx = None;
        assert_eq!(size_label(&format), "Unknown");
    }

    #[test]
    fn test_shape_format_drops_entries_without_url_or_codec() {
        assert!(shape_format(&raw(None, Some("avc1"), Some("mp4a"))).is_none());
        assert!(shape_format(&raw(Some("https://x/m3u8"), Some("none"), Some("none"))).is_none());
        assert!(shape_format(&raw(Some("https://x/mhtml"), None, None)).is_none());

        let shaped = shape_format(&raw(Some("https://x/a"), Some("none"), Some("opus"))).unwrap();
        assert_eq!(shaped.media_type, MediaType::Audio);
        assert_eq!(shaped.ext, "unknown");
        assert_eq!(shaped.filesize, "Unknown");
        assert_eq!(shaped.quality, "unknown");
    }

    #[test]
    fn test_shape_metadata_preserves_order_and_formats_duration() {
        let info = RawVideoInfo {
            title: Some("Big Buck Bunny".into()),
            thumbnail: Some("https://i.example.com/t.jpg".into()),
            duration: Some(3661.7),
            uploader: Some("Blender".into()),
            formats: vec![
                RawFormat {
                    format_note: Some("1080p".into()),
                    ..raw(Some("https://x/1"), Some("vp9"), Some("none"))
                },
                raw(None, Some("vp9"), Some("opus")),
                RawFormat {
                    format_note: Some("medium".into()),
                    ..raw(Some("https://x/2"), Some("none"), Some("opus"))
                },
                RawFormat {
                    height: Some(360.0),
                    ..raw(Some("https://x/3"), Some("avc1"), Some("mp4a"))
                },
            ],
        };

        let metadata = shape_metadata(info);

        assert_eq!(metadata.title, "Big Buck Bunny");
        assert_eq!(metadata.duration, "1:01:01");
        assert_eq!(metadata.uploader.as_deref(), Some("Blender"));
        let urls: Vec<&str> = metadata.formats.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/1", "https://x/2", "https://x/3"]);
        assert_eq!(metadata.formats[2].quality, "360");
        assert_eq!(metadata.formats[2].media_type, MediaType::AudioVideo);
    }

    #[test]
    fn test_missing_or_zero_duration_is_unknown() {
        let mut info = RawVideoInfo::default();
        assert_eq!(shape_metadata(info.clone()).duration, "Unknown");

        info.duration = Some(0.0);
        assert_eq!(shape_metadata(info.clone()).duration, "Unknown");

        info.duration = Some(65.0);
        assert_eq!(shape_metadata(info).duration, "1:05");
    }
}
