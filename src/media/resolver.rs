//! Locating the file a download produced
//!
//! The tool picks the final extension, so the artifact is found by scanning
//! the output directory for the job id prefix. The directory is never
//! purged, so this scan grows with every download ever made.

use crate::error::{ExtractError, Result};
use crate::types::{DownloadedArtifact, JobId};
use std::path::Path;

/// Suffixes of in-progress or leftover files the tool may leave behind
const PARTIAL_SUFFIXES: [&str; 3] = [".part", ".ytdl", ".temp"];

fn is_partial(name: &str) -> bool {
    PARTIAL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Whether `name` is a per-format stream left over from a merge,
/// e.g. `<job>.f137.mp4` next to the merged `<job>.mp4`
fn is_format_stream(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(".f"))
        .and_then(|rest| rest.split_once('.'))
        .is_some_and(|(id, _)| {
            !id.is_empty()
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

/// Find the artifact whose name starts with `job_id` in `dir`
///
/// Scans the directory once. Leftover partial files are skipped. If several
/// complete files match, merged output is preferred over per-format streams,
/// then the lexically smallest name wins.
///
/// # Errors
///
/// Returns [`ExtractError::FileNotFound`] when nothing matches, or an I/O
/// error if the directory cannot be read.
pub async fn resolve_artifact(dir: &Path, job_id: &JobId) -> Result<DownloadedArtifact> {
    let prefix = job_id.to_string();
    let mut matches: Vec<String> = Vec::new();

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.starts_with(&prefix) || is_partial(&name) {
            continue;
        }
        if entry.file_type().await?.is_file() {
            matches.push(name);
        }
    }

    matches.sort_by_cached_key(|name| (is_format_stream(name, &prefix), name.clone()));
    match matches.into_iter().next() {
        Some(file_name) => Ok(DownloadedArtifact {
            job_id: *job_id,
            file_name,
        }),
        None => {
            tracing::warn!(
                job_id = %job_id,
                dir = %dir.display(),
                "Download reported success but no matching file was found"
            );
            Err(ExtractError::FileNotFound {
                job_id: job_id.to_string(),
            }
            .into())
        }
    }
}
