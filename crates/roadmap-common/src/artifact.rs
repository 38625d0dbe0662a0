//! Write-once JSON artifacts
//!
//! Each run persists its results to a fresh file whose name embeds the run
//! timestamp, e.g. `ingestion_results_20260112_093015.json`. Existing files are
//! never truncated or appended to: when the name is already taken a numeric
//! suffix is added (`..._093015_1.json`).

use crate::error::{CommonError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Timestamp layout used in artifact file names
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Upper bound on suffixed names tried before giving up
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Build the base artifact file name for `prefix` at `timestamp`
pub fn artifact_file_name(prefix: &str, timestamp: DateTime<Utc>) -> String {
    format!("{}_{}.json", prefix, timestamp.format(ARTIFACT_TIMESTAMP_FORMAT))
}

/// Serialize `value` as pretty JSON into a new file under `dir`
///
/// Returns the path of the file that was created.
pub fn write_new_json<T: Serialize>(
    dir: &Path,
    prefix: &str,
    timestamp: DateTime<Utc>,
    value: &T,
) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(CommonError::ArtifactDir(dir.to_path_buf()));
    }

    let stem = format!("{}_{}", prefix, timestamp.format(ARTIFACT_TIMESTAMP_FORMAT));

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let file_name = if attempt == 0 {
            artifact_file_name(prefix, timestamp)
        } else {
            format!("{}_{}.json", stem, attempt)
        };
        let path = dir.join(&file_name);

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "Artifact name taken, trying next suffix");
                continue;
            },
            Err(e) => return Err(e.into()),
        };

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        return Ok(path);
    }

    Err(CommonError::ArtifactNameExhausted(stem, MAX_NAME_ATTEMPTS))
}
