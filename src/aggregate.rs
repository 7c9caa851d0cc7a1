//! Combined detail + comments + recommendations record, saved as one JSON
//! file per title and run.

use crate::MovieRecord;
use crate::config::RunStamp;
use crate::error::PersistError;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateArtifact {
    #[serde(rename = "基本信息")]
    pub basic_info: serde_json::Map<String, serde_json::Value>,
    /// Already formatted comment listing
    #[serde(rename = "评论")]
    pub comments: String,
    /// Already formatted recommendation listing
    #[serde(rename = "推荐")]
    pub recommendations: String,
    #[serde(rename = "保存时间")]
    pub saved_at: String,
}

pub fn aggregate<Tz>(
    detail: &MovieRecord,
    comments: String,
    recommendations: String,
    saved_at: DateTime<Tz>,
) -> AggregateArtifact
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    AggregateArtifact {
        basic_info: detail.basic_info(),
        comments,
        recommendations,
        saved_at: saved_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

pub fn artifact_file_name(id: &str, run_stamp: &RunStamp) -> String {
    format!("movie_{}_{}.json", id, run_stamp)
}

/// Write `artifact` under `dir` as `movie_{id}_{stamp}.json`.
///
/// The JSON goes to a hidden temporary file first and is renamed into place,
/// so a failed write never leaves a truncated artifact behind.
pub fn persist(
    artifact: &AggregateArtifact,
    dir: &Path,
    id: &str,
    run_stamp: &RunStamp,
) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(dir)?;

    let name = artifact_file_name(id, run_stamp);
    let path = dir.join(&name);
    let tmp = dir.join(format!(".{}.tmp", name));

    let json = serde_json::to_string_pretty(artifact)?;
    if let Err(e) = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    info!("saved {}", path.display());
    Ok(path)
}

pub fn load(path: &Path) -> Result<AggregateArtifact, PersistError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
