//! Content-fetch collaborator
//!
//! Given a list of identifiers, returns the full content records, one slot
//! per identifier in input order. [`DataDirVideos`] resolves records from
//! `<data_dir>/videos/<id>.json`; a missing file is an absent record, not
//! an error.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tokio::fs;

/// Full content record for one video.
///
/// Only identifier, title, and description are contractual; every other
/// field rides along in `extra` so the preloaded entity serializes back
/// exactly as the source stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Narrow contract over the content-fetch collaborator.
#[allow(async_fn_in_trait)]
pub trait VideoSource: Send + Sync + 'static {
    /// Fetch full records for `ids`, preserving input order. An unknown
    /// identifier yields `None` in its slot.
    async fn fetch(&self, ids: &[String]) -> io::Result<Vec<Option<VideoRecord>>>;
}

/// Content source reading per-video JSON files from the data directory.
pub struct DataDirVideos {
    dir: PathBuf,
}

impl DataDirVideos {
    pub fn new(data_dir: &str) -> Self {
        Self {
            dir: PathBuf::from(data_dir).join("videos"),
        }
    }
}

impl VideoSource for DataDirVideos {
    async fn fetch(&self, ids: &[String]) -> io::Result<Vec<Option<VideoRecord>>> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let path = self.dir.join(format!("{id}.json"));
            match fs::read(&path).await {
                Ok(bytes) => {
                    let record = serde_json::from_slice(&bytes)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                    records.push(Some(record));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => records.push(None),
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip_preserves_unknown_fields() {
        let raw = r#"{"objectID":"abc123","title":"T","description":"D","speaker":{"twitter":"octocat"}}"#;
        let record: VideoRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.object_id, "abc123");
        assert_eq!(record.title, "T");
        let back = serde_json::to_string(&record).unwrap();
        let original: serde_json::Value = serde_json::from_str(raw).unwrap();
        let reserialized: serde_json::Value = serde_json::from_str(&back).unwrap();
        assert_eq!(original, reserialized);
    }

    #[test]
    fn test_minimal_record_omits_satisfaction() {
        let raw = r#"{"objectID":"abc123","title":"T","description":"D"}"#;
        let record: VideoRecord = serde_json::from_str(raw).unwrap();
        let back = serde_json::to_string(&record).unwrap();
        assert!(!back.contains("satisfaction"));
    }

    #[tokio::test]
    async fn test_missing_files_yield_absent_slots() {
        let source = DataDirVideos::new("definitely/not/a/data/dir");
        let ids = vec!["a".to_string(), "b".to_string()];
        let records = source.fetch(&ids).await.unwrap();
        assert_eq!(records, vec![None, None]);
    }
}
