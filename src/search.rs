//! Search index collaborator
//!
//! The proxy never owns search; it consumes a ranked/filtered lookup over
//! content records through the [`SearchIndex`] trait. [`FileIndex`] is the
//! in-process implementation backed by a JSON snapshot in the data dir,
//! loaded once at startup.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub hits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speaker {
    pub twitter: String,
    pub name: String,
}

/// A single search result; only the identifier is contractual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub object_id: String,
}

/// One index posting: identifier, ranking score, and whatever other
/// fields the snapshot carries (matched by refinements as string equality).
#[derive(Debug, Clone, Deserialize)]
pub struct Posting {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub satisfaction: f64,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

/// Narrow contract over the search collaborator.
pub trait SearchIndex: Send + Sync + 'static {
    fn list_tags(&self) -> Vec<Tag>;
    fn list_channels(&self) -> Vec<Channel>;
    fn list_speakers(&self) -> Vec<Speaker>;

    /// Filtered, sorted lookup. `query` is free text (unused when `None`),
    /// `refinement` is field-equality restriction, `sort_key` orders the
    /// result (`-` prefix for descending). Slots may be `None`; callers
    /// skip those.
    fn search(
        &self,
        query: Option<&str>,
        refinement: &HashMap<String, String>,
        sort_key: &str,
    ) -> Vec<Option<Hit>>;
}

#[derive(Debug, Default, Deserialize)]
struct IndexSnapshot {
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    speakers: Vec<Speaker>,
    #[serde(default)]
    videos: Vec<Posting>,
}

/// Search index backed by `<data_dir>/index.json`.
pub struct FileIndex {
    snapshot: IndexSnapshot,
}

impl FileIndex {
    /// Load the snapshot from the data directory.
    pub fn load(data_dir: &str) -> io::Result<Self> {
        let raw = std::fs::read_to_string(Path::new(data_dir).join("index.json"))?;
        let snapshot: IndexSnapshot = serde_json::from_str(&raw)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self { snapshot })
    }

    #[cfg(test)]
    fn from_postings(videos: Vec<Posting>) -> Self {
        Self {
            snapshot: IndexSnapshot {
                videos,
                ..IndexSnapshot::default()
            },
        }
    }

    fn matches(posting: &Posting, refinement: &HashMap<String, String>) -> bool {
        refinement.iter().all(|(key, want)| {
            if key == "objectID" {
                return posting.object_id == *want;
            }
            matches!(posting.fields.get(key), Some(Value::String(have)) if have == want)
        })
    }
}

impl SearchIndex for FileIndex {
    fn list_tags(&self) -> Vec<Tag> {
        self.snapshot.tags.clone()
    }

    fn list_channels(&self) -> Vec<Channel> {
        self.snapshot.channels.clone()
    }

    fn list_speakers(&self) -> Vec<Speaker> {
        self.snapshot.speakers.clone()
    }

    fn search(
        &self,
        _query: Option<&str>,
        refinement: &HashMap<String, String>,
        sort_key: &str,
    ) -> Vec<Option<Hit>> {
        let mut matched: Vec<&Posting> = self
            .snapshot
            .videos
            .iter()
            .filter(|p| Self::matches(p, refinement))
            .collect();

        let (descending, field) = match sort_key.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, sort_key),
        };
        if field == "satisfaction" {
            matched.sort_by(|a, b| {
                let ord = a
                    .satisfaction
                    .partial_cmp(&b.satisfaction)
                    .unwrap_or(std::cmp::Ordering::Equal);
                if descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        matched
            .into_iter()
            .map(|p| {
                Some(Hit {
                    object_id: p.object_id.clone(),
                })
            })
            .collect()
    }
}
