use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A persisted form submission or quote: the raw payload plus the id and
/// timestamp the store assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub payload: Value,
}

/// The narrow external-store contract: insert a record and get it back
/// with an assigned id, fetch one by id. Nothing in the pricing path
/// depends on this being available.
pub trait SubmissionStore: Send + Sync {
    fn insert(&self, kind: &str, payload: Value) -> Result<SubmissionRecord>;
    fn get(&self, kind: &str, id: Uuid) -> Result<Option<SubmissionRecord>>;
}

// ---------------------------------------------------------------------------
// Filesystem store: one pretty-printed JSON file per record
// ---------------------------------------------------------------------------

pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, kind: &str, id: Uuid) -> PathBuf {
        self.root.join(kind).join(format!("{id}.json"))
    }
}

impl SubmissionStore for FsStore {
    fn insert(&self, kind: &str, payload: Value) -> Result<SubmissionRecord> {
        let record = SubmissionRecord {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            created_at: Utc::now(),
            payload,
        };
        let path = self.path_for(kind, record.id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_vec_pretty(&record)?)?;
        tracing::debug!("stored {kind} {} at {}", record.id, path.display());
        Ok(record)
    }

    fn get(&self, kind: &str, id: Uuid) -> Result<Option<SubmissionRecord>> {
        let path = self.path_for(kind, id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

/// Accepts-and-drops store for tests and store-less deployments.
pub struct NullStore;

impl SubmissionStore for NullStore {
    fn insert(&self, kind: &str, payload: Value) -> Result<SubmissionRecord> {
        Ok(SubmissionRecord {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            created_at: Utc::now(),
            payload,
        })
    }

    fn get(&self, _kind: &str, _id: Uuid) -> Result<Option<SubmissionRecord>> {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fs_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let rec = store
            .insert("leads", json!({ "name": "Asha", "email": "asha@example.com" }))
            .unwrap();
        let back = store.get("leads", rec.id).unwrap().unwrap();
        assert_eq!(back.id, rec.id);
        assert_eq!(back.payload["email"], "asha@example.com");
        // kinds are separate namespaces
        assert!(store.get("quotes", rec.id).unwrap().is_none());
    }

    #[test]
    fn missing_record_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(store.get("leads", Uuid::new_v4()).unwrap().is_none());
    }
}
