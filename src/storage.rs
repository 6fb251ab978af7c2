use crate::errors::StoreError;
use crate::models::{AttendanceRecord, AttendanceStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

/// Boundary to the attendance record store. The store owns persisted truth;
/// the engine only ever appends, updates the latest row for a (user, subject)
/// pair, or fetches a user's full history in creation order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records for `user`, ordered ascending by `created_at`.
    async fn fetch(&self, user: &str) -> Result<Vec<AttendanceRecord>, StoreError>;

    async fn insert(&self, user: &str, record: AttendanceRecord) -> Result<(), StoreError>;

    /// Updates the most-recent row for (`user`, `subject`). Fails when no
    /// such row exists.
    async fn update_latest(
        &self,
        user: &str,
        subject: &str,
        status: AttendanceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// One row of the store file, shaped like the remote attendance table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRow {
    student_email: String,
    subject: String,
    status: AttendanceStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// File-backed store: a pretty-printed JSON array of rows, re-read on every
/// operation so the file stays the source of truth.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_rows(&self) -> Result<Vec<StoredRow>, String> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| format!("malformed store file: {err}")),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.to_string()),
        }
    }

    async fn write_rows(&self, rows: &[StoredRow]) -> Result<(), String> {
        let payload = serde_json::to_vec_pretty(rows).map_err(|err| err.to_string())?;
        fs::write(&self.path, payload).await.map_err(|err| err.to_string())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn fetch(&self, user: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = self.read_rows().await.map_err(|err| {
            error!("fetch failed: {err}");
            StoreError::fetch(err)
        })?;

        let mut records: Vec<AttendanceRecord> = rows
            .into_iter()
            .filter(|row| row.student_email == user)
            .map(|row| AttendanceRecord {
                subject: row.subject,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn insert(&self, user: &str, record: AttendanceRecord) -> Result<(), StoreError> {
        let mut rows = self.read_rows().await.map_err(StoreError::persist)?;
        rows.push(StoredRow {
            student_email: user.to_string(),
            subject: record.subject,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        });
        self.write_rows(&rows).await.map_err(|err| {
            error!("insert failed: {err}");
            StoreError::persist(err)
        })
    }

    async fn update_latest(
        &self,
        user: &str,
        subject: &str,
        status: AttendanceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut rows = self.read_rows().await.map_err(StoreError::persist)?;

        let latest = rows
            .iter_mut()
            .filter(|row| row.student_email == user && row.subject == subject)
            .max_by_key(|row| row.created_at)
            .ok_or_else(|| {
                StoreError::persist(format!("no attendance record to update for '{subject}'"))
            })?;
        latest.status = status;
        latest.updated_at = updated_at;

        self.write_rows(&rows).await.map_err(|err| {
            error!("update failed: {err}");
            StoreError::persist(err)
        })
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("ATTENDANCE_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/attendance.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("attendance.json"))
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, hour, 0, 0).unwrap()
    }

    fn record(subject: &str, status: AttendanceStatus, created_at: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord {
            subject: subject.to_string(),
            status,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn fetch_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.fetch("student@example.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_then_fetch_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .insert(
                "student@example.com",
                record("devops", AttendanceStatus::Present, at(9)),
            )
            .await
            .unwrap();

        let records = store.fetch("student@example.com").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "devops");
        assert_eq!(records[0].status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn fetch_orders_ascending_and_filters_by_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Inserted out of chronological order on purpose.
        store
            .insert("a@example.com", record("devops", AttendanceStatus::Absent, at(12)))
            .await
            .unwrap();
        store
            .insert("a@example.com", record("devops", AttendanceStatus::Present, at(9)))
            .await
            .unwrap();
        store
            .insert("b@example.com", record("devops", AttendanceStatus::Present, at(10)))
            .await
            .unwrap();

        let records = store.fetch("a@example.com").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].created_at, at(9));
        assert_eq!(records[1].created_at, at(12));
    }

    #[tokio::test]
    async fn update_latest_touches_only_the_newest_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .insert("a@example.com", record("devops", AttendanceStatus::Present, at(9)))
            .await
            .unwrap();
        store
            .insert("a@example.com", record("devops", AttendanceStatus::Present, at(11)))
            .await
            .unwrap();

        store
            .update_latest("a@example.com", "devops", AttendanceStatus::Absent, at(12))
            .await
            .unwrap();

        let records = store.fetch("a@example.com").await.unwrap();
        assert_eq!(records[0].status, AttendanceStatus::Present);
        assert_eq!(records[1].status, AttendanceStatus::Absent);
        assert_eq!(records[1].updated_at, at(12));
    }

    #[tokio::test]
    async fn update_latest_without_a_row_is_a_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let err = store
            .update_latest("a@example.com", "devops", AttendanceStatus::Present, at(9))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Persist(_)));
    }

    #[tokio::test]
    async fn malformed_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = JsonFileStore::new(path);
        let err = store.fetch("a@example.com").await.unwrap_err();
        assert!(matches!(err, StoreError::Fetch(_)));
    }
}
