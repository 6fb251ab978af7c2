use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One attendance decision as stored. Rows for a subject are ordered by
/// `created_at`; the latest row is the subject's current decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub subject: String,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub present: u32,
    pub total: u32,
    pub percentage: u8,
    pub streak: u32,
}

/// Catalog entry for a recurring class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub day: String,
    pub time: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOutcome {
    Celebrate,
    Acknowledged,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub subject: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub subject: String,
    pub status: AttendanceStatus,
    pub outcome: DecisionOutcome,
    pub stats: SubjectStats,
}

#[derive(Debug, Serialize)]
pub struct AttendanceView {
    pub statuses: BTreeMap<String, AttendanceStatus>,
    pub stats: BTreeMap<String, SubjectStats>,
}
