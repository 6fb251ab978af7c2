use crate::errors::StoreError;
use crate::models::{AttendanceRecord, AttendanceStatus, DecisionOutcome, Subject, SubjectStats};
use crate::stats::{derive_stats, percentage};
use crate::storage::RecordStore;
use chrono::Utc;
use std::collections::BTreeMap;

/// The two derived maps for one authenticated session. Rebuilt wholesale by
/// [`load_attendance`], patched in place by [`record_decision`], discarded on
/// sign-out.
#[derive(Debug, Clone, Default)]
pub struct AttendanceState {
    /// Latest recorded decision per subject; no entry means no decision was
    /// ever recorded.
    pub statuses: BTreeMap<String, AttendanceStatus>,
    /// Rolling stats per subject; every catalog subject has an entry.
    pub stats: BTreeMap<String, SubjectStats>,
}

/// Fetches the user's full history and derives both maps. Every catalog
/// subject gets a stats entry even with zero records. On fetch failure
/// nothing is installed; the caller retries only by calling again.
pub async fn load_attendance(
    store: &dyn RecordStore,
    catalog: &[Subject],
    user: &str,
) -> Result<AttendanceState, StoreError> {
    let records = store.fetch(user).await?;

    let mut state = AttendanceState::default();
    for subject in catalog {
        let rows: Vec<AttendanceRecord> = records
            .iter()
            .filter(|record| record.subject == subject.id)
            .cloned()
            .collect();

        state.stats.insert(subject.id.clone(), derive_stats(&rows));
        if let Some(last) = rows.last() {
            state.statuses.insert(subject.id.clone(), last.status);
        }
    }

    Ok(state)
}

/// Applies one attendance decision: persists it (update when the subject
/// already has a current row, insert otherwise), then patches both maps.
/// Persistence comes first; on failure the maps are left untouched.
pub async fn record_decision(
    store: &dyn RecordStore,
    state: &mut AttendanceState,
    user: &str,
    subject: &str,
    new_status: AttendanceStatus,
) -> Result<DecisionOutcome, StoreError> {
    let prior = state.statuses.get(subject).copied();
    let now = Utc::now();

    match prior {
        Some(_) => {
            store.update_latest(user, subject, new_status, now).await?;
        }
        None => {
            store
                .insert(
                    user,
                    AttendanceRecord {
                        subject: subject.to_string(),
                        status: new_status,
                        created_at: now,
                        updated_at: now,
                    },
                )
                .await?;
        }
    }

    state.statuses.insert(subject.to_string(), new_status);

    // Delta update instead of a refetch. This matches a full re-derive as
    // long as the insert-then-always-update pattern above keeps a single
    // current row per subject; a duplicate insert would make the two drift.
    let entry = state.stats.entry(subject.to_string()).or_default();
    if prior.is_none() {
        entry.total = entry.total.max(1);
    }
    match (new_status, prior) {
        (AttendanceStatus::Present, Some(AttendanceStatus::Present)) => {}
        (AttendanceStatus::Present, _) => entry.present += 1,
        (AttendanceStatus::Absent, Some(AttendanceStatus::Present)) => {
            entry.present = entry.present.saturating_sub(1);
        }
        (AttendanceStatus::Absent, _) => {}
    }
    entry.percentage = percentage(entry.present, entry.total);
    entry.streak = match new_status {
        AttendanceStatus::Present => entry.streak + 1,
        AttendanceStatus::Absent => 0,
    };

    Ok(match new_status {
        AttendanceStatus::Present => DecisionOutcome::Celebrate,
        AttendanceStatus::Absent => DecisionOutcome::Acknowledged,
    })
}
