use crate::models::{AttendanceRecord, AttendanceStatus, SubjectStats};

/// Derives stats from one subject's records, ordered ascending by creation
/// time. Pure; re-running on the same input yields the same output.
pub fn derive_stats(records: &[AttendanceRecord]) -> SubjectStats {
    let total = records.len() as u32;
    let present = records
        .iter()
        .filter(|record| record.status == AttendanceStatus::Present)
        .count() as u32;

    SubjectStats {
        present,
        total,
        percentage: percentage(present, total),
        streak: trailing_streak(records),
    }
}

/// Rounded attendance percentage, 0 when there is no history.
pub fn percentage(present: u32, total: u32) -> u8 {
    if total == 0 {
        0
    } else {
        ((f64::from(present) / f64::from(total)) * 100.0).round() as u8
    }
}

fn trailing_streak(records: &[AttendanceRecord]) -> u32 {
    records
        .iter()
        .rev()
        .take_while(|record| record.status == AttendanceStatus::Present)
        .count() as u32
}
