use crate::models::Subject;
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

/// Subjects tracked by the app. A JSON file named by `SUBJECTS_PATH` can
/// replace the built-in list; on read or parse failure the default is used.
pub async fn load_catalog() -> Vec<Subject> {
    let Some(path) = resolve_catalog_path() else {
        return default_subjects();
    };

    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(subjects) => subjects,
            Err(err) => {
                error!("failed to parse subjects file: {err}");
                default_subjects()
            }
        },
        Err(err) => {
            error!("failed to read subjects file: {err}");
            default_subjects()
        }
    }
}

fn resolve_catalog_path() -> Option<PathBuf> {
    env::var("SUBJECTS_PATH").ok().map(PathBuf::from)
}

pub fn default_subjects() -> Vec<Subject> {
    vec![
        Subject {
            id: "devops".to_string(),
            name: "DevOps".to_string(),
            day: "Wednesday".to_string(),
            time: "2:00 PM".to_string(),
            icon: "⚙️".to_string(),
        },
        Subject {
            id: "programming".to_string(),
            name: "Programming".to_string(),
            day: "Tuesday".to_string(),
            time: "10:00 AM".to_string(),
            icon: "💻".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_unique_ids() {
        let subjects = default_subjects();
        assert!(!subjects.is_empty());
        for (i, subject) in subjects.iter().enumerate() {
            assert!(subjects[i + 1..].iter().all(|other| other.id != subject.id));
        }
    }
}
