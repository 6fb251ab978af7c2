use crate::engine::AttendanceState;
use crate::models::Subject;
use crate::storage::RecordStore;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

/// Shared handles: the record store, the subject catalog, and one
/// [`AttendanceState`] per signed-in user. Handlers hold the session lock
/// across persist-and-patch, which serializes decisions.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub catalog: Arc<Vec<Subject>>,
    pub sessions: Arc<Mutex<HashMap<String, AttendanceState>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, catalog: Vec<Subject>) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
