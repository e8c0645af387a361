//! src/dataset/store.rs

use actix_web::web::Bytes;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Raw upload owned by one session.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
    pub uploaded_at: DateTime<Utc>,
}

struct Entry {
    file: UploadedFile,
    last_access: DateTime<Utc>,
}

/// Server side storage of uploads, keyed by the id kept in the session cookie.
#[derive(Default)]
pub struct DatasetStore {
    uploads: Mutex<HashMap<Uuid, Entry>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        // entries stay consistent even if a holder panicked
        self.uploads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, file_name: String, bytes: Bytes) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let file = UploadedFile {
            file_name,
            bytes,
            uploaded_at: now,
        };
        self.lock().insert(
            id,
            Entry {
                file,
                last_access: now,
            },
        );
        id
    }

    /// Returns a cheap copy of the upload and marks it as used.
    pub fn get(&self, id: &Uuid) -> Option<UploadedFile> {
        let mut uploads = self.lock();
        let entry = uploads.get_mut(id)?;
        entry.last_access = Utc::now();
        Some(entry.file.clone())
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.lock().remove(id).is_some()
    }

    /// Drop uploads not accessed within `lifetime`; returns the number removed.
    pub fn remove_idle(&self, lifetime: TimeDelta) -> usize {
        let deadline = Utc::now() - lifetime;
        let mut uploads = self.lock();
        let before = uploads.len();
        uploads.retain(|_, entry| entry.last_access >= deadline);
        before - uploads.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
