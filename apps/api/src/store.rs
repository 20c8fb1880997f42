//! In-memory resume store.
//!
//! Requests share this store through `AppState`; the `RwLock` serializes
//! concurrent writes to the same identifier (last-writer-wins). Every
//! mutation of a resume drops the derived caches (embedding, suggestions)
//! for that identifier.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeVersion};

#[derive(Debug)]
struct ResumeEntry {
    resume: Resume,
    versions: Vec<ResumeVersion>,
    /// Next version number to hand out. Monotonic, never reused.
    next_version: u32,
    embedding: Option<Vec<f32>>,
    suggestions: Option<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct ResumeStore {
    inner: RwLock<HashMap<Uuid, ResumeEntry>>,
}

fn resume_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume '{id}' not found"))
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, resume: Resume) {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(
            resume.id,
            ResumeEntry {
                resume,
                versions: Vec::new(),
                next_version: 1,
                embedding: None,
                suggestions: None,
            },
        );
    }

    pub fn get(&self, id: Uuid) -> Result<Resume, AppError> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(&id)
            .map(|e| e.resume.clone())
            .ok_or_else(|| resume_not_found(id))
    }

    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.remove(&id).map(|_| ()).ok_or_else(|| resume_not_found(id))
    }

    /// Applies `mutate` to the stored resume and invalidates all derived
    /// caches for the identifier. Returns the updated resume.
    pub fn update<F>(&self, id: Uuid, mutate: F) -> Result<Resume, AppError>
    where
        F: FnOnce(&mut Resume),
    {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let entry = map.get_mut(&id).ok_or_else(|| resume_not_found(id))?;
        mutate(&mut entry.resume);
        entry.embedding = None;
        entry.suggestions = None;
        Ok(entry.resume.clone())
    }

    pub fn cached_embedding(&self, id: Uuid) -> Result<Option<Vec<f32>>, AppError> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(&id)
            .map(|e| e.embedding.clone())
            .ok_or_else(|| resume_not_found(id))
    }

    pub fn cache_embedding(&self, id: Uuid, embedding: Vec<f32>) -> Result<(), AppError> {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let entry = map.get_mut(&id).ok_or_else(|| resume_not_found(id))?;
        entry.embedding = Some(embedding);
        Ok(())
    }

    pub fn cached_suggestions(&self, id: Uuid) -> Result<Option<Vec<String>>, AppError> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(&id)
            .map(|e| e.suggestions.clone())
            .ok_or_else(|| resume_not_found(id))
    }

    pub fn cache_suggestions(&self, id: Uuid, suggestions: Vec<String>) -> Result<(), AppError> {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let entry = map.get_mut(&id).ok_or_else(|| resume_not_found(id))?;
        entry.suggestions = Some(suggestions);
        Ok(())
    }

    /// Snapshots the current structured fields as a new version.
    /// Version numbers increase monotonically and are never reused.
    pub fn create_version(
        &self,
        id: Uuid,
        changes: Option<String>,
    ) -> Result<ResumeVersion, AppError> {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let entry = map.get_mut(&id).ok_or_else(|| resume_not_found(id))?;
        let version = ResumeVersion {
            version: entry.next_version,
            created_at: Utc::now(),
            changes,
            fields: entry.resume.fields.clone(),
        };
        entry.next_version += 1;
        entry.versions.push(version.clone());
        // Version creation counts as a mutation point for derived caches.
        entry.embedding = None;
        entry.suggestions = None;
        Ok(version)
    }

    pub fn list_versions(&self, id: Uuid) -> Result<Vec<ResumeVersion>, AppError> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(&id)
            .map(|e| e.versions.clone())
            .ok_or_else(|| resume_not_found(id))
    }

    pub fn get_version(&self, id: Uuid, number: u32) -> Result<ResumeVersion, AppError> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let entry = map.get(&id).ok_or_else(|| resume_not_found(id))?;
        entry
            .versions
            .iter()
            .find(|v| v.version == number)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Version {number} not found for resume '{id}'"))
            })
    }
}
