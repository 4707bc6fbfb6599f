// ABOUTME: Persistence port for the last profile/plan pair
// ABOUTME: PlanStore trait with an in-memory key/value fake and a file-per-key store on disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

//! # Plan Storage
//!
//! The session mirrors its last successful profile/plan pair into two
//! independent entries, keyed [`PLAN_KEY`] and [`PROFILE_KEY`], each holding
//! plain JSON text. A missing entry means there is no saved state. Writes
//! replace whole entries; the last writer wins.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::constants::storage::{PLAN_KEY, PROFILE_KEY};
use crate::errors::{AppError, AppResult};
use crate::models::{Plan, Profile};

/// Directory below the platform data dir used by default
const APP_DIR: &str = "fitcoach";

/// A profile together with the plan generated for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    /// Profile the plan was generated from
    pub profile: Profile,
    /// Generated plan
    pub plan: Plan,
}

/// Storage for the last profile/plan pair
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Read the saved pair; `None` when either entry is absent
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be read, or a
    /// serialization error when an entry is not valid JSON.
    async fn load(&self) -> AppResult<Option<SavedSession>>;

    /// Replace both entries
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be written.
    async fn save(&self, session: &SavedSession) -> AppResult<()>;

    /// Remove both entries; removing absent entries succeeds
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be written.
    async fn clear(&self) -> AppResult<()>;
}

/// Decode the two raw entries into a pair
fn decode(plan: Option<&str>, profile: Option<&str>) -> AppResult<Option<SavedSession>> {
    let (Some(plan), Some(profile)) = (plan, profile) else {
        return Ok(None);
    };
    Ok(Some(SavedSession {
        plan: serde_json::from_str(plan)?,
        profile: serde_json::from_str(profile)?,
    }))
}

// ============================================================================
// In-memory store
// ============================================================================

/// Key/value store held in memory
///
/// Entries are kept as raw JSON text so tests can plant malformed values.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryPlanStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` and `clear` fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw text of an entry
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Store raw text under a key
    ///
    /// # Errors
    ///
    /// Returns an internal error if the lock is poisoned
    pub fn insert_raw(&self, key: &str, value: impl Into<String>) -> AppResult<()> {
        self.lock()?.insert(key.to_owned(), value.into());
        Ok(())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::internal("plan store lock poisoned"))
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage("plan store is read-only"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn load(&self) -> AppResult<Option<SavedSession>> {
        let entries = self.lock()?;
        decode(
            entries.get(PLAN_KEY).map(String::as_str),
            entries.get(PROFILE_KEY).map(String::as_str),
        )
    }

    async fn save(&self, session: &SavedSession) -> AppResult<()> {
        self.check_writable()?;
        let plan = serde_json::to_string(&session.plan)?;
        let profile = serde_json::to_string(&session.profile)?;
        let mut entries = self.lock()?;
        entries.insert(PLAN_KEY.to_owned(), plan);
        entries.insert(PROFILE_KEY.to_owned(), profile);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.check_writable()?;
        let mut entries = self.lock()?;
        entries.remove(PLAN_KEY);
        entries.remove(PROFILE_KEY);
        Ok(())
    }
}

// ============================================================================
// File store
// ============================================================================

/// One JSON file per entry inside a directory
#[derive(Debug, Clone)]
pub struct FilePlanStore {
    dir: PathBuf,
}

impl FilePlanStore {
    /// Store rooted at `dir`; the directory is created on first save
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform data directory (`<data dir>/fitcoach`)
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the platform has no data directory
    pub fn default_location() -> AppResult<Self> {
        dirs::data_dir()
            .map(|base| Self::new(base.join(APP_DIR)))
            .ok_or_else(|| AppError::config("No platform data directory available"))
    }

    /// Directory holding the entries
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing an entry
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn read_entry(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.entry_path(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::from(e)),
        }
    }

    /// Path of the temporary file an entry is staged in before it is renamed into place
    #[must_use]
    pub fn staging_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.json.tmp"))
    }

    async fn stage_entry(&self, key: &str, text: &str) -> AppResult<()> {
        fs::write(self.staging_path(key), text).await?;
        Ok(())
    }

    async fn discard_staged(&self) {
        for key in [PLAN_KEY, PROFILE_KEY] {
            let _ = fs::remove_file(self.staging_path(key)).await;
        }
    }

    async fn commit_entry(&self, key: &str) -> AppResult<()> {
        fs::rename(self.staging_path(key), self.entry_path(key)).await?;
        Ok(())
    }

    async fn remove_entry(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(AppError::from(e)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PlanStore for FilePlanStore {
    async fn load(&self) -> AppResult<Option<SavedSession>> {
        let plan = self.read_entry(PLAN_KEY).await?;
        let profile = self.read_entry(PROFILE_KEY).await?;
        decode(plan.as_deref(), profile.as_deref())
    }

    async fn save(&self, session: &SavedSession) -> AppResult<()> {
        let plan = serde_json::to_string_pretty(&session.plan)?;
        let profile = serde_json::to_string_pretty(&session.profile)?;
        fs::create_dir_all(&self.dir).await?;

        // Both entries are staged before either replaces the saved pair
        let staged = match self.stage_entry(PLAN_KEY, &plan).await {
            Ok(()) => self.stage_entry(PROFILE_KEY, &profile).await,
            Err(e) => Err(e),
        };
        if let Err(e) = staged {
            self.discard_staged().await;
            return Err(e);
        }

        if let Err(e) = self.commit_entry(PLAN_KEY).await {
            self.discard_staged().await;
            return Err(e);
        }
        if let Err(e) = self.commit_entry(PROFILE_KEY).await {
            // A new plan must not sit next to the old profile
            let _ = self.remove_entry(PLAN_KEY).await;
            self.discard_staged().await;
            return Err(e);
        }

        debug!(dir = %self.dir.display(), "Saved plan session");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.remove_entry(PLAN_KEY).await?;
        self.remove_entry(PROFILE_KEY).await?;
        Ok(())
    }
}
