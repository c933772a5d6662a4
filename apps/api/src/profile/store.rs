//! Process-wide profile: the résumé text and the directory letters are saved to.
//!
//! Held in `AppState` behind an `Arc`. Every mutation is persisted to a JSON
//! record while the write guard is held, so writers are serialised and the
//! record on disk always matches the last completed mutation. Persistence
//! failures are logged and never fail the caller.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// The persisted record. Absent values are written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub save_directory: Option<PathBuf>,
}

/// What `GET /status` reports: no résumé content beyond its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStatus {
    pub resume_set: bool,
    pub resume_length: usize,
    pub save_directory: Option<String>,
}

impl Profile {
    pub fn status(&self) -> ProfileStatus {
        ProfileStatus {
            resume_set: self.resume.is_some(),
            resume_length: self.resume.as_deref().map(char_len).unwrap_or(0),
            save_directory: self
                .save_directory
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

/// Length in Unicode scalar values, as reported to clients.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub struct ProfileStore {
    path: PathBuf,
    profile: RwLock<Profile>,
}

impl ProfileStore {
    /// Opens the store, restoring a prior record from `path` when one exists.
    ///
    /// A missing record is normal on first run; an unreadable or corrupt one is
    /// logged and the store starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profile = match load_profile(&path).await {
            Ok(Some(profile)) => {
                info!(
                    path = %path.display(),
                    resume_set = profile.resume.is_some(),
                    save_directory_set = profile.save_directory.is_some(),
                    "Restored profile"
                );
                profile
            }
            Ok(None) => {
                info!(path = %path.display(), "No saved profile, starting empty");
                Profile::default()
            }
            Err(e) => {
                warn!(path = %path.display(), "Could not load app data: {e:#}");
                Profile::default()
            }
        };

        Self {
            path,
            profile: RwLock::new(profile),
        }
    }

    /// Snapshot of the current profile.
    pub async fn snapshot(&self) -> Profile {
        self.profile.read().await.clone()
    }

    pub async fn status(&self) -> ProfileStatus {
        self.profile.read().await.status()
    }

    pub async fn set_resume(&self, resume: String) {
        let mut profile = self.profile.write().await;
        info!(length = char_len(&resume), "Resume updated");
        profile.resume = Some(resume);
        self.persist(&profile).await;
    }

    /// Stores `directory` as given; callers validate it first.
    pub async fn set_save_directory(&self, directory: PathBuf) {
        let mut profile = self.profile.write().await;
        info!(directory = %directory.display(), "Save directory updated");
        profile.save_directory = Some(directory);
        self.persist(&profile).await;
    }

    async fn persist(&self, profile: &Profile) {
        let path = self.path.clone();
        let record = profile.clone();
        let outcome = tokio::task::spawn_blocking(move || save_profile(&path, &record)).await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(path = %self.path.display(), "Could not save app data: {e:#}"),
            Err(e) => warn!(path = %self.path.display(), "Save task failed: {e}"),
        }
    }
}

async fn load_profile(path: &Path) -> Result<Option<Profile>> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(None);
    }
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let profile = serde_json::from_str(&raw).context("parsing saved profile")?;
    Ok(Some(profile))
}

/// Writes the record next to its destination and renames it into place, so
/// readers never see a half-written file.
fn save_profile(path: &Path, profile: &Profile) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    serde_json::to_writer_pretty(tmp.as_file_mut(), profile)?;
    tmp.as_file_mut().flush()?;
    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_record_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().join("app_data.json")).await;
        assert_eq!(store.snapshot().await, Profile::default());
        assert_eq!(
            store.status().await,
            ProfileStatus {
                resume_set: false,
                resume_length: 0,
                save_directory: None,
            }
        );
    }

    #[tokio::test]
    async fn test_resume_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data.json");
        let resume = "Jane Doe — Rust engineer\nSix years of systems work.";

        {
            let store = ProfileStore::open(&path).await;
            store.set_resume(resume.to_string()).await;
        }

        let restored = ProfileStore::open(&path).await;
        let status = restored.status().await;
        assert!(status.resume_set);
        assert_eq!(status.resume_length, resume.chars().count());
        assert_eq!(restored.snapshot().await.resume.as_deref(), Some(resume));
    }

    #[tokio::test]
    async fn test_save_directory_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data.json");

        ProfileStore::open(&path)
            .await
            .set_save_directory(dir.path().to_path_buf())
            .await;

        let status = ProfileStore::open(&path).await.status().await;
        assert_eq!(
            status.save_directory,
            Some(dir.path().display().to_string())
        );
    }

    #[tokio::test]
    async fn test_record_layout_uses_null_for_absent_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data.json");

        ProfileStore::open(&path)
            .await
            .set_resume("text".to_string())
            .await;

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["resume"], "text");
        assert!(raw["save_directory"].is_null());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = ProfileStore::open(&path).await;
        assert_eq!(store.snapshot().await, Profile::default());
    }

    #[tokio::test]
    async fn test_record_with_missing_keys_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data.json");
        std::fs::write(&path, r#"{"resume": "only resume"}"#).unwrap();

        let store = ProfileStore::open(&path).await;
        let profile = store.snapshot().await;
        assert_eq!(profile.resume.as_deref(), Some("only resume"));
        assert!(profile.save_directory.is_none());
    }

    #[tokio::test]
    async fn test_unwritable_record_does_not_fail_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("app_data.json");

        let store = ProfileStore::open(&path).await;
        store.set_resume("still in memory".to_string()).await;

        assert_eq!(
            store.snapshot().await.resume.as_deref(),
            Some("still in memory")
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_status_counts_chars_not_bytes() {
        let profile = Profile {
            resume: Some("héllo".to_string()),
            save_directory: None,
        };
        assert_eq!(profile.status().resume_length, 5);
    }
}
