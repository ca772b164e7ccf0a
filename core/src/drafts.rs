//! Local drafts of unfinished forms.
//!
//! A draft is a flat map of field name to value, stored as
//! `draft_{form_id}.json`. Restoring never fails loudly: a missing or
//! unreadable draft simply yields nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::{SiteError, SiteResult};

/// Field name to value. Checked checkboxes hold `"on"`.
pub type Draft = BTreeMap<String, String>;

/// File-backed draft storage
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, form_id: &str) -> SiteResult<PathBuf> {
        let valid = !form_id.is_empty()
            && form_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SiteError::DraftError(format!(
                "Invalid form id for draft: {:?}",
                form_id
            )));
        }
        Ok(self.dir.join(format!("draft_{}.json", form_id)))
    }

    pub fn save(&self, form_id: &str, draft: &Draft) -> SiteResult<()> {
        let path = self.path_for(form_id)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_vec(draft)?)?;
        debug!("Draft saved for form {}", form_id);
        Ok(())
    }

    /// Returns the stored draft, or `None` if there is none or it is malformed.
    pub fn restore(&self, form_id: &str) -> Option<Draft> {
        let path = self.path_for(form_id).ok()?;
        let content = fs::read(&path).ok()?;
        match serde_json::from_slice::<Draft>(&content) {
            Ok(draft) => Some(draft),
            Err(e) => {
                debug!("Discarding malformed draft for form {}: {}", form_id, e);
                None
            }
        }
    }

    pub fn discard(&self, form_id: &str) -> SiteResult<()> {
        let path = self.path_for(form_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Debounced draft saving: only the last snapshot within the delay is written.
#[derive(Debug)]
pub struct DraftAutosaver {
    store: Arc<DraftStore>,
    form_id: String,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DraftAutosaver {
    pub fn new(store: Arc<DraftStore>, form_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            store,
            form_id: form_id.into(),
            delay,
            pending: None,
        }
    }

    /// Schedules a save, cancelling any save still waiting on its delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, draft: Draft) {
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let store = Arc::clone(&self.store);
        let form_id = self.form_id.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = store.save(&form_id, &draft) {
                warn!("Failed to auto-save draft for form {}: {}", form_id, e);
            }
        }));
    }

    /// Waits for the pending save, if any, to finish.
    pub async fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.await;
        }
    }
}

impl Drop for DraftAutosaver {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Draft {
        let mut draft = Draft::new();
        draft.insert("title".to_string(), "Sunset session".to_string());
        draft.insert("featured".to_string(), "on".to_string());
        draft
    }

    #[test]
    fn test_save_restore_discard() {
        let dir = tempdir().unwrap();
        let store = DraftStore::new(dir.path());

        assert_eq!(store.restore("video-form"), None);

        store.save("video-form", &sample()).unwrap();
        assert!(dir.path().join("draft_video-form.json").exists());
        assert_eq!(store.restore("video-form"), Some(sample()));

        store.discard("video-form").unwrap();
        assert_eq!(store.restore("video-form"), None);
        // Discarding twice is fine
        store.discard("video-form").unwrap();
    }

    #[test]
    fn test_malformed_draft_is_discarded_silently() {
        let dir = tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        fs::write(dir.path().join("draft_package.json"), b"{not json").unwrap();

        assert_eq!(store.restore("package"), None);
    }

    #[test]
    fn test_rejects_path_like_form_ids() {
        let dir = tempdir().unwrap();
        let store = DraftStore::new(dir.path());

        let result = store.save("../escape", &sample());
        assert!(matches!(result, Err(SiteError::DraftError(_))));
        assert_eq!(store.restore("../escape"), None);
    }

    #[tokio::test]
    async fn test_autosave_keeps_last_snapshot() {
        let dir = tempdir().unwrap();
        let store = Arc::new(DraftStore::new(dir.path()));
        let mut saver = DraftAutosaver::new(Arc::clone(&store), "testimonial", Duration::from_millis(20));

        let mut first = Draft::new();
        first.insert("quote".to_string(), "Gre".to_string());
        saver.schedule(first);

        let mut second = Draft::new();
        second.insert("quote".to_string(), "Great crew".to_string());
        saver.schedule(second.clone());

        saver.flush().await;
        assert_eq!(store.restore("testimonial"), Some(second));
    }
}
