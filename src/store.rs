use crate::error::{CompassError, Result};
use crate::types::state::{SavedResponse, SavedState, STATE_SCHEMA_VERSION};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_STATE_SUBDIR: &str = ".local/state/aliya-compass";

/// File-per-assessment answer store. The CLI counterpart of the original
/// browser localStorage keys, behind one versioned interface.
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the store location: an explicit override, else
    /// `$HOME/.local/state/aliya-compass`.
    pub fn open(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or(CompassError::NoStateDir)?;
        Ok(Self::new(home.join(DEFAULT_STATE_SUBDIR)))
    }

    fn blob_path(&self, quiz_id: &str) -> PathBuf {
        self.root.join(format!("{quiz_id}.json"))
    }

    pub fn has_state(&self, quiz_id: &str) -> bool {
        self.blob_path(quiz_id).exists()
    }

    /// Load saved answers, treating anything unusable as absent state:
    /// unreadable files, malformed JSON, schema-version mismatches, and
    /// blobs recorded against a different quiz definition.
    pub fn load(&self, quiz_id: &str, checksum: &str) -> Option<SavedState> {
        let path = self.blob_path(quiz_id);
        let raw = std::fs::read_to_string(&path).ok()?;
        let state: SavedState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(error) => {
                warn!(path = %path.display(), %error, "discarding malformed state blob");
                return None;
            }
        };
        if state.version != STATE_SCHEMA_VERSION {
            warn!(
                path = %path.display(),
                found = state.version,
                expected = STATE_SCHEMA_VERSION,
                "discarding state blob with unsupported schema version"
            );
            return None;
        }
        if state.quiz != quiz_id || state.checksum != checksum {
            warn!(
                path = %path.display(),
                "discarding state blob recorded against a different quiz definition"
            );
            return None;
        }
        debug!(path = %path.display(), "restored saved answers");
        Some(state)
    }

    pub fn save(
        &self,
        quiz_id: &str,
        checksum: &str,
        responses: Vec<SavedResponse>,
        results_shown: bool,
    ) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let state = SavedState {
            version: STATE_SCHEMA_VERSION,
            quiz: quiz_id.to_string(),
            checksum: checksum.to_string(),
            saved_at: Utc::now().to_rfc3339(),
            responses,
            results_shown,
        };
        let json = serde_json::to_string_pretty(&state)?;
        std::fs::write(self.blob_path(quiz_id), json)?;
        Ok(())
    }

    pub fn clear(&self, quiz_id: &str) -> Result<()> {
        let path = self.blob_path(quiz_id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
