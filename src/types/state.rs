use serde::{Deserialize, Serialize};

/// Bumped whenever the persisted layout changes; older blobs are discarded.
pub const STATE_SCHEMA_VERSION: u32 = 1;

/// On-disk answer state for one assessment. The checksum ties the blob to
/// the exact quiz definition it was recorded against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedState {
    pub version: u32,
    pub quiz: String,
    pub checksum: String,
    pub saved_at: String,
    pub responses: Vec<SavedResponse>,
    pub results_shown: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavedResponse {
    pub id: u32,
    pub value: u8,
}
