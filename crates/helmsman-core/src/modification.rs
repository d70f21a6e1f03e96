//! Source-control modifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One change reported by a source-control provider.
///
/// Immutable once produced by the quiet-period detector. Modification lists
/// keep the provider's insertion order and are never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    /// File that changed.
    pub file_name: String,

    /// Containing folder, when the provider reports one.
    pub folder_name: Option<String>,

    /// Who made the change.
    pub user_name: String,

    /// Commit or checkin comment.
    pub comment: String,

    /// When the change was made, per the provider.
    pub modified_at: DateTime<Utc>,
}

impl Modification {
    pub fn new(
        file_name: impl Into<String>,
        user_name: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            folder_name: None,
            user_name: user_name.into(),
            comment: String::new(),
            modified_at,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_folder(mut self, folder_name: impl Into<String>) -> Self {
        self.folder_name = Some(folder_name.into());
        self
    }
}
