//! Data models for the note-sharing application.
//!
//! The `Note` record is the only persisted entity. The remaining types are
//! the JSON envelopes returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Core Note Type
// ============================================================================

/// One uploaded file together with its metadata and reaction state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub course: String,
    pub subject: String,
    pub topic: String,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub has_liked: bool,
    #[serde(default)]
    pub has_disliked: bool,
}

impl Note {
    /// Build a fresh record for a stored file. Reaction state starts neutral.
    pub fn new(meta: &NoteMeta, original_name: &str, file_url: String) -> Self {
        let title = match meta.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => original_name.to_string(),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            title,
            course: meta.course.clone(),
            subject: meta.subject.clone(),
            topic: meta.topic.clone(),
            file_url,
            uploaded_at: Utc::now(),
            likes: 0,
            dislikes: 0,
            has_liked: false,
            has_disliked: false,
        }
    }

    /// Name of the backing file inside the upload directory.
    ///
    /// Only the last path component of `file_url` is used, so a tampered
    /// document cannot point outside the upload directory.
    pub fn stored_file_name(&self) -> Option<&str> {
        self.file_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
    }
}

/// Metadata shared by every file of one upload request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMeta {
    pub course: String,
    pub subject: String,
    pub topic: String,
    pub title: Option<String>,
}

// ============================================================================
// API Envelopes
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub new_notes: Vec<Note>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReactionResponse {
    pub message: String,
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
