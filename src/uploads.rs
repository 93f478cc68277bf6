//! Upload parsing, validation and placement of files on disk.
//!
//! Each file of a request is checked on its own against the MIME allow-list
//! and the size limit. Accepted files are written under a unique name in the
//! upload directory; this module is the only writer of that directory.

use std::io;
use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart};
use chrono::Utc;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{MAX_FILES, MAX_FILE_SIZE};
use crate::error::AppError;
use crate::models::NoteMeta;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// Route prefix under which stored files are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

// ============================================================================
// Parsed Form
// ============================================================================

#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub original_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
    /// Set when the part exceeded the size limit; `data` is then empty.
    pub oversized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    DisallowedType(Option<String>),
    TooLarge,
}

impl IncomingFile {
    pub fn check(&self) -> Result<(), Rejection> {
        let mime = self
            .content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some(m) if ALLOWED_MIME_TYPES.contains(&m) => {}
            _ => return Err(Rejection::DisallowedType(self.content_type.clone())),
        }

        if self.oversized || self.data.len() > MAX_FILE_SIZE {
            return Err(Rejection::TooLarge);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub course: Option<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub title: Option<String>,
    pub files: Vec<IncomingFile>,
}

impl UploadForm {
    /// Read every part of a multipart body.
    ///
    /// Unknown text fields are ignored. Reading stops with
    /// `AppError::TooManyFiles` as soon as an eleventh file part appears.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Multipart(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "files" | "files[]" => {
                    let Some(file) = read_file(field).await? else {
                        continue;
                    };
                    if form.files.len() == MAX_FILES {
                        return Err(AppError::TooManyFiles);
                    }
                    form.files.push(file);
                }
                "course" | "subject" | "topic" | "title" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::Multipart(e.body_text()))?;
                    let slot = match name.as_str() {
                        "course" => &mut form.course,
                        "subject" => &mut form.subject,
                        "topic" => &mut form.topic,
                        _ => &mut form.title,
                    };
                    *slot = Some(value);
                }
                other => debug!(field = other, "ignoring unknown upload field"),
            }
        }

        Ok(form)
    }

    /// Split the form into shared metadata and the files to store.
    ///
    /// Missing metadata or zero files fail the whole request. Files that fail
    /// their own checks are dropped; if none remain the request fails.
    pub fn validate(self) -> Result<(NoteMeta, Vec<IncomingFile>), AppError> {
        let required = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let (Some(course), Some(subject), Some(topic)) =
            (required(self.course), required(self.subject), required(self.topic))
        else {
            return Err(AppError::MissingFields);
        };
        if self.files.is_empty() {
            return Err(AppError::MissingFields);
        }

        let accepted: Vec<IncomingFile> = self
            .files
            .into_iter()
            .filter(|file| match file.check() {
                Ok(()) => true,
                Err(reason) => {
                    warn!(file = %file.original_name, ?reason, "rejecting uploaded file");
                    false
                }
            })
            .collect();

        if accepted.is_empty() {
            return Err(AppError::InvalidFileType);
        }

        let meta = NoteMeta {
            course,
            subject,
            topic,
            title: self.title,
        };
        Ok((meta, accepted))
    }
}

/// Drain one file part. Browsers send an empty, unnamed part when no file was
/// chosen; that yields `None`.
async fn read_file(mut field: Field<'_>) -> Result<Option<IncomingFile>, AppError> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(String::from);

    let mut data = Vec::new();
    let mut oversized = false;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Multipart(e.body_text()))?
    {
        if oversized {
            continue;
        }
        if data.len() + chunk.len() > MAX_FILE_SIZE {
            oversized = true;
            data = Vec::new();
        } else {
            data.extend_from_slice(&chunk);
        }
    }

    if original_name.is_empty() && data.is_empty() && !oversized {
        return Ok(None);
    }

    Ok(Some(IncomingFile {
        original_name,
        content_type,
        data,
        oversized,
    }))
}

// ============================================================================
// Upload Directory
// ============================================================================

pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` under a fresh unique name and return its public URL.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> io::Result<String> {
        let stored = unique_file_name(original_name);
        fs::write(self.root.join(&stored), data).await?;
        debug!(file = %stored, bytes = data.len(), "stored upload");
        Ok(format!("{}/{}", UPLOADS_ROUTE, stored))
    }

    /// Remove a stored file. Returns `false` when it was already gone.
    pub async fn remove(&self, stored_name: &str) -> io::Result<bool> {
        match fs::remove_file(self.root.join(stored_name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// `<unix millis>-<uuid>-<sanitized original name>`
pub fn unique_file_name(original_name: &str) -> String {
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        sanitize_file_name(original_name)
    )
}

pub fn sanitize_file_name(filename: &str) -> String {
    // Browsers may send a full client path; keep only the last component.
    let base = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let safe: String = base
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .take(200)
        .collect();

    if safe.is_empty() || safe.chars().all(|c| c == '.') {
        "file".to_string()
    } else {
        safe
    }
}
