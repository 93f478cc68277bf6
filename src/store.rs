//! Flat-file note store.
//!
//! All records live in a single JSON document. Every mutation loads the full
//! collection, changes it in memory and writes the whole collection back.
//! One async mutex serialises those round trips so concurrent requests never
//! lose each other's updates.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::Note;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct NoteStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl NoteStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// document if they do not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        if fs::metadata(&path).await.is_err() {
            write_atomic(&path, &[]).await?;
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_all(&self) -> Result<Vec<Note>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    pub async fn replace_all(&self, notes: &[Note]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        write_atomic(&self.path, notes).await
    }

    /// Load, mutate and persist under the store lock.
    ///
    /// When `f` returns an error the collection is left untouched on disk.
    pub async fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Note>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut notes = self.read_unlocked().await?;
        let out = f(&mut notes)?;
        write_atomic(&self.path, &notes).await?;
        Ok(out)
    }

    /// Read the document, resetting it to an empty collection when it is
    /// missing, blank or unparsable.
    async fn read_unlocked(&self) -> Result<Vec<Note>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "notes file unreadable, resetting");
                write_atomic(&self.path, &[]).await?;
                return Ok(Vec::new());
            }
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<Note>>(trimmed) {
            Ok(notes) => {
                debug!(count = notes.len(), "loaded notes");
                Ok(notes)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "notes file corrupt, resetting");
                write_atomic(&self.path, &[]).await?;
                Ok(Vec::new())
            }
        }
    }
}

/// Write via a sibling temp file and rename, so readers never see a partial
/// document.
async fn write_atomic(path: &Path, notes: &[Note]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(notes)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, &json).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteMeta;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sample(name: &str) -> Note {
        let meta = NoteMeta {
            course: "CS".into(),
            subject: "Algorithms".into(),
            topic: "Sorting".into(),
            title: None,
        };
        Note::new(&meta, name, format!("/uploads/{}", name))
    }

    #[tokio::test]
    async fn test_open_creates_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("notes.json");
        let store = NoteStore::open(&path).await.unwrap();

        assert!(path.exists());
        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_values() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes.json")).await.unwrap();

        let mut notes = vec![sample("b.pdf"), sample("a.pdf"), sample("c.pdf")];
        notes[1].likes = 3;
        notes[1].has_liked = true;
        store.replace_all(&notes).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), notes);
    }

    #[tokio::test]
    async fn test_corrupt_document_resets_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let store = NoteStore::open(&path).await.unwrap();

        std::fs::write(&path, "{ not json").unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_deleted_document_resets_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let store = NoteStore::open(&path).await.unwrap();

        std::fs::remove_file(&path).unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_update_error_leaves_document_untouched() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes.json")).await.unwrap();
        store.replace_all(&[sample("a.txt")]).await.unwrap();

        let result: Result<(), StoreError> = store
            .update(|notes| {
                notes.clear();
                Err(StoreError::Io(io::Error::other("boom")))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(NoteStore::open(dir.path().join("notes.json")).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .update(|notes| {
                        notes.push(sample(&format!("{}.txt", i)));
                        Ok::<_, StoreError>(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.load_all().await.unwrap().len(), 20);
    }
}
