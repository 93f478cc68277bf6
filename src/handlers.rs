//! HTTP route handlers.
//!
//! The JSON API under `/api/notes` and the server-rendered page views.
//! Every store mutation goes through `NoteStore::update`.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::models::{DeleteResponse, Note, ReactionResponse, UploadResponse};
use crate::notes::search_notes;
use crate::reactions::{toggle, Reaction};
use crate::store::StoreError;
use crate::templates::{
    render_browse, render_home, render_login, render_signup, render_upload,
};
use crate::uploads::UploadForm;
use crate::AppState;

// ============================================================================
// Notes API
// ============================================================================

pub async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state
        .store
        .load_all()
        .await
        .map_err(AppError::storage("Failed to fetch notes"))?;
    Ok(Json(notes))
}

pub async fn create_notes(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let form = UploadForm::from_multipart(multipart).await?;
    let (meta, files) = form.validate()?;

    let mut new_notes = Vec::with_capacity(files.len());
    for file in &files {
        let file_url = state
            .uploads
            .save(&file.original_name, &file.data)
            .await
            .map_err(|e| AppError::storage("Failed to upload notes")(e.into()))?;
        new_notes.push(Note::new(&meta, &file.original_name, file_url));
    }

    let appended = new_notes.clone();
    state
        .store
        .update(move |notes| {
            notes.extend(appended);
            Ok::<_, StoreError>(())
        })
        .await
        .map_err(|e| {
            let orphaned: Vec<&str> = new_notes.iter().map(|n| n.file_url.as_str()).collect();
            error!(?orphaned, "notes not persisted, stored files are orphaned");
            AppError::storage("Failed to upload notes")(e)
        })?;

    info!(
        count = new_notes.len(),
        course = %meta.course,
        subject = %meta.subject,
        "uploaded notes"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Notes uploaded successfully!".to_string(),
            new_notes,
        }),
    ))
}

pub async fn delete_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state
        .store
        .update(|notes| {
            let idx = notes
                .iter()
                .position(|n| n.id == id)
                .ok_or(AppError::NotFound)?;
            Ok::<_, AppError>(notes.remove(idx))
        })
        .await
        .map_err(|e| e.context("Failed to delete note"))?;

    // The record is already gone; a missing or stuck file only gets logged.
    if let Some(name) = deleted.stored_file_name() {
        match state.uploads.remove(name).await {
            Ok(true) => debug!(file = name, "removed stored file"),
            Ok(false) => debug!(file = name, "stored file already missing"),
            Err(e) => warn!(file = name, error = %e, "failed to remove stored file"),
        }
    }

    info!(id = %deleted.id, "deleted note");

    Ok(Json(DeleteResponse {
        message: "Note deleted successfully!".to_string(),
        deleted_note: deleted,
    }))
}

pub async fn like_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReactionResponse>, AppError> {
    react(&state, &id, Reaction::Like)
        .await
        .map_err(|e| e.context("Failed to toggle like"))
}

pub async fn dislike_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReactionResponse>, AppError> {
    react(&state, &id, Reaction::Dislike)
        .await
        .map_err(|e| e.context("Failed to toggle dislike"))
}

async fn react(
    state: &AppState,
    id: &str,
    reaction: Reaction,
) -> Result<Json<ReactionResponse>, AppError> {
    let note = state
        .store
        .update(|notes| {
            let note = notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or(AppError::NotFound)?;
            toggle(note, reaction);
            Ok::<_, AppError>(note.clone())
        })
        .await?;

    debug!(id, ?reaction, likes = note.likes, dislikes = note.dislikes, "toggled reaction");

    Ok(Json(ReactionResponse {
        message: reaction.toggled_message().to_string(),
        note,
    }))
}

// ============================================================================
// Authentication (not implemented)
// ============================================================================

pub async fn auth_not_implemented() -> AppError {
    info!("rejected authentication request");
    AppError::NotImplemented
}

// ============================================================================
// Page Views
// ============================================================================

#[derive(Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn root() -> Redirect {
    Redirect::to("/home")
}

pub async fn home() -> Html<String> {
    Html(render_home())
}

pub async fn browse(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrowseQuery>,
) -> Result<Html<String>, AppError> {
    let notes = state
        .store
        .load_all()
        .await
        .map_err(AppError::storage("Failed to fetch notes"))?;
    let matching = search_notes(&notes, &query.q);
    Ok(Html(render_browse(&matching, &query.q)))
}

pub async fn upload_page() -> Html<String> {
    Html(render_upload())
}

pub async fn login_page() -> Html<String> {
    Html(render_login())
}

pub async fn signup_page() -> Html<String> {
    Html(render_signup())
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
#[path = "handlers_test.rs"]
mod handlers_test;
