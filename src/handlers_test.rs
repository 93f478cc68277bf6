//! Router-level tests for the notes API and page views.
//!
//! Each test gets its own temporary data and upload directories and drives
//! the full `Router` with `oneshot`.

use super::*;
use crate::config::{Config, MAX_FILE_SIZE};
use crate::{app, AppState};
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

const BOUNDARY: &str = "----notes-share-test-boundary";

async fn test_app() -> (Router, Arc<AppState>, TempDir) {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(Config::in_dir(dir.path())).await.unwrap();
    (app(Arc::clone(&state)), state, dir)
}

struct Upload<'a> {
    fields: Vec<(&'a str, &'a str)>,
    files: Vec<(&'a str, &'a str, &'a [u8])>,
}

impl<'a> Upload<'a> {
    fn valid() -> Self {
        Self {
            fields: vec![
                ("course", "CS101"),
                ("subject", "Programming"),
                ("topic", "Recursion"),
            ],
            files: vec![("recursion.pdf", "application/pdf", b"%PDF-1.4 fake".as_slice())],
        }
    }

    fn without(mut self, name: &str) -> Self {
        self.fields.retain(|(k, _)| *k != name);
        self
    }

    fn field(mut self, name: &'a str, value: &'a str) -> Self {
        self.fields.push((name, value));
        self
    }

    fn files(mut self, files: Vec<(&'a str, &'a str, &'a [u8])>) -> Self {
        self.files = files;
        self
    }

    fn request(&self) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in &self.fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (filename, content_type, data) in &self.files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/notes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn call(app: &Router, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn list(app: &Router) -> Vec<Note> {
    let response = call(app, "GET", "/api/notes").await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn upload_one(app: &Router) -> Note {
    let response = send(app, Upload::valid().request()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    serde_json::from_value(body["newNotes"][0].clone()).unwrap()
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_starts_empty() {
    let (app, _state, _dir) = test_app().await;
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_list_recovers_from_corrupt_store() {
    let (app, state, _dir) = test_app().await;
    upload_one(&app).await;

    std::fs::write(state.store.path(), "[{ broken").unwrap();
    assert!(list(&app).await.is_empty());
    assert_eq!(
        std::fs::read_to_string(state.store.path()).unwrap().trim(),
        "[]"
    );
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_creates_one_note_per_file() {
    let (app, state, _dir) = test_app().await;

    let request = Upload::valid()
        .field("title", "Week 3")
        .files(vec![
            ("a.pdf", "application/pdf", b"aaa".as_slice()),
            ("b.txt", "text/plain", b"bbb".as_slice()),
            ("c.png", "image/png", b"ccc".as_slice()),
        ])
        .request();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Notes uploaded successfully!");
    let created: Vec<Note> = serde_json::from_value(body["newNotes"].clone()).unwrap();
    assert_eq!(created.len(), 3);

    for note in &created {
        assert_eq!(note.course, "CS101");
        assert_eq!(note.subject, "Programming");
        assert_eq!(note.topic, "Recursion");
        assert_eq!(note.title, "Week 3");
        assert_eq!((note.likes, note.dislikes), (0, 0));
        assert!(!note.has_liked && !note.has_disliked);
        assert!(note.file_url.starts_with("/uploads/"));
    }
    let mut ids: Vec<_> = created.iter().map(|n| &n.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    let mut urls: Vec<_> = created.iter().map(|n| &n.file_url).collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 3);

    assert_eq!(list(&app).await, created);
    assert_eq!(std::fs::read_dir(state.uploads.root()).unwrap().count(), 3);
}

#[tokio::test]
async fn test_uploaded_file_is_served() {
    let (app, _state, _dir) = test_app().await;
    let note = upload_one(&app).await;

    let response = call(&app, "GET", &note.file_url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"%PDF-1.4 fake".as_slice());
}

#[tokio::test]
async fn test_title_defaults_to_file_name() {
    let (app, _state, _dir) = test_app().await;
    let note = upload_one(&app).await;
    assert_eq!(note.title, "recursion.pdf");
}

#[tokio::test]
async fn test_upload_missing_field_rejected() {
    let (app, _state, _dir) = test_app().await;

    for missing in ["course", "subject", "topic"] {
        let response = send(&app, Upload::valid().without(missing).request()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {missing}");
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required fields or files");
    }
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_upload_without_files_rejected() {
    let (app, state, _dir) = test_app().await;

    let response = send(&app, Upload::valid().files(vec![]).request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list(&app).await.is_empty());
    assert_eq!(std::fs::read_dir(state.uploads.root()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_skips_disallowed_files() {
    let (app, state, _dir) = test_app().await;

    let request = Upload::valid()
        .files(vec![
            ("good.pdf", "application/pdf", b"ok".as_slice()),
            ("bad.exe", "application/x-msdownload", b"MZ".as_slice()),
        ])
        .request();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let notes = list(&app).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "good.pdf");
    assert_eq!(std::fs::read_dir(state.uploads.root()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_upload_all_disallowed_rejected() {
    let (app, state, _dir) = test_app().await;

    let request = Upload::valid()
        .files(vec![("bad.exe", "application/x-msdownload", b"MZ".as_slice())])
        .request();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid file type");
    assert!(list(&app).await.is_empty());
    assert_eq!(std::fs::read_dir(state.uploads.root()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_skips_oversized_files() {
    let (app, state, _dir) = test_app().await;
    let too_big = vec![b'x'; MAX_FILE_SIZE + 1];
    let exact = vec![b'y'; MAX_FILE_SIZE];

    let request = Upload::valid()
        .files(vec![
            ("big.txt", "text/plain", too_big.as_slice()),
            ("exact.txt", "text/plain", exact.as_slice()),
            ("ok.pdf", "application/pdf", b"%PDF".as_slice()),
        ])
        .request();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let mut titles: Vec<String> = list(&app).await.into_iter().map(|n| n.title).collect();
    titles.sort();
    assert_eq!(titles, vec!["exact.txt", "ok.pdf"]);
    assert_eq!(std::fs::read_dir(state.uploads.root()).unwrap().count(), 2);

    let request = Upload::valid()
        .files(vec![("big.txt", "text/plain", too_big.as_slice())])
        .request();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid file type");
    assert_eq!(list(&app).await.len(), 2);
}

#[tokio::test]
async fn test_upload_too_many_files_rejected() {
    let (app, _state, _dir) = test_app().await;

    let files: Vec<(&str, &str, &[u8])> = (0..11)
        .map(|_| ("n.txt", "text/plain", b"x".as_slice()))
        .collect();
    let response = send(&app, Upload::valid().files(files).request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Too many files");
    assert!(list(&app).await.is_empty());
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_like_toggle_round_trip() {
    let (app, _state, _dir) = test_app().await;
    let note = upload_one(&app).await;
    let uri = format!("/api/notes/{}/like", note.id);

    let response = call(&app, "POST", &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Note like toggled successfully!");
    assert_eq!(body["note"]["likes"], 1);
    assert_eq!(body["note"]["hasLiked"], true);

    let body = body_json(call(&app, "POST", &uri).await).await;
    assert_eq!(body["note"]["likes"], 0);
    assert_eq!(body["note"]["hasLiked"], false);

    assert_eq!(list(&app).await[0].likes, 0);
}

#[tokio::test]
async fn test_dislike_replaces_like() {
    let (app, _state, _dir) = test_app().await;
    let note = upload_one(&app).await;

    call(&app, "POST", &format!("/api/notes/{}/like", note.id)).await;
    let response = call(&app, "POST", &format!("/api/notes/{}/dislike", note.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Note dislike toggled successfully!");

    let stored = &list(&app).await[0];
    assert_eq!((stored.likes, stored.has_liked), (0, false));
    assert_eq!((stored.dislikes, stored.has_disliked), (1, true));
}

#[tokio::test]
async fn test_reaction_unknown_note() {
    let (app, _state, _dir) = test_app().await;

    for kind in ["like", "dislike"] {
        let response = call(&app, "POST", &format!("/api/notes/nope/{kind}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Note not found");
    }
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_removes_record_and_file() {
    let (app, _state, _dir) = test_app().await;
    let keep = upload_one(&app).await;
    let gone = upload_one(&app).await;

    let response = call(&app, "DELETE", &format!("/api/notes/{}", gone.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Note deleted successfully!");
    assert_eq!(body["deletedNote"]["id"], gone.id.as_str());

    assert_eq!(list(&app).await, vec![keep]);
    let response = call(&app, "GET", &gone.file_url).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_leaves_collection() {
    let (app, _state, _dir) = test_app().await;
    let note = upload_one(&app).await;

    let response = call(&app, "DELETE", "/api/notes/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Note not found");
    assert_eq!(list(&app).await, vec![note]);
}

#[tokio::test]
async fn test_delete_with_missing_file_succeeds() {
    let (app, state, _dir) = test_app().await;
    let note = upload_one(&app).await;

    let name = note.stored_file_name().unwrap();
    std::fs::remove_file(state.uploads.root().join(name)).unwrap();

    let response = call(&app, "DELETE", &format!("/api/notes/{}", note.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(list(&app).await.is_empty());
}

// ============================================================================
// Authentication and Pages
// ============================================================================

#[tokio::test]
async fn test_auth_endpoints_not_implemented() {
    let (app, _state, _dir) = test_app().await;

    for uri in ["/api/login", "/api/signup", "/api/google-signin"] {
        let response = call(&app, "POST", uri).await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(
            body_json(response).await["error"],
            "Authentication is not implemented"
        );
    }
}

#[tokio::test]
async fn test_root_redirects_home() {
    let (app, _state, _dir) = test_app().await;

    let response = call(&app, "GET", "/").await;
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/home");
}

#[tokio::test]
async fn test_pages_render() {
    let (app, _state, _dir) = test_app().await;

    for uri in ["/home", "/browse", "/upload", "/login", "/signup"] {
        let response = call(&app, "GET", uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"), "{uri}");
    }
}

#[tokio::test]
async fn test_browse_filters_by_query() {
    let (app, _state, _dir) = test_app().await;
    let request = Upload::valid()
        .without("course")
        .field("course", "PHYS110")
        .field("title", "Friction lab")
        .request();
    send(&app, request).await;
    upload_one(&app).await;

    let html = String::from_utf8(body_bytes(call(&app, "GET", "/browse?q=phys").await).await).unwrap();
    assert!(html.contains(r#"title="Friction lab""#));
    assert!(!html.contains(r#"title="recursion.pdf""#));

    let html = String::from_utf8(body_bytes(call(&app, "GET", "/browse").await).await).unwrap();
    assert!(html.contains(r#"title="Friction lab""#));
    assert!(html.contains(r#"title="recursion.pdf""#));
}
