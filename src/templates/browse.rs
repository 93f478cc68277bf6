//! Browse view.
//!
//! The first render is done on the server (filtered by `?q=`) so the list
//! works without scripts. The script then takes over: it fetches the full
//! collection, filters on every keystroke and calls the reaction and delete
//! endpoints.

use crate::models::Note;
use crate::notes::html_escape;

use super::components::base_html;

pub fn render_browse(notes: &[&Note], query: &str) -> String {
    let cards = if notes.is_empty() {
        empty_html().to_string()
    } else {
        let mut html = String::from(r#"<div class="note-grid">"#);
        for note in notes {
            html.push_str(&note_card(note));
        }
        html.push_str("</div>");
        html
    };

    let content = format!(
        r#"<h1>Available Notes</h1>
        <form action="/browse" method="get">
            <input id="search" class="search-input" type="text" name="q"
                   placeholder="Search by title, course, subject, or topic..."
                   value="{query}" autocomplete="off">
        </form>
        <div id="notes-error" class="message"></div>
        <div id="notes">{cards}</div>"#,
        query = html_escape(query),
    );

    base_html("Browse Notes", "/browse", &content, BROWSE_JS)
}

fn empty_html() -> &'static str {
    r#"<div class="empty"><p>No notes match your search.</p><p>Try adjusting your search query!</p></div>"#
}

fn note_card(note: &Note) -> String {
    format!(
        r#"<div class="note-card" data-id="{id}">
            <h2 title="{title}">{title}</h2>
            <p><strong>Course:</strong> {course}</p>
            <p><strong>Subject:</strong> {subject}</p>
            <p><strong>Topic:</strong> {topic}</p>
            <p class="meta">Uploaded: {uploaded}</p>
            <div class="actions">
                <button class="btn{liked}" data-action="like">&#128077; {likes}</button>
                <button class="btn{disliked}" data-action="dislike">&#128078; {dislikes}</button>
            </div>
            <div class="actions">
                <a class="btn primary" href="{file_url}" target="_blank" rel="noopener">Download</a>
                <button class="btn danger" data-action="delete">Delete</button>
            </div>
        </div>"#,
        id = html_escape(&note.id),
        title = html_escape(&note.title),
        course = html_escape(&note.course),
        subject = html_escape(&note.subject),
        topic = html_escape(&note.topic),
        uploaded = note.uploaded_at.format("%Y-%m-%d %H:%M UTC"),
        liked = if note.has_liked { " liked" } else { "" },
        disliked = if note.has_disliked { " disliked" } else { "" },
        likes = note.likes,
        dislikes = note.dislikes,
        file_url = html_escape(&note.file_url),
    )
}

const BROWSE_JS: &str = r#"
let allNotes = [];

function matches(note, query) {
    const q = query.trim().toLowerCase();
    if (!q) return true;
    return [note.title, note.course, note.subject, note.topic]
        .some(f => String(f || '').toLowerCase().includes(q));
}

function card(note) {
    return `<div class="note-card" data-id="${escapeHtml(note.id)}">
        <h2 title="${escapeHtml(note.title)}">${escapeHtml(note.title)}</h2>
        <p><strong>Course:</strong> ${escapeHtml(note.course)}</p>
        <p><strong>Subject:</strong> ${escapeHtml(note.subject)}</p>
        <p><strong>Topic:</strong> ${escapeHtml(note.topic)}</p>
        <p class="meta">Uploaded: ${escapeHtml(new Date(note.uploadedAt).toLocaleString())}</p>
        <div class="actions">
            <button class="btn${note.hasLiked ? ' liked' : ''}" data-action="like">&#128077; ${note.likes || 0}</button>
            <button class="btn${note.hasDisliked ? ' disliked' : ''}" data-action="dislike">&#128078; ${note.dislikes || 0}</button>
        </div>
        <div class="actions">
            <a class="btn primary" href="${escapeHtml(note.fileUrl)}" target="_blank" rel="noopener">Download</a>
            <button class="btn danger" data-action="delete">Delete</button>
        </div>
    </div>`;
}

function render() {
    const query = document.getElementById('search').value;
    const visible = allNotes.filter(n => matches(n, query));
    const container = document.getElementById('notes');
    if (visible.length === 0) {
        container.innerHTML = '<div class="empty"><p>No notes match your search.</p><p>Try adjusting your search query!</p></div>';
        return;
    }
    container.innerHTML = '<div class="note-grid">' + visible.map(card).join('') + '</div>';
}

async function loadNotes() {
    const errorBox = document.getElementById('notes-error');
    errorBox.className = 'message';
    try {
        const response = await fetchWithTimeout('/api/notes', {}, 10000);
        if (!response.ok) throw new Error(await errorMessage(response, 'Failed to fetch notes'));
        allNotes = await response.json();
        render();
    } catch (e) {
        console.error('Error fetching notes:', e);
        errorBox.innerHTML = 'Failed to fetch notes. Please check your connection. <button class="btn" onclick="loadNotes()">Retry Fetching Notes</button>';
        errorBox.className = 'message error';
    }
}

function replaceNote(updated) {
    allNotes = allNotes.map(n => n.id === updated.id ? updated : n);
    render();
}

async function react(id, kind) {
    try {
        const response = await fetch('/api/notes/' + encodeURIComponent(id) + '/' + kind, { method: 'POST' });
        if (!response.ok) throw new Error(await errorMessage(response, 'Failed to toggle ' + kind));
        const body = await response.json();
        replaceNote(body.note);
    } catch (e) {
        console.error('Error toggling ' + kind + ':', e);
    }
}

async function removeNote(id) {
    try {
        const response = await fetch('/api/notes/' + encodeURIComponent(id), { method: 'DELETE' });
        if (!response.ok) throw new Error(await errorMessage(response, 'Failed to delete note'));
        allNotes = allNotes.filter(n => n.id !== id);
        render();
    } catch (e) {
        alert('Failed to delete note.');
    }
}

document.getElementById('notes').addEventListener('click', (event) => {
    const button = event.target.closest('button[data-action]');
    if (!button) return;
    const id = button.closest('.note-card').dataset.id;
    const action = button.dataset.action;
    if (action === 'delete') {
        removeNote(id);
    } else {
        react(id, action);
    }
});

const search = document.getElementById('search');
search.addEventListener('input', render);
search.form.addEventListener('submit', (event) => { event.preventDefault(); render(); });

loadNotes();
"#;
