//! Landing page.

use super::components::base_html;

pub fn render_home() -> String {
    let content = r#"
        <section class="hero">
            <h1>Share, Download, and Exchange Notes!</h1>
            <p>Upload your notes, browse what others have shared, and react to the
            material you found useful.</p>
            <a class="btn primary" href="/browse">Get Started</a>
        </section>
        <section class="features">
            <div class="note-card">
                <h2><a href="/upload">Upload</a></h2>
                <p>PDF, Word, plain text and images up to 50 MiB each, ten at a time.</p>
            </div>
            <div class="note-card">
                <h2><a href="/browse">Browse</a></h2>
                <p>Search by title, course, subject or topic.</p>
            </div>
            <div class="note-card">
                <h2>Download</h2>
                <p>Every shared file is one click away.</p>
            </div>
        </section>
    "#;

    base_html("NoteShare", "/home", content, "")
}
