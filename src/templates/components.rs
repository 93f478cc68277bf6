//! Shared HTML components: navigation bar and the base page template.

use crate::notes::html_escape;

use super::styles::STYLE;

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(active: &str) -> String {
    let link = |href: &str, label: &str| {
        if href == active {
            format!(r#"<a href="{href}"><strong>{label}</strong></a>"#)
        } else {
            format!(r#"<a href="{href}">{label}</a>"#)
        }
    };

    format!(
        r#"<nav class="nav-bar">
            <a class="brand" href="/home">NoteShare</a>
            {home}
            {browse}
            {upload}
            <span class="spacer"></span>
            {login}
            {signup}
        </nav>"#,
        home = link("/home", "Home"),
        browse = link("/browse", "Browse"),
        upload = link("/upload", "Upload"),
        login = link("/login", "Login"),
        signup = link("/signup", "Sign up"),
    )
}

// ============================================================================
// Base HTML Template
// ============================================================================

/// Wrap page content in the common layout. `script` is emitted verbatim after
/// the shared helpers.
pub fn base_html(title: &str, active: &str, content: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
    <script>
    // fetch() with an abort after `ms` milliseconds
    async function fetchWithTimeout(url, options, ms) {{
        const controller = new AbortController();
        const timer = setTimeout(() => controller.abort(), ms);
        try {{
            return await fetch(url, {{ ...options, signal: controller.signal }});
        }} finally {{
            clearTimeout(timer);
        }}
    }}

    // Pull the server's {{error}} message out of a failed response
    async function errorMessage(response, fallback) {{
        try {{
            const body = await response.json();
            return body.error || fallback;
        }} catch (e) {{
            return fallback;
        }}
    }}

    function escapeHtml(s) {{
        return String(s)
            .replace(/&/g, '&amp;')
            .replace(/</g, '&lt;')
            .replace(/>/g, '&gt;')
            .replace(/"/g, '&quot;')
            .replace(/'/g, '&#39;');
    }}

    function showMessage(el, text, ok) {{
        el.textContent = text;
        el.className = 'message ' + (ok ? 'success' : 'error');
    }}
    </script>
    <script>{script}</script>
</body>
</html>"#,
        title = html_escape(title),
        nav = nav_bar(active),
    )
}
