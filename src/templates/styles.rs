//! CSS styles for the page views.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --orange: #cb4b16;
    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
    --card-bg: #fffdf7;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    flex-wrap: wrap;
    z-index: 100;
}

.nav-bar a { font-size: 0.9rem; }
.nav-bar .brand { font-weight: 600; color: var(--base01); }
.nav-bar .spacer { flex: 1; }

.hero { text-align: center; padding: 3rem 1rem; }
.hero p { max-width: 40rem; margin: 0 auto 1.5rem; }

.features {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
    gap: 1rem;
}

.search-input {
    width: 100%;
    padding: 0.6rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--card-bg);
    color: var(--fg);
    font-size: 1rem;
    margin-bottom: 1rem;
}

.note-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 1rem;
}

.note-card {
    background: var(--card-bg);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
}

.note-card h2 {
    font-size: 1.1rem;
    margin: 0 0 0.5rem;
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}

.note-card .meta { font-size: 0.8rem; color: var(--muted); }
.note-card .actions { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
.note-card .actions > * { flex: 1; text-align: center; }

.btn {
    display: inline-block;
    padding: 0.45rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--accent);
    color: var(--fg);
    cursor: pointer;
    font-family: inherit;
    font-size: 0.9rem;
}
.btn:hover { text-decoration: none; border-color: var(--muted); }
.btn.primary { background: var(--link); color: white; border-color: var(--link); }
.btn.danger { background: var(--red); color: white; border-color: var(--red); }
.btn.liked { background: var(--green); color: white; border-color: var(--green); }
.btn.disliked { background: var(--orange); color: white; border-color: var(--orange); }
.btn:disabled { opacity: 0.6; cursor: default; }

.form { display: flex; flex-direction: column; gap: 0.75rem; max-width: 36rem; }
.form input[type=text], .form input[type=email], .form input[type=password] {
    padding: 0.6rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--card-bg);
    color: var(--fg);
    font-size: 1rem;
}

.message { padding: 0.6rem 0.9rem; border-radius: 4px; margin-bottom: 1rem; display: none; }
.message.error { display: block; background: #fbe3e2; color: var(--red); }
.message.success { display: block; background: #eef3d6; color: var(--green); }

.empty { text-align: center; color: var(--muted); padding: 2rem 0; }
"#;
