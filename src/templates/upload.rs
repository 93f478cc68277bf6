//! Upload form.

use crate::config::{MAX_FILES, MAX_FILE_SIZE};

use super::components::base_html;

pub fn render_upload() -> String {
    let content = r#"<h1>Upload your notes</h1>
        <div id="upload-message" class="message"></div>
        <form id="upload-form" class="form" novalidate>
            <input id="files" type="file" name="files" multiple
                   accept=".pdf,.doc,.docx,.txt,.png,.jpg,.jpeg">
            <input type="text" name="title" placeholder="Title">
            <input type="text" name="course" placeholder="Course" required>
            <input type="text" name="subject" placeholder="Subject" required>
            <input type="text" name="topic" placeholder="Topic" required>
            <button id="upload-button" class="btn primary" type="submit">Upload</button>
        </form>"#;

    let script = format!(
        r#"
const MAX_FILES = {MAX_FILES};
const MAX_FILE_SIZE = {MAX_FILE_SIZE};
const form = document.getElementById('upload-form');
const fields = form.elements;
const message = document.getElementById('upload-message');
const button = document.getElementById('upload-button');

fields.files.addEventListener('change', () => {{
    const files = fields.files.files;
    if (files.length > 0 && !fields.title.value) {{
        fields.title.value = files[0].name;
    }}
}});

form.addEventListener('submit', async (event) => {{
    event.preventDefault();
    const files = Array.from(fields.files.files);

    if (!fields.course.value.trim() || !fields.subject.value.trim() || !fields.topic.value.trim()) {{
        showMessage(message, 'Please fill in all required fields', false);
        return;
    }}
    if (files.length === 0) {{
        showMessage(message, 'Please select at least one file', false);
        return;
    }}
    if (files.length > MAX_FILES) {{
        showMessage(message, 'You can upload at most ' + MAX_FILES + ' files at once', false);
        return;
    }}
    if (files.some(f => f.size > MAX_FILE_SIZE)) {{
        showMessage(message, 'Each file must be 50 MiB or smaller', false);
        return;
    }}

    const data = new FormData();
    data.append('course', fields.course.value);
    data.append('subject', fields.subject.value);
    data.append('topic', fields.topic.value);
    data.append('title', fields.title.value || files[0].name);
    files.forEach(f => data.append('files', f));

    button.disabled = true;
    button.textContent = 'Uploading...';
    message.className = 'message';
    try {{
        const response = await fetchWithTimeout('/api/notes', {{ method: 'POST', body: data }}, 30000);
        if (!response.ok) {{
            showMessage(message, await errorMessage(response, 'Server responded with an error'), false);
            return;
        }}
        showMessage(message, 'Notes uploaded successfully!', true);
        setTimeout(() => {{ window.location.href = '/browse'; }}, 2000);
    }} catch (e) {{
        console.error('Upload Error:', e);
        showMessage(message, 'No response received from server. Please check your connection.', false);
    }} finally {{
        button.disabled = false;
        button.textContent = 'Upload';
    }}
}});
"#
    );

    base_html("Upload Notes", "/upload", content, &script)
}
