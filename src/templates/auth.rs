//! Login and signup forms.
//!
//! The server has no account system; both endpoints answer 501 and the form
//! shows that message.

use super::components::base_html;

pub fn render_login() -> String {
    let content = r#"<h1>Login</h1>
        <div id="auth-message" class="message"></div>
        <form id="auth-form" class="form" data-endpoint="/api/login">
            <input type="email" name="email" placeholder="Email" required>
            <input type="password" name="password" placeholder="Password" required>
            <button class="btn primary" type="submit">Login</button>
        </form>
        <p>No account? <a href="/signup">Sign up</a></p>"#;

    base_html("Login", "/login", content, AUTH_JS)
}

pub fn render_signup() -> String {
    let content = r#"<h1>Sign up</h1>
        <div id="auth-message" class="message"></div>
        <form id="auth-form" class="form" data-endpoint="/api/signup">
            <input type="text" name="name" placeholder="Name" required>
            <input type="email" name="email" placeholder="Email" required>
            <input type="password" name="password" placeholder="Password" required>
            <button class="btn primary" type="submit">Sign up</button>
        </form>
        <p>Already registered? <a href="/login">Login</a></p>"#;

    base_html("Sign up", "/signup", content, AUTH_JS)
}

const AUTH_JS: &str = r#"
const authForm = document.getElementById('auth-form');
const authMessage = document.getElementById('auth-message');

authForm.addEventListener('submit', async (event) => {
    event.preventDefault();
    const payload = Object.fromEntries(new FormData(authForm).entries());
    try {
        const response = await fetchWithTimeout(authForm.dataset.endpoint, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(payload),
        }, 10000);
        if (!response.ok) {
            showMessage(authMessage, await errorMessage(response, 'Request failed'), false);
            return;
        }
        showMessage(authMessage, 'Success', true);
    } catch (e) {
        showMessage(authMessage, 'No response received from server. Please check your connection.', false);
    }
});
"#;
