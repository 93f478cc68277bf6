//! HTML templates and styling for the page views.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `components` - Navigation bar and base page template
//! - `home` - Landing page
//! - `browse` - Note list with live search and reactions
//! - `upload` - Multipart upload form
//! - `auth` - Login and signup forms

mod auth;
mod browse;
mod components;
mod home;
mod styles;
mod upload;

pub use auth::{render_login, render_signup};
pub use browse::render_browse;
pub use home::render_home;
pub use upload::render_upload;
