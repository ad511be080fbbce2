//! HTTP request handlers for API endpoints.

pub mod redirect;
pub mod save_url;

pub use redirect::redirect_handler;
pub use save_url::save_url_handler;
