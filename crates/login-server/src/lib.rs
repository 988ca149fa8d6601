// Login server - renders the login form and re-validates submissions
// against the same rule table the form declares

pub mod config;
pub mod page;
pub mod routes;

pub use config::Config;
pub use routes::{app_router, AppState};
