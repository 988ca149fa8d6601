//! Login Validation Core
//!
//! One rule table for the login form, consumed by both tiers:
//! the server validator behind `POST /login` and the WASM client validator
//! that reads the same rules back out of the rendered markup.

pub mod client;
pub mod pattern;
pub mod rule;
pub mod server;
pub mod source;

pub use client::{ClientValidator, FormSurface, ValidationResult};
pub use pattern::{compile, matches};
pub use rule::{FieldRule, Placement, RuleError, RuleSet};
pub use server::{AuthenticationResponse, Authenticator};
pub use source::{MarkupRules, RuleSource};
