//! Client-side validation flow
//!
//! Rendering is abstracted behind [`FormSurface`] so the same flow drives the
//! browser DOM (see the wasm crate) and in-memory forms in tests.

use tracing::debug;

use crate::pattern;
use crate::rule::Placement;
use crate::source::RuleSource;

/// Shown when a failing field declares no help text of its own
pub const FALLBACK_HELP: &str = "Please match the requested format.";

/// The form a client validator reads values from and renders help into
pub trait FormSurface {
    /// Current value of the named field, `None` if the form has no such field
    fn value_of(&self, field: &str) -> Option<String>;

    /// Render help text for a field next to the form
    fn show_help(&mut self, field: &str, help: &str, placement: Placement);

    /// Remove every help text previously rendered for a field
    fn clear_help(&mut self, field: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub help: Option<String>,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self {
            valid: true,
            help: None,
        }
    }

    pub fn fail(help: impl Into<String>) -> Self {
        Self {
            valid: false,
            help: Some(help.into()),
        }
    }
}

/// Validates form fields against the rules its [`RuleSource`] declares
pub struct ClientValidator<R> {
    rules: R,
    fields: Vec<String>,
}

impl<R: RuleSource> ClientValidator<R> {
    /// `fields` are the names checked on submit, in order
    pub fn new<I, S>(rules: R, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a value without touching any form
    pub fn check(&self, field: &str, value: &str) -> ValidationResult {
        let Some(rule) = self.rules.rule_for(field) else {
            return ValidationResult::pass();
        };

        if pattern::matches(value, rule.pattern.as_deref()) {
            ValidationResult::pass()
        } else if rule.help.is_empty() {
            ValidationResult::fail(FALLBACK_HELP)
        } else {
            ValidationResult::fail(rule.help)
        }
    }

    /// Re-validate one field: stale help is removed first, fresh help is
    /// rendered on failure.
    pub fn validate_field<S: FormSurface>(&self, surface: &mut S, field: &str) -> ValidationResult {
        surface.clear_help(field);

        let value = surface.value_of(field).unwrap_or_default();
        let result = self.check(field, &value);

        if let Some(help) = &result.help {
            let placement = self
                .rules
                .rule_for(field)
                .map(|rule| rule.placement)
                .unwrap_or_default();
            surface.show_help(field, help, placement);
        }

        debug!(field, valid = result.valid, "validated field");
        result
    }

    /// Field lost focus
    pub fn on_blur<S: FormSurface>(&self, surface: &mut S, field: &str) -> ValidationResult {
        self.validate_field(surface, field)
    }

    /// Validate every field; `false` means the submission must be blocked.
    ///
    /// All fields are checked even after a failure so every message shows.
    pub fn on_submit<S: FormSurface>(&self, surface: &mut S) -> bool {
        self.fields
            .iter()
            .map(|field| self.validate_field(surface, field).valid)
            .fold(true, |all, valid| all && valid)
    }
}
