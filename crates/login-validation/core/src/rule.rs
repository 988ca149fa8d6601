//! Field rules and the rule table shared by both tiers

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Email pattern, as declared on the login form
///
/// Hyphens inside classes are escaped: browsers compile `pattern` with the
/// `v` flag, where a bare trailing `-` in a class is a syntax error.
pub const EMAIL_PATTERN: &str =
    r"^[_a-z0-9\-]+(\.[_a-z0-9\-]+)*@[a-z0-9\-]+(\.[a-z0-9\-]+)*(\.[a-z]{2,4})$";

/// Password pattern: 4 to 8 characters, at least one digit.
///
/// Written without lookahead so the same source compiles both in the
/// browser and with the `regex` crate: one alternative per position of
/// the first digit. `[\s\S]` stands for any character, line breaks
/// included, with the same meaning in both engines.
pub const PASSWORD_PATTERN: &str = r"^(?:[0-9][\s\S]{3,7}|[\s\S][0-9][\s\S]{2,6}|[\s\S]{2}[0-9][\s\S]{1,5}|[\s\S]{3}[0-9][\s\S]{0,4}|[\s\S]{4}[0-9][\s\S]{0,3}|[\s\S]{5}[0-9][\s\S]{0,2}|[\s\S]{6}[0-9][\s\S]?|[\s\S]{7}[0-9])$";

pub const EMAIL_HELP: &str = "Type a well formed email!";

pub const PASSWORD_HELP: &str =
    "Password must be between 4 and 8 characters long and contain at least one digit";

/// Where the client renders a field's help text relative to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Prepend,
    #[default]
    Append,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Prepend => "prepend",
            Placement::Append => "append",
        }
    }

    /// Parse a `data-help` attribute value. Anything unknown appends.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("prepend") {
            Placement::Prepend
        } else {
            Placement::Append
        }
    }
}

/// Validation rule for a single named form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,

    /// Regular expression source; `None` means no constraint
    #[serde(default)]
    pub pattern: Option<String>,

    /// Help text shown when the value does not match
    #[serde(default)]
    pub help: String,

    #[serde(default)]
    pub placement: Placement,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, pattern: Option<&str>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.map(str::to_string),
            help: help.into(),
            placement: Placement::default(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("field rule has an empty name")]
    EmptyName,

    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),
}

/// Ordered table of field rules, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldRule>", into = "Vec<FieldRule>")]
pub struct RuleSet {
    fields: Vec<FieldRule>,
}

impl RuleSet {
    /// Build a table, rejecting unnamed or duplicated fields
    pub fn new(fields: Vec<FieldRule>) -> Result<Self, RuleError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(RuleError::EmptyName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(RuleError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// The login form's rules: email help goes above the form, password help below
    pub fn login() -> Self {
        Self {
            fields: vec![
                FieldRule::new("email", Some(EMAIL_PATTERN), EMAIL_HELP)
                    .with_placement(Placement::Prepend),
                FieldRule::new("password", Some(PASSWORD_PATTERN), PASSWORD_HELP)
                    .with_placement(Placement::Append),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::login()
    }
}

impl TryFrom<Vec<FieldRule>> for RuleSet {
    type Error = RuleError;

    fn try_from(fields: Vec<FieldRule>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<RuleSet> for Vec<FieldRule> {
    fn from(rules: RuleSet) -> Self {
        rules.fields
    }
}
