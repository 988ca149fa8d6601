//! Server-side re-validation of a submitted login form

use regex::Regex;
use std::fmt;
use tracing::info;

use crate::pattern;
use crate::rule::RuleSet;

/// Plain-text answer to a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResponse {
    /// At least one field was left empty
    Incomplete,
    /// Both fields are well formed
    Passed { email: String, password: String },
    /// Both fields are present but at least one is malformed
    Invalid,
}

impl fmt::Display for AuthenticationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => f.write_str("Please complete the form"),
            Self::Passed { email, password } => write!(
                f,
                "{} and {} passed the formal validation, but you still have to be authenticated",
                email, password
            ),
            Self::Invalid => f.write_str("Please enter a well formed email and password"),
        }
    }
}

/// Checks login fields against a rule table fixed at construction
#[derive(Debug, Clone)]
pub struct Authenticator {
    rules: RuleSet,
    compiled: Vec<(String, Option<Regex>)>,
}

impl Authenticator {
    pub fn new(rules: RuleSet) -> Self {
        let compiled = rules
            .iter()
            .map(|rule| {
                let regex = rule.pattern.as_deref().and_then(pattern::compile);
                (rule.name.clone(), regex)
            })
            .collect();

        Self { rules, compiled }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Does the value satisfy the named field's pattern? Unknown fields and
    /// fields without a pattern always do.
    pub fn check(&self, field: &str, value: &str) -> bool {
        self.compiled
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, regex)| regex.as_ref())
            .map_or(true, |regex| regex.is_match(value))
    }

    pub fn authenticate(&self, email: &str, password: &str) -> AuthenticationResponse {
        if email.is_empty() || password.is_empty() {
            info!("login rejected: incomplete form");
            return AuthenticationResponse::Incomplete;
        }

        let email_ok = self.check("email", email);
        let password_ok = self.check("password", password);

        if email_ok && password_ok {
            info!("login passed formal validation");
            AuthenticationResponse::Passed {
                email: email.to_string(),
                password: password.to_string(),
            }
        } else {
            info!(email_ok, password_ok, "login rejected: malformed field");
            AuthenticationResponse::Invalid
        }
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::FieldRule;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", "x")]
    #[case("x", "")]
    #[case("", "")]
    fn test_empty_field_is_incomplete(#[case] email: &str, #[case] password: &str) {
        let response = Authenticator::default().authenticate(email, password);
        assert_eq!(response, AuthenticationResponse::Incomplete);
        assert_eq!(response.to_string(), "Please complete the form");
    }

    #[test]
    fn test_well_formed_fields_pass() {
        let response = Authenticator::default().authenticate("you@yourdomain.com", "weak1");
        assert_eq!(
            response.to_string(),
            "you@yourdomain.com and weak1 passed the formal validation, but you still have to be authenticated"
        );
    }

    #[rstest]
    #[case("not-an-email", "weak1")]
    #[case("you@yourdomain.com", "nodigit")]
    #[case("you@yourdomain.com", "toolong123")]
    #[case("bad", "bad")]
    fn test_malformed_field_is_invalid(#[case] email: &str, #[case] password: &str) {
        let response = Authenticator::default().authenticate(email, password);
        assert_eq!(response, AuthenticationResponse::Invalid);
        assert_eq!(response.to_string(), "Please enter a well formed email and password");
    }

    #[test]
    fn test_rules_come_from_construction() {
        let rules = RuleSet::new(vec![
            FieldRule::new("email", Some("[a-z]+"), "letters"),
            FieldRule::new("password", None, ""),
        ])
        .unwrap();
        let authenticator = Authenticator::new(rules);

        assert!(matches!(
            authenticator.authenticate("abc", "anything"),
            AuthenticationResponse::Passed { .. }
        ));
        assert_eq!(
            authenticator.authenticate("a@b.com", "anything"),
            AuthenticationResponse::Invalid
        );
    }

    #[test]
    fn test_unknown_field_always_passes() {
        assert!(Authenticator::default().check("nickname", ""));
    }
}
