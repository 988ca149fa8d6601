//! Where validators get their rules from
//!
//! The server reads the static [`RuleSet`]; the client reads whatever the
//! rendered form declares. [`MarkupRules`] reads the same attributes from an
//! HTML document, which is how the server-side tests check that the page and
//! the table agree.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::{FieldRule, Placement, RuleSet};

/// Capability to look up the rule for a named field
pub trait RuleSource {
    fn rule_for(&self, field: &str) -> Option<FieldRule>;
}

impl<T: RuleSource + ?Sized> RuleSource for &T {
    fn rule_for(&self, field: &str) -> Option<FieldRule> {
        (**self).rule_for(field)
    }
}

impl RuleSource for RuleSet {
    fn rule_for(&self, field: &str) -> Option<FieldRule> {
        self.get(field).cloned()
    }
}

// <input ...> tags; attribute values are escaped so they never hold a raw '>'
static INPUT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<input\b([^>]*)>").unwrap());

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .unwrap()
});

/// Rules declared by `<input>` elements in an HTML document.
///
/// Per input: `name` identifies the field, `pattern` is the constraint,
/// `title` the help text and `data-help` the placement. Inputs without a
/// name are ignored; the first input wins when a name repeats.
#[derive(Debug, Clone, Default)]
pub struct MarkupRules {
    fields: Vec<FieldRule>,
}

impl MarkupRules {
    pub fn parse(html: &str) -> Self {
        let mut fields: Vec<FieldRule> = Vec::new();

        for tag in INPUT_TAG.captures_iter(html) {
            let mut name = None;
            let mut rule = FieldRule::new("", None, "");

            for attr in ATTRIBUTE.captures_iter(&tag[1]) {
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .or_else(|| attr.get(4))
                    .map(|m| unescape(m.as_str()))
                    .unwrap_or_default();

                match attr[1].to_ascii_lowercase().as_str() {
                    "name" => name = Some(value),
                    "pattern" => rule.pattern = Some(value),
                    "title" => rule.help = value,
                    "data-help" => rule.placement = Placement::parse(&value),
                    _ => {}
                }
            }

            if let Some(name) = name.filter(|n| !n.is_empty()) {
                if fields.iter().all(|f| f.name != name) {
                    rule.name = name;
                    fields.push(rule);
                }
            }
        }

        Self { fields }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter()
    }
}

impl RuleSource for MarkupRules {
    fn rule_for(&self, field: &str) -> Option<FieldRule> {
        self.fields.iter().find(|f| f.name == field).cloned()
    }
}

fn unescape(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
