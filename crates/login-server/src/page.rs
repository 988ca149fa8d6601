// File: src/page.rs
// Purpose: Login page markup, rendered from the rule table

use login_validation_core::{FieldRule, RuleSet};
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Loads the client validator; the form still works if this fails
const BOOTSTRAP: &str = "import init from '/pkg/login_validation_wasm.js'; init();";

/// Render the login form. Each input declares its own rule through
/// `pattern`, `title` and `data-help`, which is all the client reads.
pub fn login_page(rules: &RuleSet) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Login" }
                script type="module" { (PreEscaped(BOOTSTRAP)) }
            }
            body {
                form #loginForm action="/login" method="post" {
                    @for rule in rules.iter() {
                        (field(rule))
                    }
                    div {
                        input type="submit" value="Login";
                    }
                }
            }
        }
    }
}

fn field(rule: &FieldRule) -> Markup {
    html! {
        div {
            label for=(rule.name) { (label_text(&rule.name)) }
            input
                type=(input_type(&rule.name))
                name=(rule.name)
                id=(rule.name)
                placeholder=(label_text(&rule.name))
                required
                pattern=[rule.pattern.as_deref()]
                title=(rule.help)
                data-help=(rule.placement.as_str());
        }
    }
}

fn input_type(name: &str) -> &'static str {
    match name {
        "email" => "email",
        "password" => "password",
        _ => "text",
    }
}

fn label_text(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
