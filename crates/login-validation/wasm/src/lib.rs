//! Login Validation WASM
//!
//! Client tier of the login form. On load it finds `#loginForm`, reads each
//! input's `pattern`, `title` and `data-help` attributes, and validates on
//! blur and on submit, blocking submission while any field is malformed.
//! Native HTML5 checks run only after these rules pass.
//! Pages that never load this module still get native HTML5 validation.

use login_validation_core::{ClientValidator, FieldRule, FormSurface, Placement, RuleSource};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, HtmlFormElement, HtmlInputElement};

/// Id of the form the validator attaches to
pub const FORM_ID: &str = "loginForm";

#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(());
    };

    match document.get_element_by_id(FORM_ID) {
        Some(form) => attach(form.dyn_into::<HtmlFormElement>()?),
        None => {
            console::warn_1(&format!("login validation: no #{} on this page", FORM_ID).into());
            Ok(())
        }
    }
}

/// Attach submit and blur listeners to a login form.
///
/// Native validation would run before `submit` fires and hide the inline
/// help, so the form is switched to `novalidate` and native checks are
/// replayed with `reportValidity` once the inline rules pass.
pub fn attach(form: HtmlFormElement) -> Result<(), JsValue> {
    form.set_no_validate(true);

    let on_submit = {
        let form = form.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let rules = DomRules::new(form.clone());
            let validator = ClientValidator::new(&rules, rules.field_names());
            let mut surface = DomSurface::new(form.clone());

            if !validator.on_submit(&mut surface) || !form.report_validity() {
                event.prevent_default();
            }
        })
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    for input in DomRules::new(form.clone()).inputs() {
        let form = form.clone();
        let field = input.name();
        let on_blur = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let rules = DomRules::new(form.clone());
            let validator = ClientValidator::new(&rules, [field.as_str()]);
            validator.on_blur(&mut DomSurface::new(form.clone()), &field);
        });
        input.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
        on_blur.forget();
    }

    Ok(())
}

/// Rules read live from the form's input attributes
pub struct DomRules {
    form: HtmlFormElement,
}

impl DomRules {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    /// Named inputs that carry user values
    pub fn inputs(&self) -> Vec<HtmlInputElement> {
        let Ok(nodes) = self.form.query_selector_all("input[name]") else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .filter(|input| !matches!(input.type_().as_str(), "submit" | "button" | "reset" | "hidden"))
            .collect()
    }

    pub fn field_names(&self) -> Vec<String> {
        self.inputs().iter().map(|input| input.name()).collect()
    }

    fn input(&self, field: &str) -> Option<HtmlInputElement> {
        self.form
            .query_selector(&format!("input[name=\"{}\"]", field))
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    }
}

impl RuleSource for DomRules {
    fn rule_for(&self, field: &str) -> Option<FieldRule> {
        let input = self.input(field)?;
        let mut rule = FieldRule::new(
            field,
            input.get_attribute("pattern").as_deref(),
            input.get_attribute("title").unwrap_or_default(),
        );
        rule.placement = input
            .get_attribute("data-help")
            .map(|value| Placement::parse(&value))
            .unwrap_or_default();
        Some(rule)
    }
}

/// Renders help text as `<div class="help {field}">` before or after the
/// form's other children
pub struct DomSurface {
    form: HtmlFormElement,
}

impl DomSurface {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    fn document(&self) -> Option<Document> {
        self.form.owner_document()
    }
}

impl FormSurface for DomSurface {
    fn value_of(&self, field: &str) -> Option<String> {
        DomRules::new(self.form.clone()).input(field).map(|input| input.value())
    }

    fn show_help(&mut self, field: &str, help: &str, placement: Placement) {
        let Some(div) = self.document().and_then(|d| d.create_element("div").ok()) else {
            return;
        };
        div.set_class_name(&format!("help {}", field));
        div.set_text_content(Some(help));

        let result = match placement {
            Placement::Prepend => self.form.prepend_with_node_1(&div),
            Placement::Append => self.form.append_with_node_1(&div),
        };
        if let Err(e) = result {
            console::warn_2(&"login validation: could not render help".into(), &e);
        }
    }

    fn clear_help(&mut self, field: &str) {
        let Ok(nodes) = self.form.query_selector_all(&format!(".help.{}", field)) else {
            return;
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .for_each(|element| element.remove());
    }
}

/// Quick pattern check with `pattern` attribute semantics
#[wasm_bindgen(js_name = validateValue)]
pub fn validate_value(value: &str, pattern: Option<String>) -> bool {
    login_validation_core::matches(value, pattern.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use login_validation_core::rule::{EMAIL_HELP, EMAIL_PATTERN, PASSWORD_PATTERN};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_validate_value() {
        assert!(validate_value("you@yourdomain.com", Some(EMAIL_PATTERN.to_string())));
        assert!(!validate_value("you@", Some(EMAIL_PATTERN.to_string())));
        assert!(validate_value("weak1", Some(PASSWORD_PATTERN.to_string())));
        assert!(validate_value("anything", None));
    }

    fn login_form(email: &str) -> HtmlFormElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let form: HtmlFormElement = document.create_element("form").unwrap().dyn_into().unwrap();
        form.set_inner_html(&format!(
            r#"<input type="email" name="email" pattern="{}" title="{}" data-help="prepend" value="{}">
               <input type="submit" value="Login">"#,
            EMAIL_PATTERN, EMAIL_HELP, email
        ));
        document.body().unwrap().append_child(&form).unwrap();
        form
    }

    #[wasm_bindgen_test]
    fn test_dom_rules_read_attributes() {
        let rules = DomRules::new(login_form("x"));
        assert_eq!(rules.field_names(), vec!["email".to_string()]);

        let rule = rules.rule_for("email").unwrap();
        assert_eq!(rule.pattern.as_deref(), Some(EMAIL_PATTERN));
        assert_eq!(rule.help, EMAIL_HELP);
        assert_eq!(rule.placement, Placement::Prepend);
    }

    #[wasm_bindgen_test]
    fn test_invalid_email_renders_help_once() {
        let form = login_form("not-an-email");
        let rules = DomRules::new(form.clone());
        let validator = ClientValidator::new(&rules, rules.field_names());
        let mut surface = DomSurface::new(form.clone());

        assert!(!validator.on_submit(&mut surface));
        assert!(!validator.on_submit(&mut surface));

        let help = form.query_selector_all(".help.email").unwrap();
        assert_eq!(help.length(), 1);
        let first = form.first_element_child().unwrap();
        assert_eq!(first.text_content().as_deref(), Some(EMAIL_HELP));
    }

    #[wasm_bindgen_test]
    fn test_clicking_login_shows_inline_help_before_native_checks() {
        let form = login_form("not-an-email");
        attach(form.clone()).unwrap();
        assert!(form.no_validate());

        let button: HtmlInputElement = form
            .query_selector("input[type=submit]")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        button.click();
        button.click();

        let help = form.query_selector_all(".help.email").unwrap();
        assert_eq!(help.length(), 1);
        assert_eq!(help.item(0).unwrap().text_content().as_deref(), Some(EMAIL_HELP));
    }
}
