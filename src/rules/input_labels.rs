//! Form label rule.
//!
//! Every labelable control needs a programmatic label: a `label[for]`
//! match or a wrapping `label`. A `title` attribute is accepted as a
//! weaker fallback that only earns a warning. Button-like and hidden input
//! types are exempt.

use crate::context::DocumentContext;
use crate::dom::style::is_perceivable;
use crate::dom::{closest, text_content};
use crate::verdict::Verdict;
use scraper::{ElementRef, Selector};

/// Result record for one form control.
#[derive(Debug)]
pub struct InputLabelCheck<'a> {
    /// The control element
    pub element: ElementRef<'a>,
    /// Whether the control was hidden at evaluation time
    pub hidden: bool,
    /// Lowercased tag name
    pub tag: String,
    /// Input `type`, defaulting to `text`
    pub input_type: String,
    /// Text of the associated label, empty when unlabelled
    pub label: String,
    /// `title` attribute, empty when absent
    pub title: String,
    /// A `label[for]` or wrapping label was found
    pub has_label: bool,
    /// A `title` attribute was found
    pub has_title: bool,
    /// Verdict
    pub valid: Verdict,
}

/// Audit every labelable form control.
pub fn check_input_labels<'a>(ctx: &'a DocumentContext) -> Vec<InputLabelCheck<'a>> {
    let control_sel = Selector::parse(concat!(
        "input:not([type=\"button\"]):not([type=\"submit\"]):not([type=\"reset\"])",
        ":not([type=\"hidden\"]):not([type=\"image\"]), select, textarea",
    ))
    .expect("valid selector");
    let label_sel = Selector::parse("label").expect("valid selector");

    // label[for] index for the whole document
    let label_fors: Vec<(String, ElementRef<'a>)> = ctx
        .document()
        .select(&label_sel)
        .filter_map(|l| l.value().attr("for").map(|f| (f.to_string(), l)))
        .collect();

    ctx.document()
        .select(&control_sel)
        .map(|input| {
            let value = input.value();
            let input_type = value.attr("type").unwrap_or("text").to_string();
            let title = value.attr("title").unwrap_or("").to_string();

            let mut has_label = false;
            let mut label = String::new();

            if let Some(id) = value.attr("id") {
                if let Some((_, label_el)) =
                    label_fors.iter().find(|(for_id, _)| for_id == id)
                {
                    has_label = true;
                    label = text_content(*label_el);
                }
            }

            if !has_label {
                if let Some(wrapping) = closest(input, |e| e.value().name() == "label") {
                    has_label = true;
                    label = text_content(wrapping);
                }
            }

            let has_title = !title.is_empty();
            let valid = if has_label {
                Verdict::Pass
            } else if has_title {
                Verdict::Warning
            } else {
                Verdict::Fail
            };

            InputLabelCheck {
                element: input,
                hidden: !is_perceivable(input),
                tag: value.name().to_string(),
                input_type,
                label,
                title,
                has_label,
                has_title,
                valid,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Vec<InputLabelCheck<'static>> {
        let ctx: &'static DocumentContext = Box::leak(Box::new(DocumentContext::parse(html)));
        check_input_labels(ctx)
    }

    #[test]
    fn label_for_association_passes() {
        let results = run(concat!(
            r#"<label for="name">Name</label><input type="text" id="name">"#,
        ));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].valid, Verdict::Pass);
        assert_eq!(results[0].label, "Name");
        assert!(results[0].has_label);
    }

    #[test]
    fn wrapping_label_passes() {
        let results = run(r#"<label>Email <input type="email"></label>"#);
        assert_eq!(results[0].valid, Verdict::Pass);
        assert!(results[0].label.contains("Email"));
    }

    #[test]
    fn title_only_warns() {
        let results = run(r#"<input type="text" title="Search terms">"#);
        assert_eq!(results[0].valid, Verdict::Warning);
        assert!(results[0].has_title);
        assert!(!results[0].has_label);
    }

    #[test]
    fn unlabelled_control_fails() {
        let results = run(r#"<input type="text">"#);
        assert_eq!(results[0].valid, Verdict::Fail);
    }

    #[test]
    fn select_and_textarea_are_labelable() {
        let results = run(concat!(
            "<select><option>a</option></select>",
            "<textarea></textarea>",
        ));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.valid == Verdict::Fail));
    }

    #[test]
    fn button_like_and_hidden_inputs_are_exempt() {
        let results = run(concat!(
            r#"<input type="submit" value="Go">"#,
            r#"<input type="button" value="Press">"#,
            r#"<input type="reset">"#,
            r#"<input type="hidden" name="csrf">"#,
            r#"<input type="image" src="go.png" alt="Go">"#,
        ));
        assert!(results.is_empty());
    }

    #[test]
    fn label_priority_prefers_for_association() {
        let results = run(concat!(
            r#"<label for="q">Outer</label>"#,
            r#"<label>Wrap <input type="text" id="q"></label>"#,
        ));
        assert_eq!(results[0].label, "Outer");
    }

    #[test]
    fn opacity_zero_control_is_flagged_hidden() {
        let results = run(r#"<input type="text" style="opacity: 0" title="ghost">"#);
        assert!(results[0].hidden);
        assert_eq!(results[0].valid, Verdict::Warning);
    }
}
