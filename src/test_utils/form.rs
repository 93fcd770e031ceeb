//! Lookups and assertions for the forms on the onboarding and profile pages.

use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    let selector = Selector::parse("form").unwrap();

    html.select(&selector).next().expect("page has no form")
}

/// Assert that htmx will POST to `endpoint` when `element` is triggered.
#[track_caller]
pub(crate) fn assert_hx_post(element: &ElementRef<'_>, endpoint: &str) {
    assert_eq!(
        element.value().attr("hx-post"),
        Some(endpoint),
        "<{}> posts to the wrong endpoint",
        element.value().name()
    );
}

/// Assert that `form` has a required input called `name` of type `type_`.
#[track_caller]
pub(crate) fn assert_required_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let selector = Selector::parse(&format!("input[name=\"{name}\"]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("form has no input named {name:?}"));

    assert_eq!(input.value().attr("type"), Some(type_), "type of {name:?}");
    assert!(
        input.value().attr("required").is_some(),
        "input {name:?} should be required"
    );
}
