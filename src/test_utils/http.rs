//! Assertions on the headers handlers set for the browser and htmx.

use axum::{
    body::Body,
    http::{StatusCode, header::CONTENT_TYPE},
    response::Response,
};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[track_caller]
fn header_value<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("response has no {name} header"))
        .to_str()
        .unwrap_or_else(|_| panic!("{name} header is not visible ASCII"))
}

/// Assert that `response` is a page the browser will render as HTML.
#[track_caller]
pub(crate) fn assert_html_content_type(response: &Response<Body>) {
    assert_eq!(header_value(response, CONTENT_TYPE.as_str()), HTML_CONTENT_TYPE);
}

/// Assert that htmx will navigate to `endpoint`, one of the view constants in
/// [crate::endpoints].
///
/// htmx ignores `HX-Redirect` on error responses, so the status must be 200.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(response, "hx-redirect"), endpoint);
}
