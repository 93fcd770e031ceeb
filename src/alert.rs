//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the `#alert-container` element that every page
//! includes via [crate::html::base], replacing whatever alert was shown before.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// The DOM ID of the element alerts are swapped into.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// A CSS selector for the alert container, for use in `hx-target` attributes.
pub const ALERT_CONTAINER_SELECTOR: &str = "#alert-container";

const ALERT_POSITION_STYLE: &str =
    "position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;";

/// A message for the user about the outcome of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Create a new success alert
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 rounded-lg shadow text-green-800 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 rounded-lg shadow text-red-800 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
        };

        html! {
            div
                id=(ALERT_CONTAINER_ID)
                class="w-full max-w-md px-4"
                style=(ALERT_POSITION_STYLE)
            {
                div role="alert" class=(style)
                {
                    div class="flex items-start justify-between gap-4"
                    {
                        div
                        {
                            p class="font-semibold" { (message) }

                            @if !details.is_empty() {
                                p class="mt-1 text-sm" { (details) }
                            }
                        }

                        button
                            type="button"
                            aria-label="Dismiss"
                            class="font-bold"
                            onclick="this.closest('[role=alert]').remove()"
                        {
                            "×"
                        }
                    }
                }
            }
        }
    }

    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}

/// An empty, hidden alert container for the initial page render.
pub fn empty_alert_container() -> Markup {
    html! {
        div
            id=(ALERT_CONTAINER_ID)
            class="hidden w-full max-w-md px-4"
            style=(ALERT_POSITION_STYLE)
        {}
    }
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::{ALERT_CONTAINER_ID, Alert};

    #[test]
    fn renders_message_and_details() {
        let html = Alert::success("Saved", "All good").into_html().into_string();
        let fragment = Html::parse_fragment(&html);

        let container = fragment
            .select(&Selector::parse(&format!("#{ALERT_CONTAINER_ID}")).unwrap())
            .next()
            .expect("alert container missing");
        let text = container.text().collect::<String>();

        assert!(text.contains("Saved"), "got {text:?}");
        assert!(text.contains("All good"), "got {text:?}");
    }

    #[test]
    fn omits_empty_details() {
        let html = Alert::error("Failed", "").into_html().into_string();
        let fragment = Html::parse_fragment(&html);

        let paragraphs = fragment.select(&Selector::parse("p").unwrap()).count();

        assert_eq!(paragraphs, 1);
    }
}
