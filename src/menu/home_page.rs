//! The home page that lists the menu, and the endpoint for filtering it.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::ALERT_CONTAINER_SELECTOR,
    endpoints,
    html::{
        CATEGORY_CHIP_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, format_price,
        loading_spinner,
    },
    menu::{Category, FilterCriteria, MenuItem, filter_menu, get_categories},
    navigation::NavBar,
};

/// How long the search box waits after the last keystroke before filtering.
///
/// Every keystroke restarts the delay.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

const MENU_LIST_ID: &str = "menu-list";
const SEARCH_INPUT_ID: &str = "search";

/// The state needed for the home page and the menu filter.
#[derive(Debug, Clone)]
pub struct HomePageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The filter form as sent by the browser.
///
/// `category` may be repeated, once per selected category.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MenuFilterParams {
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub search: String,
}

/// Render the home page with the category filters and the whole menu.
///
/// If the menu cannot be read the page is still rendered, with a message in
/// place of the menu.
pub async fn get_home_page(State(state): State<HomePageState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let criteria = FilterCriteria::default();
    let menu = get_categories(&connection).and_then(|categories| {
        let items = filter_menu(&criteria, &connection)?;
        Ok((categories, items))
    });

    match menu {
        Ok((categories, items)) => {
            home_view(&categories, &criteria, &menu_list_view(&items)).into_response()
        }
        Err(error) => {
            tracing::error!("Failed to load the menu: {error}");
            let message = menu_error_view("Could not load the menu. Try refreshing the page.");
            home_view(&[], &criteria, &message).into_response()
        }
    }
}

/// Get the list of menu items matching the selected categories and search term.
///
/// Categories that are not on the menu are ignored.
pub async fn get_menu_list(
    State(state): State<HomePageState>,
    Query(params): Query<MenuFilterParams>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let known_categories = match get_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to load categories: {error}");
            return error.into_alert_response();
        }
    };

    let mut criteria = FilterCriteria::new(
        params.category.iter().map(|label| Category::new(label)),
        &params.search,
    );
    let unknown_categories = criteria.retain_known(&known_categories);
    if !unknown_categories.is_empty() {
        tracing::debug!("ignoring unknown categories {unknown_categories:?}");
    }

    match filter_menu(&criteria, &connection) {
        Ok(items) => menu_list_view(&items).into_response(),
        Err(error) => {
            tracing::error!("Failed to filter the menu: {error}");
            error.into_alert_response()
        }
    }
}

fn home_view(categories: &[Category], criteria: &FilterCriteria, menu_list: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::HOME_VIEW).into_html();
    let search_trigger = format!(
        "change, input changed delay:{}ms from:#{SEARCH_INPUT_ID}, submit",
        SEARCH_DEBOUNCE.as_millis()
    );

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            form
                id="menu-filters"
                hx-get=(endpoints::MENU_API)
                hx-trigger=(search_trigger)
                hx-target={ "#" (MENU_LIST_ID) }
                hx-swap="outerHTML"
                hx-sync="this:replace"
                hx-indicator="#indicator"
                hx-target-error=(ALERT_CONTAINER_SELECTOR)
                class="w-full max-w-2xl space-y-6"
            {
                section class="p-6 rounded-lg bg-[#495E57] text-white space-y-2"
                {
                    h1 class="text-4xl font-bold text-[#FDB827]" { "Little Lemon" }
                    p class="text-2xl" { "Chicago" }
                    p
                    {
                        "We are a family-owned Mediterranean restaurant, focused on \
                        traditional recipes served with modern flair."
                    }

                    input
                        id=(SEARCH_INPUT_ID)
                        type="search"
                        name="search"
                        placeholder="Search dishes..."
                        autocomplete="off"
                        value=(criteria.search_term)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                section
                {
                    h2 class="mb-3 text-lg font-extrabold uppercase" { "Order for delivery!" }

                    div role="group" aria-label="Categories" class="flex flex-wrap gap-2"
                    {
                        @for category in categories {
                            label
                            {
                                input
                                    type="checkbox"
                                    name="category"
                                    value=(category)
                                    class="peer sr-only"
                                    checked[criteria.is_selected(category)];

                                span class=(CATEGORY_CHIP_STYLE) { (category) }
                            }
                        }
                    }
                }

                span id="indicator" class="htmx-indicator" { (loading_spinner()) }
            }

            (menu_list)
        }
    };

    base("Menu", &content)
}

fn menu_list_view(items: &[MenuItem]) -> Markup {
    html! {
        div id=(MENU_LIST_ID) class="w-full max-w-2xl mt-4 mb-24 lg:mb-0"
        {
            @if items.is_empty() {
                p class="py-8 text-center text-gray-500 dark:text-gray-400"
                {
                    "No dishes match your search."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for item in items {
                        li data-name=(item.name) class="flex justify-between gap-4 py-4"
                        {
                            div
                            {
                                h3 class="text-lg font-semibold" { (item.name) }

                                @if !item.description.is_empty() {
                                    p class="text-sm text-gray-600 dark:text-gray-400"
                                    {
                                        (item.description)
                                    }
                                }
                            }

                            span class="font-semibold text-[#495E57] dark:text-[#FDB827]"
                            {
                                (format_price(item.price))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn menu_error_view(message: &str) -> Markup {
    html! {
        div id=(MENU_LIST_ID) class="w-full max-w-2xl mt-4"
        {
            p role="alert" class="py-8 text-center text-red-600 dark:text-red-400" { (message) }
        }
    }
}

#[cfg(test)]
mod home_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        db::initialize,
        endpoints,
        menu::{MenuItem, insert_menu_item},
        test_utils::{assert_html_content_type, assert_valid_html, parse_html_document},
    };

    use super::{HomePageState, SEARCH_DEBOUNCE, get_home_page};

    fn get_state(items: &[MenuItem]) -> HomePageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        for item in items {
            insert_menu_item(item, &connection).expect("Could not insert menu item");
        }

        HomePageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn sample_menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Greek Salad", "Starters", 12.99, "Crispy lettuce").unwrap(),
            MenuItem::new("Lemon Dessert", "Desserts", 5.0, "").unwrap(),
            MenuItem::new("Bruschetta", "Starters", 7.99, "").unwrap(),
        ]
    }

    fn select_texts(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn renders_categories_and_full_menu() {
        let state = get_state(&sample_menu());

        let response = get_home_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_html_content_type(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let categories = html
            .select(&Selector::parse("input[name=category]").unwrap())
            .map(|input| input.value().attr("value").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["Starters", "Desserts"]);

        let names = select_texts(&html, "#menu-list h3");
        assert_eq!(names, vec!["Greek Salad", "Lemon Dessert", "Bruschetta"]);

        let prices = select_texts(&html, "#menu-list li > span");
        assert_eq!(prices, vec!["$12.99", "$5.00", "$7.99"]);
    }

    #[tokio::test]
    async fn filter_form_is_debounced() {
        let state = get_state(&sample_menu());

        let response = get_home_page(State(state)).await;

        let html = parse_html_document(response).await;
        let form = html
            .select(&Selector::parse("form#menu-filters").unwrap())
            .next()
            .expect("No filter form found");
        assert_eq!(form.value().attr("hx-get"), Some(endpoints::MENU_API));
        assert_eq!(form.value().attr("hx-sync"), Some("this:replace"));

        let trigger = form.value().attr("hx-trigger").unwrap_or_default();
        let want_delay = format!(
            "input changed delay:{}ms from:#search",
            SEARCH_DEBOUNCE.as_millis()
        );
        assert!(
            trigger.contains(&want_delay),
            "want trigger containing {want_delay:?}, got {trigger:?}"
        );
        assert_eq!(SEARCH_DEBOUNCE.as_millis(), 500);
    }

    #[tokio::test]
    async fn empty_menu_shows_message() {
        let state = get_state(&[]);

        let response = get_home_page(State(state)).await;

        let html = parse_html_document(response).await;
        let message = select_texts(&html, "#menu-list p");
        assert_eq!(message, vec!["No dishes match your search."]);
    }

    #[tokio::test]
    async fn storage_failure_is_shown_on_page() {
        let state = HomePageState {
            db_connection: Arc::new(Mutex::new(Connection::open_in_memory().unwrap())),
        };

        let response = get_home_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        let message = select_texts(&html, "#menu-list p[role=alert]");
        assert_eq!(
            message,
            vec!["Could not load the menu. Try refreshing the page."]
        );
    }
}

#[cfg(test)]
mod menu_list_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Query;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        db::initialize,
        menu::{MenuItem, insert_menu_item},
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    use super::{HomePageState, MenuFilterParams, get_menu_list};

    fn get_state() -> HomePageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        let items = [
            MenuItem::new("Chocolate Cake", "Desserts", 5.5, "").unwrap(),
            MenuItem::new("Cheesecake", "Desserts", 6.0, "").unwrap(),
            MenuItem::new("Soda", "Drinks", 1.5, "").unwrap(),
        ];
        for item in &items {
            insert_menu_item(item, &connection).expect("Could not insert menu item");
        }

        HomePageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    async fn get_names(params: MenuFilterParams) -> Vec<String> {
        let response = get_menu_list(State(get_state()), Query(params)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        html.select(&Selector::parse("li").unwrap())
            .map(|li| li.value().attr("data-name").unwrap_or_default().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn no_filters_returns_everything() {
        let names = get_names(MenuFilterParams::default()).await;

        assert_eq!(names, vec!["Chocolate Cake", "Cheesecake", "Soda"]);
    }

    #[tokio::test]
    async fn filters_by_category_and_search() {
        let names = get_names(MenuFilterParams {
            category: vec!["Desserts".to_owned()],
            search: "cake".to_owned(),
        })
        .await;

        assert_eq!(names, vec!["Chocolate Cake", "Cheesecake"]);
    }

    #[tokio::test]
    async fn unknown_categories_are_ignored() {
        let names = get_names(MenuFilterParams {
            category: vec!["Made Up".to_owned()],
            search: String::new(),
        })
        .await;

        assert_eq!(names, vec!["Chocolate Cake", "Cheesecake", "Soda"]);
    }

    #[tokio::test]
    async fn storage_failure_returns_alert() {
        let state = HomePageState {
            db_connection: Arc::new(Mutex::new(Connection::open_in_memory().unwrap())),
        };

        let response = get_menu_list(State(state), Query(MenuFilterParams::default())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        assert!(alert.text().collect::<String>().contains("Something went wrong"));
    }
}
