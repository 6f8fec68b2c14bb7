//! Server-driven list paging and filtering shared by every list screen.
//!
//! A [`PagedListController`] owns the page cursor and filter set of one
//! screen, turns them into a list-endpoint query, and renders the returned page
//! together with a pager whose links lead back to the same screen.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{ApiError, LibraryApi, decode_page};
use crate::domain::page::{PageResult, PaginationMeta};
use crate::pagination::render_pager;

/// Static description of one list screen.
#[derive(Debug)]
pub struct ListScreen {
    /// Human readable name used in messages ("books", "users"...).
    pub label: &'static str,
    /// Backend list endpoint.
    pub endpoint: &'static str,
    /// Parameters sent with every request regardless of filters.
    pub fixed_params: &'static [(&'static str, &'static str)],
    /// Filter names this screen accepts; anything else is ignored.
    pub filter_keys: &'static [&'static str],
    /// Page size requested from the backend.
    pub limit: usize,
    /// Console route the pager links point at.
    pub route: &'static str,
}

impl ListScreen {
    pub fn accepts(&self, name: &str) -> bool {
        self.filter_keys.contains(&name)
    }
}

/// Page cursor and filter set of one list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListState {
    page: usize,
    filters: BTreeMap<String, String>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            filters: BTreeMap::new(),
        }
    }
}

impl ListState {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Stores a trimmed filter value, dropping empty ones, and rewinds to page 1.
    pub fn set_filter(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.filters.remove(name);
        } else {
            self.filters.insert(name.to_string(), value.to_string());
        }
        self.page = 1;
    }

    /// Moves the cursor; zero is rejected.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 {
            return false;
        }
        self.page = page;
        true
    }
}

/// Rendered output of one reload.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListView {
    pub list_html: String,
    pub pager_html: String,
    /// Message to surface as an alert when the load failed.
    pub alert: Option<String>,
    pub pagination: Option<PaginationMeta>,
}

/// Renders the rows of one page into HTML.
pub trait RenderRows<T> {
    fn render_rows(&self, items: &[T]) -> String;
}

impl<T, F> RenderRows<T> for F
where
    F: Fn(&[T]) -> String,
{
    fn render_rows(&self, items: &[T]) -> String {
        self(items)
    }
}

/// Generic list controller parameterized by screen and row renderer.
pub struct PagedListController<'a, T, R> {
    screen: &'a ListScreen,
    renderer: R,
    state: ListState,
    last: Option<PageResult<T>>,
}

impl<'a, T, R> PagedListController<'a, T, R>
where
    T: DeserializeOwned,
    R: RenderRows<T>,
{
    pub fn new(screen: &'a ListScreen, renderer: R) -> Self {
        Self {
            screen,
            renderer,
            state: ListState::default(),
            last: None,
        }
    }

    pub fn screen(&self) -> &ListScreen {
        self.screen
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Result of the most recent successful reload.
    pub fn last_result(&self) -> Option<&PageResult<T>> {
        self.last.as_ref()
    }

    /// Applies a filter without reloading. Unknown filter names are ignored.
    pub fn apply_filter(&mut self, name: &str, value: &str) -> bool {
        if !self.screen.accepts(name) {
            log::debug!("Ignoring filter `{name}` on {} list", self.screen.label);
            return false;
        }
        self.state.set_filter(name, value);
        true
    }

    /// Moves the page cursor without reloading.
    ///
    /// Once a result is known, pages outside `1..=totalPages` are refused.
    pub fn apply_page(&mut self, page: usize) -> bool {
        if self
            .last
            .as_ref()
            .is_some_and(|last| !last.pagination.contains(page))
        {
            return false;
        }
        self.state.set_page(page)
    }

    /// Restores the state carried in a console URL: filters first, then page.
    pub fn restore(&mut self, page: Option<usize>, filters: &BTreeMap<String, String>) {
        for (name, value) in filters {
            self.apply_filter(name, value);
        }
        if let Some(page) = page {
            self.apply_page(page);
        }
    }

    /// Query sent to the list endpoint: page, limit, fixed params, filters.
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.state.page.to_string()),
            ("limit".to_string(), self.screen.limit.to_string()),
        ];
        query.extend(
            self.screen
                .fixed_params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        query.extend(
            self.state
                .filters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        query
    }

    /// Console link reloading this list at `page` with the current filters.
    pub fn page_href(&self, page: usize) -> String {
        let mut params = vec![("page".to_string(), page.to_string())];
        params.extend(
            self.state
                .filters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        match serde_html_form::to_string(&params) {
            Ok(query) => format!("{}?{query}", self.screen.route),
            Err(err) => {
                log::error!("Failed to encode pager link: {err}");
                format!("{}?page={page}", self.screen.route)
            }
        }
    }

    /// Fetches the current page and renders list and pager.
    ///
    /// Failures are rendered inline and returned as an alert; nothing is retried.
    pub async fn reload<A: LibraryApi>(&mut self, api: &A) -> ListView {
        let query = self.query();
        let result = api
            .get(self.screen.endpoint, &query)
            .await
            .and_then(decode_page::<T>);

        match result {
            Ok(page) => {
                let list_html = if page.items.is_empty() {
                    format!(
                        r#"<p class="list-empty">No {} found.</p>"#,
                        self.screen.label
                    )
                } else {
                    self.renderer.render_rows(&page.items)
                };
                let pager_html = render_pager(&page.pagination, |n| self.page_href(n));
                let pagination = page.pagination.clone();
                self.last = Some(page);

                ListView {
                    list_html,
                    pager_html,
                    alert: None,
                    pagination: Some(pagination),
                }
            }
            Err(err) => self.failed(err),
        }
    }

    /// Applies a filter, rewinds to page 1 and reloads.
    pub async fn set_filter<A: LibraryApi>(&mut self, api: &A, name: &str, value: &str) -> ListView {
        self.apply_filter(name, value);
        self.reload(api).await
    }

    /// Moves to `page` and reloads; `None` when the page is out of range.
    pub async fn set_page<A: LibraryApi>(&mut self, api: &A, page: usize) -> Option<ListView> {
        if self.apply_page(page) {
            Some(self.reload(api).await)
        } else {
            None
        }
    }

    fn failed(&self, err: ApiError) -> ListView {
        log::error!("Failed to load {} list: {err}", self.screen.label);
        let message = err.to_string();
        ListView {
            list_html: format!(
                r#"<p class="list-error">Could not load {}: {}</p>"#,
                self.screen.label,
                tera::escape_html(&message)
            ),
            pager_html: String::new(),
            alert: Some(message),
            pagination: None,
        }
    }
}
