use std::collections::BTreeMap;

use serde::Serialize;

use crate::controller::{ListScreen, ListState, ListView};

/// Page cursor and filters carried in a console list URL.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number requested by the pager; invalid values are dropped.
    pub page: Option<usize>,
    /// Every other query parameter, treated as a filter.
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn from_params(mut params: BTreeMap<String, String>) -> Self {
        let page = params
            .remove("page")
            .and_then(|page| page.trim().parse::<usize>().ok())
            .filter(|page| *page > 0);
        Self {
            page,
            filters: params,
        }
    }

    /// Parses an urlencoded query string such as `page=2&status=draft`.
    pub fn parse(query: &str) -> Self {
        let params = serde_html_form::from_str::<BTreeMap<String, String>>(query)
            .unwrap_or_default();
        Self::from_params(params)
    }

    /// Urlencoded page and accepted filters of `screen`, without the route.
    pub fn query_string(&self, screen: &ListScreen) -> String {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        params.extend(
            self.filters
                .iter()
                .filter(|(name, value)| screen.accepts(name) && !value.trim().is_empty())
                .map(|(name, value)| (name.clone(), value.trim().to_string())),
        );
        serde_html_form::to_string(&params).unwrap_or_else(|err| {
            log::error!("Failed to encode list query: {err}");
            String::new()
        })
    }

    /// Console URL of `screen` restoring this page and the accepted filters.
    pub fn href(&self, screen: &ListScreen) -> String {
        let query = self.query_string(screen);
        if query.is_empty() {
            screen.route.to_string()
        } else {
            format!("{}?{query}", screen.route)
        }
    }
}

/// Data required to render any list screen.
#[derive(Debug, Serialize)]
pub struct ListPageData {
    pub view: ListView,
    pub state: ListState,
}

impl ListPageData {
    /// Current value of a filter, empty when unset.
    pub fn filter(&self, name: &str) -> &str {
        self.state
            .filters()
            .get(name)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
