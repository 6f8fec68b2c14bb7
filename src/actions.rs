//! Sidebar action registry.
//!
//! Sidebar links carry an action name; `/action/{name}` resolves it here to
//! the console URL that should be shown.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::controller::ListScreen;
use crate::dto::list::ListQuery;
use crate::screens::{BORROW_RECORDS, POSTS};

type ActionHandler = Box<dyn Fn() -> String + Send + Sync>;

/// Sidebar entry rendered by the base template.
#[derive(Clone, Debug, Serialize)]
pub struct SidebarItem {
    pub action: &'static str,
    pub label: &'static str,
}

/// Maps action names to handlers returning a navigation target.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: BTreeMap<&'static str, ActionHandler>,
    sidebar: Vec<SidebarItem>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: &'static str, label: &'static str, handler: F) -> &mut Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        if self.handlers.insert(name, Box::new(handler)).is_none() {
            self.sidebar.push(SidebarItem {
                action: name,
                label,
            });
        }
        self
    }

    /// Navigation target of `name`, or `None` for an unknown action.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.handlers.get(name).map(|handler| handler())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Entries in registration order.
    pub fn sidebar(&self) -> &[SidebarItem] {
        &self.sidebar
    }

    /// The console's sidebar actions.
    pub fn console() -> Self {
        let mut registry = Self::new();
        registry
            .register("showDashboard", "Dashboard", || "/".to_string())
            .register("showBookList", "Books", || "/books".to_string())
            .register("showAddBookForm", "Add book", || "/books/add".to_string())
            .register("showUserList", "Users", || "/users".to_string())
            .register("showBorrowedRecords", "Borrow records", || {
                "/borrows".to_string()
            })
            .register("showOverdueBooks", "Overdue books", || {
                filtered(&BORROW_RECORDS, "status", "overdue")
            })
            .register("showBorrowBookForm", "Borrow book", || {
                "/borrows/borrow".to_string()
            })
            .register("showReturnBookForm", "Return book", || {
                "/borrows/return".to_string()
            })
            .register("showBlogPostsList", "Blog posts", || "/posts".to_string())
            .register("showPendingPosts", "Pending review", || {
                filtered(&POSTS, "status", "pending_review")
            })
            .register("showCreateBlogPostForm", "New blog post", || {
                "/posts/new".to_string()
            })
            .register("showBlogTopicsAdmin", "Blog topics", || "/topics".to_string())
            .register("showSiteSettingsPage", "Site settings", || {
                "/settings".to_string()
            });
        registry
    }
}

fn filtered(screen: &ListScreen, name: &str, value: &str) -> String {
    let mut query = ListQuery::default();
    query.filters.insert(name.to_string(), value.to_string());
    query.href(screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sidebar_action_resolves() {
        let registry = ActionRegistry::console();

        assert_eq!(registry.sidebar().len(), 13);
        for item in registry.sidebar() {
            assert!(registry.resolve(item.action).is_some(), "{}", item.action);
        }
    }

    #[test]
    fn filtered_actions_land_on_filtered_lists() {
        let registry = ActionRegistry::console();

        assert_eq!(
            registry.resolve("showOverdueBooks").as_deref(),
            Some("/borrows?status=overdue")
        );
        assert_eq!(
            registry.resolve("showPendingPosts").as_deref(),
            Some("/posts?status=pending_review")
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        let registry = ActionRegistry::console();
        assert!(registry.resolve("showNothing").is_none());
        assert!(!registry.contains("showNothing"));
    }

    #[test]
    fn re_registering_replaces_handler() {
        let mut registry = ActionRegistry::new();
        registry
            .register("showBookList", "Books", || "/old".to_string())
            .register("showBookList", "Books", || "/books".to_string());

        assert_eq!(registry.sidebar().len(), 1);
        assert_eq!(registry.resolve("showBookList").as_deref(), Some("/books"));
    }
}
