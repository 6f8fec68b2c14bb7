//! List screens of the console and their row renderers.

use chrono::NaiveDate;
use serde::Serialize;
use tera::{Context, Tera};

use crate::controller::ListScreen;
use crate::domain::blog::BlogPost;
use crate::domain::borrow::BorrowRecord;

pub static BOOKS: ListScreen = ListScreen {
    label: "books",
    endpoint: "/searchbooks",
    fixed_params: &[],
    filter_keys: &["search"],
    limit: 10,
    route: "/books",
};

pub static USERS: ListScreen = ListScreen {
    label: "users",
    endpoint: "/api/admin/users",
    fixed_params: &[],
    filter_keys: &["search", "role"],
    limit: 10,
    route: "/users",
};

pub static BORROW_RECORDS: ListScreen = ListScreen {
    label: "borrow records",
    endpoint: "/managebooks",
    fixed_params: &[("action", "borrowed_records")],
    filter_keys: &["status", "search"],
    limit: 10,
    route: "/borrows",
};

pub static POSTS: ListScreen = ListScreen {
    label: "blog posts",
    endpoint: "/api/blog/posts",
    fixed_params: &[],
    filter_keys: &["status", "search"],
    limit: 10,
    route: "/posts",
};

pub static TOPICS: ListScreen = ListScreen {
    label: "topics",
    endpoint: "/api/blog/topics",
    fixed_params: &[],
    filter_keys: &["search"],
    limit: 15,
    route: "/topics",
};

/// Public blog list, served from the blog API.
pub static PUBLIC_POSTS: ListScreen = ListScreen {
    label: "posts",
    endpoint: "/blog/posts",
    fixed_params: &[],
    filter_keys: &["search", "topic_id", "book_isbn"],
    limit: 10,
    route: "/blog",
};

/// Builds a row renderer that maps items to rows and renders `template`.
///
/// The template receives the rows as `rows`.
pub fn rows_renderer<T, V, M>(tera: &Tera, template: &'static str, to_row: M) -> impl Fn(&[T]) -> String
where
    V: Serialize,
    M: Fn(&T) -> V,
{
    rows_renderer_with(tera, template, Context::new(), to_row)
}

/// Like [`rows_renderer`], with extra variables available to the template.
pub fn rows_renderer_with<T, V, M>(
    tera: &Tera,
    template: &'static str,
    base: Context,
    to_row: M,
) -> impl Fn(&[T]) -> String
where
    V: Serialize,
    M: Fn(&T) -> V,
{
    move |items: &[T]| {
        let rows: Vec<V> = items.iter().map(&to_row).collect();
        let mut context = base.clone();
        context.insert("rows", &rows);
        tera.render(template, &context).unwrap_or_else(|err| {
            log::error!("Failed to render {template}: {err}");
            r#"<p class="list-error">Could not render this list.</p>"#.to_string()
        })
    }
}

/// Borrow record annotated with its overdue state.
#[derive(Debug, Serialize)]
pub struct BorrowRow {
    #[serde(flatten)]
    pub record: BorrowRecord,
    pub overdue: bool,
}

impl BorrowRow {
    pub fn new(record: &BorrowRecord, today: NaiveDate) -> Self {
        Self {
            overdue: record.is_overdue(today),
            record: record.clone(),
        }
    }
}

/// Blog post with its topic names pre-joined.
#[derive(Debug, Serialize)]
pub struct PostRow {
    #[serde(flatten)]
    pub post: BlogPost,
    pub topic_names: String,
}

impl From<&BlogPost> for PostRow {
    fn from(post: &BlogPost) -> Self {
        Self {
            topic_names: post.topic_names(),
            post: post.clone(),
        }
    }
}
