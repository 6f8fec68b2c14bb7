use serde::Serialize;

use crate::domain::blog::{BlogPost, Topic};
use crate::domain::book::BookMatch;
use crate::dto::list::ListPageData;

/// Data required to render the public blog index.
#[derive(Debug, Serialize)]
pub struct BlogIndexData {
    pub list: ListPageData,
    /// Sidebar topics; empty when they could not be loaded.
    pub topics: Vec<Topic>,
}

/// Data required to render a single public post.
#[derive(Debug, Serialize)]
pub struct PostDetailData {
    pub post: BlogPost,
    pub topic_names: Vec<String>,
    /// Post body after sanitizing.
    pub content_html: String,
}

/// Data required to render a blog post editor.
#[derive(Debug, Default, Serialize)]
pub struct PostEditorData {
    /// Post being edited, or the defaults of a new one.
    pub post: BlogPost,
    pub is_new: bool,
    pub selected_topic_ids: Vec<i64>,
    /// Topics offered as checkboxes; empty when they could not be loaded.
    pub topics: Vec<Topic>,
    pub book_query: String,
    pub book_matches: Vec<BookMatch>,
    pub book_search_error: Option<String>,
}

/// Data required to render the reader submission page.
#[derive(Debug, Serialize)]
pub struct SubmitPageData {
    pub editor: PostEditorData,
    /// Whether a submitted post waits for review before it is published.
    pub requires_review: bool,
}
