use reqwest::Method;
use tera::{Context, Tera};

use crate::api::{ApiResult, LibraryApi, decode_field, decode_message, decode_page};
use crate::domain::blog::{BlogPost, PostStatusChange, Topic};
use crate::domain::book::BookMatch;
use crate::domain::types::{PostId, PostStatus, PostVisibility};
use crate::dto::blog::PostEditorData;
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::posts::{ChangePostStatusForm, PostForm};
use crate::screens::{POSTS, PostRow, rows_renderer_with};
use crate::services::{ServiceError, ServiceResult, load_list, missing_as_not_found};

/// Page size used to fetch every topic at once.
pub const ALL_TOPICS_LIMIT: usize = 1000;

/// Number of suggestions returned by the book lookup.
pub const BOOK_MATCHES_LIMIT: usize = 5;

/// Paths of the lookups behind a post editor.
#[derive(Clone, Copy, Debug)]
pub struct EditorEndpoints {
    pub topics: &'static str,
    pub book_search: &'static str,
}

/// Admin console editor, served by the library API.
pub const ADMIN_EDITOR: EditorEndpoints = EditorEndpoints {
    topics: "/api/blog/topics",
    book_search: "/api/blog/search-books",
};

pub async fn list_posts<A: LibraryApi>(api: &A, tera: &Tera, query: &ListQuery) -> ListPageData {
    let mut base = Context::new();
    base.insert("return_query", &query.query_string(&POSTS));
    base.insert("statuses", PostStatus::ALL);
    let renderer = rows_renderer_with(tera, "posts/rows.html", base, |post: &BlogPost| {
        PostRow::from(post)
    });
    load_list::<BlogPost, _, _>(api, &POSTS, query, renderer).await
}

/// Moves a post to the requested status.
///
/// Returns `None` when the submitted status equals the current one and no
/// request was made.
pub async fn change_post_status<A: LibraryApi>(
    api: &A,
    post_id: i64,
    form: &ChangePostStatusForm,
) -> ServiceResult<Option<String>> {
    let post_id = PostId::new(post_id)?;
    let status = form.new_status()?;
    if !form.is_change() {
        return Ok(None);
    }

    let body = serde_json::to_value(PostStatusChange { status })?;
    let response = api
        .send(
            Method::PUT,
            &format!("/api/admin/blog/posts/{post_id}/status"),
            Some(body),
        )
        .await?;
    Ok(Some(decode_message(response, "Post status updated.")?))
}

pub async fn delete_post<A: LibraryApi>(api: &A, post_id: i64) -> ServiceResult<String> {
    let post_id = PostId::new(post_id)?;

    let response = api
        .send(Method::DELETE, &format!("/api/blog/posts/{post_id}"), None)
        .await?;
    Ok(decode_message(response, "Post deleted.")?)
}

/// Suggests books whose title or ISBN matches `query`.
///
/// A blank query returns no suggestions without calling the backend.
pub async fn search_books<A: LibraryApi>(
    api: &A,
    path: &str,
    query: &str,
) -> ServiceResult<Vec<BookMatch>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let value = api
        .get(
            path,
            &[
                ("query".to_string(), query.to_string()),
                ("limit".to_string(), BOOK_MATCHES_LIMIT.to_string()),
            ],
        )
        .await?;
    Ok(decode_field::<Vec<BookMatch>>(value, "books")?)
}

async fn load_all_topics<A: LibraryApi>(api: &A, path: &str) -> ApiResult<Vec<Topic>> {
    let value = api
        .get(path, &[("limit".to_string(), ALL_TOPICS_LIMIT.to_string())])
        .await?;
    Ok(decode_page::<Topic>(value)?.items)
}

/// Gathers the topic choices and book suggestions of an editor.
///
/// Lookup failures are logged and leave the editor usable.
pub async fn load_editor<A: LibraryApi>(
    api: &A,
    endpoints: EditorEndpoints,
    post: Option<BlogPost>,
    book_query: Option<String>,
) -> PostEditorData {
    let topics = load_all_topics(api, endpoints.topics)
        .await
        .unwrap_or_else(|err| {
            log::error!("Failed to load topics for the post editor: {err}");
            Vec::new()
        });

    let book_query = book_query.unwrap_or_default().trim().to_string();
    let (book_matches, book_search_error) =
        match search_books(api, endpoints.book_search, &book_query).await {
            Ok(matches) => (matches, None),
            Err(err) => {
                log::error!("Book lookup for `{book_query}` failed: {err}");
                (Vec::new(), Some(err.to_string()))
            }
        };

    let is_new = post.is_none();
    let post = post.unwrap_or_else(|| BlogPost {
        status: PostStatus::Draft.to_string(),
        visibility: Some(PostVisibility::Public.to_string()),
        allow_comments: Some(true),
        ..BlogPost::default()
    });

    PostEditorData {
        selected_topic_ids: post.topic_ids(),
        post,
        is_new,
        topics,
        book_query,
        book_matches,
        book_search_error,
    }
}

/// Loads the admin editor, with the stored post when `post_id` is given.
pub async fn load_post_editor<A: LibraryApi>(
    api: &A,
    post_id: Option<i64>,
    book_query: Option<String>,
) -> ServiceResult<PostEditorData> {
    let post = match post_id {
        Some(post_id) => {
            let post_id = PostId::new(post_id).map_err(|_| ServiceError::NotFound)?;
            let value = api
                .get(&format!("/api/blog/posts/{post_id}"), &[])
                .await
                .map_err(missing_as_not_found)?;
            Some(decode_field::<BlogPost>(value, "post")?)
        }
        None => None,
    };

    Ok(load_editor(api, ADMIN_EDITOR, post, book_query).await)
}

/// Creates a post, or updates the one addressed by `post_id`.
pub async fn save_post<A: LibraryApi>(
    api: &A,
    post_id: Option<i64>,
    form: PostForm,
) -> ServiceResult<String> {
    let draft = form.into_draft()?;
    let body = serde_json::to_value(&draft)?;

    let response = match post_id {
        Some(post_id) => {
            let post_id = PostId::new(post_id)?;
            api.send(Method::PUT, &format!("/api/blog/posts/{post_id}"), Some(body))
                .await?
        }
        None => api.send(Method::POST, "/api/blog/posts", Some(body)).await?,
    };
    let fallback = if post_id.is_some() {
        "Post updated."
    } else {
        "Post created."
    };
    Ok(decode_message(response, fallback)?)
}
