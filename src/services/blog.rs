//! Public blog pages, served from the blog API.

use reqwest::Method;
use serde_json::Value;
use tera::Tera;

use crate::api::{LibraryApi, decode_field, decode_page, ensure_success};
use crate::domain::blog::{BlogPost, Topic};
use crate::domain::types::{PostId, PostStatus};
use crate::dto::blog::{BlogIndexData, PostDetailData, SubmitPageData};
use crate::dto::list::ListQuery;
use crate::forms::posts::PostForm;
use crate::screens::{PUBLIC_POSTS, PostRow, rows_renderer};
use crate::services::posts::{EditorEndpoints, load_editor};
use crate::services::{ServiceError, ServiceResult, load_list, missing_as_not_found};

/// Reader editor, served by the blog API.
pub const READER_EDITOR: EditorEndpoints = EditorEndpoints {
    topics: "/blog/topics",
    book_search: "/blog/search-books",
};

/// Public setting deciding whether reader posts are reviewed first.
pub const REVIEW_SETTING: &str = "blog_post_requires_review";

/// Number of topics shown in the blog sidebar.
pub const SIDEBAR_TOPICS: usize = 10;

pub async fn load_blog_index<A: LibraryApi>(
    api: &A,
    tera: &Tera,
    query: &ListQuery,
) -> BlogIndexData {
    let renderer = rows_renderer(tera, "blog/rows.html", |post: &BlogPost| {
        PostRow::from(post)
    });
    let list = load_list::<BlogPost, _, _>(api, &PUBLIC_POSTS, query, renderer).await;

    let topics = match api
        .get("/blog/topics", &[("limit".to_string(), SIDEBAR_TOPICS.to_string())])
        .await
        .and_then(decode_page::<Topic>)
    {
        Ok(page) => page.items,
        Err(err) => {
            log::error!("Failed to load blog topics: {err}");
            Vec::new()
        }
    };

    BlogIndexData { list, topics }
}

/// Loads a published post and sanitizes its body for rendering.
pub async fn load_post<A: LibraryApi>(api: &A, post_id: i64) -> ServiceResult<PostDetailData> {
    let post_id = PostId::new(post_id).map_err(|_| ServiceError::NotFound)?;

    let value = api
        .get(&format!("/blog/posts/{post_id}"), &[])
        .await
        .map_err(missing_as_not_found)?;
    let post = decode_field::<BlogPost>(value, "post")?;

    let content_html = ammonia::clean(post.content.as_deref().unwrap_or_default());

    let topic_names = post
        .topics
        .iter()
        .map(|topic| topic.name().to_string())
        .collect();

    Ok(PostDetailData {
        post,
        topic_names,
        content_html,
    })
}

/// Likes the post, or removes the like when `liked` is set.
///
/// Returns the new like count when the backend reports one.
pub async fn toggle_like<A: LibraryApi>(
    api: &A,
    post_id: i64,
    liked: bool,
) -> ServiceResult<Option<i64>> {
    let post_id = PostId::new(post_id).map_err(|_| ServiceError::NotFound)?;
    let method = if liked { Method::DELETE } else { Method::POST };

    let value = api
        .send(method, &format!("/blog/posts/{post_id}/like"), None)
        .await
        .map_err(missing_as_not_found)?;
    let value = ensure_success(value)?;
    Ok(value.get("like_count").and_then(Value::as_i64))
}

/// Whether reader posts wait for review. Any lookup failure counts as yes.
pub async fn requires_review<A: LibraryApi>(api: &A) -> bool {
    let value = match api.get(&format!("/settings/{REVIEW_SETTING}"), &[]).await {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Could not read `{REVIEW_SETTING}`, assuming review: {err}");
            return true;
        }
    };

    match ensure_success(value) {
        Ok(value) => value.get("value").and_then(Value::as_str) == Some("true"),
        Err(_) => true,
    }
}

pub async fn load_submit_page<A: LibraryApi>(
    api: &A,
    book_query: Option<String>,
) -> SubmitPageData {
    let requires_review = requires_review(api).await;
    let editor = load_editor(api, READER_EDITOR, None, book_query).await;
    SubmitPageData {
        editor,
        requires_review,
    }
}

/// Submits a reader post and returns the status it was stored with.
pub async fn submit_post<A: LibraryApi>(api: &A, form: PostForm) -> ServiceResult<PostStatus> {
    let requires_review = form.save_draft.is_none() && requires_review(api).await;
    let draft = form.into_submission(requires_review)?;
    let body = serde_json::to_value(&draft)?;

    let response = api.send(Method::POST, "/blog/posts", Some(body)).await?;
    ensure_success(response)?;
    Ok(draft.status)
}
