use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::domain::types::{PostStatus, PostVisibility};
use crate::dto::list::ListQuery;
use crate::forms::posts::{EditorQuery, LikeForm, PostForm};
use crate::routes::{
    base_context, collect_alerts, list_context, redirect, render_load_error, render_template,
};
use crate::services::{ServiceError, blog as blog_service};

#[get("/blog")]
pub async fn show_blog(
    req: HttpRequest,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::parse(req.query_string());
    let data = blog_service::load_blog_index(&backends.blog, &tera, &query).await;

    let mut context = list_context(&flash_messages, &actions, "blog", &data.list);
    context.insert("topics", &data.topics);
    render_template(&tera, "blog/index.html", &context)
}

#[get("/blog/submit")]
pub async fn new_submission(
    query: web::Query<EditorQuery>,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let book_query = query.into_inner().book_query;
    let data = blog_service::load_submit_page(&backends.blog, book_query).await;

    let mut context = base_context(collect_alerts(&flash_messages), &actions, "blog");
    context.insert("editor", &data.editor);
    context.insert("form_action", "/blog/submit");
    context.insert("requires_review", &data.requires_review);
    context.insert("visibilities", PostVisibility::ALL);
    render_template(&tera, "blog/submit.html", &context)
}

#[post("/blog/submit")]
pub async fn submit_post(backends: web::Data<Backends>, body: web::Bytes) -> impl Responder {
    let result = match PostForm::parse(body.as_ref()) {
        Ok(form) => blog_service::submit_post(&backends.blog, form).await,
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(status) => {
            let message = match status {
                PostStatus::Draft => "Your post was saved as a draft.",
                PostStatus::PendingReview => "Your post was submitted for review.",
                _ => "Your post was published.",
            };
            FlashMessage::success(message).send();
            redirect("/blog")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/blog/submit")
        }
        Err(err) => {
            log::error!("Failed to submit a blog post: {err}");
            FlashMessage::error(format!("Failed to submit the post: {err}")).send();
            redirect("/blog/submit")
        }
    }
}

#[get("/blog/{post_id}")]
pub async fn show_post(
    post_id: web::Path<i64>,
    query: web::Query<LikeForm>,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match blog_service::load_post(&backends.blog, post_id.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(collect_alerts(&flash_messages), &actions, "blog");
            context.insert("post", &data.post);
            context.insert("topic_names", &data.topic_names);
            context.insert("content_html", &data.content_html);
            context.insert("liked", &query.liked);
            render_template(&tera, "blog/detail.html", &context)
        }
        Err(err) => render_load_error(&tera, &actions, err, "Post"),
    }
}

/// Likes or unlikes a post and returns to it with the new state.
#[post("/blog/{post_id}/like")]
pub async fn toggle_like(
    post_id: web::Path<i64>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<LikeForm>,
) -> impl Responder {
    let post_id = post_id.into_inner();
    let liked = match blog_service::toggle_like(&backends.blog, post_id, form.liked).await {
        Ok(like_count) => {
            let verb = if form.liked { "Like removed" } else { "Post liked" };
            match like_count {
                Some(count) => FlashMessage::success(format!("{verb}. Likes: {count}.")).send(),
                None => FlashMessage::success(format!("{verb}.")).send(),
            }
            !form.liked
        }
        Err(err) => {
            log::error!("Failed to toggle the like of post {post_id}: {err}");
            FlashMessage::error(format!("Failed to update the like: {err}")).send();
            form.liked
        }
    };
    redirect(&format!("/blog/{post_id}?liked={liked}"))
}
