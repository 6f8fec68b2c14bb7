use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::domain::types::{PostStatus, PostVisibility};
use crate::dto::blog::PostEditorData;
use crate::dto::list::ListQuery;
use crate::forms::posts::{ChangePostStatusForm, EditorQuery, PostForm, ReturnToListForm};
use crate::routes::{
    base_context, collect_alerts, finish_submission, list_context, redirect, render_load_error,
    render_template,
};
use crate::screens::POSTS;
use crate::services::posts as posts_service;

#[get("/posts")]
pub async fn show_posts(
    req: HttpRequest,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::parse(req.query_string());
    let data = posts_service::list_posts(&backends.library, &tera, &query).await;

    let mut context = list_context(&flash_messages, &actions, "posts", &data);
    context.insert("statuses", PostStatus::ALL);
    render_template(&tera, "posts/index.html", &context)
}

/// Statuses an editor may pick; archiving goes through the status control.
const EDITOR_STATUSES: &[PostStatus] = &[
    PostStatus::Draft,
    PostStatus::PendingReview,
    PostStatus::Published,
];

fn render_editor(
    tera: &Tera,
    actions: &ActionRegistry,
    flash_messages: &IncomingFlashMessages,
    editor: &PostEditorData,
    form_action: &str,
) -> HttpResponse {
    let mut context = base_context(collect_alerts(flash_messages), actions, "posts_new");
    context.insert("editor", editor);
    context.insert("form_action", form_action);
    context.insert("statuses", EDITOR_STATUSES);
    context.insert("visibilities", PostVisibility::ALL);
    render_template(tera, "posts/edit.html", &context)
}

#[get("/posts/new")]
pub async fn new_post(
    query: web::Query<EditorQuery>,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let book_query = query.into_inner().book_query;
    match posts_service::load_post_editor(&backends.library, None, book_query).await {
        Ok(editor) => render_editor(&tera, &actions, &flash_messages, &editor, "/posts/new"),
        Err(err) => render_load_error(&tera, &actions, err, "Post"),
    }
}

#[post("/posts/new")]
pub async fn create_post(backends: web::Data<Backends>, body: web::Bytes) -> impl Responder {
    let result = match PostForm::parse(body.as_ref()) {
        Ok(form) => posts_service::save_post(&backends.library, None, form).await,
        Err(err) => Err(err.into()),
    };
    finish_submission(result, "create the post", "/posts", "/posts/new")
}

#[get("/posts/{post_id}/edit")]
pub async fn edit_post_form(
    post_id: web::Path<i64>,
    query: web::Query<EditorQuery>,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let post_id = post_id.into_inner();
    let book_query = query.into_inner().book_query;
    match posts_service::load_post_editor(&backends.library, Some(post_id), book_query).await {
        Ok(editor) => render_editor(
            &tera,
            &actions,
            &flash_messages,
            &editor,
            &format!("/posts/{post_id}/edit"),
        ),
        Err(err) => render_load_error(&tera, &actions, err, "Post"),
    }
}

#[post("/posts/{post_id}/edit")]
pub async fn edit_post(
    post_id: web::Path<i64>,
    backends: web::Data<Backends>,
    body: web::Bytes,
) -> impl Responder {
    let post_id = post_id.into_inner();
    let result = match PostForm::parse(body.as_ref()) {
        Ok(form) => posts_service::save_post(&backends.library, Some(post_id), form).await,
        Err(err) => Err(err.into()),
    };
    finish_submission(
        result,
        "update the post",
        "/posts",
        &format!("/posts/{post_id}/edit"),
    )
}

/// Changes a post's status and returns to the same page of the list.
#[post("/posts/{post_id}/status")]
pub async fn change_post_status(
    post_id: web::Path<i64>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<ChangePostStatusForm>,
) -> impl Responder {
    match posts_service::change_post_status(&backends.library, post_id.into_inner(), &form).await {
        Ok(Some(message)) => FlashMessage::success(message).send(),
        Ok(None) => FlashMessage::info("The post already has this status.").send(),
        Err(err) => {
            log::error!("Failed to change post status: {err}");
            FlashMessage::error(format!("Failed to change the post status: {err}")).send();
        }
    }
    redirect(&form.return_query().href(&POSTS))
}

#[post("/posts/{post_id}/delete")]
pub async fn delete_post(
    post_id: web::Path<i64>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<ReturnToListForm>,
) -> impl Responder {
    match posts_service::delete_post(&backends.library, post_id.into_inner()).await {
        Ok(message) => FlashMessage::success(message).send(),
        Err(err) => {
            log::error!("Failed to delete a post: {err}");
            FlashMessage::error(format!("Failed to delete the post: {err}")).send();
        }
    }
    redirect(&form.return_query().href(&POSTS))
}
