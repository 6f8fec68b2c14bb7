use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::dto::list::ListQuery;
use crate::forms::posts::ReturnToListForm;
use crate::forms::topics::TopicForm;
use crate::routes::{
    base_context, collect_alerts, finish_submission, list_context, redirect, render_load_error,
    render_template,
};
use crate::screens::TOPICS;
use crate::services::topics as topics_service;

#[get("/topics")]
pub async fn show_topics(
    req: HttpRequest,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::parse(req.query_string());
    let data = topics_service::list_topics(&backends.library, &tera, &query).await;

    let context = list_context(&flash_messages, &actions, "topics", &data);
    render_template(&tera, "topics/index.html", &context)
}

#[post("/topics/add")]
pub async fn add_topic(
    backends: web::Data<Backends>,
    web::Form(form): web::Form<TopicForm>,
) -> impl Responder {
    match topics_service::add_topic(&backends.library, form).await {
        Ok(message) => FlashMessage::success(message).send(),
        Err(err) => {
            log::error!("Failed to create a topic: {err}");
            FlashMessage::error(format!("Failed to create the topic: {err}")).send();
        }
    }
    redirect("/topics")
}

#[get("/topics/{topic_id}/edit")]
pub async fn edit_topic_form(
    topic_id: web::Path<i64>,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match topics_service::load_topic(&backends.library, topic_id.into_inner()).await {
        Ok(topic) => {
            let mut context = base_context(collect_alerts(&flash_messages), &actions, "topics");
            context.insert("topic", &topic);
            render_template(&tera, "topics/edit.html", &context)
        }
        Err(err) => render_load_error(&tera, &actions, err, "Topic"),
    }
}

#[post("/topics/{topic_id}/edit")]
pub async fn edit_topic(
    topic_id: web::Path<i64>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<TopicForm>,
) -> impl Responder {
    let topic_id = topic_id.into_inner();
    let result = topics_service::edit_topic(&backends.library, topic_id, form).await;
    finish_submission(
        result,
        "update the topic",
        "/topics",
        &format!("/topics/{topic_id}/edit"),
    )
}

#[post("/topics/{topic_id}/delete")]
pub async fn delete_topic(
    topic_id: web::Path<i64>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<ReturnToListForm>,
) -> impl Responder {
    match topics_service::delete_topic(&backends.library, topic_id.into_inner()).await {
        Ok(message) => FlashMessage::success(message).send(),
        Err(err) => {
            log::error!("Failed to delete a topic: {err}");
            FlashMessage::error(format!("Failed to delete the topic: {err}")).send();
        }
    }
    redirect(&form.return_query().href(&TOPICS))
}
