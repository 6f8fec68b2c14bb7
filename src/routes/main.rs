use actix_web::http::StatusCode;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::routes::{base_context, collect_alerts, redirect, render_error, render_template};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_dashboard(
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = main_service::load_dashboard(&backends.library).await;

    let mut context = base_context(collect_alerts(&flash_messages), &actions, "dashboard");
    context.insert("stats", &data.stats);
    context.insert("has_pending_posts", &data.has_pending_posts);

    render_template(&tera, "dashboard.html", &context)
}

#[get("/action/{name}")]
pub async fn dispatch_action(
    name: web::Path<String>,
    actions: web::Data<ActionRegistry>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let name = name.into_inner();
    match actions.resolve(&name) {
        Some(target) => redirect(&target),
        None => {
            log::warn!("Unknown sidebar action `{name}`");
            render_error(
                &tera,
                &actions,
                StatusCode::NOT_FOUND,
                &format!("Unknown action: {name}"),
            )
        }
    }
}
