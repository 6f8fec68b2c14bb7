use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::domain::types::UserRole;
use crate::dto::list::ListQuery;
use crate::forms::posts::ReturnToListForm;
use crate::forms::users::{AddUserForm, EditUserForm};
use crate::routes::{
    base_context, collect_alerts, finish_submission, list_context, redirect, render_load_error,
    render_template,
};
use crate::screens::USERS;
use crate::services::users as users_service;

#[get("/users")]
pub async fn show_users(
    req: HttpRequest,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::parse(req.query_string());
    let data = users_service::list_users(&backends.library, &tera, &query).await;

    let mut context = list_context(&flash_messages, &actions, "users", &data);
    context.insert("roles", UserRole::ALL);
    render_template(&tera, "users/index.html", &context)
}

#[get("/users/add")]
pub async fn new_user(
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(collect_alerts(&flash_messages), &actions, "users_add");
    context.insert("roles", UserRole::ALL);
    render_template(&tera, "users/new.html", &context)
}

#[post("/users/add")]
pub async fn add_user(
    backends: web::Data<Backends>,
    web::Form(form): web::Form<AddUserForm>,
) -> impl Responder {
    let result = users_service::add_user(&backends.library, form).await;
    finish_submission(result, "create the user", "/users", "/users/add")
}

#[get("/users/{user_id}/edit")]
pub async fn edit_user_form(
    user_id: web::Path<i64>,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match users_service::load_user(&backends.library, user_id.into_inner()).await {
        Ok(user) => {
            let mut context = base_context(collect_alerts(&flash_messages), &actions, "users");
            context.insert("user", &user);
            context.insert("roles", UserRole::ALL);
            render_template(&tera, "users/edit.html", &context)
        }
        Err(err) => render_load_error(&tera, &actions, err, "User"),
    }
}

#[post("/users/{user_id}/edit")]
pub async fn edit_user(
    user_id: web::Path<i64>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<EditUserForm>,
) -> impl Responder {
    let user_id = user_id.into_inner();
    let result = users_service::edit_user(&backends.library, user_id, form).await;
    finish_submission(
        result,
        "update the user",
        "/users",
        &format!("/users/{user_id}/edit"),
    )
}

#[post("/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<i64>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<ReturnToListForm>,
) -> impl Responder {
    match users_service::delete_user(&backends.library, user_id.into_inner()).await {
        Ok(message) => FlashMessage::success(message).send(),
        Err(err) => {
            log::error!("Failed to delete a user: {err}");
            FlashMessage::error(format!("Failed to delete the user: {err}")).send();
        }
    }
    redirect(&form.return_query().href(&USERS))
}
