use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::{Duration, Local};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::domain::borrow::{DEFAULT_LOAN_DAYS, LOAN_DURATIONS};
use crate::domain::types::BorrowStatus;
use crate::dto::list::ListQuery;
use crate::forms::borrows::{BorrowBookForm, ReturnBookForm};
use crate::routes::{base_context, collect_alerts, list_context, redirect, render_template};
use crate::services::{ServiceError, borrows as borrows_service};

#[get("/borrows")]
pub async fn show_borrows(
    req: HttpRequest,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::parse(req.query_string());
    let today = Local::now().date_naive();
    let data = borrows_service::list_borrows(&backends.library, &tera, &query, today).await;

    let mut context = list_context(&flash_messages, &actions, "borrows", &data);
    context.insert("statuses", BorrowStatus::ALL);
    render_template(&tera, "borrows/index.html", &context)
}

#[get("/borrows/borrow")]
pub async fn new_borrow(
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = Local::now().date_naive();

    let mut context = base_context(collect_alerts(&flash_messages), &actions, "borrows_borrow");
    context.insert("durations", LOAN_DURATIONS);
    context.insert("default_duration", &DEFAULT_LOAN_DAYS);
    context.insert("today", &today.format("%Y-%m-%d").to_string());
    context.insert(
        "default_due_date",
        &(today + Duration::days(DEFAULT_LOAN_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
    );
    render_template(&tera, "borrows/borrow.html", &context)
}

#[post("/borrows/borrow")]
pub async fn borrow_book(
    backends: web::Data<Backends>,
    web::Form(form): web::Form<BorrowBookForm>,
) -> impl Responder {
    let today = Local::now().date_naive();
    match borrows_service::borrow_book(&backends.library, form, today).await {
        Ok(message) => {
            FlashMessage::success(message).send();
            redirect("/borrows")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/borrows/borrow")
        }
        Err(err) => {
            log::error!("Failed to borrow a book: {err}");
            FlashMessage::error(format!("Failed to borrow the book: {err}")).send();
            redirect("/borrows/borrow")
        }
    }
}

#[get("/borrows/return")]
pub async fn new_return(
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(collect_alerts(&flash_messages), &actions, "borrows_return");
    render_template(&tera, "borrows/return.html", &context)
}

#[post("/borrows/return")]
pub async fn return_book(
    backends: web::Data<Backends>,
    web::Form(form): web::Form<ReturnBookForm>,
) -> impl Responder {
    match borrows_service::return_book(&backends.library, form).await {
        Ok(message) => {
            FlashMessage::success(message).send();
            redirect("/borrows")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/borrows/return")
        }
        Err(err) => {
            log::error!("Failed to return a book: {err}");
            FlashMessage::error(format!("Failed to return the book: {err}")).send();
            redirect("/borrows/return")
        }
    }
}
