use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::domain::book::{BOOK_CATEGORIES, BOOK_STATUSES};
use crate::dto::list::ListQuery;
use crate::forms::books::{AddBookForm, DeleteBookForm, EditBookForm};
use crate::routes::{
    base_context, collect_alerts, finish_submission, list_context, redirect, render_load_error,
    render_template,
};
use crate::screens::BOOKS;
use crate::services::books as books_service;

#[get("/books")]
pub async fn show_books(
    req: HttpRequest,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::parse(req.query_string());
    let data = books_service::list_books(&backends.library, &tera, &query).await;

    let context = list_context(&flash_messages, &actions, "books", &data);
    render_template(&tera, "books/index.html", &context)
}

#[get("/books/add")]
pub async fn new_book(
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(collect_alerts(&flash_messages), &actions, "books_add");
    context.insert("categories", BOOK_CATEGORIES);
    context.insert("statuses", BOOK_STATUSES);
    render_template(&tera, "books/new.html", &context)
}

#[post("/books/add")]
pub async fn add_book(
    backends: web::Data<Backends>,
    web::Form(form): web::Form<AddBookForm>,
) -> impl Responder {
    let result = books_service::add_book(&backends.library, form).await;
    finish_submission(result, "add the book", "/books", "/books/add")
}

#[get("/books/{isbn}/edit")]
pub async fn edit_book_form(
    isbn: web::Path<String>,
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match books_service::load_book(&backends.library, &isbn).await {
        Ok(book) => {
            let mut context = base_context(collect_alerts(&flash_messages), &actions, "books");
            context.insert("book", &book);
            context.insert("categories", BOOK_CATEGORIES);
            context.insert("statuses", BOOK_STATUSES);
            render_template(&tera, "books/edit.html", &context)
        }
        Err(err) => render_load_error(&tera, &actions, err, "Book"),
    }
}

#[post("/books/{isbn}/edit")]
pub async fn edit_book(
    isbn: web::Path<String>,
    backends: web::Data<Backends>,
    web::Form(form): web::Form<EditBookForm>,
) -> impl Responder {
    let isbn = isbn.into_inner();
    let result = books_service::edit_book(&backends.library, &isbn, form).await;
    finish_submission(
        result,
        "update the book",
        "/books",
        &format!("/books/{}/edit", isbn.trim()),
    )
}

#[post("/books/delete")]
pub async fn delete_book(
    backends: web::Data<Backends>,
    web::Form(form): web::Form<DeleteBookForm>,
) -> impl Responder {
    let target = form.return_query().href(&BOOKS);
    match books_service::delete_book(&backends.library, form).await {
        Ok(message) => FlashMessage::success(message).send(),
        Err(err) => {
            log::error!("Failed to delete a book: {err}");
            FlashMessage::error(format!("Failed to delete the book: {err}")).send();
        }
    }
    redirect(&target)
}
