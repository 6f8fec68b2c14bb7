use reqwest::Method;
use serde_json::json;
use tera::{Context, Tera};

use crate::api::{LibraryApi, decode_message, decode_page};
use crate::domain::book::{Book, BookUpdate, NewBook};
use crate::domain::types::Isbn;
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::books::{AddBookForm, DeleteBookForm, EditBookForm};
use crate::screens::{BOOKS, rows_renderer_with};
use crate::services::{ServiceError, ServiceResult, load_list};

pub async fn list_books<A: LibraryApi>(api: &A, tera: &Tera, query: &ListQuery) -> ListPageData {
    let mut base = Context::new();
    base.insert("return_query", &query.query_string(&BOOKS));
    let renderer = rows_renderer_with(tera, "books/rows.html", base, |book: &Book| book.clone());
    load_list::<Book, _, _>(api, &BOOKS, query, renderer).await
}

/// Validates the form and registers the book with the backend.
pub async fn add_book<A: LibraryApi>(api: &A, form: AddBookForm) -> ServiceResult<String> {
    let book = NewBook::try_from(form)?;
    let body = serde_json::to_value(&book)?;

    let response = api.send(Method::POST, "/addbooks", Some(body)).await?;
    Ok(decode_message(response, "Book added.")?)
}

/// Looks a book up by ISBN, preferring an exact match among the results.
pub async fn load_book<A: LibraryApi>(api: &A, isbn: &str) -> ServiceResult<Book> {
    let isbn = Isbn::new(isbn).map_err(|_| ServiceError::NotFound)?;

    let value = api
        .get("/searchbooks", &[("isbn".to_string(), isbn.to_string())])
        .await?;
    let mut books = decode_page::<Book>(value)?.items;
    if books.is_empty() {
        return Err(ServiceError::NotFound);
    }
    let index = books
        .iter()
        .position(|book| book.isbn == isbn.as_str())
        .unwrap_or(0);
    Ok(books.swap_remove(index))
}

pub async fn edit_book<A: LibraryApi>(
    api: &A,
    isbn: &str,
    form: EditBookForm,
) -> ServiceResult<String> {
    let isbn = Isbn::new(isbn)?;
    let update = BookUpdate::try_from(form)?;
    let body = serde_json::to_value(&update)?;

    let response = api
        .send(Method::PUT, &format!("/editbook/{isbn}"), Some(body))
        .await?;
    Ok(decode_message(response, "Book updated.")?)
}

pub async fn delete_book<A: LibraryApi>(api: &A, form: DeleteBookForm) -> ServiceResult<String> {
    let isbn = Isbn::new(form.isbn)?;

    let response = api
        .send(Method::DELETE, "/deletebooks", Some(json!({ "isbn": isbn })))
        .await?;
    Ok(decode_message(response, "Book deleted.")?)
}
