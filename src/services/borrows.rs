use chrono::NaiveDate;
use reqwest::Method;
use tera::Tera;

use crate::api::{LibraryApi, decode_message};
use crate::domain::borrow::{BookReturn, BorrowRecord};
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::borrows::{BorrowBookForm, ReturnBookForm};
use crate::screens::{BORROW_RECORDS, BorrowRow, rows_renderer};
use crate::services::{ServiceResult, load_list};

/// Lists borrow records, flagging loans past their due date as of `today`.
pub async fn list_borrows<A: LibraryApi>(
    api: &A,
    tera: &Tera,
    query: &ListQuery,
    today: NaiveDate,
) -> ListPageData {
    let renderer = rows_renderer(tera, "borrows/rows.html", move |record: &BorrowRecord| {
        BorrowRow::new(record, today)
    });
    load_list::<BorrowRecord, _, _>(api, &BORROW_RECORDS, query, renderer).await
}

pub async fn borrow_book<A: LibraryApi>(
    api: &A,
    form: BorrowBookForm,
    today: NaiveDate,
) -> ServiceResult<String> {
    let borrow = form.into_new_borrow(today)?;
    let body = serde_json::to_value(&borrow)?;

    let response = api.send(Method::POST, "/borrowbooks", Some(body)).await?;
    Ok(decode_message(response, "Book borrowed.")?)
}

pub async fn return_book<A: LibraryApi>(api: &A, form: ReturnBookForm) -> ServiceResult<String> {
    let book_return = BookReturn::try_from(form)?;
    let body = serde_json::to_value(&book_return)?;

    let response = api.send(Method::PUT, "/returnbooks", Some(body)).await?;
    Ok(decode_message(response, "Book returned.")?)
}
