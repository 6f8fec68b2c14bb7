use serde::Deserialize;
use validator::Validate;

use crate::domain::book::{BOOK_STATUSES, BookUpdate, NewBook};
use crate::domain::types::{Isbn, TypeConstraintError};
use crate::dto::list::ListQuery;
use crate::forms::{FormError, optional_count, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a book to the catalogue.
pub struct AddBookForm {
    #[validate(length(min = 1))]
    pub isbn: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    #[validate(range(min = 1))]
    pub category_id: i64,
    #[validate(range(min = 1))]
    pub total_copies: Option<i64>,
    pub status: Option<String>,
}

impl TryFrom<AddBookForm> for NewBook {
    type Error = FormError;

    fn try_from(form: AddBookForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let status = optional_text(form.status).unwrap_or_else(|| BOOK_STATUSES[0].to_string());
        if !BOOK_STATUSES.contains(&status.as_str()) {
            return Err(TypeConstraintError::InvalidValue(status).into());
        }

        Ok(NewBook {
            isbn: Isbn::new(form.isbn)?,
            title: form.title.trim().to_string(),
            author: optional_text(form.author),
            publisher: optional_text(form.publisher),
            publication_date: optional_text(form.publication_date),
            category_id: form.category_id,
            total_copies: form.total_copies.unwrap_or(1),
            status,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for editing a catalogued book.
///
/// Numeric fields arrive as text so that blank inputs can be told apart from
/// zero.
pub struct EditBookForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub category_id: Option<String>,
    pub total_copies: Option<String>,
    pub available_copies: Option<String>,
    pub status: String,
}

impl TryFrom<EditBookForm> for BookUpdate {
    type Error = FormError;

    fn try_from(form: EditBookForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let status = form.status.trim().to_string();
        if !BOOK_STATUSES.contains(&status.as_str()) {
            return Err(TypeConstraintError::InvalidValue(status).into());
        }

        let category_id = optional_count(form.category_id)?.filter(|id| *id > 0);
        let total_copies = optional_count(form.total_copies)?;
        let available_copies = optional_count(form.available_copies)?;
        if matches!(
            (total_copies, available_copies),
            (Some(total), Some(available)) if available > total
        ) {
            return Err(TypeConstraintError::InvalidValue(
                "available copies exceed total copies".to_string(),
            )
            .into());
        }

        Ok(BookUpdate {
            title: form.title.trim().to_string(),
            author: optional_text(form.author),
            publisher: optional_text(form.publisher),
            publication_date: optional_text(form.publication_date),
            category_id,
            total_copies,
            available_copies,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Form data for removing a book.
pub struct DeleteBookForm {
    pub isbn: String,
    /// Query string of the list the form was submitted from.
    #[serde(default)]
    pub return_query: String,
}

impl DeleteBookForm {
    pub fn return_query(&self) -> ListQuery {
        ListQuery::parse(&self.return_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddBookForm {
        AddBookForm {
            isbn: " 9787111 ".to_string(),
            title: "Dune".to_string(),
            author: Some("  ".to_string()),
            publisher: None,
            publication_date: Some(String::new()),
            category_id: 1,
            total_copies: None,
            status: None,
        }
    }

    #[test]
    fn defaults_are_applied() {
        let book = NewBook::try_from(form()).expect("valid form");
        assert_eq!(book.isbn.as_str(), "9787111");
        assert_eq!(book.author, None);
        assert_eq!(book.publication_date, None);
        assert_eq!(book.total_copies, 1);
        assert_eq!(book.status, BOOK_STATUSES[0]);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut form = form();
        form.status = Some("burned".to_string());
        assert!(NewBook::try_from(form).is_err());
    }

    fn edit_form() -> EditBookForm {
        EditBookForm {
            title: " Dune ".to_string(),
            author: Some(String::new()),
            publisher: Some("Ace".to_string()),
            publication_date: None,
            category_id: Some("3".to_string()),
            total_copies: Some("4".to_string()),
            available_copies: Some(String::new()),
            status: BOOK_STATUSES[2].to_string(),
        }
    }

    #[test]
    fn edit_leaves_blank_counters_out() {
        let update = BookUpdate::try_from(edit_form()).expect("valid form");
        assert_eq!(update.title, "Dune");
        assert_eq!(update.author, None);
        assert_eq!(update.category_id, Some(3));
        assert_eq!(update.total_copies, Some(4));
        assert_eq!(update.available_copies, None);

        let body = serde_json::to_value(&update).expect("serializable");
        assert!(body.get("available_copies").is_none());
        assert!(body["author"].is_null());
    }

    #[test]
    fn edit_rejects_more_available_than_total() {
        let mut form = edit_form();
        form.available_copies = Some("5".to_string());
        assert!(matches!(BookUpdate::try_from(form), Err(FormError::Constraint(_))));
    }

    #[test]
    fn zero_copies_are_rejected() {
        let mut form = form();
        form.total_copies = Some(0);
        assert!(matches!(NewBook::try_from(form), Err(FormError::Validation(_))));
    }
}
