use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::domain::borrow::{BookReturn, DEFAULT_LOAN_DAYS, NewBorrow};
use crate::domain::types::{BorrowerId, Isbn};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize)]
/// Form data for lending a book.
pub struct BorrowBookForm {
    pub isbn: String,
    pub user_id: String,
    /// Loan period in days, or `custom` to use `due_date`.
    pub duration: Option<String>,
    pub due_date: Option<String>,
}

impl BorrowBookForm {
    /// Resolves the due date against `today` and builds the request payload.
    ///
    /// An explicit due date wins over the selected loan period.
    pub fn into_new_borrow(self, today: NaiveDate) -> Result<NewBorrow, FormError> {
        let due_date = match optional_text(self.due_date) {
            Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| FormError::InvalidDate(date))?,
            None => {
                let days = optional_text(self.duration)
                    .and_then(|days| days.parse::<i64>().ok())
                    .filter(|days| *days > 0)
                    .unwrap_or(DEFAULT_LOAN_DAYS);
                today + Duration::days(days)
            }
        };

        if due_date < today {
            return Err(FormError::InvalidDate(due_date.to_string()));
        }

        Ok(NewBorrow {
            isbn: Isbn::new(self.isbn)?,
            user_id: BorrowerId::new(self.user_id)?,
            due_date,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Form data for returning a book.
pub struct ReturnBookForm {
    pub isbn: String,
    pub user_id: String,
}

impl TryFrom<ReturnBookForm> for BookReturn {
    type Error = FormError;

    fn try_from(form: ReturnBookForm) -> Result<Self, Self::Error> {
        Ok(BookReturn {
            isbn: Isbn::new(form.isbn)?,
            user_id: BorrowerId::new(form.user_id)?,
        })
    }
}
