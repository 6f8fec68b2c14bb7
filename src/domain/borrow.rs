use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::{BorrowerId, Isbn};

/// Default loan period offered by the borrow form.
pub const DEFAULT_LOAN_DAYS: i64 = 30;

/// Loan periods offered by the borrow form, in days.
pub const LOAN_DURATIONS: &[i64] = &[7, 15, 30, 60, 90];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct BorrowRecord {
    pub isbn: String,
    pub book_title: Option<String>,
    #[serde(default)]
    pub user_id: serde_json::Value,
    pub username: Option<String>,
    pub borrow_date: Option<String>,
    pub due_date: Option<String>,
    pub return_date: Option<String>,
    #[serde(default, deserialize_with = "flag_from_int_or_bool")]
    pub returned: bool,
}

impl BorrowRecord {
    /// A record is overdue when it is still out and its due date has passed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.returned
            && self
                .due_date
                .as_deref()
                .and_then(parse_date)
                .is_some_and(|due| due < today)
    }
}

/// Parses the date part of `YYYY-MM-DD` or an ISO timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = value.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// The backend reports `returned` as `0`/`1`.
fn flag_from_int_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(flag) => Ok(flag),
        serde_json::Value::Number(number) => Ok(number.as_i64().unwrap_or(0) != 0),
        _ => Ok(false),
    }
}

/// Payload of `POST /borrowbooks`.
#[derive(Clone, Debug, Serialize)]
pub struct NewBorrow {
    pub isbn: Isbn,
    pub user_id: BorrowerId,
    pub due_date: NaiveDate,
}

/// Payload of `PUT /returnbooks`.
#[derive(Clone, Debug, Serialize)]
pub struct BookReturn {
    pub isbn: Isbn,
    pub user_id: BorrowerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).expect("valid date")
    }

    #[test]
    fn returned_flag_accepts_integers() {
        let record: BorrowRecord = serde_json::from_str(
            r#"{"isbn":"1","user_id":7,"due_date":"2024-01-10","returned":1}"#,
        )
        .expect("valid record");
        assert!(record.returned);
    }

    #[test]
    fn overdue_only_when_outstanding_and_past_due() {
        let mut record = BorrowRecord {
            isbn: "1".to_string(),
            due_date: Some("2024-01-10T00:00:00.000Z".to_string()),
            ..BorrowRecord::default()
        };

        assert!(record.is_overdue(date("2024-01-11")));
        assert!(!record.is_overdue(date("2024-01-10")));

        record.returned = true;
        assert!(!record.is_overdue(date("2024-02-01")));
    }
}
