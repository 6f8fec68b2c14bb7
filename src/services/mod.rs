//! Service layer between the HTTP routes and the REST backends.
//!
//! Services never touch actix types; they take a [`LibraryApi`] and return
//! DTOs so they can be driven by the in-memory API in tests.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::{ApiError, LibraryApi};
use crate::controller::{ListScreen, PagedListController, RenderRows};
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::FormError;

pub mod blog;
pub mod books;
pub mod borrows;
pub mod main;
pub mod posts;
pub mod settings;
pub mod topics;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Form(String),

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        let message = match err {
            FormError::Validation(_) => "Please fill in all required fields correctly.".to_string(),
            other => other.to_string(),
        };
        ServiceError::Form(message)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

/// Maps a 404 answer onto [`ServiceError::NotFound`].
pub(crate) fn missing_as_not_found(err: ApiError) -> ServiceError {
    match err {
        ApiError::Http { status: 404, .. } => ServiceError::NotFound,
        other => ServiceError::Api(other),
    }
}

/// Loads one page of `screen` for the state carried in `query`.
///
/// Load failures do not abort the page; they are rendered into the view.
pub async fn load_list<T, A, R>(
    api: &A,
    screen: &ListScreen,
    query: &ListQuery,
    renderer: R,
) -> ListPageData
where
    T: DeserializeOwned,
    A: LibraryApi,
    R: RenderRows<T>,
{
    let mut controller = PagedListController::new(screen, renderer);
    controller.restore(query.page, &query.filters);
    let view = controller.reload(api).await;

    ListPageData {
        view,
        state: controller.state().clone(),
    }
}
