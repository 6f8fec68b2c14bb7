use reqwest::Method;
use tera::{Context, Tera};

use crate::api::{LibraryApi, decode_field, decode_message};
use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User, UserUpdate};
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::users::{AddUserForm, EditUserForm};
use crate::screens::{USERS, rows_renderer_with};
use crate::services::{ServiceError, ServiceResult, load_list, missing_as_not_found};

pub const USERS_ENDPOINT: &str = "/api/admin/users";

pub async fn list_users<A: LibraryApi>(api: &A, tera: &Tera, query: &ListQuery) -> ListPageData {
    let mut base = Context::new();
    base.insert("return_query", &query.query_string(&USERS));
    let renderer = rows_renderer_with(tera, "users/rows.html", base, |user: &User| user.clone());
    load_list::<User, _, _>(api, &USERS, query, renderer).await
}

pub async fn add_user<A: LibraryApi>(api: &A, form: AddUserForm) -> ServiceResult<String> {
    let user = NewUser::try_from(form)?;
    let body = serde_json::to_value(&user)?;

    let response = api.send(Method::POST, USERS_ENDPOINT, Some(body)).await?;
    Ok(decode_message(response, "User created.")?)
}

pub async fn load_user<A: LibraryApi>(api: &A, user_id: i64) -> ServiceResult<User> {
    let user_id = UserId::new(user_id).map_err(|_| ServiceError::NotFound)?;

    let value = api
        .get(&format!("{USERS_ENDPOINT}/{user_id}"), &[])
        .await
        .map_err(missing_as_not_found)?;
    Ok(decode_field::<User>(value, "user")?)
}

pub async fn edit_user<A: LibraryApi>(
    api: &A,
    user_id: i64,
    form: EditUserForm,
) -> ServiceResult<String> {
    let user_id = UserId::new(user_id)?;
    let update = UserUpdate::try_from(form)?;
    let body = serde_json::to_value(&update)?;

    let response = api
        .send(Method::PUT, &format!("{USERS_ENDPOINT}/{user_id}"), Some(body))
        .await?;
    Ok(decode_message(response, "User updated.")?)
}

pub async fn delete_user<A: LibraryApi>(api: &A, user_id: i64) -> ServiceResult<String> {
    let user_id = UserId::new(user_id)?;

    let response = api
        .send(Method::DELETE, &format!("{USERS_ENDPOINT}/{user_id}"), None)
        .await?;
    Ok(decode_message(response, "User deleted.")?)
}
