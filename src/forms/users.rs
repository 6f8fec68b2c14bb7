use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{UserEmail, UserRole};
use crate::domain::user::{NewUser, UserUpdate};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a library account.
pub struct AddUserForm {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub role: String,
}

impl TryFrom<AddUserForm> for NewUser {
    type Error = FormError;

    fn try_from(form: AddUserForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewUser {
            username: form.username.trim().to_string(),
            email: UserEmail::new(form.email)?,
            password: form.password,
            role: form.role.parse::<UserRole>()?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for editing an account. A blank password keeps the current one.
pub struct EditUserForm {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub role: String,
    pub new_password: Option<String>,
}

impl TryFrom<EditUserForm> for UserUpdate {
    type Error = FormError;

    fn try_from(form: EditUserForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UserUpdate {
            username: form.username.trim().to_string(),
            email: UserEmail::new(form.email)?,
            role: form.role.parse::<UserRole>()?,
            new_password: optional_text(form.new_password),
        })
    }
}
