use serde::Deserialize;
use validator::Validate;

use crate::domain::blog::NewTopic;
use crate::domain::types::TopicName;
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing a blog topic.
pub struct TopicForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Left empty to let the backend derive one.
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<TopicForm> for NewTopic {
    type Error = FormError;

    fn try_from(form: TopicForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewTopic {
            name: TopicName::new(form.name)?,
            slug: optional_text(form.slug).map(|slug| slug.to_lowercase()),
            description: optional_text(form.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slug_is_left_to_backend() {
        let form = TopicForm {
            name: " Events ".to_string(),
            slug: Some(" ".to_string()),
            description: Some("School events".to_string()),
        };
        let topic = NewTopic::try_from(form).expect("valid form");
        let body = serde_json::to_value(&topic).expect("serializable");
        assert_eq!(body["name"], "Events");
        assert!(body.get("slug").is_none());
    }
}
