use serde::Deserialize;
use validator::Validate;

use crate::domain::blog::PostDraft;
use crate::domain::types::{PostStatus, PostVisibility, TypeConstraintError};
use crate::dto::list::ListQuery;
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize)]
/// Form data for moving a post to another publication state.
pub struct ChangePostStatusForm {
    pub status: String,
    /// Status the post had when the form was rendered.
    pub current_status: Option<String>,
    /// Query string of the list the form was submitted from.
    #[serde(default)]
    pub return_query: String,
}

impl ChangePostStatusForm {
    pub fn new_status(&self) -> Result<PostStatus, FormError> {
        Ok(self.status.parse::<PostStatus>()?)
    }

    /// Whether the requested status differs from the rendered one.
    pub fn is_change(&self) -> bool {
        self.current_status.as_deref().map(str::trim) != Some(self.status.trim())
    }

    pub fn return_query(&self) -> ListQuery {
        ListQuery::parse(&self.return_query)
    }
}

#[derive(Debug, Default, Deserialize)]
/// Hidden list state posted along with a delete button.
pub struct ReturnToListForm {
    #[serde(default)]
    pub return_query: String,
}

impl ReturnToListForm {
    pub fn return_query(&self) -> ListQuery {
        ListQuery::parse(&self.return_query)
    }
}

#[derive(Debug, Default, Deserialize)]
/// Query of a post editor page; a `book_query` runs the book lookup.
pub struct EditorQuery {
    pub book_query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
/// Whether the reader already likes the post shown.
pub struct LikeForm {
    #[serde(default)]
    pub liked: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Blog post editor shared by the admin console and the reader submission page.
///
/// Topics are checkboxes posted as repeated `topic_ids` fields, so the body is
/// read with [`PostForm::parse`] instead of the urlencoded extractor.
pub struct PostForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub content: String,
    pub excerpt: Option<String>,
    pub book_isbn: Option<String>,
    #[serde(default)]
    pub topic_ids: Vec<i64>,
    #[serde(default)]
    pub status: String,
    pub visibility: Option<String>,
    /// `"true"` or `"false"`; comments stay open when the field is missing.
    pub allow_comments: Option<String>,
    /// Present when the reader pressed the save-as-draft button.
    pub save_draft: Option<String>,
}

impl PostForm {
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Payload(err.to_string()))
    }

    /// Builds the payload with the status chosen in the admin editor.
    pub fn into_draft(self) -> Result<PostDraft, FormError> {
        let status = self.status.parse::<PostStatus>()?;
        self.into_draft_with_status(status)
    }

    /// Builds the payload of a reader submission.
    ///
    /// A draft save stays a draft; otherwise the post goes to review or is
    /// published directly depending on the site setting.
    pub fn into_submission(self, requires_review: bool) -> Result<PostDraft, FormError> {
        let status = if self.save_draft.is_some() {
            PostStatus::Draft
        } else if requires_review {
            PostStatus::PendingReview
        } else {
            PostStatus::Published
        };
        self.into_draft_with_status(status)
    }

    fn into_draft_with_status(self, status: PostStatus) -> Result<PostDraft, FormError> {
        self.validate()?;

        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();
        if title.is_empty() || content.is_empty() {
            return Err(TypeConstraintError::EmptyString.into());
        }

        let visibility = match optional_text(self.visibility) {
            Some(value) => value.parse::<PostVisibility>()?,
            None => PostVisibility::Public,
        };
        let allow_comments = self.allow_comments.as_deref().map(str::trim) != Some("false");

        let mut topic_ids = self.topic_ids;
        topic_ids.retain(|id| *id > 0);
        topic_ids.sort_unstable();
        topic_ids.dedup();

        Ok(PostDraft {
            title,
            content,
            excerpt: optional_text(self.excerpt),
            book_isbn: optional_text(self.book_isbn),
            topic_ids,
            status,
            visibility,
            allow_comments,
        })
    }
}
