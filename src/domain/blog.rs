use serde::{Deserialize, Serialize};

use crate::domain::types::{PostStatus, PostVisibility, TopicName};

/// Topic reference embedded in a post; older API revisions send bare names.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PostTopic {
    Named {
        #[serde(default)]
        id: Option<i64>,
        name: String,
    },
    Bare(String),
}

impl PostTopic {
    pub fn name(&self) -> &str {
        match self {
            PostTopic::Named { name, .. } | PostTopic::Bare(name) => name,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            PostTopic::Named { id, .. } => *id,
            PostTopic::Bare(_) => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author_username: Option<String>,
    pub book_isbn: Option<String>,
    pub book_title: Option<String>,
    #[serde(default)]
    pub topics: Vec<PostTopic>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_featured: bool,
    pub published_date: Option<String>,
    pub visibility: Option<String>,
    pub allow_comments: Option<bool>,
    #[serde(default)]
    pub like_count: i64,
}

impl BlogPost {
    /// Topic names joined for table display.
    pub fn topic_names(&self) -> String {
        self.topics
            .iter()
            .map(PostTopic::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Ids of the attached topics that carry one.
    pub fn topic_ids(&self) -> Vec<i64> {
        self.topics.iter().filter_map(PostTopic::id).collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub post_count: i64,
}

/// Payload of the admin topic create and update endpoints.
///
/// An empty slug is left out so the backend derives one from the name.
#[derive(Clone, Debug, Serialize)]
pub struct NewTopic {
    pub name: TopicName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Body of a blog post create or update request.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub book_isbn: Option<String>,
    pub topic_ids: Vec<i64>,
    pub status: PostStatus,
    pub visibility: PostVisibility,
    pub allow_comments: bool,
}

/// Payload of `PUT /api/admin/blog/posts/{id}/status`.
#[derive(Clone, Debug, Serialize)]
pub struct PostStatusChange {
    pub status: PostStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_ids_skip_bare_names() {
        let post: BlogPost = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Reading week",
            "topics": [{ "id": 2, "name": "Events" }, "News", { "name": "Clubs" }]
        }))
        .expect("valid post");

        assert_eq!(post.topic_ids(), vec![2]);
        assert_eq!(post.topic_names(), "Events, News, Clubs");
        assert_eq!(post.like_count, 0);
    }
}
