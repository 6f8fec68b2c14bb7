use reqwest::Method;
use tera::{Context, Tera};

use crate::api::{LibraryApi, decode_message, decode_page};
use crate::domain::blog::{NewTopic, Topic};
use crate::domain::types::TopicId;
use crate::dto::list::{ListPageData, ListQuery};
use crate::forms::topics::TopicForm;
use crate::screens::{TOPICS, rows_renderer_with};
use crate::services::posts::ALL_TOPICS_LIMIT;
use crate::services::{ServiceError, ServiceResult, load_list};

const ADMIN_TOPICS_ENDPOINT: &str = "/api/admin/blog/topics";

pub async fn list_topics<A: LibraryApi>(api: &A, tera: &Tera, query: &ListQuery) -> ListPageData {
    let mut base = Context::new();
    base.insert("return_query", &query.query_string(&TOPICS));
    let renderer = rows_renderer_with(tera, "topics/rows.html", base, |topic: &Topic| {
        topic.clone()
    });
    load_list::<Topic, _, _>(api, &TOPICS, query, renderer).await
}

pub async fn add_topic<A: LibraryApi>(api: &A, form: TopicForm) -> ServiceResult<String> {
    let topic = NewTopic::try_from(form)?;
    let body = serde_json::to_value(&topic)?;

    let response = api
        .send(Method::POST, ADMIN_TOPICS_ENDPOINT, Some(body))
        .await?;
    Ok(decode_message(response, "Topic created.")?)
}

/// Finds a topic in the full topic list; there is no single-topic endpoint.
pub async fn load_topic<A: LibraryApi>(api: &A, topic_id: i64) -> ServiceResult<Topic> {
    let topic_id = TopicId::new(topic_id).map_err(|_| ServiceError::NotFound)?;

    let value = api
        .get(
            "/api/blog/topics",
            &[("limit".to_string(), ALL_TOPICS_LIMIT.to_string())],
        )
        .await?;
    decode_page::<Topic>(value)?
        .items
        .into_iter()
        .find(|topic| topic.id == topic_id.get())
        .ok_or(ServiceError::NotFound)
}

pub async fn edit_topic<A: LibraryApi>(
    api: &A,
    topic_id: i64,
    form: TopicForm,
) -> ServiceResult<String> {
    let topic_id = TopicId::new(topic_id)?;
    let topic = NewTopic::try_from(form)?;
    let body = serde_json::to_value(&topic)?;

    let response = api
        .send(
            Method::PUT,
            &format!("{ADMIN_TOPICS_ENDPOINT}/{topic_id}"),
            Some(body),
        )
        .await?;
    Ok(decode_message(response, "Topic updated.")?)
}

pub async fn delete_topic<A: LibraryApi>(api: &A, topic_id: i64) -> ServiceResult<String> {
    let topic_id = TopicId::new(topic_id)?;

    let response = api
        .send(
            Method::DELETE,
            &format!("{ADMIN_TOPICS_ENDPOINT}/{topic_id}"),
            None,
        )
        .await?;
    Ok(decode_message(response, "Topic deleted.")?)
}
