use chrono::NaiveDate;
use library_console::api::ApiError;
use library_console::api::test::TestApi;
use library_console::dto::list::ListQuery;
use library_console::domain::types::PostStatus;
use library_console::forms::books::{AddBookForm, EditBookForm};
use library_console::forms::posts::{ChangePostStatusForm, PostForm};
use library_console::forms::settings::SettingsForm;
use library_console::forms::topics::TopicForm;
use library_console::forms::users::EditUserForm;
use library_console::services::{
    ServiceError, blog, books, borrows, main as main_service, posts, settings, topics, users,
};
use reqwest::Method;
use serde_json::{Value, json};
use tera::Tera;

fn tera() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn page(data: Value, current: usize, total: usize) -> Value {
    json!({
        "success": true,
        "data": data,
        "pagination": {
            "currentPage": current,
            "totalPages": total,
            "totalItems": total * 10,
            "itemsPerPage": 10,
            "hasNextPage": current < total,
            "hasPrevPage": current > 1
        }
    })
}

#[actix_web::test]
async fn borrow_list_restores_page_and_drops_foreign_filters() {
    let api = TestApi::new().respond(Ok(page(json!([]), 4, 6)));
    let query = ListQuery::parse("page=4&status=overdue&role=admin&search=");

    let data = borrows::list_borrows(&api, &tera(), &query, today()).await;

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.path, "/managebooks");
    assert_eq!(call.param("action"), Some("borrowed_records"));
    assert_eq!(call.param("page"), Some("4"));
    assert_eq!(call.param("limit"), Some("10"));
    assert_eq!(call.param("status"), Some("overdue"));
    assert_eq!(call.param("role"), None);
    assert_eq!(call.param("search"), None);

    assert_eq!(data.filter("status"), "overdue");
    assert!(data.view.list_html.contains("No borrow records found."));
    assert!(
        data.view
            .pager_html
            .contains(r#"href="/borrows?page=3&amp;status=overdue""#)
    );
}

#[actix_web::test]
async fn overdue_records_are_highlighted() {
    let api = TestApi::new().respond(Ok(page(
        json!([
            { "isbn": "111", "book_title": "Dune", "user_id": 7, "due_date": "2024-02-01", "returned": 0 },
            { "isbn": "222", "book_title": "Emma", "user_id": "s-9", "due_date": "2024-02-01", "returned": 1 }
        ]),
        1,
        1,
    )));

    let data = borrows::list_borrows(&api, &tera(), &ListQuery::default(), today()).await;

    let html = &data.view.list_html;
    assert_eq!(html.matches("table-danger").count(), 1);
    assert!(html.contains("Dune"));
    assert!(html.contains("s-9"));
    assert!(data.view.pager_html.is_empty());
}

#[actix_web::test]
async fn list_failure_is_reported_inline() {
    let api = TestApi::new().respond(Err(ApiError::Http {
        status: 500,
        message: "HTTP error! status: 500".to_string(),
    }));

    let data = books::list_books(&api, &tera(), &ListQuery::default()).await;

    assert!(data.view.list_html.contains("Could not load books"));
    assert_eq!(data.view.alert.as_deref(), Some("HTTP error! status: 500"));
}

#[actix_web::test]
async fn book_rows_escape_backend_text() {
    let api = TestApi::new().respond(Ok(page(
        json!([{ "isbn": "1", "title": "<script>alert(1)</script>" }]),
        1,
        1,
    )));

    let data = books::list_books(&api, &tera(), &ListQuery::default()).await;

    assert!(!data.view.list_html.contains("<script>"));
    assert!(data.view.list_html.contains("&lt;script&gt;"));
    assert!(data.view.list_html.contains("N/A"));
}

#[actix_web::test]
async fn add_book_sends_validated_payload() {
    let api = TestApi::new().respond(Ok(json!({ "success": true, "message": "图书添加成功" })));
    let form = AddBookForm {
        isbn: "9787111".to_string(),
        title: "Dune".to_string(),
        author: Some("Frank Herbert".to_string()),
        publisher: None,
        publication_date: None,
        category_id: 3,
        total_copies: Some(2),
        status: None,
    };

    let message = books::add_book(&api, form).await.unwrap();

    assert_eq!(message, "图书添加成功");
    let calls = api.calls();
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].path, "/addbooks");
    let body = calls[0].body.as_ref().unwrap();
    assert_eq!(body["isbn"], "9787111");
    assert_eq!(body["category_id"], 3);
    assert_eq!(body["total_copies"], 2);
}

#[actix_web::test]
async fn invalid_book_form_never_reaches_backend() {
    let api = TestApi::new();
    let form = AddBookForm {
        isbn: String::new(),
        title: "Dune".to_string(),
        author: None,
        publisher: None,
        publication_date: None,
        category_id: 1,
        total_copies: None,
        status: None,
    };

    let result = books::add_book(&api, form).await;

    assert!(matches!(result, Err(ServiceError::Form(_))));
    assert!(api.calls().is_empty());
}

#[actix_web::test]
async fn rejected_mutation_surfaces_backend_message() {
    let api = TestApi::new().respond(Ok(json!({ "success": false, "message": "User has active loans" })));

    let result = users::delete_user(&api, 12).await;

    match result {
        Err(err) => assert_eq!(err.to_string(), "User has active loans"),
        Ok(_) => panic!("expected rejection"),
    }
    assert_eq!(api.calls()[0].path, "/api/admin/users/12");
    assert_eq!(api.calls()[0].method, Method::DELETE);
}

#[actix_web::test]
async fn unchanged_post_status_is_not_sent() {
    let api = TestApi::new();
    let form = ChangePostStatusForm {
        status: "published".to_string(),
        current_status: Some("published".to_string()),
        return_query: String::new(),
    };

    let result = posts::change_post_status(&api, 3, &form).await.unwrap();

    assert!(result.is_none());
    assert!(api.calls().is_empty());
}

#[actix_web::test]
async fn post_status_change_hits_admin_endpoint() {
    let api = TestApi::new().respond(Ok(json!({ "success": true })));
    let form = ChangePostStatusForm {
        status: "archived".to_string(),
        current_status: Some("published".to_string()),
        return_query: "page=2".to_string(),
    };

    let message = posts::change_post_status(&api, 3, &form).await.unwrap();

    assert_eq!(message.as_deref(), Some("Post status updated."));
    let calls = api.calls();
    assert_eq!(calls[0].path, "/api/admin/blog/posts/3/status");
    assert_eq!(calls[0].body, Some(json!({ "status": "archived" })));
}

fn stored_settings() -> Value {
    json!({
        "success": true,
        "settings": [
            {
                "setting_key": "site_title",
                "setting_value": "Library",
                "description": "Shown in the header"
            },
            { "setting_key": "footer_links_json", "setting_value": "[]" }
        ]
    })
}

#[actix_web::test]
async fn only_changed_settings_are_saved() {
    let api = TestApi::new()
        .respond(Ok(stored_settings()))
        .respond(Ok(json!({ "success": true })));
    let form = SettingsForm::parse(b"site_title=School+Library&footer_links_json=%5B%5D").unwrap();

    let report = settings::save_settings(&api, form).await.unwrap();

    assert_eq!(report.saved, vec!["site_title"]);
    assert!(report.failed.is_empty());
    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].method, Method::PUT);
    assert_eq!(calls[1].path, "/api/admin/settings/site_title");
    assert_eq!(
        calls[1].body,
        Some(json!({ "value": "School Library", "description": "Shown in the header" }))
    );
}

#[actix_web::test]
async fn refused_setting_does_not_stop_the_rest() {
    let api = TestApi::new()
        .respond(Ok(stored_settings()))
        .respond(Ok(json!({ "success": false, "message": "read-only" })))
        .respond(Ok(json!({ "success": true })));
    let form = SettingsForm::parse(b"site_title=School+Library&footer_links_json=%5B1%5D").unwrap();

    let report = settings::save_settings(&api, form).await.unwrap();

    assert_eq!(report.saved, vec!["site_title"]);
    assert_eq!(
        report.failed,
        vec![("footer_links_json".to_string(), "read-only".to_string())]
    );
    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].path, "/api/admin/settings/footer_links_json");
    assert_eq!(calls[1].body, Some(json!({ "value": "[1]", "description": null })));
    assert_eq!(calls[2].path, "/api/admin/settings/site_title");
}

#[actix_web::test]
async fn invalid_json_setting_blocks_every_update() {
    let api = TestApi::new().respond(Ok(stored_settings()));
    let form = SettingsForm::parse(b"site_title=New&footer_links_json=%5Bbroken").unwrap();

    let result = settings::save_settings(&api, form).await;

    assert!(matches!(result, Err(ServiceError::Form(_))));
    assert_eq!(api.calls().len(), 1);
}

#[actix_web::test]
async fn dashboard_tolerates_missing_and_failed_stats() {
    let api = TestApi::new()
        .respond(Ok(json!({
            "success": true,
            "stats": { "totalBooks": 120, "pendingReviewPosts": 2 }
        })))
        .respond(Err(ApiError::Transport("timed out".to_string())));

    let data = main_service::load_dashboard(&api).await;
    assert_eq!(data.stats.total_books, Some(120));
    assert_eq!(data.stats.total_users, None);
    assert!(data.has_pending_posts);

    let data = main_service::load_dashboard(&api).await;
    assert_eq!(data.stats.total_books, None);
    assert!(!data.has_pending_posts);
}

#[actix_web::test]
async fn blog_post_content_is_sanitized() {
    let api = TestApi::new().respond(Ok(json!({
        "success": true,
        "post": {
            "id": 8,
            "title": "Reading week",
            "content": "<p>Hello</p><script>steal()</script>",
            "topics": [{ "id": 1, "name": "Events" }, "News"],
            "status": "published"
        }
    })));

    let data = blog::load_post(&api, 8).await.unwrap();

    assert_eq!(data.content_html, "<p>Hello</p>");
    assert_eq!(data.topic_names, vec!["Events", "News"]);
    assert_eq!(api.calls()[0].path, "/blog/posts/8");
}

#[actix_web::test]
async fn missing_blog_post_is_not_found() {
    let api = TestApi::new().respond(Err(ApiError::Http {
        status: 404,
        message: "Post not found".to_string(),
    }));

    let result = blog::load_post(&api, 99).await;

    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[actix_web::test]
async fn blog_index_keeps_list_when_topics_fail() {
    let api = TestApi::new()
        .respond(Ok(page(
            json!([{ "id": 1, "title": "Reading week", "topics": [] }]),
            1,
            2,
        )))
        .respond(Ok(json!({ "success": false, "message": "topics unavailable" })));
    let query = ListQuery::parse("topic_id=4");

    let data = blog::load_blog_index(&api, &tera(), &query).await;

    assert!(data.topics.is_empty());
    assert!(data.list.view.list_html.contains("Reading week"));
    let calls = api.calls();
    assert_eq!(calls[0].path, "/blog/posts");
    assert_eq!(calls[0].param("topic_id"), Some("4"));
    assert_eq!(calls[1].path, "/blog/topics");
    assert!(
        data.list
            .view
            .pager_html
            .contains(r#"href="/blog?page=2&amp;topic_id=4""#)
    );
}

#[actix_web::test]
async fn book_edit_loads_exact_isbn_and_puts_changes() {
    let api = TestApi::new()
        .respond(Ok(json!({
            "success": true,
            "results": [
                { "isbn": "97871110", "title": "Dune Messiah" },
                { "isbn": "9787111", "title": "Dune", "category_id": 3 }
            ]
        })))
        .respond(Ok(json!({ "success": true, "message": "updated" })));

    let book = books::load_book(&api, "9787111").await.unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.category_id, Some(3));
    assert_eq!(api.calls()[0].path, "/searchbooks");
    assert_eq!(api.calls()[0].param("isbn"), Some("9787111"));

    let form = EditBookForm {
        title: "Dune".to_string(),
        author: Some("Frank Herbert".to_string()),
        publisher: None,
        publication_date: Some("1965-08-01".to_string()),
        category_id: Some("3".to_string()),
        total_copies: Some("5".to_string()),
        available_copies: None,
        status: "在馆".to_string(),
    };
    let message = books::edit_book(&api, "9787111", form).await.unwrap();

    assert_eq!(message, "updated");
    let call = &api.calls()[1];
    assert_eq!(call.method, Method::PUT);
    assert_eq!(call.path, "/editbook/9787111");
    let body = call.body.as_ref().unwrap();
    assert_eq!(body["total_copies"], 5);
    assert_eq!(body["publisher"], Value::Null);
    assert!(body.get("available_copies").is_none());
}

#[actix_web::test]
async fn unknown_book_is_not_found() {
    let api = TestApi::new().respond(Ok(json!({ "success": true, "results": [] })));

    let result = books::load_book(&api, "000").await;

    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[actix_web::test]
async fn user_edit_sends_password_only_when_given() {
    let api = TestApi::new()
        .respond(Ok(json!({
            "success": true,
            "user": { "id": 7, "username": "reader", "email": "r@school.edu", "role": "student" }
        })))
        .respond(Ok(json!({ "success": true })))
        .respond(Ok(json!({ "success": true })));

    let user = users::load_user(&api, 7).await.unwrap();
    assert_eq!(user.username, "reader");
    assert_eq!(api.calls()[0].path, "/api/admin/users/7");

    let form = |password: &str| EditUserForm {
        username: "reader".to_string(),
        email: "r@school.edu".to_string(),
        role: "teacher".to_string(),
        new_password: Some(password.to_string()),
    };
    users::edit_user(&api, 7, form("")).await.unwrap();
    users::edit_user(&api, 7, form("s3cret")).await.unwrap();

    let calls = api.calls();
    assert_eq!(calls[1].method, Method::PUT);
    assert_eq!(calls[1].path, "/api/admin/users/7");
    assert_eq!(
        calls[1].body,
        Some(json!({ "username": "reader", "email": "r@school.edu", "role": "teacher" }))
    );
    assert_eq!(calls[2].body.as_ref().unwrap()["newPassword"], "s3cret");
}

#[actix_web::test]
async fn missing_user_is_not_found() {
    let api = TestApi::new().respond(Err(ApiError::Http {
        status: 404,
        message: "User not found".to_string(),
    }));

    let result = users::load_user(&api, 70).await;

    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[actix_web::test]
async fn topic_edit_finds_topic_in_full_list() {
    let api = TestApi::new()
        .respond(Ok(json!({
            "success": true,
            "data": [{ "id": 1, "name": "News" }, { "id": 4, "name": "Events", "slug": "events" }]
        })))
        .respond(Ok(json!({ "success": true })));

    let topic = topics::load_topic(&api, 4).await.unwrap();
    assert_eq!(topic.name, "Events");
    assert_eq!(api.calls()[0].path, "/api/blog/topics");
    assert_eq!(api.calls()[0].param("limit"), Some("1000"));

    let form = TopicForm {
        name: "School events".to_string(),
        slug: Some(String::new()),
        description: Some("Fairs and visits".to_string()),
    };
    let message = topics::edit_topic(&api, 4, form).await.unwrap();

    assert_eq!(message, "Topic updated.");
    let call = &api.calls()[1];
    assert_eq!(call.method, Method::PUT);
    assert_eq!(call.path, "/api/admin/blog/topics/4");
    assert_eq!(
        call.body,
        Some(json!({ "name": "School events", "description": "Fairs and visits" }))
    );
}

#[actix_web::test]
async fn topic_missing_from_list_is_not_found() {
    let api = TestApi::new().respond(Ok(json!({ "success": true, "data": [] })));

    let result = topics::load_topic(&api, 9).await;

    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[actix_web::test]
async fn post_editor_preselects_topics_and_suggests_books() {
    let api = TestApi::new()
        .respond(Ok(json!({
            "success": true,
            "post": {
                "id": 3,
                "title": "Moon",
                "status": "pending_review",
                "topics": [{ "id": 2, "name": "Space" }]
            }
        })))
        .respond(Ok(json!({
            "success": true,
            "data": [{ "id": 2, "name": "Space" }, { "id": 5, "name": "Events" }]
        })))
        .respond(Ok(json!({
            "success": true,
            "books": [{ "isbn": "9787111", "title": "The Moon" }]
        })));

    let editor = posts::load_post_editor(&api, Some(3), Some(" moon ".to_string()))
        .await
        .unwrap();

    assert!(!editor.is_new);
    assert_eq!(editor.selected_topic_ids, vec![2]);
    assert_eq!(editor.topics.len(), 2);
    assert_eq!(editor.book_matches[0].isbn, "9787111");
    let calls = api.calls();
    assert_eq!(calls[0].path, "/api/blog/posts/3");
    assert_eq!(calls[1].path, "/api/blog/topics");
    assert_eq!(calls[2].path, "/api/blog/search-books");
    assert_eq!(calls[2].param("query"), Some("moon"));
    assert_eq!(calls[2].param("limit"), Some("5"));
}

#[actix_web::test]
async fn new_post_editor_skips_blank_book_lookup() {
    let api = TestApi::new().respond(Err(ApiError::Transport("down".to_string())));

    let editor = posts::load_post_editor(&api, None, Some("  ".to_string()))
        .await
        .unwrap();

    assert!(editor.is_new);
    assert_eq!(editor.post.status, "draft");
    assert!(editor.topics.is_empty());
    assert!(editor.book_search_error.is_none());
    assert_eq!(api.calls().len(), 1);
}

fn post_form(status: &str) -> PostForm {
    PostForm::parse(
        format!("title=Moon&content=Notes&topic_ids=5&topic_ids=2&status={status}&allow_comments=true")
            .as_bytes(),
    )
    .unwrap()
}

#[actix_web::test]
async fn admin_post_is_created_or_updated() {
    let api = TestApi::new()
        .respond(Ok(json!({ "success": true })))
        .respond(Ok(json!({ "success": true, "message": "saved" })));

    let created = posts::save_post(&api, None, post_form("published")).await.unwrap();
    let updated = posts::save_post(&api, Some(3), post_form("draft")).await.unwrap();

    assert_eq!(created, "Post created.");
    assert_eq!(updated, "saved");
    let calls = api.calls();
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].path, "/api/blog/posts");
    assert_eq!(
        calls[0].body,
        Some(json!({
            "title": "Moon",
            "content": "Notes",
            "excerpt": null,
            "book_isbn": null,
            "topic_ids": [2, 5],
            "status": "published",
            "visibility": "public",
            "allow_comments": true
        }))
    );
    assert_eq!(calls[1].method, Method::PUT);
    assert_eq!(calls[1].path, "/api/blog/posts/3");
    assert_eq!(calls[1].body.as_ref().unwrap()["status"], "draft");
}

#[actix_web::test]
async fn admin_post_with_unknown_status_is_not_sent() {
    let api = TestApi::new();

    let result = posts::save_post(&api, None, post_form("deleted")).await;

    assert!(matches!(result, Err(ServiceError::Form(_))));
    assert!(api.calls().is_empty());
}

#[actix_web::test]
async fn like_toggle_follows_current_state() {
    let api = TestApi::new()
        .respond(Ok(json!({ "success": true, "like_count": 4 })))
        .respond(Ok(json!({ "success": true })));

    assert_eq!(blog::toggle_like(&api, 8, false).await.unwrap(), Some(4));
    assert_eq!(blog::toggle_like(&api, 8, true).await.unwrap(), None);

    let calls = api.calls();
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].path, "/blog/posts/8/like");
    assert_eq!(calls[1].method, Method::DELETE);
    assert_eq!(calls[1].path, "/blog/posts/8/like");
}

#[actix_web::test]
async fn review_is_assumed_unless_setting_says_otherwise() {
    let api = TestApi::new()
        .respond(Ok(json!({ "success": true, "value": "false" })))
        .respond(Ok(json!({ "success": false, "message": "no such setting" })))
        .respond(Err(ApiError::Transport("down".to_string())));

    assert!(!blog::requires_review(&api).await);
    assert!(blog::requires_review(&api).await);
    assert!(blog::requires_review(&api).await);
    assert_eq!(
        api.calls()[0].path,
        "/settings/blog_post_requires_review"
    );
}

#[actix_web::test]
async fn reader_submission_status_follows_review_setting() {
    let api = TestApi::new()
        .respond(Ok(json!({ "success": true, "value": "true" })))
        .respond(Ok(json!({ "success": true })))
        .respond(Ok(json!({ "success": true, "value": "false" })))
        .respond(Ok(json!({ "success": true })));

    let reviewed = blog::submit_post(&api, post_form("")).await.unwrap();
    let direct = blog::submit_post(&api, post_form("")).await.unwrap();

    assert_eq!(reviewed, PostStatus::PendingReview);
    assert_eq!(direct, PostStatus::Published);
    let calls = api.calls();
    assert_eq!(calls[1].method, Method::POST);
    assert_eq!(calls[1].path, "/blog/posts");
    assert_eq!(calls[1].body.as_ref().unwrap()["status"], "pending_review");
    assert_eq!(calls[3].body.as_ref().unwrap()["status"], "published");
}

#[actix_web::test]
async fn reader_draft_skips_review_lookup() {
    let api = TestApi::new().respond(Ok(json!({ "success": true })));
    let mut form = post_form("");
    form.save_draft = Some("1".to_string());

    let status = blog::submit_post(&api, form).await.unwrap();

    assert_eq!(status, PostStatus::Draft);
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body.as_ref().unwrap()["status"], "draft");
}

#[actix_web::test]
async fn submit_page_uses_blog_lookups() {
    let api = TestApi::new()
        .respond(Err(ApiError::Transport("down".to_string())))
        .respond(Ok(json!({ "success": true, "data": [{ "id": 1, "name": "News" }] })))
        .respond(Ok(json!({ "success": false, "message": "login required" })));

    let data = blog::load_submit_page(&api, Some("dune".to_string())).await;

    assert!(data.requires_review);
    assert_eq!(data.editor.topics.len(), 1);
    assert_eq!(data.editor.book_search_error.as_deref(), Some("login required"));
    let calls = api.calls();
    assert_eq!(calls[1].path, "/blog/topics");
    assert_eq!(calls[2].path, "/blog/search-books");
}
