use std::time::Duration;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::models::config::ServerConfig;

pub mod actions;
pub mod api;
pub mod controller;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod screens;
pub mod services;

/// Registers every console route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use crate::routes::{blog, books, borrows, main, posts, settings, topics, users};

    cfg.service(main::show_dashboard)
        .service(main::dispatch_action)
        .service(books::show_books)
        .service(books::new_book)
        .service(books::add_book)
        .service(books::edit_book_form)
        .service(books::edit_book)
        .service(books::delete_book)
        .service(users::show_users)
        .service(users::new_user)
        .service(users::add_user)
        .service(users::edit_user_form)
        .service(users::edit_user)
        .service(users::delete_user)
        .service(borrows::show_borrows)
        .service(borrows::new_borrow)
        .service(borrows::borrow_book)
        .service(borrows::new_return)
        .service(borrows::return_book)
        .service(posts::show_posts)
        .service(posts::new_post)
        .service(posts::create_post)
        .service(posts::edit_post_form)
        .service(posts::edit_post)
        .service(posts::change_post_status)
        .service(posts::delete_post)
        .service(topics::show_topics)
        .service(topics::add_topic)
        .service(topics::edit_topic_form)
        .service(topics::edit_topic)
        .service(topics::delete_topic)
        .service(settings::show_settings)
        .service(settings::save_settings)
        .service(blog::show_blog)
        // Registered ahead of `/blog/{post_id}`, which would otherwise claim it.
        .service(blog::new_submission)
        .service(blog::submit_post)
        .service(blog::show_post)
        .service(blog::toggle_like);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let timeout = Duration::from_secs(server_config.request_timeout_secs);
    let backends = Backends::new(
        &server_config.api_base_url,
        &server_config.blog_api_base_url,
        timeout,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build API clients: {e}")))?;

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let actions = web::Data::new(ActionRegistry::console());

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(backends.clone()))
            .app_data(actions.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
