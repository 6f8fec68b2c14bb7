use actix_web::http::header;
use actix_web::{HttpResponse, http::StatusCode};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::actions::ActionRegistry;
use crate::dto::list::ListPageData;
use crate::services::ServiceError;

pub mod blog;
pub mod books;
pub mod borrows;
pub mod main;
pub mod posts;
pub mod settings;
pub mod topics;
pub mod users;

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Flash messages as `(message, alert class)` pairs.
pub fn collect_alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context shared by every console page: alerts, sidebar and active entry.
pub fn base_context(
    alerts: Vec<(String, &'static str)>,
    actions: &ActionRegistry,
    current_page: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("sidebar", actions.sidebar());
    context.insert("current_page", current_page);
    context
}

/// Context of a list screen. A failed load adds an error alert.
pub fn list_context(
    flash_messages: &IncomingFlashMessages,
    actions: &ActionRegistry,
    current_page: &str,
    data: &ListPageData,
) -> Context {
    let mut alerts = collect_alerts(flash_messages);
    if let Some(message) = &data.view.alert {
        alerts.push((format!("Failed to load the list: {message}"), "danger"));
    }

    let mut context = base_context(alerts, actions, current_page);
    context.insert("list", data);
    context.insert("filters", data.state.filters());
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Renders the error page with `message`.
pub fn render_error(
    tera: &Tera,
    actions: &ActionRegistry,
    status: StatusCode,
    message: &str,
) -> HttpResponse {
    let mut context = base_context(Vec::new(), actions, "error");
    context.insert("message", message);
    render_with_status(tera, "error.html", &context, status)
}

/// Error page for a record that could not be loaded for display or editing.
pub fn render_load_error(
    tera: &Tera,
    actions: &ActionRegistry,
    err: ServiceError,
    subject: &str,
) -> HttpResponse {
    match err {
        ServiceError::NotFound => render_error(
            tera,
            actions,
            StatusCode::NOT_FOUND,
            &format!("{subject} not found."),
        ),
        err => {
            let message = format!("Failed to load the {}: {err}", subject.to_lowercase());
            log::error!("{message}");
            render_error(tera, actions, StatusCode::BAD_GATEWAY, &message)
        }
    }
}

/// Flashes the outcome of a form submission and picks the redirect target.
///
/// Success goes to `done`; any failure returns to `retry` with the message.
pub fn finish_submission(
    result: Result<String, ServiceError>,
    action: &str,
    done: &str,
    retry: &str,
) -> HttpResponse {
    match result {
        Ok(message) => {
            FlashMessage::success(message).send();
            redirect(done)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(retry)
        }
        Err(err) => {
            log::error!("Failed to {action}: {err}");
            FlashMessage::error(format!("Failed to {action}: {err}")).send();
            redirect(retry)
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
