use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::actions::ActionRegistry;
use crate::api::Backends;
use crate::dto::settings::SettingsSaveReport;
use crate::forms::settings::SettingsForm;
use crate::routes::{base_context, collect_alerts, redirect, render_template};
use crate::services::{ServiceError, settings as settings_service};

#[get("/settings")]
pub async fn show_settings(
    backends: web::Data<Backends>,
    actions: web::Data<ActionRegistry>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut alerts = collect_alerts(&flash_messages);
    let settings = match settings_service::load_settings(&backends.library).await {
        Ok(data) => data.settings,
        Err(err) => {
            log::error!("Failed to load site settings: {err}");
            alerts.push((format!("Failed to load site settings: {err}"), "danger"));
            Vec::new()
        }
    };

    let mut context = base_context(alerts, &actions, "settings");
    context.insert("settings", &settings);
    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings")]
pub async fn save_settings(backends: web::Data<Backends>, form: web::Bytes) -> impl Responder {
    let form = match SettingsForm::parse(form.as_ref()) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse settings form: {err}");
            FlashMessage::error("Could not read the submitted settings.").send();
            return redirect("/settings");
        }
    };

    match settings_service::save_settings(&backends.library, form).await {
        Ok(report) => flash_save_report(&report),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to save site settings: {err}");
            FlashMessage::error(format!("Failed to save settings: {err}")).send();
        }
    }
    redirect("/settings")
}

fn flash_save_report(report: &SettingsSaveReport) {
    let attempted = report.attempted();
    if attempted == 0 {
        FlashMessage::info("No settings were changed.").send();
    } else if report.failed.is_empty() {
        FlashMessage::success(format!("Saved {attempted} setting(s).")).send();
    } else if report.saved.is_empty() {
        FlashMessage::error(format!(
            "Failed to save settings: {}.",
            report.failed_keys().join(", ")
        ))
        .send();
    } else {
        FlashMessage::warning(format!(
            "Saved {} of {attempted} setting(s). Not saved: {}.",
            report.saved.len(),
            report.failed_keys().join(", ")
        ))
        .send();
    }
}
