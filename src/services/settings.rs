//! Site settings editing.

use reqwest::Method;
use serde_json::json;

use crate::api::{LibraryApi, decode_field, decode_message};
use crate::domain::settings::SiteSetting;
use crate::dto::settings::{SettingsPageData, SettingsSaveReport};
use crate::forms::settings::SettingsForm;
use crate::services::{ServiceError, ServiceResult};

pub const SETTINGS_ENDPOINT: &str = "/api/admin/settings";

pub async fn load_settings<A: LibraryApi>(api: &A) -> ServiceResult<SettingsPageData> {
    let value = api.get(SETTINGS_ENDPOINT, &[]).await?;
    let settings = decode_field::<Vec<SiteSetting>>(value, "settings")?;
    Ok(SettingsPageData { settings })
}

/// Sends every setting whose submitted value differs from the stored one.
///
/// JSON settings are checked before anything is sent, so an invalid value
/// leaves all settings untouched. Each update carries the stored description
/// along with the new value. A refused update is recorded in the report and
/// the remaining keys are still sent.
pub async fn save_settings<A: LibraryApi>(
    api: &A,
    form: SettingsForm,
) -> ServiceResult<SettingsSaveReport> {
    let current = load_settings(api).await?.settings;

    let mut changes = Vec::new();
    for (key, value) in form.values {
        let Some(setting) = current.iter().find(|setting| setting.setting_key == key) else {
            log::warn!("Ignoring unknown setting `{key}`");
            continue;
        };
        if setting.setting_value == value {
            continue;
        }
        if setting.is_json() && serde_json::from_str::<serde_json::Value>(&value).is_err() {
            return Err(ServiceError::Form(format!(
                "The value of `{key}` is not valid JSON."
            )));
        }
        changes.push((setting, value));
    }

    let mut report = SettingsSaveReport::default();
    for (setting, value) in changes {
        let key = setting.setting_key.clone();
        match update_setting(api, setting, value).await {
            Ok(()) => report.saved.push(key),
            Err(err) => {
                log::error!("Failed to save setting `{key}`: {err}");
                report.failed.push((key, err.to_string()));
            }
        }
    }

    Ok(report)
}

async fn update_setting<A: LibraryApi>(
    api: &A,
    setting: &SiteSetting,
    value: String,
) -> ServiceResult<()> {
    let body = json!({ "value": value, "description": setting.description });
    let response = api
        .send(
            Method::PUT,
            &format!("{SETTINGS_ENDPOINT}/{}", setting.setting_key),
            Some(body),
        )
        .await?;
    decode_message(response, "Setting saved.")?;
    Ok(())
}
