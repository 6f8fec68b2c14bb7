use serde::Serialize;

use crate::domain::settings::SiteSetting;

/// Data required to render the site settings form.
#[derive(Debug, Serialize)]
pub struct SettingsPageData {
    pub settings: Vec<SiteSetting>,
}

/// Per-key outcome of a settings save.
///
/// Every changed key is attempted; one failure does not stop the others.
#[derive(Debug, Default, PartialEq)]
pub struct SettingsSaveReport {
    pub saved: Vec<String>,
    /// `(key, error message)` of every update the backend refused.
    pub failed: Vec<(String, String)>,
}

impl SettingsSaveReport {
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.failed.len()
    }

    pub fn failed_keys(&self) -> Vec<&str> {
        self.failed.iter().map(|(key, _)| key.as_str()).collect()
    }
}
