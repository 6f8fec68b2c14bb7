use std::collections::BTreeMap;

use crate::forms::FormError;

/// Submitted site settings as `(key, value)` pairs ordered by key.
#[derive(Debug, Default)]
pub struct SettingsForm {
    pub values: Vec<(String, String)>,
}

impl SettingsForm {
    /// Parses an urlencoded body whose field names are setting keys.
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        let values = serde_html_form::from_bytes::<BTreeMap<String, String>>(body)
            .map_err(|err| FormError::Payload(err.to_string()))?;
        Ok(Self {
            values: values.into_iter().collect(),
        })
    }
}
