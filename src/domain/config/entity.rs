//! User-facing application configuration stored under the `config` key

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_THEME: &str = "auto";
pub const DEFAULT_DISPLAY_MODE: &str = "fullscreen";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Application configuration shared with the UI surfaces
///
/// Fields the core does not know about are preserved verbatim so that a
/// write from the core never drops settings owned by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfiguration {
    /// Last explicitly chosen profile; empty when nothing was chosen
    #[serde(default, deserialize_with = "null_as_empty")]
    selected_model_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_detect_terms: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_welcome_message: Option<bool>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Stored `null` reads as "nothing selected"
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AppConfiguration {
    /// Configuration written on first start
    pub fn with_defaults() -> Self {
        Self {
            selected_model_id: String::new(),
            theme: Some(DEFAULT_THEME.to_string()),
            language: Some(DEFAULT_LANGUAGE.to_string()),
            display_mode: Some(DEFAULT_DISPLAY_MODE.to_string()),
            auto_detect_terms: Some(true),
            show_welcome_message: Some(true),
            extra: Map::new(),
        }
    }

    /// The selected profile id, if one was chosen
    pub fn selected_model_id(&self) -> Option<&str> {
        let id = self.selected_model_id.trim();
        (!id.is_empty()).then_some(id)
    }

    pub fn set_selected_model_id(&mut self, id: impl Into<String>) {
        self.selected_model_id = id.into();
    }

    pub fn clear_selected_model_id(&mut self) {
        self.selected_model_id.clear();
    }

    /// Fill presentation settings an older configuration may lack.
    /// Returns true when anything changed.
    pub fn fill_missing(&mut self) -> bool {
        let mut changed = false;

        if self.display_mode.is_none() {
            self.display_mode = Some(DEFAULT_DISPLAY_MODE.to_string());
            changed = true;
        }

        if self.theme.is_none() {
            self.theme = Some(DEFAULT_THEME.to_string());
            changed = true;
        }

        if self.language.is_none() {
            self.language = Some(DEFAULT_LANGUAGE.to_string());
            changed = true;
        }

        changed
    }
}
