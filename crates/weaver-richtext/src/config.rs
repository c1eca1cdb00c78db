//! Construction-time editor configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Line height assumed until the runtime reports its own.
pub const DEFAULT_LINE_HEIGHT: u32 = 28;

/// URL prefix the runtime navigates to when its command queue has entries.
pub const DEFAULT_CALLBACK_SCHEME: &str = "re-callback://";

/// DOM id of the editable element inside the runtime's page.
pub const DEFAULT_EDITOR_ELEMENT_ID: &str = "editor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Line height in px, used before load and when the runtime can't say.
    pub default_line_height: u32,
    /// Whether the content starts out editable.
    pub editable: bool,
    /// Placeholder shown while the document is empty.
    pub placeholder: String,
    /// HTML loaded into the document once the runtime is ready.
    pub html: String,
    pub callback_scheme: String,
    pub editor_element_id: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_line_height: DEFAULT_LINE_HEIGHT,
            editable: true,
            placeholder: String::new(),
            html: String::new(),
            callback_scheme: DEFAULT_CALLBACK_SCHEME.to_owned(),
            editor_element_id: DEFAULT_EDITOR_ELEMENT_ID.to_owned(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_line_height == 0 {
            return Err(ConfigError::Invalid {
                field: "default_line_height",
                reason: "must be greater than zero",
            });
        }
        if self.callback_scheme.is_empty() {
            return Err(ConfigError::Invalid {
                field: "callback_scheme",
                reason: "must not be empty",
            });
        }
        if self.editor_element_id.is_empty() {
            return Err(ConfigError::Invalid {
                field: "editor_element_id",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_default_line_height(mut self, px: u32) -> Self {
        self.default_line_height = px;
        self
    }
}
