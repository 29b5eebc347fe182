use serde::{Deserialize, Serialize};

use crate::shortcut::{parse_chord, Button, DEFAULT_CHORD};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Button chord toggling the overlay, e.g. "QuickAccess+Select".
    /// If `None`, the default chord is used.
    pub shortcut: Option<String>,
    /// Overlay opacity in `[0, 1]`. Defaults to fully opaque.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shortcut: None,
            opacity: 1.0,
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn chord(&self) -> Vec<Button> {
        if let Some(shortcut) = &self.shortcut {
            match parse_chord(shortcut) {
                Some(buttons) => return buttons,
                None => {
                    tracing::warn!(
                        "provided shortcut string '{}' is invalid; using default QuickAccess+Select",
                        shortcut
                    );
                }
            }
        }
        DEFAULT_CHORD.to_vec()
    }
}
