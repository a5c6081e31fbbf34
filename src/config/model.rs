use std::path::Path;

use anyhow::Context as _;

use crate::config::color::ColorSpec;
use crate::foundation::error::{PlacardError, PlacardResult};

/// Number of conference panels on every poster.
pub const PANEL_COUNT: usize = 3;

/// The event description record driving one poster/banner pair.
///
/// A config is a pure data model loaded once (see [`PosterConfig::from_path`])
/// and treated as read-only input by both template variants.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PosterConfig {
    /// Poster canvas width override in pixels. The banner variant ignores it.
    #[serde(default)]
    pub width: Option<u32>,
    /// Poster canvas height override in pixels. The banner variant ignores it.
    #[serde(default)]
    pub height: Option<u32>,
    /// Font family name, resolved against the system font collection.
    #[serde(default = "default_font")]
    pub font: String,
    /// Display string for the event date. May be empty.
    #[serde(default)]
    pub date: String,
    /// Display string for the venue. May be empty.
    #[serde(default)]
    pub location: String,
    /// The three sub-events, in top-to-bottom panel order.
    pub conferences: Vec<PanelSpec>,
}

/// One conference panel: its announcement text, an optional backdrop image
/// and an optional overlay color.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PanelSpec {
    /// Multi-line announcement text. Line breaks separate layout lines.
    /// Required for rendering; validated by [`PosterConfig::validate`].
    #[serde(default)]
    pub text: Option<String>,
    /// Store-relative path to a backdrop bitmap.
    #[serde(default)]
    pub image: Option<String>,
    /// Overlay color; white with the variant's context alpha when absent.
    #[serde(default)]
    pub color: Option<ColorSpec>,
}

impl PanelSpec {
    /// The panel's announcement text, upper-cased for layout.
    ///
    /// Only valid after [`PosterConfig::validate`]; absent text is a
    /// validation error, not a layout concern.
    pub fn display_text(&self) -> PlacardResult<String> {
        self.text
            .as_deref()
            .map(str::to_uppercase)
            .ok_or_else(|| PlacardError::validation("panel text missing after validation"))
    }
}

fn default_font() -> String {
    "sans-serif".to_string()
}

impl PosterConfig {
    /// Load and validate a config from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> PlacardResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the structural invariants every render relies on: exactly
    /// [`PANEL_COUNT`] panels, each with announcement text.
    ///
    /// Runs before any layout so a defective record aborts the render whole
    /// instead of failing halfway through a composed canvas.
    pub fn validate(&self) -> PlacardResult<()> {
        if self.conferences.len() != PANEL_COUNT {
            return Err(PlacardError::validation(format!(
                "expected exactly {PANEL_COUNT} conferences, got {}",
                self.conferences.len()
            )));
        }
        for (i, panel) in self.conferences.iter().enumerate() {
            if panel.text.is_none() {
                return Err(PlacardError::MissingPanelText(i));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> serde_json::Value {
        serde_json::json!({
            "conferences": [
                { "text": "Rust for robots" },
                { "text": "Lockpicking 101\nhands-on" },
                { "text": "Mesh networks" },
            ]
        })
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config: PosterConfig = serde_json::from_value(minimal_json()).unwrap();
        config.validate().unwrap();

        assert_eq!(config.width, None);
        assert_eq!(config.height, None);
        assert_eq!(config.font, "sans-serif");
        assert_eq!(config.date, "");
        assert_eq!(config.location, "");
        assert!(config.conferences[0].image.is_none());
        assert!(config.conferences[0].color.is_none());
    }

    #[test]
    fn validate_rejects_wrong_panel_count() {
        let mut v = minimal_json();
        v["conferences"].as_array_mut().unwrap().pop();
        let config: PosterConfig = serde_json::from_value(v).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PlacardError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_missing_panel_text() {
        let mut v = minimal_json();
        v["conferences"][1] = serde_json::json!({ "image": "only.png" });
        let config: PosterConfig = serde_json::from_value(v).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PlacardError::MissingPanelText(1))
        ));
    }

    #[test]
    fn display_text_upper_cases_lines() {
        let panel = PanelSpec {
            text: Some("embedded\nrust".to_string()),
            ..PanelSpec::default()
        };
        assert_eq!(panel.display_text().unwrap(), "EMBEDDED\nRUST");
    }

    #[test]
    fn color_field_accepts_hex_and_arrays() {
        let v = serde_json::json!({
            "conferences": [
                { "text": "a", "color": "#336699" },
                { "text": "b", "color": [0.1, 0.2, 0.3] },
                { "text": "c", "color": [0.1, 0.2, 0.3, 0.9] },
            ]
        });
        let config: PosterConfig = serde_json::from_value(v).unwrap();
        assert!(matches!(
            config.conferences[0].color,
            Some(ColorSpec::Hex(_))
        ));
        assert!(matches!(
            config.conferences[1].color,
            Some(ColorSpec::Components(_))
        ));
    }
}
