//! Editing-surface tunables.

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the editing surface.
///
/// Every field has a default, so a partial JSON object (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Smallest width/height a node may be resized to, in px. Default: **5**.
    pub min_node_size: f32,

    /// A rubber band no larger than this on both axes counts as a plain click
    /// on empty canvas. Default: **2**.
    pub rubber_band_threshold: f32,

    /// Side length of a transformer anchor square. Default: **8**.
    pub handle_size: f32,

    /// Font size for text nodes placed by the text tool. Default: **20**.
    pub default_font_size: f32,

    /// Content for text nodes placed by the text tool.
    pub default_text: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_node_size: 5.0,
            rubber_band_threshold: 2.0,
            handle_size: 8.0,
            default_font_size: 20.0,
            default_text: "Text".to_string(),
        }
    }
}

impl BoardConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`BoardError::Config`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(BoardError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BoardConfig::from_json(r#"{ "minNodeSize": 12 }"#).unwrap();
        assert_eq!(config.min_node_size, 12.0);
        assert_eq!(config.rubber_band_threshold, 2.0);
        assert_eq!(config.default_text, "Text");
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = BoardConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }
}
