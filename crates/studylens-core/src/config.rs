//! Configuration for field reconciliation

use serde::{Deserialize, Serialize};
use studylens_text::{HighlightStyle, Highlighter};

/// Reconciler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReconcilerConfig {
    /// Fall back to regex extraction over the summary text
    pub text_fallback: bool,

    /// Markup used when highlighting amounts in summaries
    pub highlight: HighlightStyle,
}

impl ReconcilerConfig {
    pub fn new() -> Self {
        Self {
            text_fallback: true,
            highlight: HighlightStyle::default(),
        }
    }

    pub fn highlighter(&self) -> Highlighter {
        Highlighter::new(self.highlight.clone())
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ReconcilerConfig::new();
        assert!(config.text_fallback);
        assert_eq!(config.highlight, HighlightStyle::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ReconcilerConfig = serde_json::from_str(r#"{"textFallback": false}"#).unwrap();
        assert!(!config.text_fallback);
        assert_eq!(config.highlight.close, "</span>");
    }

    #[test]
    fn test_custom_highlight_style() {
        let config: ReconcilerConfig =
            serde_json::from_str(r#"{"highlight": {"open": "**", "close": "**"}}"#).unwrap();
        assert_eq!(config.highlighter().highlight("fee $100"), "fee **$100**");
    }
}
