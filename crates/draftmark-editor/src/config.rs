//! Editor configuration.

use draftmark_model::DEFAULT_MAX_HISTORY;

/// Key the document snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "editorContent";

/// Configuration for an editor surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Key-value store key for the saved snapshot.
    pub storage_key: String,
    /// Hint shown while the document is empty.
    pub placeholder: String,
    /// Heading shown above the editing surface.
    pub title: String,
    /// Maximum number of undo entries.
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            placeholder: "Type text. Use '#' for heading, '*' for bold, '**' for red text, '***' for underline"
                .to_string(),
            title: "Draftmark".to_string(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// Builder for editor configuration.
pub struct EditorConfigBuilder {
    config: EditorConfig,
}

impl EditorConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EditorConfig::default(),
        }
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn max_history(mut self, max: usize) -> Self {
        self.config.max_history = max;
        self
    }

    pub fn build(self) -> EditorConfig {
        self.config
    }
}

impl Default for EditorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.storage_key, "editorContent");
        assert_eq!(config.max_history, 100);
        assert!(config.placeholder.contains("'#' for heading"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = EditorConfigBuilder::new()
            .storage_key("notes")
            .title("Notes")
            .max_history(5)
            .build();
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.title, "Notes");
        assert_eq!(config.max_history, 5);
    }
}
