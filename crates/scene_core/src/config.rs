//! Scene configuration.

/// Configuration for a [`SceneManager`](crate::SceneManager).
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Human-readable scene name, attached to every log event the scene emits.
    pub name: String,
    /// Log how many objects are still alive when the scene is dropped.
    pub report_live_objects_on_drop: bool,
}

impl SceneConfig {
    /// Create a config with the given scene name and default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Enable or disable the live-object report emitted when the scene drops.
    #[must_use]
    pub fn with_report_live_objects_on_drop(mut self, report: bool) -> Self {
        self.report_live_objects_on_drop = report;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "scene".to_string(),
            report_live_objects_on_drop: true,
        }
    }
}
