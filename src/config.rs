//! Widget options.
//!
//! Every field has a default, so `{}` (or `null` from JavaScript) is a
//! valid configuration. Field names are camelCase to match the JS side.

use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::drag::DEFAULT_DRAG_THRESHOLD;
use crate::error::{DragTableError, Result};
use crate::sort::ComparePolicy;
use crate::types::SortState;

/// CSS class names the DOM view puts on headers and proxies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassNames {
    pub unsorted: String,
    pub ascending: String,
    pub descending: String,
    /// Every column proxy
    pub column: String,
    /// The proxy under the pointer
    pub dragging: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            unsorted: "unsort".to_string(),
            ascending: "up".to_string(),
            descending: "down".to_string(),
            column: "column".to_string(),
            dragging: "draggable".to_string(),
        }
    }
}

impl ClassNames {
    /// Class for a header in `state`
    pub fn for_state(&self, state: SortState) -> &str {
        match state {
            SortState::Unsorted => &self.unsorted,
            SortState::Ascending => &self.ascending,
            SortState::Descending => &self.descending,
        }
    }

    /// The three indicator classes, for clearing a header
    pub fn indicators(&self) -> [&str; 3] {
        [&self.unsorted, &self.ascending, &self.descending]
    }
}

/// Options for a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Pointer displacement in px that turns a press into a drag
    pub drag_threshold: f64,
    pub compare_policy: ComparePolicy,
    pub classes: ClassNames,
    pub log_level: LevelFilter,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            compare_policy: ComparePolicy::default(),
            classes: ClassNames::default(),
            log_level: LevelFilter::Warn,
        }
    }
}

impl TableConfig {
    /// Check values serde cannot.
    ///
    /// # Errors
    /// Returns [`DragTableError::Config`] for a negative or non-finite
    /// threshold or an empty class name.
    pub fn validate(&self) -> Result<()> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(DragTableError::Config(format!(
                "dragThreshold must be a non-negative number, got {}",
                self.drag_threshold
            )));
        }
        let classes = [
            ("unsorted", &self.classes.unsorted),
            ("ascending", &self.classes.ascending),
            ("descending", &self.classes.descending),
            ("column", &self.classes.column),
            ("dragging", &self.classes.dragging),
        ];
        for (name, value) in classes {
            if value.trim().is_empty() || value.contains(char::is_whitespace) {
                return Err(DragTableError::Config(format!(
                    "classes.{name} must be a single class name, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON options object
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read options from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Read options passed from JavaScript; `null`/`undefined` means defaults
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self> {
        if value.is_null() || value.is_undefined() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| DragTableError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(TableConfig::from_json("{}").unwrap(), TableConfig::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let config = TableConfig::from_json(
            r#"{
                "dragThreshold": 8,
                "comparePolicy": "numeric",
                "classes": { "ascending": "asc" },
                "logLevel": "debug"
            }"#,
        )
        .unwrap();
        assert_eq!(config.drag_threshold, 8.0);
        assert_eq!(config.compare_policy, ComparePolicy::Numeric);
        assert_eq!(config.classes.ascending, "asc");
        assert_eq!(config.classes.descending, "down");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = TableConfig::from_json(r#"{ "dragThreshold": -1 }"#).unwrap_err();
        assert!(matches!(err, DragTableError::Config(_)));
    }

    #[test]
    fn test_class_with_space_rejected() {
        let err = TableConfig::from_json(r#"{ "classes": { "column": "a b" } }"#).unwrap_err();
        assert!(err.to_string().contains("classes.column"));
    }

    #[test]
    fn test_unknown_policy_is_json_error() {
        let err = TableConfig::from_json(r#"{ "comparePolicy": "natural" }"#).unwrap_err();
        assert!(matches!(err, DragTableError::Json(_)));
    }

    #[test]
    fn test_class_for_state() {
        let classes = ClassNames::default();
        assert_eq!(classes.for_state(SortState::Unsorted), "unsort");
        assert_eq!(classes.for_state(SortState::Ascending), "up");
        assert_eq!(classes.for_state(SortState::Descending), "down");
    }
}
