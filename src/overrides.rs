//! Sparse override configuration
//!
//! A per-invocation snapshot of product overrides: a two-level map from
//! feature group to setting to value. Presence of an entry means "replace
//! the declared default"; absence means "inherit it". An explicitly empty
//! value (false, "", []) is present and therefore overrides.
//!
//! Overrides are immutable once constructed. They are built either through
//! [`OverrideConfigBuilder`] or by deserializing JSON/TOML produced by a
//! configuring process.

use crate::schema::SettingValue;
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An immutable sparse set of setting overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideConfig {
    groups: IndexMap<String, IndexMap<String, SettingValue>>,
}

impl OverrideConfig {
    /// Create an empty override set (everything inherits defaults)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building an override set
    pub fn builder() -> OverrideConfigBuilder {
        OverrideConfigBuilder::new()
    }

    /// Get the override for a setting, if one was supplied
    pub fn get(&self, group: &str, setting: &str) -> Option<&SettingValue> {
        self.groups.get(group).and_then(|g| g.get(setting))
    }

    /// Check whether any group supplies an override
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|g| g.is_empty())
    }

    /// Total number of overridden settings
    pub fn len(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    /// Iterate overridden groups and their settings
    pub fn groups(&self) -> impl Iterator<Item = (&str, &IndexMap<String, SettingValue>)> {
        self.groups.iter().map(|(name, settings)| (name.as_str(), settings))
    }

    /// Deserialize an override set from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this override set to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize an override set from a TOML document
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize this override set to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

/// Builder for [`OverrideConfig`]
#[derive(Debug, Clone, Default)]
pub struct OverrideConfigBuilder {
    groups: IndexMap<String, IndexMap<String, SettingValue>>,
}

impl OverrideConfigBuilder {
    /// Create a new override builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply an override value for a setting
    pub fn set(mut self, group: &str, setting: &str, value: impl Into<SettingValue>) -> Self {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(setting.to_string(), value.into());
        self
    }

    /// Supply a string override
    pub fn string(self, group: &str, setting: &str, value: &str) -> Self {
        self.set(group, setting, value)
    }

    /// Supply a boolean override
    pub fn boolean(self, group: &str, setting: &str, value: bool) -> Self {
        self.set(group, setting, value)
    }

    /// Supply a string-list override
    pub fn string_list(self, group: &str, setting: &str, values: &[&str]) -> Self {
        self.set(group, setting, values)
    }

    /// Finish building the immutable override snapshot
    pub fn build(self) -> OverrideConfig {
        OverrideConfig {
            groups: self.groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_and_get() {
        let overrides = OverrideConfig::builder()
            .string_list("vendor-init-lib", "whole-static-libs", &["libfoo", "libbar"])
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", true)
            .build();

        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides.get("vendor-init-lib", "whole-static-libs"),
            Some(&SettingValue::StringList(vec![
                "libfoo".to_string(),
                "libbar".to_string()
            ]))
        );
        assert_eq!(
            overrides.get("prebuilt-dynamic-partitions", "cflags-enabled"),
            Some(&SettingValue::Bool(true))
        );
        assert_eq!(overrides.get("vendor-init-lib", "cflags"), None);
    }

    #[test]
    fn test_empty_overrides() {
        let overrides = OverrideConfig::empty();
        assert!(overrides.is_empty());
        assert_eq!(overrides.len(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let overrides = OverrideConfig::builder()
            .string_list("vendor-init-lib", "whole-static-libs", &["libfoo"])
            .string("surfaceflinger-fod-lib", "library", "libfod")
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", false)
            .build();

        let json = overrides.to_json().unwrap();
        let restored = OverrideConfig::from_json(&json).unwrap();
        assert_eq!(overrides, restored);
    }

    #[test]
    fn test_json_shape() {
        let overrides = OverrideConfig::builder()
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", true)
            .build();

        let json = overrides.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"prebuilt-dynamic-partitions":{"cflags-enabled":true}}"#
        );
    }

    #[test]
    fn test_explicit_empty_list_survives_round_trip() {
        let overrides = OverrideConfig::builder()
            .string_list("vendor-init-lib", "whole-static-libs", &[])
            .build();

        let json = overrides.to_json().unwrap();
        let restored = OverrideConfig::from_json(&json).unwrap();

        // An explicitly empty list is a present override, not an absent one.
        assert_eq!(
            restored.get("vendor-init-lib", "whole-static-libs"),
            Some(&SettingValue::StringList(vec![]))
        );
        assert!(!restored.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let overrides = OverrideConfig::builder()
            .string_list("shim-libs", "cppflags", &["-DSHIM"])
            .boolean("prebuilt-dynamic-partitions", "cflags-enabled", true)
            .build();

        let toml_str = overrides.to_toml().unwrap();
        let restored = OverrideConfig::from_toml(&toml_str).unwrap();
        assert_eq!(overrides, restored);
    }

    #[test]
    fn test_from_json_parses_external_document() {
        let json = r#"{
            "vendor-init-lib": {"whole-static-libs": ["libinit_vendor"]},
            "prebuilt-dynamic-partitions": {"cflags-enabled": true}
        }"#;

        let overrides = OverrideConfig::from_json(json).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides.get("prebuilt-dynamic-partitions", "cflags-enabled"),
            Some(&SettingValue::Bool(true))
        );
    }
}
