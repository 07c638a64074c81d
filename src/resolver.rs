//! Override resolution
//!
//! Merges a sparse [`OverrideConfig`] onto a [`VariableSchema`]'s declared
//! defaults, producing a total [`ResolvedConfig`]: exactly one concrete
//! value for every declared setting, override winning when present.
//!
//! Resolution is strict: an override naming a group or setting absent from
//! the schema, or carrying a value of the wrong kind, fails the whole
//! invocation and produces nothing. It is also pure: equal schema and
//! overrides yield an identical result, so build caching may key on
//! override content.

use crate::overrides::OverrideConfig;
use crate::schema::{SettingKind, SettingValue, VariableSchema};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A fully-resolved configuration: every declared setting has a value
///
/// Groups and settings iterate in schema declaration order. The resolved
/// form serializes, so one process may resolve and another emit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    groups: IndexMap<String, IndexMap<String, SettingValue>>,
}

impl ResolvedConfig {
    /// Get the resolved value for a setting
    pub fn get(&self, group: &str, setting: &str) -> Result<&SettingValue> {
        let group_entry = self
            .groups
            .get(group)
            .ok_or_else(|| Error::UnknownGroup(group.to_string()))?;
        group_entry.get(setting).ok_or_else(|| Error::UnknownSetting {
            group: group.to_string(),
            setting: setting.to_string(),
        })
    }

    /// Get a resolved string value
    pub fn string(&self, group: &str, setting: &str) -> Result<&str> {
        match self.get(group, setting)? {
            SettingValue::String(s) => Ok(s),
            other => Err(self.kind_mismatch(group, setting, SettingKind::String, other)),
        }
    }

    /// Get a resolved boolean value
    pub fn boolean(&self, group: &str, setting: &str) -> Result<bool> {
        match self.get(group, setting)? {
            SettingValue::Bool(b) => Ok(*b),
            other => Err(self.kind_mismatch(group, setting, SettingKind::Bool, other)),
        }
    }

    /// Get a resolved string-list value
    pub fn string_list(&self, group: &str, setting: &str) -> Result<&[String]> {
        match self.get(group, setting)? {
            SettingValue::StringList(items) => Ok(items),
            other => Err(self.kind_mismatch(group, setting, SettingKind::StringList, other)),
        }
    }

    /// Iterate resolved groups and their settings in declaration order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &IndexMap<String, SettingValue>)> {
        self.groups.iter().map(|(name, settings)| (name.as_str(), settings))
    }

    /// Total number of resolved settings
    pub fn len(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    /// Check whether the resolved configuration is empty
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Deserialize a resolved configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this resolved configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn kind_mismatch(
        &self,
        group: &str,
        setting: &str,
        expected: SettingKind,
        actual: &SettingValue,
    ) -> Error {
        Error::KindMismatch {
            group: group.to_string(),
            setting: setting.to_string(),
            expected,
            actual: actual.kind(),
        }
    }
}

/// Merges sparse overrides onto schema defaults
pub struct Resolver<'a> {
    schema: &'a VariableSchema,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a schema
    pub fn new(schema: &'a VariableSchema) -> Self {
        Self { schema }
    }

    /// Resolve an override set into a total configuration
    ///
    /// Every override key must name a declared setting and carry a value of
    /// the declared kind; otherwise the whole invocation fails and no
    /// configuration is produced. Settings without an override take their
    /// declared default. Output ordering follows schema declaration order
    /// regardless of override ordering.
    pub fn resolve(&self, overrides: &OverrideConfig) -> Result<ResolvedConfig> {
        self.check_overrides(overrides)?;

        let mut groups = IndexMap::new();
        for group in self.schema.groups() {
            let mut settings = IndexMap::new();
            for setting in group.settings() {
                let value = overrides
                    .get(&group.name, &setting.name)
                    .cloned()
                    .unwrap_or_else(|| setting.default.clone());
                settings.insert(setting.name.clone(), value);
            }
            groups.insert(group.name.clone(), settings);
        }

        debug!(
            "resolved {} settings across {} groups ({} overridden)",
            self.schema.setting_count(),
            self.schema.len(),
            overrides.len()
        );

        Ok(ResolvedConfig { groups })
    }

    /// Reject overrides naming unknown settings or carrying mismatched kinds
    fn check_overrides(&self, overrides: &OverrideConfig) -> Result<()> {
        for (group_name, settings) in overrides.groups() {
            let group = self
                .schema
                .group(group_name)
                .ok_or_else(|| Error::UnknownGroup(group_name.to_string()))?;
            for (setting_name, value) in settings {
                let setting =
                    group.get(setting_name).ok_or_else(|| Error::UnknownSetting {
                        group: group_name.to_string(),
                        setting: setting_name.to_string(),
                    })?;
                if value.kind() != setting.kind {
                    return Err(Error::KindMismatch {
                        group: group_name.to_string(),
                        setting: setting_name.to_string(),
                        expected: setting.kind,
                        actual: value.kind(),
                    });
                }
            }
        }
        Ok(())
    }
}
