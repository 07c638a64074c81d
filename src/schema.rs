//! Product variable schema
//!
//! Declares the closed set of feature groups and their typed settings:
//! - Setting kinds (string, bool, string list) with declared defaults
//! - Action channels routing settings into compiler flags or link libraries
//! - Declaration-order iteration for deterministic downstream output
//!
//! The schema is constructed once at startup, treated as read-only
//! afterwards, and shared by reference with the resolver and emitter.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The type of a configurable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKind {
    /// A single string value
    String,
    /// A boolean toggle
    Bool,
    /// An ordered list of strings
    StringList,
}

impl std::fmt::Display for SettingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingKind::String => write!(f, "string"),
            SettingKind::Bool => write!(f, "bool"),
            SettingKind::StringList => write!(f, "string-list"),
        }
    }
}

/// A concrete value for a setting
///
/// Serialized untagged so overrides read naturally from JSON and TOML:
/// `true`, `"libfoo"`, `["libfoo", "libbar"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// A boolean toggle value
    Bool(bool),
    /// A single string value
    String(String),
    /// An ordered list of strings
    StringList(Vec<String>),
}

impl SettingValue {
    /// The kind this value belongs to
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::String(_) => SettingKind::String,
            SettingValue::StringList(_) => SettingKind::StringList,
        }
    }

    /// The zero value for a kind (false / empty string / empty list)
    pub fn zero(kind: SettingKind) -> Self {
        match kind {
            SettingKind::String => SettingValue::String(String::new()),
            SettingKind::Bool => SettingValue::Bool(false),
            SettingKind::StringList => SettingValue::StringList(Vec::new()),
        }
    }

    /// Check whether this is the zero value for its kind
    pub fn is_zero(&self) -> bool {
        match self {
            SettingValue::Bool(b) => !b,
            SettingValue::String(s) => s.is_empty(),
            SettingValue::StringList(items) => items.is_empty(),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::String(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::String(v)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(v: Vec<String>) -> Self {
        SettingValue::StringList(v)
    }
}

impl From<&[&str]> for SettingValue {
    fn from(v: &[&str]) -> Self {
        SettingValue::StringList(v.iter().map(|s| s.to_string()).collect())
    }
}

/// The build action stream a setting feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// The setting contributes nothing to emitted actions
    None,
    /// The setting contributes compiler flags
    Flags,
    /// The setting contributes library references
    Libraries,
}

impl Default for Channel {
    fn default() -> Self {
        Channel::None
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::None => write!(f, "none"),
            Channel::Flags => write!(f, "flags"),
            Channel::Libraries => write!(f, "libraries"),
        }
    }
}

/// A single configurable setting within a feature group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Setting name, unique within its group
    pub name: String,
    /// Declared kind
    pub kind: SettingKind,
    /// Declared default value, always matching `kind`
    pub default: SettingValue,
    /// Action channel this setting feeds
    #[serde(default)]
    pub channel: Channel,
    /// Emission literals: the strings a true boolean emits, or `%s`
    /// templates applied to a string setting's value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub literals: Vec<String>,
}

impl Setting {
    /// Create a string setting
    pub fn string(name: &str, default: &str, channel: Channel) -> Self {
        Self {
            name: name.to_string(),
            kind: SettingKind::String,
            default: SettingValue::String(default.to_string()),
            channel,
            literals: Vec::new(),
        }
    }

    /// Create a boolean setting with the literals emitted when it is true
    pub fn boolean(name: &str, default: bool, channel: Channel, literals: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: SettingKind::Bool,
            default: SettingValue::Bool(default),
            channel,
            literals: literals.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a string-list setting
    pub fn string_list(name: &str, default: &[&str], channel: Channel) -> Self {
        Self {
            name: name.to_string(),
            kind: SettingKind::StringList,
            default: SettingValue::StringList(
                default.iter().map(|s| s.to_string()).collect(),
            ),
            channel,
            literals: Vec::new(),
        }
    }

    /// Attach emission literals (`%s` is replaced by a string setting's value)
    pub fn with_literals(mut self, literals: &[&str]) -> Self {
        self.literals = literals.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// A named cluster of related settings controlling one optional build behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureGroup {
    /// Unique group identifier (e.g. "vendor-init-lib")
    pub name: String,
    /// Settings owned by this group, in declaration order
    settings: IndexMap<String, Setting>,
}

impl FeatureGroup {
    /// Create an empty feature group
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            settings: IndexMap::new(),
        }
    }

    /// Look up a setting by name
    pub fn get(&self, setting: &str) -> Option<&Setting> {
        self.settings.get(setting)
    }

    /// Iterate settings in declaration order
    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    /// Number of settings in this group
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Check whether the group has no settings
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

/// The closed set of feature groups and their settings
///
/// Groups and settings iterate in declaration order, which downstream
/// resolution and emission rely on for deterministic output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableSchema {
    groups: IndexMap<String, FeatureGroup>,
}

impl VariableSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a schema fluently
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Declare an empty feature group
    pub fn add_group(&mut self, name: &str) -> Result<()> {
        if self.groups.contains_key(name) {
            return Err(Error::DuplicateGroup(name.to_string()));
        }
        self.groups.insert(name.to_string(), FeatureGroup::new(name));
        Ok(())
    }

    /// Register a setting under a feature group
    ///
    /// The group is created if it does not exist yet. Fails if the setting
    /// is already registered, if the declared default does not match the
    /// declared kind, or if a boolean setting feeds an action channel
    /// without emission literals.
    pub fn register(&mut self, group: &str, setting: Setting) -> Result<()> {
        if setting.default.kind() != setting.kind {
            return Err(Error::DefaultKindMismatch {
                group: group.to_string(),
                setting: setting.name.clone(),
                declared: setting.kind,
                actual: setting.default.kind(),
            });
        }
        if setting.kind == SettingKind::Bool
            && setting.channel != Channel::None
            && setting.literals.is_empty()
        {
            return Err(Error::MissingLiterals {
                group: group.to_string(),
                setting: setting.name.clone(),
                channel: setting.channel,
            });
        }

        let entry = self
            .groups
            .entry(group.to_string())
            .or_insert_with(|| FeatureGroup::new(group));

        if entry.settings.contains_key(&setting.name) {
            return Err(Error::DuplicateSetting {
                group: group.to_string(),
                setting: setting.name,
            });
        }
        entry.settings.insert(setting.name.clone(), setting);
        Ok(())
    }

    /// Look up a setting descriptor
    pub fn lookup(&self, group: &str, setting: &str) -> Result<&Setting> {
        let group_entry = self
            .groups
            .get(group)
            .ok_or_else(|| Error::UnknownGroup(group.to_string()))?;
        group_entry.get(setting).ok_or_else(|| Error::UnknownSetting {
            group: group.to_string(),
            setting: setting.to_string(),
        })
    }

    /// Look up a feature group by name
    pub fn group(&self, name: &str) -> Option<&FeatureGroup> {
        self.groups.get(name)
    }

    /// Iterate feature groups in declaration order
    pub fn groups(&self) -> impl Iterator<Item = &FeatureGroup> {
        self.groups.values()
    }

    /// Number of feature groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check whether the schema declares no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of settings across all groups
    pub fn setting_count(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }
}

/// Fluent schema construction
///
/// Settings attach to the most recently opened group; the first error
/// encountered is deferred and returned by [`SchemaBuilder::build`].
pub struct SchemaBuilder {
    schema: VariableSchema,
    current: Option<String>,
    error: Option<Error>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            schema: VariableSchema::new(),
            current: None,
            error: None,
        }
    }

    /// Open a new feature group; subsequent settings attach to it
    pub fn group(mut self, name: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.schema.add_group(name) {
            Ok(()) => self.current = Some(name.to_string()),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Add a string setting to the open group
    pub fn string(self, name: &str, default: &str, channel: Channel) -> Self {
        self.setting(Setting::string(name, default, channel))
    }

    /// Add a boolean setting to the open group
    pub fn boolean(self, name: &str, default: bool, channel: Channel, literals: &[&str]) -> Self {
        self.setting(Setting::boolean(name, default, channel, literals))
    }

    /// Add a string-list setting to the open group
    pub fn string_list(self, name: &str, default: &[&str], channel: Channel) -> Self {
        self.setting(Setting::string_list(name, default, channel))
    }

    /// Add a pre-built setting to the open group
    pub fn setting(mut self, setting: Setting) -> Self {
        if self.error.is_some() {
            return self;
        }
        let group = match self.current.clone() {
            Some(g) => g,
            None => {
                self.error = Some(Error::SettingOutsideGroup(setting.name));
                return self;
            }
        };
        if let Err(e) = self.schema.register(&group, setting) {
            self.error = Some(e);
        }
        self
    }

    /// Finish building, surfacing the first declaration error if any
    pub fn build(self) -> Result<VariableSchema> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.schema),
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
