//! Build action emission
//!
//! Walks a [`ResolvedConfig`] against its [`VariableSchema`] and emits the
//! ordered compiler-flag and library-reference lists each feature group
//! contributes to target compilation:
//!
//! - a true boolean setting emits its declared literals
//! - a non-empty string setting emits its literals with `%s` replaced by
//!   the value, or the bare value when no literals are declared
//! - a string-list setting emits its elements verbatim
//!
//! Output follows schema declaration order. Emission validates every
//! visited value against the declared kind before returning, so a kind
//! mismatch (for instance a hand-altered resolved document from another
//! process) fails the call without producing a partial list.

use crate::resolver::ResolvedConfig;
use crate::schema::{Channel, SettingValue, VariableSchema};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A concrete build instruction attributed to the feature group producing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum BuildAction {
    /// Ordered compiler flags for a feature group
    Flags {
        /// The feature group that produced the flags
        group: String,
        /// The flag strings, in schema declaration order
        values: Vec<String>,
    },
    /// Ordered library references for a feature group
    Libraries {
        /// The feature group that produced the references
        group: String,
        /// The library reference strings, in schema declaration order
        values: Vec<String>,
    },
}

impl BuildAction {
    /// The feature group that produced this action
    pub fn group(&self) -> &str {
        match self {
            BuildAction::Flags { group, .. } => group,
            BuildAction::Libraries { group, .. } => group,
        }
    }

    /// The emitted values
    pub fn values(&self) -> &[String] {
        match self {
            BuildAction::Flags { values, .. } => values,
            BuildAction::Libraries { values, .. } => values,
        }
    }
}

/// Translates resolved configuration into ordered build actions
pub struct ActionEmitter<'a> {
    schema: &'a VariableSchema,
}

impl<'a> ActionEmitter<'a> {
    /// Create an emitter over a schema
    pub fn new(schema: &'a VariableSchema) -> Self {
        Self { schema }
    }

    /// Emit the ordered compiler flags for a feature group
    ///
    /// Empty when the group defines no flag-channel settings or all of them
    /// resolve false or empty.
    pub fn emit_flags(&self, resolved: &ResolvedConfig, group: &str) -> Result<Vec<String>> {
        self.emit_channel(resolved, group, Channel::Flags)
    }

    /// Emit the ordered library references for a feature group
    pub fn emit_libraries(&self, resolved: &ResolvedConfig, group: &str) -> Result<Vec<String>> {
        self.emit_channel(resolved, group, Channel::Libraries)
    }

    /// Emit the non-empty actions for one feature group, flags first
    pub fn emit_group(&self, resolved: &ResolvedConfig, group: &str) -> Result<Vec<BuildAction>> {
        let mut actions = Vec::new();
        let flags = self.emit_flags(resolved, group)?;
        if !flags.is_empty() {
            actions.push(BuildAction::Flags {
                group: group.to_string(),
                values: flags,
            });
        }
        let libraries = self.emit_libraries(resolved, group)?;
        if !libraries.is_empty() {
            actions.push(BuildAction::Libraries {
                group: group.to_string(),
                values: libraries,
            });
        }
        Ok(actions)
    }

    /// Emit the non-empty actions for every group in declaration order
    pub fn emit_all(&self, resolved: &ResolvedConfig) -> Result<Vec<BuildAction>> {
        let mut actions = Vec::new();
        for group in self.schema.groups() {
            actions.extend(self.emit_group(resolved, &group.name)?);
        }
        debug!(
            "emitted {} build actions across {} groups",
            actions.len(),
            self.schema.len()
        );
        Ok(actions)
    }

    fn emit_channel(
        &self,
        resolved: &ResolvedConfig,
        group_name: &str,
        channel: Channel,
    ) -> Result<Vec<String>> {
        let group = self
            .schema
            .group(group_name)
            .ok_or_else(|| Error::UnknownGroup(group_name.to_string()))?;

        let mut out = Vec::new();
        for setting in group.settings() {
            if setting.channel != channel {
                continue;
            }
            let value = resolved.get(group_name, &setting.name)?;
            if value.kind() != setting.kind {
                return Err(Error::KindMismatch {
                    group: group_name.to_string(),
                    setting: setting.name.clone(),
                    expected: setting.kind,
                    actual: value.kind(),
                });
            }
            match value {
                SettingValue::Bool(true) => {
                    out.extend(setting.literals.iter().cloned());
                }
                SettingValue::Bool(false) => {}
                SettingValue::String(s) if s.is_empty() => {}
                SettingValue::String(s) => {
                    if setting.literals.is_empty() {
                        out.push(s.clone());
                    } else {
                        out.extend(setting.literals.iter().map(|t| t.replace("%s", s)));
                    }
                }
                SettingValue::StringList(items) => {
                    out.extend(items.iter().cloned());
                }
            }
        }
        Ok(out)
    }
}
