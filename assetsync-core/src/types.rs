//! Domain types for publishable components.
//!
//! Kinds and names double as path segments (`<kind>/<name>`), so both are
//! restricted to non-empty strings without separators or dot segments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed component name (e.g. `blog`, `default`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentName(pub String);

impl ComponentName {
    /// `true` when the name can be used as a single path segment.
    pub fn is_valid(&self) -> bool {
        is_path_segment(&self.0)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ComponentName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ComponentName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The category of a publishable component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentKind {
    #[default]
    Module,
    Theme,
    /// Any other asset folder type, addressed as `<kind>/<name>`.
    Other(String),
}

impl ComponentKind {
    /// Kinds enumerated by a full refresh, in refresh order.
    pub fn refreshable() -> &'static [ComponentKind] {
        &[ComponentKind::Module, ComponentKind::Theme]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ComponentKind::Module => "module",
            ComponentKind::Theme => "theme",
            ComponentKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "module" => Ok(ComponentKind::Module),
            "theme" => Ok(ComponentKind::Theme),
            other if is_path_segment(other) => Ok(ComponentKind::Other(other.to_owned())),
            _ => Err(RegistryError::InvalidKind(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ComponentKind {
    type Error = RegistryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        kind.as_str().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A publishable unit: a module, theme, or other asset folder.
///
/// Snapshot read from the registry for the duration of one publish cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub name: ComponentName,
}

impl Component {
    pub fn new(kind: ComponentKind, name: impl Into<ComponentName>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn module(name: impl Into<ComponentName>) -> Self {
        Self::new(ComponentKind::Module, name)
    }

    pub fn theme(name: impl Into<ComponentName>) -> Self {
        Self::new(ComponentKind::Theme, name)
    }

    /// `true` when both kind and name are single path segments.
    pub fn is_valid(&self) -> bool {
        is_path_segment(self.kind.as_str()) && self.name.is_valid()
    }

    /// Relative asset path handed to the asset service, e.g. `module/blog`.
    pub fn asset_path(&self) -> String {
        format!("{}/{}", self.kind, self.name)
    }

    /// Short label used in batch reports, e.g. `module-blog`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.kind, self.name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// A single registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: ComponentName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl ComponentRecord {
    /// Display title, falling back to the name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name.0)
    }
}

/// Root of one per-kind registry file (`<registry_dir>/<kind>.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RegistryFile {
    pub version: u32,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    pub updated_at: DateTime<Utc>,
}

impl RegistryFile {
    pub fn find(&self, name: &ComponentName) -> Option<&ComponentRecord> {
        self.components.iter().find(|r| &r.name == name)
    }

    pub fn find_mut(&mut self, name: &ComponentName) -> Option<&mut ComponentRecord> {
        self.components.iter_mut().find(|r| &r.name == name)
    }
}

fn is_path_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && !s.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("module", ComponentKind::Module)]
    #[case("Theme", ComponentKind::Theme)]
    #[case(" custom ", ComponentKind::Other("custom".to_string()))]
    fn kind_parses(#[case] input: &str, #[case] expected: ComponentKind) {
        assert_eq!(input.parse::<ComponentKind>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("a/b")]
    #[case("a\\b")]
    fn kind_rejects_non_segments(#[case] input: &str) {
        let err = input.parse::<ComponentKind>().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidKind(_)));
    }

    #[test]
    fn component_paths_and_labels() {
        let c = Component::module("blog");
        assert_eq!(c.asset_path(), "module/blog");
        assert_eq!(c.label(), "module-blog");
        assert_eq!(c.to_string(), "module/blog");
        let other = Component::new(ComponentKind::Other("vendor".into()), "jquery");
        assert_eq!(other.asset_path(), "vendor/jquery");
    }

    #[test]
    fn kind_serializes_as_plain_string() {
        let yaml = serde_yaml::to_string(&Component::theme("default")).unwrap();
        assert!(yaml.contains("kind: theme"), "got: {yaml}");
        let back: Component = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, Component::theme("default"));
    }

    #[test]
    fn record_defaults_to_active() {
        let yaml = "name: blog\nregistered_at: 2024-01-01T00:00:00Z\n";
        let record: ComponentRecord = serde_yaml::from_str(yaml).unwrap();
        assert!(record.active);
        assert_eq!(record.display_title(), "blog");
    }

    #[test]
    fn name_validity() {
        assert!(ComponentName::from("blog").is_valid());
        assert!(!ComponentName::from("../etc").is_valid());
        assert!(!ComponentName::from("").is_valid());
    }
}
