use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of desired-state assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
  User,
  Directory,
  File,
  Cron,
  Exec,
  Symlink,
  Logrotate,
}

impl ResourceKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ResourceKind::User => "user",
      ResourceKind::Directory => "directory",
      ResourceKind::File => "file",
      ResourceKind::Cron => "cron",
      ResourceKind::Exec => "exec",
      ResourceKind::Symlink => "symlink",
      ResourceKind::Logrotate => "logrotate",
    }
  }
}

/// Identity of one resource: kind plus path or resource name.
///
/// Rendered as `kind[name]`, e.g. `file[/home/centos-master/data]`.
/// Unique within one graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId {
  pub kind: ResourceKind,
  pub name: String,
}

impl ResourceId {
  pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
    Self {
      kind,
      name: name.into(),
    }
  }

  /// Stable string form used as the graph key.
  pub fn key(&self) -> String {
    format!("{self}")
  }
}

impl fmt::Display for ResourceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}[{}]", self.kind.as_str(), self.name)
  }
}

/// One desired-state assertion with its attributes.
///
/// Attributes are an ordered string map (owner, mode, content, source,
/// command, schedule fields, link target, ...) so that serialization is
/// deterministic for identical profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
  pub id: ResourceId,
  #[serde(default)]
  pub attrs: BTreeMap<String, String>,
  /// Prerequisites provided by external package installation, opaque to
  /// the graph (not nodes, not edges).
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub requires_package: Vec<String>,
}

impl ResourceNode {
  pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
    Self {
      id: ResourceId::new(kind, name),
      attrs: BTreeMap::new(),
      requires_package: Vec::new(),
    }
  }

  /// Set one attribute, consuming and returning the node.
  pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
    self.attrs.insert(key.to_string(), value.into());
    self
  }

  /// Record an external package prerequisite.
  pub fn requires_package(mut self, package: &str) -> Self {
    self.requires_package.push(package.to_string());
    self
  }

  /// Attribute lookup.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.attrs.get(key).map(String::as_str)
  }
}
