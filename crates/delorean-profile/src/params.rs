use serde::{Deserialize, Serialize};

/// Raw parameter set for one build worker, keyed by worker name.
///
/// This is the serializable input shape. Required fields are modeled as
/// `Option` so that a missing key surfaces as a resolution error rather
/// than a deserialization failure; flags and collections default to
/// their disabled/empty forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerParams {
  /// Worker identity, e.g. `centos-master` or `fedora-rawhide-master`.
  pub name: String,
  /// Distribution the worker builds for, e.g. `centos7`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distro: Option<String>,
  /// Build target, e.g. `centos`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target: Option<String>,
  /// Branch of the distgit repositories, e.g. `rpm-master`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distgit_branch: Option<String>,
  /// Branch of the upstream source repositories, e.g. `master`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distro_branch: Option<String>,
  /// Release tag; defaults to the module-wide default when absent.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub release: Option<String>,
  /// Fixed uid for the worker account; auto-assigned when absent.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uid: Option<u32>,
  /// Leave `smtpserver` empty in projects.ini so no mail is sent.
  #[serde(default)]
  pub disable_email: bool,
  /// Emit the periodic run-delorean cron entry.
  #[serde(default)]
  pub enable_cron: bool,
  /// Published symlinks pointing at the worker's repo directory.
  #[serde(default)]
  pub symlinks: Vec<String>,
  /// Gerrit review username; also used for the git identity.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gerrit_user: Option<String>,
}
