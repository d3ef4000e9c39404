use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::params::WorkerParams;

/// Release applied when the caller does not supply one.
pub const DEFAULT_RELEASE: &str = "mitaka";

const TRUNK_URL: &str = "http://trunk.rdoproject.org";

/// How the mock build-root config body is obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MockConfigSource {
  /// Installed verbatim from a static template shipped with the module.
  Static { source: String },
  /// Body is rendered from the profile fields.
  Rendered,
}

/// Mock build-root config artifact for a special-cased worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
  /// Install path under the worker's scripts directory.
  pub path: String,
  pub source: MockConfigSource,
}

/// Resolved, immutable description of one build worker.
///
/// Produced once per invocation by [`WorkerParams::resolve`]; every
/// derived path (`home`, `baseurl`, mock config location) is a pure
/// function of the validated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
  pub name: String,
  pub distro: String,
  pub target: String,
  pub distgit_branch: String,
  pub distro_branch: String,
  pub release: String,
  pub uid: Option<u32>,
  pub disable_email: bool,
  pub enable_cron: bool,
  pub symlinks: Vec<String>,
  pub gerrit_user: Option<String>,
  /// Home directory, `/home/<name>`.
  pub home: String,
  /// Trunk repo url the worker publishes under.
  pub baseurl: String,
  /// Mock build-root config; present only for special-cased workers.
  pub mock_config: Option<MockConfig>,
}

/// Per-worker-name overrides.
///
/// Kept as an explicit finite table so adding a special case is a
/// one-line edit instead of string comparisons scattered through
/// synthesis.
struct SpecialCase {
  release: Option<&'static str>,
  target: Option<&'static str>,
  distro_branch: Option<&'static str>,
  mock_config: Option<MockConfigTemplate>,
  /// Published directory under the web root: (resource name, path).
  web_root: Option<(&'static str, &'static str)>,
}

enum MockConfigTemplate {
  /// Static template stem, installed verbatim.
  Static(&'static str),
  /// Template stem rendered from the profile.
  Rendered(&'static str),
}

fn special_case(name: &str) -> Option<SpecialCase> {
  match name {
    "fedora-rawhide-master" => Some(SpecialCase {
      release: None,
      target: None,
      distro_branch: None,
      mock_config: Some(MockConfigTemplate::Static("fedora-rawhide")),
      web_root: None,
    }),
    "centos-kilo" => Some(SpecialCase {
      release: Some("kilo"),
      target: Some("centos-kilo"),
      distro_branch: Some("stable/kilo"),
      mock_config: Some(MockConfigTemplate::Rendered("centos-kilo")),
      web_root: Some(("/var/www/html/centos-kilo", "/var/www/html/kilo")),
    }),
    _ => None,
  }
}

impl WorkerParams {
  /// Resolve raw parameters into a complete profile.
  ///
  /// Applies the release default, derives `home` and `baseurl`, and
  /// consults the special-case table. Fails when a required field is
  /// absent or a supplied release contradicts a forced one.
  pub fn resolve(self) -> Result<WorkerProfile, ProfileError> {
    if self.name.is_empty() {
      return Err(ProfileError::MissingField {
        name: self.name,
        field: "name",
      });
    }

    let sc = special_case(&self.name);

    if let Some(forced) = sc.as_ref().and_then(|sc| sc.release)
      && let Some(supplied) = self.release.as_deref()
      && supplied != forced
    {
      return Err(ProfileError::ConflictingRelease {
        name: self.name,
        forced: forced.to_string(),
        supplied: supplied.to_string(),
      });
    }

    let required = |value: Option<String>, field: &'static str| {
      value.ok_or_else(|| ProfileError::MissingField {
        name: self.name.clone(),
        field,
      })
    };

    let distro = required(self.distro.clone(), "distro")?;
    let target = match sc.as_ref().and_then(|sc| sc.target) {
      Some(forced) => forced.to_string(),
      None => required(self.target.clone(), "target")?,
    };
    let distgit_branch = required(self.distgit_branch.clone(), "distgit_branch")?;
    let distro_branch = match sc.as_ref().and_then(|sc| sc.distro_branch) {
      Some(forced) => forced.to_string(),
      None => required(self.distro_branch.clone(), "distro_branch")?,
    };
    let release = self
      .release
      .clone()
      .or_else(|| sc.as_ref().and_then(|sc| sc.release.map(String::from)))
      .unwrap_or_else(|| DEFAULT_RELEASE.to_string());

    let home = format!("/home/{}", self.name);

    // Workers tracking master publish at the bare distro path; stable
    // branches publish under a release-suffixed path.
    let baseurl = if distro_branch == "master" {
      format!("{TRUNK_URL}/{distro}")
    } else {
      format!("{TRUNK_URL}/{distro}-{release}")
    };

    let mock_config = sc
      .as_ref()
      .and_then(|sc| sc.mock_config.as_ref())
      .map(|tpl| match tpl {
        MockConfigTemplate::Static(stem) => MockConfig {
          path: format!("{home}/delorean/scripts/{stem}.cfg"),
          source: MockConfigSource::Static {
            source: format!("delorean/{stem}.cfg"),
          },
        },
        MockConfigTemplate::Rendered(stem) => MockConfig {
          path: format!("{home}/delorean/scripts/{stem}.cfg"),
          source: MockConfigSource::Rendered,
        },
      });

    Ok(WorkerProfile {
      name: self.name,
      distro,
      target,
      distgit_branch,
      distro_branch,
      release,
      uid: self.uid,
      disable_email: self.disable_email,
      enable_cron: self.enable_cron,
      symlinks: self.symlinks,
      gerrit_user: self.gerrit_user,
      home,
      baseurl,
      mock_config,
    })
  }
}

impl WorkerProfile {
  /// Published directory under the web root, when the special-case
  /// table defines one: `(resource name, path attribute)`.
  pub fn web_root(&self) -> Option<(&'static str, &'static str)> {
    special_case(&self.name).and_then(|sc| sc.web_root)
  }
}
