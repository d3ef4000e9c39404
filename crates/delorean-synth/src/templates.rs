//! Templated artifact rendering.
//!
//! The two templated artifacts (`projects.ini` and the rendered mock
//! build-root config) plus the logrotate stanza are produced here via
//! minijinja, from profile fields only. Rendering is a pure function:
//! the same profile always yields byte-identical output. A fresh
//! `Environment` is built per call so no process-global state is
//! involved.

use delorean_profile::{MockConfigSource, WorkerProfile};
use minijinja::{Environment, Value};
use serde_json::json;

use crate::error::SynthError;

const PROJECTS_INI_TEMPLATE: &str = "\
[DEFAULT]
datadir={{ home }}/data
scriptsdir={{ home }}/delorean/scripts
baseurl={{ baseurl }}
distro={{ distgit_branch }}
source={{ distro_branch }}
target={{ target }}
smtpserver={{ smtpserver }}
reponame=delorean
templatedir={{ home }}/delorean/delorean/templates
maxretries=3
tags={{ release }}
gerrit={{ gerrit }}
";

const MOCK_CONFIG_TEMPLATE: &str = "\
config_opts['root'] = 'delorean-{{ target }}-x86_64'
config_opts['target_arch'] = 'x86_64'
config_opts['legal_host_arches'] = ('x86_64',)
config_opts['chroot_setup_cmd'] = 'install @buildsys-build'
config_opts['dist'] = 'el7'
config_opts['releasever'] = '7'
config_opts['plugin_conf']['ccache_enable'] = False

config_opts['yum.conf'] = \"\"\"
[main]
keepcache=1
debuglevel=2
reposdir=/dev/null
logfile=/var/log/yum.log
retries=20
obsoletes=1
gpgcheck=0
assumeyes=1
syslog_ident=mock
syslog_device=

[base]
name=base
baseurl=http://mirror.centos.org/centos/7/os/x86_64/
gpgcheck=0

[updates]
name=updates
baseurl=http://mirror.centos.org/centos/7/updates/x86_64/
gpgcheck=0

[delorean-deps]
name=delorean-deps
baseurl={{ baseurl }}/deps/latest/
gpgcheck=0
\"\"\"
";

const LOGROTATE_TEMPLATE: &str = "\
{{ home }}/delorean-logs/*.log {
    compress
    copytruncate
    daily
    missingok
    notifempty
    rotate 7
}
";

fn render(artifact: &'static str, template: &str, context: Value) -> Result<String, SynthError> {
  let env = Environment::new();
  env
    .render_str(template, context)
    .map_err(|source| SynthError::Template { artifact, source })
}

/// Render the worker's `projects.ini` body.
///
/// `smtpserver` is empty when email is disabled, `gerrit` is empty when
/// no gerrit user is configured; both otherwise carry their fixed
/// enabled values.
pub fn render_projects_ini(profile: &WorkerProfile) -> Result<String, SynthError> {
  let smtpserver = if profile.disable_email { "" } else { "localhost" };
  let gerrit = if profile.gerrit_user.is_some() {
    "yes"
  } else {
    ""
  };
  let context = Value::from_serialize(json!({
    "home": profile.home,
    "baseurl": profile.baseurl,
    "distgit_branch": profile.distgit_branch,
    "distro_branch": profile.distro_branch,
    "target": profile.target,
    "smtpserver": smtpserver,
    "release": profile.release,
    "gerrit": gerrit,
  }));
  render("projects.ini", PROJECTS_INI_TEMPLATE, context)
}

/// Render the mock build-root config body, for workers whose special
/// case calls for a rendered config (statically sourced configs return
/// `None`; so do ordinary workers).
pub fn render_mock_config(profile: &WorkerProfile) -> Result<Option<String>, SynthError> {
  match profile.mock_config.as_ref().map(|mock| &mock.source) {
    Some(MockConfigSource::Rendered) => mock_config_body(profile).map(Some),
    _ => Ok(None),
  }
}

/// Body of a rendered mock config. Callers have already established
/// that the profile's special case asks for one.
pub(crate) fn mock_config_body(profile: &WorkerProfile) -> Result<String, SynthError> {
  let context = Value::from_serialize(json!({
    "target": profile.target,
    "baseurl": profile.baseurl,
  }));
  render("mock config", MOCK_CONFIG_TEMPLATE, context)
}

/// Render the logrotate stanza for the worker's build logs.
pub fn render_logrotate(profile: &WorkerProfile) -> Result<String, SynthError> {
  let context = Value::from_serialize(json!({ "home": profile.home }));
  render("logrotate", LOGROTATE_TEMPLATE, context)
}
