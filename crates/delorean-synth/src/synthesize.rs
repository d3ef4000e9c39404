//! Resource synthesis: profile → typed resource declarations.

use delorean_profile::{MockConfigSource, WorkerProfile};
use delorean_resource::{ResourceKind, ResourceNode};
use tracing::debug;

use crate::error::SynthError;
use crate::templates::{mock_config_body, render_logrotate, render_projects_ini};

/// Package providing the public web root; prerequisite for published
/// symlinks and directories.
const HTTPD_PACKAGE: &str = "httpd";

/// Derive the full set of resource declarations for one worker.
///
/// Deterministic: the same profile always yields the same node sequence.
/// Features (cron, symlinks, gerrit identity, special-case mock config)
/// are emitted only when their guard condition holds; there is no notion
/// of a "disabled" placeholder node.
pub fn synthesize(profile: &WorkerProfile) -> Result<Vec<ResourceNode>, SynthError> {
  let worker = profile.name.as_str();
  let home = profile.home.as_str();
  let mut nodes = Vec::new();

  let mut user = ResourceNode::new(ResourceKind::User, worker)
    .attr("groups", "users,mock")
    .attr("managehome", "true");
  if let Some(uid) = profile.uid {
    user = user.attr("uid", uid.to_string());
  }
  nodes.push(user);

  nodes.push(
    ResourceNode::new(ResourceKind::Directory, home)
      .attr("mode", "0755")
      .attr("owner", worker),
  );
  nodes.push(
    ResourceNode::new(ResourceKind::Exec, ownership_fixup_name(worker))
      .attr("command", format!("chown -R {worker}:{worker} {home}")),
  );
  nodes.push(
    ResourceNode::new(ResourceKind::Directory, format!("{home}/data"))
      .attr("mode", "0755")
      .attr("owner", worker),
  );
  nodes.push(
    ResourceNode::new(ResourceKind::Directory, format!("{home}/data/repos"))
      .attr("mode", "0755")
      .attr("owner", worker),
  );
  nodes.push(
    ResourceNode::new(
      ResourceKind::File,
      format!("{home}/data/repos/delorean-deps.repo"),
    )
    .attr("source", format!("delorean/{worker}-delorean-deps.repo"))
    .attr("mode", "0644")
    .attr("owner", worker)
    .attr("group", worker),
  );

  // Sudo entry; priority 10 is encoded in the drop-in filename.
  nodes.push(
    ResourceNode::new(ResourceKind::File, format!("/etc/sudoers.d/10_{worker}"))
      .attr("content", format!("{worker} ALL=(ALL) NOPASSWD: /bin/rm\n"))
      .attr("mode", "0440")
      .attr("owner", "root")
      .attr("group", "root"),
  );

  nodes.push(
    ResourceNode::new(
      ResourceKind::Logrotate,
      format!("/etc/logrotate.d/delorean-{worker}"),
    )
    .attr("content", render_logrotate(profile)?)
    .attr("mode", "0644"),
  );

  // Venv bootstrap: the setup script plus the guarded exec that runs it.
  nodes.push(
    ResourceNode::new(ResourceKind::File, format!("{home}/setup_delorean.sh"))
      .attr("source", "delorean/setup_delorean.sh")
      .attr("mode", "0755")
      .attr("owner", worker),
  );
  nodes.push(
    ResourceNode::new(ResourceKind::Exec, format!("pip-install-{worker}"))
      .attr("command", format!("{home}/setup_delorean.sh"))
      .attr("cwd", format!("{home}/delorean"))
      .attr("creates", format!("{home}/.venv/bin/delorean"))
      .attr("user", worker),
  );

  nodes.push(
    ResourceNode::new(
      ResourceKind::File,
      format!("/usr/local/share/delorean/{worker}/projects.ini"),
    )
    .attr("content", render_projects_ini(profile)?)
    .attr("mode", "0644")
    .attr("owner", worker),
  );

  if profile.enable_cron {
    debug!(worker, "emitting run-delorean cron entry");
    nodes.push(
      ResourceNode::new(ResourceKind::Cron, worker)
        .attr("command", "/usr/local/bin/run-delorean.sh")
        .attr("user", worker)
        .attr("hour", "*")
        .attr("minute", "*/5"),
    );
  }

  for link in &profile.symlinks {
    nodes.push(
      ResourceNode::new(ResourceKind::Symlink, link.clone())
        .attr("target", format!("{home}/data/repos"))
        .requires_package(HTTPD_PACKAGE),
    );
  }

  if let Some(gerrit_user) = profile.gerrit_user.as_deref() {
    debug!(worker, gerrit_user, "emitting gerrit/git identity execs");
    nodes.push(git_config_exec(
      gerrit_user_exec_name(worker),
      worker,
      format!("git config --global --add gitreview.username {gerrit_user}"),
    ));
    nodes.push(git_config_exec(
      git_user_exec_name(worker),
      worker,
      format!("git config --global user.name {gerrit_user}"),
    ));
    nodes.push(git_config_exec(
      git_email_exec_name(worker),
      worker,
      format!("git config --global user.email {gerrit_user}@rdoproject.org"),
    ));
  }

  if let Some(mock) = &profile.mock_config {
    let mut node = ResourceNode::new(ResourceKind::File, mock.path.clone())
      .attr("mode", "0644")
      .attr("owner", worker);
    node = match &mock.source {
      MockConfigSource::Static { source } => node.attr("source", source.clone()),
      MockConfigSource::Rendered => node.attr("content", mock_config_body(profile)?),
    };
    nodes.push(node);
  }

  if let Some((name, path)) = profile.web_root() {
    nodes.push(
      ResourceNode::new(ResourceKind::Directory, name)
        .attr("path", path)
        .attr("mode", "0755")
        .requires_package(HTTPD_PACKAGE),
    );
  }

  Ok(nodes)
}

/// Name of the ownership-fixup exec for a worker.
pub(crate) fn ownership_fixup_name(worker: &str) -> String {
  format!("ensure home contents belong to {worker}")
}

pub(crate) fn gerrit_user_exec_name(worker: &str) -> String {
  format!("Set gerrit user for {worker}")
}

pub(crate) fn git_user_exec_name(worker: &str) -> String {
  format!("Set git user for {worker}")
}

pub(crate) fn git_email_exec_name(worker: &str) -> String {
  format!("Set git email for {worker}")
}

fn git_config_exec(name: String, worker: &str, command: String) -> ResourceNode {
  ResourceNode::new(ResourceKind::Exec, name)
    .attr("command", command)
    .attr("user", worker)
}
