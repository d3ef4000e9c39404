//! End-to-end graph synthesis scenarios, one per worker configuration.

use delorean_profile::{WorkerParams, WorkerProfile};
use delorean_resource::{ResourceGraph, ResourceId, ResourceKind};
use delorean_synth::plan;

fn base_params(name: &str) -> WorkerParams {
  WorkerParams {
    name: name.to_string(),
    distro: Some("centos7".to_string()),
    target: Some("centos".to_string()),
    distgit_branch: Some("rpm-master".to_string()),
    distro_branch: Some("master".to_string()),
    release: None,
    uid: None,
    disable_email: true,
    enable_cron: false,
    symlinks: Vec::new(),
    gerrit_user: None,
  }
}

fn resolve(params: WorkerParams) -> WorkerProfile {
  params.resolve().expect("profile resolves")
}

fn graph_for(params: WorkerParams) -> ResourceGraph {
  plan(&resolve(params)).expect("graph synthesis succeeds")
}

fn node<'a>(
  graph: &'a ResourceGraph,
  kind: ResourceKind,
  name: &str,
) -> &'a delorean_resource::ResourceNode {
  let id = ResourceId::new(kind, name);
  graph
    .get(&id)
    .unwrap_or_else(|| panic!("graph is missing {id}"))
}

fn ini_line(graph: &ResourceGraph, worker: &str, line: &str) -> bool {
  let ini = node(
    graph,
    ResourceKind::File,
    &format!("/usr/local/share/delorean/{worker}/projects.ini"),
  );
  ini
    .get("content")
    .expect("projects.ini has rendered content")
    .lines()
    .any(|l| l == line)
}

#[test]
fn default_parameters_provision_the_worker() {
  for worker in ["fedora-master", "centos-master", "centos-liberty"] {
    let graph = graph_for(base_params(worker));
    let home = format!("/home/{worker}");

    let user = node(&graph, ResourceKind::User, worker);
    assert_eq!(user.get("groups"), Some("users,mock"));
    assert_eq!(user.get("managehome"), Some("true"));
    assert_eq!(user.get("uid"), None);

    let home_dir = node(&graph, ResourceKind::Directory, &home);
    assert_eq!(home_dir.get("mode"), Some("0755"));
    assert_eq!(home_dir.get("owner"), Some(worker));

    let deps = node(
      &graph,
      ResourceKind::File,
      &format!("{home}/data/repos/delorean-deps.repo"),
    );
    assert_eq!(
      deps.get("source"),
      Some(format!("delorean/{worker}-delorean-deps.repo").as_str())
    );
    assert_eq!(deps.get("mode"), Some("0644"));
    assert_eq!(deps.get("owner"), Some(worker));
    assert_eq!(deps.get("group"), Some(worker));

    let sudo = node(
      &graph,
      ResourceKind::File,
      &format!("/etc/sudoers.d/10_{worker}"),
    );
    assert_eq!(
      sudo.get("content"),
      Some(format!("{worker} ALL=(ALL) NOPASSWD: /bin/rm\n").as_str())
    );

    node(
      &graph,
      ResourceKind::Logrotate,
      &format!("/etc/logrotate.d/delorean-{worker}"),
    );

    let setup = node(&graph, ResourceKind::File, &format!("{home}/setup_delorean.sh"));
    assert_eq!(setup.get("mode"), Some("0755"));
    let pip = node(&graph, ResourceKind::Exec, &format!("pip-install-{worker}"));
    assert_eq!(pip.get("cwd"), Some(format!("{home}/delorean").as_str()));
    assert_eq!(
      pip.get("creates"),
      Some(format!("{home}/.venv/bin/delorean").as_str())
    );

    assert!(!graph.contains(&ResourceId::new(ResourceKind::Cron, worker)));
    assert!(ini_line(&graph, worker, "smtpserver="));
    assert!(ini_line(&graph, worker, "tags=mitaka"));
    assert!(ini_line(&graph, worker, "gerrit="));
  }
}

#[test]
fn cron_entry_when_enabled() {
  let mut params = base_params("centos-master");
  params.enable_cron = true;
  let graph = graph_for(params);
  let cron = node(&graph, ResourceKind::Cron, "centos-master");
  assert_eq!(cron.get("command"), Some("/usr/local/bin/run-delorean.sh"));
  assert_eq!(cron.get("user"), Some("centos-master"));
  assert_eq!(cron.get("hour"), Some("*"));
  assert_eq!(cron.get("minute"), Some("*/5"));
}

#[test]
fn email_enabled_sets_smtpserver() {
  let mut params = base_params("centos-master");
  params.disable_email = false;
  let graph = graph_for(params);
  assert!(ini_line(&graph, "centos-master", "smtpserver=localhost"));
}

#[test]
fn explicit_release_sets_tags() {
  let mut params = base_params("centos-liberty");
  params.release = Some("liberty".to_string());
  let graph = graph_for(params);
  assert!(ini_line(&graph, "centos-liberty", "tags=liberty"));
}

#[test]
fn master_baseurl_has_no_release_suffix() {
  let graph = graph_for(base_params("centos-master"));
  assert!(ini_line(
    &graph,
    "centos-master",
    "baseurl=http://trunk.rdoproject.org/centos7"
  ));
}

#[test]
fn symlinks_point_at_repo_directory() {
  let mut params = base_params("fedora-master");
  params.symlinks = vec![
    "/var/www/html/f24".to_string(),
    "/var/www/html/fedora24".to_string(),
  ];
  let graph = graph_for(params);
  for path in ["/var/www/html/f24", "/var/www/html/fedora24"] {
    let link = node(&graph, ResourceKind::Symlink, path);
    assert_eq!(link.get("target"), Some("/home/fedora-master/data/repos"));
    assert_eq!(link.requires_package, vec!["httpd".to_string()]);
  }
}

#[test]
fn gerrit_user_configures_identity() {
  let mut params = base_params("centos-master");
  params.gerrit_user = Some("foo".to_string());
  let graph = graph_for(params);

  assert!(ini_line(&graph, "centos-master", "gerrit=yes"));

  let gerrit = node(&graph, ResourceKind::Exec, "Set gerrit user for centos-master");
  assert_eq!(
    gerrit.get("command"),
    Some("git config --global --add gitreview.username foo")
  );
  let user = node(&graph, ResourceKind::Exec, "Set git user for centos-master");
  assert_eq!(user.get("command"), Some("git config --global user.name foo"));
  let email = node(&graph, ResourceKind::Exec, "Set git email for centos-master");
  assert_eq!(
    email.get("command"),
    Some("git config --global user.email foo@rdoproject.org")
  );

  // Each identity exec waits for the home directory.
  let view = graph.graph();
  for name in [
    "Set gerrit user for centos-master",
    "Set git user for centos-master",
    "Set git email for centos-master",
  ] {
    let upstream = view.upstream(&format!("exec[{name}]"));
    assert!(upstream.contains(&"directory[/home/centos-master]".to_string()));
  }
}

#[test]
fn without_gerrit_user_no_identity_execs() {
  let graph = graph_for(base_params("centos-master"));
  let execs: Vec<_> = graph
    .nodes
    .values()
    .filter(|n| n.id.kind == ResourceKind::Exec && n.id.name.starts_with("Set "))
    .collect();
  assert!(execs.is_empty());
}

#[test]
fn rawhide_gets_its_own_mock_config() {
  let graph = graph_for(base_params("fedora-rawhide-master"));
  let cfg = node(
    &graph,
    ResourceKind::File,
    "/home/fedora-rawhide-master/delorean/scripts/fedora-rawhide.cfg",
  );
  assert_eq!(cfg.get("source"), Some("delorean/fedora-rawhide.cfg"));
  assert_eq!(cfg.get("mode"), Some("0644"));
  assert_eq!(cfg.get("owner"), Some("fedora-rawhide-master"));
}

#[test]
fn kilo_special_case() {
  let mut params = base_params("centos-kilo");
  params.release = Some("kilo".to_string());
  let graph = graph_for(params);

  let cfg = node(
    &graph,
    ResourceKind::File,
    "/home/centos-kilo/delorean/scripts/centos-kilo.cfg",
  );
  assert!(
    cfg
      .get("content")
      .unwrap()
      .contains("config_opts['root'] = 'delorean-centos-kilo-x86_64'")
  );

  let web = node(&graph, ResourceKind::Directory, "/var/www/html/centos-kilo");
  assert_eq!(web.get("path"), Some("/var/www/html/kilo"));
  assert_eq!(web.get("mode"), Some("0755"));
  assert_eq!(web.requires_package, vec!["httpd".to_string()]);

  assert!(ini_line(
    &graph,
    "centos-kilo",
    "baseurl=http://trunk.rdoproject.org/centos7-kilo"
  ));
}

#[test]
fn graph_always_topo_sorts_with_home_tree_in_order() {
  for worker in ["fedora-master", "centos-master", "centos-kilo"] {
    let graph = graph_for(base_params(worker));
    let order = graph.graph().topo_sort().expect("graph is a DAG");
    let home = format!("/home/{worker}");
    let position = |key: &str| {
      order
        .iter()
        .position(|k| k == key)
        .unwrap_or_else(|| panic!("{key} missing from sort"))
    };
    let data = position(&format!("directory[{home}/data]"));
    let repos = position(&format!("directory[{home}/data/repos]"));
    let deps = position(&format!("file[{home}/data/repos/delorean-deps.repo]"));
    assert!(data < repos);
    assert!(repos < deps);
  }
}

#[test]
fn synthesis_is_deterministic_across_calls() {
  let profile = resolve(base_params("centos-master"));
  let first = plan(&profile).unwrap();
  let second = plan(&profile).unwrap();
  assert_eq!(first, second);
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
}
