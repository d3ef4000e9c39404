//! Dependency wiring: attaches the fixed before-edges to a synthesized
//! node set and validates the result.
//!
//! Ordering rules (a before b):
//! 1. home directory → ownership-fixup exec on the home tree
//! 2. data directory → data/repos directory → delorean-deps.repo file
//! 3. home directory → each gerrit/git identity exec
//!
//! External package prerequisites (httpd) are carried per-node and are
//! not edges. Everything else is left unordered for the convergence
//! engine to apply in any order.

use delorean_resource::{ResourceGraph, ResourceId, ResourceKind, ResourceNode};
use tracing::debug;

use crate::error::SynthError;
use crate::synthesize::{
  gerrit_user_exec_name, git_email_exec_name, git_user_exec_name, ownership_fixup_name,
};

/// Wire ordering edges between synthesized nodes and validate the graph.
///
/// Fails on duplicate identities and on cycles; a cycle here means a
/// synthesis bug, not a recoverable runtime condition.
pub fn wire(nodes: Vec<ResourceNode>) -> Result<ResourceGraph, SynthError> {
  let worker = nodes
    .iter()
    .find(|n| n.id.kind == ResourceKind::User)
    .map(|n| n.id.name.clone());

  let mut graph = ResourceGraph::new();
  for node in nodes {
    graph.insert(node)?;
  }

  if let Some(worker) = worker {
    let home = format!("/home/{worker}");
    let home_dir = ResourceId::new(ResourceKind::Directory, home.as_str());
    let data_dir = ResourceId::new(ResourceKind::Directory, format!("{home}/data"));
    let repos_dir = ResourceId::new(ResourceKind::Directory, format!("{home}/data/repos"));
    let deps_repo = ResourceId::new(
      ResourceKind::File,
      format!("{home}/data/repos/delorean-deps.repo"),
    );
    let fixup = ResourceId::new(ResourceKind::Exec, ownership_fixup_name(&worker));

    edge_if_present(&mut graph, &home_dir, &fixup)?;
    edge_if_present(&mut graph, &data_dir, &repos_dir)?;
    edge_if_present(&mut graph, &repos_dir, &deps_repo)?;

    for name in [
      gerrit_user_exec_name(&worker),
      git_user_exec_name(&worker),
      git_email_exec_name(&worker),
    ] {
      let exec = ResourceId::new(ResourceKind::Exec, name);
      edge_if_present(&mut graph, &home_dir, &exec)?;
    }
  }

  graph.validate()?;
  debug!(
    nodes = graph.nodes.len(),
    edges = graph.edges.len(),
    "wired ordering edges"
  );
  Ok(graph)
}

/// Add an edge when both endpoints were synthesized; conditional
/// features leave their edges out along with their nodes.
fn edge_if_present(
  graph: &mut ResourceGraph,
  from: &ResourceId,
  to: &ResourceId,
) -> Result<(), SynthError> {
  if graph.contains(from) && graph.contains(to) {
    graph.add_edge(from, to)?;
  }
  Ok(())
}
