use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::node::{ResourceId, ResourceNode};
use crate::view::Graph;

/// The ordered, deduplicated resource collection for one worker.
///
/// Nodes are keyed by their rendered id; edges `(a, b)` mean "a must
/// converge before b". The graph exclusively owns its nodes; the
/// convergence engine only reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceGraph {
  pub nodes: BTreeMap<String, ResourceNode>,
  pub edges: Vec<(String, String)>,
}

impl ResourceGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a node, rejecting duplicate identities.
  pub fn insert(&mut self, node: ResourceNode) -> Result<(), GraphError> {
    let key = node.id.key();
    if self.nodes.contains_key(&key) {
      return Err(GraphError::DuplicateId(key));
    }
    self.nodes.insert(key, node);
    Ok(())
  }

  /// Add a before-edge between two existing nodes.
  pub fn add_edge(&mut self, from: &ResourceId, to: &ResourceId) -> Result<(), GraphError> {
    let (from, to) = (from.key(), to.key());
    if !self.nodes.contains_key(&from) || !self.nodes.contains_key(&to) {
      return Err(GraphError::InvalidEdge { from, to });
    }
    self.edges.push((from, to));
    Ok(())
  }

  pub fn get(&self, id: &ResourceId) -> Option<&ResourceNode> {
    self.nodes.get(&id.key())
  }

  pub fn contains(&self, id: &ResourceId) -> bool {
    self.nodes.contains_key(&id.key())
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Build the adjacency view for traversal and ordering checks.
  pub fn graph(&self) -> Graph {
    Graph::new(&self.nodes, &self.edges)
  }

  /// Check the graph invariants: edges reference present nodes and the
  /// edge set is acyclic.
  pub fn validate(&self) -> Result<(), GraphError> {
    for (from, to) in &self.edges {
      if !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
        return Err(GraphError::InvalidEdge {
          from: from.clone(),
          to: to.clone(),
        });
      }
    }
    self.graph().topo_sort().map(|_| ())
  }
}
