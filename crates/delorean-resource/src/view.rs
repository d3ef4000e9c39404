use std::collections::{BTreeMap, BTreeSet};

use crate::error::GraphError;
use crate::node::ResourceNode;

/// Adjacency view over a resource graph for traversal and analysis.
#[derive(Debug, Clone)]
pub struct Graph {
  /// Adjacency list: key -> downstream keys.
  adjacency: BTreeMap<String, Vec<String>>,
  /// Reverse adjacency: key -> upstream keys.
  reverse_adjacency: BTreeMap<String, Vec<String>>,
  /// Nodes with no incoming edges.
  entry_points: Vec<String>,
}

impl Graph {
  pub fn new(nodes: &BTreeMap<String, ResourceNode>, edges: &[(String, String)]) -> Self {
    let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut reverse_adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for key in nodes.keys() {
      adjacency.entry(key.clone()).or_default();
      reverse_adjacency.entry(key.clone()).or_default();
    }

    for (from, to) in edges {
      adjacency.entry(from.clone()).or_default().push(to.clone());
      reverse_adjacency
        .entry(to.clone())
        .or_default()
        .push(from.clone());
    }

    let entry_points: Vec<String> = nodes
      .keys()
      .filter(|key| reverse_adjacency.get(*key).is_none_or(|v| v.is_empty()))
      .cloned()
      .collect();

    Self {
      adjacency,
      reverse_adjacency,
      entry_points,
    }
  }

  /// Nodes with no incoming edges.
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Downstream nodes for a given node.
  pub fn downstream(&self, key: &str) -> &[String] {
    self
      .adjacency
      .get(key)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Upstream nodes for a given node.
  pub fn upstream(&self, key: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(key)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Deterministic topological order (Kahn's algorithm with a
  /// lexicographic tie-break), or `CycleDetected`.
  pub fn topo_sort(&self) -> Result<Vec<String>, GraphError> {
    let mut in_degree: BTreeMap<&str, usize> = self
      .adjacency
      .keys()
      .map(|key| (key.as_str(), 0))
      .collect();
    for targets in self.adjacency.values() {
      for to in targets {
        if let Some(degree) = in_degree.get_mut(to.as_str()) {
          *degree += 1;
        }
      }
    }

    let mut ready: BTreeSet<&str> = in_degree
      .iter()
      .filter(|(_, degree)| **degree == 0)
      .map(|(key, _)| *key)
      .collect();

    let mut order = Vec::with_capacity(self.adjacency.len());
    while let Some(key) = ready.pop_first() {
      order.push(key.to_string());
      for to in self.downstream(key) {
        if let Some(degree) = in_degree.get_mut(to.as_str()) {
          *degree -= 1;
          if *degree == 0 {
            ready.insert(to.as_str());
          }
        }
      }
    }

    if order.len() != self.adjacency.len() {
      return Err(GraphError::CycleDetected);
    }
    Ok(order)
  }
}
