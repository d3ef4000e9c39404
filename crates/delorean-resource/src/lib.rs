//! Delorean Resource
//!
//! This crate provides the typed resource model consumed by the external
//! convergence engine. A [`ResourceNode`] is one idempotent desired-state
//! assertion ("file F has mode M"); a [`ResourceGraph`] is the ordered,
//! deduplicated collection of nodes for one worker, with explicit
//! before-edges controlling safe application order.
//!
//! Invariants enforced here:
//! - identity keys are unique within one graph
//! - every edge references a node present in the same graph
//! - the graph is a DAG (a topological sort always exists)
//!
//! Prerequisites satisfied by external package installation (`httpd`) are
//! not graph nodes; they are carried per-node as opaque package names.

mod error;
mod graph;
mod node;
mod view;

pub use error::GraphError;
pub use graph::ResourceGraph;
pub use node::{ResourceId, ResourceKind, ResourceNode};
pub use view::Graph;
