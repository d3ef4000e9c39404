//! Delorean Synth
//!
//! Turns a resolved [`WorkerProfile`] into the ordered resource graph the
//! convergence engine applies to a live host.
//!
//! # Pipeline
//!
//! ```text
//! WorkerProfile
//!      │
//!      ▼
//! synthesize()  — emits the typed resource declarations (user, home
//!      │          tree, repo files, cron, logrotate, venv bootstrap,
//!      │          projects.ini, symlinks, gerrit identity)
//!      ▼
//! wire()        — attaches the fixed before-edges and validates the
//!      │          result is a DAG with unique identities
//!      ▼
//! ResourceGraph
//! ```
//!
//! [`plan`] runs both steps. Everything here is pure, synchronous
//! computation; rendering is deterministic, so identical profiles yield
//! byte-identical file bodies and identical graphs.
//!
//! [`WorkerProfile`]: delorean_profile::WorkerProfile

mod error;
mod synthesize;
mod templates;
mod wire;

pub use error::SynthError;
pub use synthesize::synthesize;
pub use templates::{render_logrotate, render_mock_config, render_projects_ini};
pub use wire::wire;

use delorean_profile::WorkerProfile;
use delorean_resource::ResourceGraph;
use tracing::info;

/// Synthesize and wire the full resource graph for one worker.
pub fn plan(profile: &WorkerProfile) -> Result<ResourceGraph, SynthError> {
  let nodes = synthesize(profile)?;
  let graph = wire(nodes)?;
  info!(
    worker = %profile.name,
    nodes = graph.nodes.len(),
    edges = graph.edges.len(),
    "synthesized resource graph"
  );
  Ok(graph)
}
