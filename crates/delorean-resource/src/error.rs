use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
  #[error("duplicate resource id: {0}")]
  DuplicateId(String),

  #[error("edge references unknown resource: from={from}, to={to}")]
  InvalidEdge { from: String, to: String },

  #[error("cycle detected in resource graph")]
  CycleDetected,
}
