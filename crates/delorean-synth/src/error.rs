use thiserror::Error;

/// Errors that can occur during synthesis and wiring.
#[derive(Debug, Error)]
pub enum SynthError {
  /// Template rendering failed. Templates are total functions of a
  /// resolved profile, so this indicates a programming error rather
  /// than a runtime condition to recover from.
  #[error("template rendering failed for '{artifact}': {source}")]
  Template {
    artifact: &'static str,
    #[source]
    source: minijinja::Error,
  },

  /// Graph invariant violation: duplicate identity, dangling edge, or
  /// a cycle in the ordering edges. Fatal, never silently dropped.
  #[error(transparent)]
  Graph(#[from] delorean_resource::GraphError),
}
