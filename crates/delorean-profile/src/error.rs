use thiserror::Error;

/// Errors that can occur during profile resolution.
#[derive(Debug, Error)]
pub enum ProfileError {
  /// A required parameter is absent and no special-case default applies.
  #[error("worker '{name}': missing required parameter '{field}'")]
  MissingField { name: String, field: &'static str },

  /// A caller-supplied release contradicts a release forced by a
  /// special-case worker name.
  #[error("worker '{name}': release '{supplied}' conflicts with forced release '{forced}'")]
  ConflictingRelease {
    name: String,
    forced: String,
    supplied: String,
  },
}
