//! Delorean Profile
//!
//! This crate contains the serializable worker parameter types and the
//! profile resolution step for Delorean build workers.
//!
//! A `WorkerParams` is the raw key/value parameter set for one worker,
//! keyed by worker name. `WorkerParams::resolve` normalizes it into a
//! complete, defaulted `WorkerProfile`: required fields are checked,
//! the release default is applied, the trunk `baseurl` is derived, and
//! the special-case override table (rawhide, kilo) is consulted.
//!
//! Resolution is a pure computation; the resulting profile is immutable
//! and uniquely determines every derived path under `/home/<name>`.

mod error;
mod params;
mod profile;

pub use error::ProfileError;
pub use params::WorkerParams;
pub use profile::{DEFAULT_RELEASE, MockConfig, MockConfigSource, WorkerProfile};
