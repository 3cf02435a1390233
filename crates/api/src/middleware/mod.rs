//! Actor-context middleware extractors.
//!
//! - [`actor::CurrentActor`] -- Extracts the acting user from `x-actor-*` headers.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` profile.

pub mod actor;
pub mod rbac;
