//! Arte Educa domain core.
//!
//! Pure domain logic for the project-approval workflow: typed project
//! content, the transition engine, validation rules, and the sibling
//! sign-off documents (Termo de Compromisso, Declaração CRE). No I/O
//! happens here; the `db` and `api` crates drive these functions.

pub mod documentos;
pub mod error;
pub mod projeto;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
pub mod workflow;
