//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! The projeto module additionally converts between its raw row (TEXT
//! status columns, JSONB content) and the typed domain aggregate.

pub mod declaracao;
pub mod escola;
pub mod projeto;
pub mod termo;
