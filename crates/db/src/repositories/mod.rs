//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Workflow writes go
//! through the version-checked update so concurrent transitions lose
//! cleanly instead of clobbering each other.

pub mod declaracao_repo;
pub mod escola_repo;
pub mod projeto_repo;
pub mod termo_repo;

pub use declaracao_repo::DeclaracaoRepo;
pub use escola_repo::EscolaRepo;
pub use projeto_repo::ProjetoRepo;
pub use termo_repo::TermoRepo;
