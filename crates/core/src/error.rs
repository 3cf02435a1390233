use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A single violated validation rule: which field and why.
///
/// Submission validation returns the complete list of these, never just the
/// first failure, so the caller can surface every problem at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violacao {
    /// Dotted path into the content payload, e.g. `identificacao.professor.cpf`.
    pub campo: String,
    /// Human-readable message in the wire language (pt-BR).
    pub mensagem: String,
}

impl Violacao {
    pub fn new(campo: impl Into<String>, mensagem: impl Into<String>) -> Self {
        Self {
            campo: campo.into(),
            mensagem: mensagem.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The actor's role may not perform the requested action at all.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The action is recognized for the role, but the project's current
    /// state does not satisfy the precondition.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Submission (or an action input) failed validation. Carries every
    /// violated rule.
    #[error("Validation failed: {}", format_violations(.0))]
    ValidationFailed(Vec<Violacao>),

    /// An optimistic-concurrency check failed: the record changed between
    /// the caller's read and this write. Refetch and retry.
    #[error("Concurrent modification: {entity} with id {id} was changed by another request")]
    ConcurrentModification { entity: &'static str, id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a single-rule validation failure.
    pub fn validation(campo: impl Into<String>, mensagem: impl Into<String>) -> Self {
        CoreError::ValidationFailed(vec![Violacao::new(campo, mensagem)])
    }
}

fn format_violations(violations: &[Violacao]) -> String {
    violations
        .iter()
        .map(|v| v.mensagem.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
