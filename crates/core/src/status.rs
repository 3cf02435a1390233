//! Project status enumerations.
//!
//! Three independent flags gate the workflow: the overall lifecycle
//! [`StatusProjeto`] plus the two review flags [`StatusValidacao`] for the
//! gestor and CRE steps. They are recorded separately because gestor and
//! CRE validation happen in sequence and the admin step inspects both;
//! they must never be collapsed into a single enum.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Overall lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusProjeto {
    /// Draft, editable by the owning professor.
    Rascunho,
    /// Submitted, under review.
    Enviado,
    /// Approved by the admin with an SEI number.
    Aprovado,
    /// Legacy rejected state. Still editable/submittable by the owner, but
    /// no transition produces it anymore: `reject` returns projects to
    /// `rascunho` with the review flags reset.
    Rejeitado,
}

impl StatusProjeto {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "rascunho" => Ok(Self::Rascunho),
            "enviado" => Ok(Self::Enviado),
            "aprovado" => Ok(Self::Aprovado),
            "rejeitado" => Ok(Self::Rejeitado),
            _ => Err(CoreError::validation(
                "status",
                format!(
                    "Status inválido '{s}'. Deve ser um de: rascunho, enviado, aprovado, rejeitado"
                ),
            )),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rascunho => "rascunho",
            Self::Enviado => "enviado",
            Self::Aprovado => "aprovado",
            Self::Rejeitado => "rejeitado",
        }
    }

    /// Draft-like states the owning professor may still edit and submit.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Rascunho | Self::Rejeitado)
    }
}

/// State of one review flag (gestor or CRE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusValidacao {
    Pendente,
    Validado,
}

impl StatusValidacao {
    /// Parse a validation-flag string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pendente" => Ok(Self::Pendente),
            "validado" => Ok(Self::Validado),
            _ => Err(CoreError::validation(
                "status_validacao",
                format!("Status de validação inválido '{s}'. Deve ser: pendente ou validado"),
            )),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Validado => "validado",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            StatusProjeto::Rascunho,
            StatusProjeto::Enviado,
            StatusProjeto::Aprovado,
            StatusProjeto::Rejeitado,
        ] {
            assert_eq!(StatusProjeto::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_validacao_round_trip() {
        for flag in [StatusValidacao::Pendente, StatusValidacao::Validado] {
            assert_eq!(StatusValidacao::from_str_db(flag.as_str()).unwrap(), flag);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(StatusProjeto::from_str_db("pendente").is_err());
        assert!(StatusValidacao::from_str_db("rascunho").is_err());
    }

    #[test]
    fn test_editable_states() {
        assert!(StatusProjeto::Rascunho.is_editable());
        assert!(StatusProjeto::Rejeitado.is_editable());
        assert!(!StatusProjeto::Enviado.is_editable());
        assert!(!StatusProjeto::Aprovado.is_editable());
    }
}
