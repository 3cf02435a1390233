//! Actor roles.
//!
//! A user holds exactly one active role per request. Role assignment is
//! external; the workflow only consumes the current role plus the scoping
//! attributes (email, CRE, school INEP) carried alongside it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The four roles of the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perfil {
    /// Authors project proposals; owns drafts.
    Professor,
    /// School-site manager; validates feasibility at the school level.
    Gestor,
    /// Acts for the regional coordination (CRE); validates after the gestor.
    Articulador,
    /// Approves/rejects and records the SEI process number.
    Admin,
}

impl Perfil {
    /// Parse a role string from the database or a request header.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "professor" => Ok(Self::Professor),
            "gestor" => Ok(Self::Gestor),
            "articulador" => Ok(Self::Articulador),
            "admin" => Ok(Self::Admin),
            _ => Err(CoreError::validation(
                "perfil",
                format!(
                    "Perfil inválido '{s}'. Deve ser um de: professor, gestor, articulador, admin"
                ),
            )),
        }
    }

    /// Convert to the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professor => "professor",
            Self::Gestor => "gestor",
            Self::Articulador => "articulador",
            Self::Admin => "admin",
        }
    }
}
