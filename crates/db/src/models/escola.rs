//! School registry entity model and DTOs.

use arte_educa_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `escolas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Escola {
    pub id: DbId,
    pub inep: String,
    pub nome: String,
    pub cre: Option<String>,
    pub municipio: Option<String>,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a school.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEscola {
    pub inep: String,
    pub nome: String,
    pub cre: Option<String>,
    pub municipio: Option<String>,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
}

/// DTO for updating a school. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEscola {
    pub inep: Option<String>,
    pub nome: Option<String>,
    pub cre: Option<String>,
    pub municipio: Option<String>,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
}
