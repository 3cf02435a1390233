//! Declaração CRE entity model and DTOs.

use arte_educa_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `declaracoes_cre` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaracaoCre {
    pub id: DbId,
    pub projeto_id: DbId,
    pub conteudo: String,
    pub validado: bool,
    pub data_validacao: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a declaração. When `conteudo` is omitted the handler
/// generates the default declaration text from the project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeclaracaoCre {
    pub projeto_id: DbId,
    pub conteudo: Option<String>,
}

/// DTO for updating a pending declaração.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDeclaracaoCre {
    pub conteudo: Option<String>,
}
