//! Termo de Compromisso entity model and DTOs.

use arte_educa_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `termos_compromisso` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermoCompromisso {
    pub id: DbId,
    pub projeto_id: DbId,
    /// INEP code of the school the termo belongs to.
    pub unidade_educacional_id: Option<String>,
    pub gestor_nome: Option<String>,
    pub gestor_cpf: Option<String>,
    pub gestor_rg: Option<String>,
    pub portaria: Option<String>,
    pub professores: Option<String>,
    pub conteudo: String,
    pub validado: bool,
    pub data_validacao: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a termo. When `conteudo` is omitted the handler
/// generates the default commitment text from these fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTermoCompromisso {
    pub projeto_id: DbId,
    pub gestor_nome: Option<String>,
    pub gestor_cpf: Option<String>,
    pub gestor_rg: Option<String>,
    pub portaria: Option<String>,
    pub professores: Option<String>,
    pub conteudo: Option<String>,
}

/// DTO for updating a pending termo. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTermoCompromisso {
    pub gestor_nome: Option<String>,
    pub gestor_cpf: Option<String>,
    pub gestor_rg: Option<String>,
    pub portaria: Option<String>,
    pub professores: Option<String>,
    pub conteudo: Option<String>,
}
