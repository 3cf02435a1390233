//! Projeto row model and its conversions to the domain aggregate.

use arte_educa_core::error::CoreError;
use arte_educa_core::projeto::{ConteudoProjeto, Projeto, TipoProjeto};
use arte_educa_core::status::{StatusProjeto, StatusValidacao};
use arte_educa_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A raw row from the `projetos` table. Status columns come back as TEXT
/// and the content blocks as JSONB; [`ProjetoRow::into_record`] lifts
/// them into the typed aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct ProjetoRow {
    pub id: DbId,
    pub tipo_projeto: String,
    pub status: String,
    pub status_gestor: String,
    pub status_cre: String,
    pub justificativa_rejeicao: Option<String>,
    pub numero_processo_sei: Option<String>,
    pub data_submissao: Option<Timestamp>,
    pub data_aprovacao: Option<Timestamp>,
    pub created_by: String,
    pub cre: Option<String>,
    pub municipio: Option<String>,
    pub unidade_educacional: Option<String>,
    pub inep: Option<String>,
    pub conteudo: Json<ConteudoProjeto>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A stored project: the domain aggregate plus row bookkeeping. This is
/// the shape handlers serialize back to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjetoRecord {
    #[serde(flatten)]
    pub projeto: Projeto,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjetoRow {
    /// Decode the raw row into the typed record. The status columns are
    /// CHECK-constrained, so decoding only fails for rows predating a
    /// schema change.
    pub fn into_record(self) -> Result<ProjetoRecord, CoreError> {
        let projeto = Projeto {
            id: self.id,
            tipo_projeto: TipoProjeto::from_str_db(&self.tipo_projeto)?,
            status: StatusProjeto::from_str_db(&self.status)?,
            status_gestor: StatusValidacao::from_str_db(&self.status_gestor)?,
            status_cre: StatusValidacao::from_str_db(&self.status_cre)?,
            justificativa_rejeicao: self.justificativa_rejeicao,
            numero_processo_sei: self.numero_processo_sei,
            data_submissao: self.data_submissao,
            data_aprovacao: self.data_aprovacao,
            created_by: self.created_by,
            version: self.version,
            conteudo: self.conteudo.0,
        };
        Ok(ProjetoRecord {
            projeto,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
