//! Repository for the `projetos` table.

use arte_educa_core::projeto::Projeto;
use arte_educa_core::status::{StatusProjeto, StatusValidacao};
use arte_educa_core::types::DbId;
use arte_educa_core::workflow::ListingScope;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::projeto::ProjetoRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tipo_projeto, status, status_gestor, status_cre, \
    justificativa_rejeicao, numero_processo_sei, data_submissao, data_aprovacao, \
    created_by, cre, municipio, unidade_educacional, inep, conteudo, version, \
    created_at, updated_at";

/// Scoping columns are denormalized from the content at write time so
/// listings can filter without unpacking JSONB. Blank values store NULL.
fn scope_field(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Provides persistence for projects and the version-checked transition
/// write.
pub struct ProjetoRepo;

impl ProjetoRepo {
    /// Insert a freshly created project aggregate, returning the stored row.
    pub async fn create(pool: &PgPool, projeto: &Projeto) -> Result<ProjetoRow, sqlx::Error> {
        let ident = &projeto.conteudo.identificacao;
        let query = format!(
            "INSERT INTO projetos \
                (id, tipo_projeto, status, status_gestor, status_cre, \
                 justificativa_rejeicao, numero_processo_sei, data_submissao, \
                 data_aprovacao, created_by, cre, municipio, unidade_educacional, \
                 inep, conteudo, version) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjetoRow>(&query)
            .bind(projeto.id)
            .bind(projeto.tipo_projeto.as_str())
            .bind(projeto.status.as_str())
            .bind(projeto.status_gestor.as_str())
            .bind(projeto.status_cre.as_str())
            .bind(&projeto.justificativa_rejeicao)
            .bind(&projeto.numero_processo_sei)
            .bind(projeto.data_submissao)
            .bind(projeto.data_aprovacao)
            .bind(&projeto.created_by)
            .bind(scope_field(&ident.cre))
            .bind(scope_field(&ident.municipio))
            .bind(scope_field(&ident.unidade_educacional))
            .bind(scope_field(&ident.inep))
            .bind(Json(&projeto.conteudo))
            .bind(projeto.version)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjetoRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projetos WHERE id = $1");
        sqlx::query_as::<_, ProjetoRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects visible to a scope, most recently created first.
    pub async fn list(pool: &PgPool, scope: &ListingScope) -> Result<Vec<ProjetoRow>, sqlx::Error> {
        match scope {
            ListingScope::All => {
                let query = format!("SELECT {COLUMNS} FROM projetos ORDER BY created_at DESC");
                sqlx::query_as::<_, ProjetoRow>(&query).fetch_all(pool).await
            }
            ListingScope::OwnedBy(email) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM projetos \
                     WHERE created_by = $1 \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, ProjetoRow>(&query)
                    .bind(email)
                    .fetch_all(pool)
                    .await
            }
            ListingScope::SchoolReview { inep } => {
                let query = format!(
                    "SELECT {COLUMNS} FROM projetos \
                     WHERE inep = $1 AND status <> $2 \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, ProjetoRow>(&query)
                    .bind(inep)
                    .bind(StatusProjeto::Rascunho.as_str())
                    .fetch_all(pool)
                    .await
            }
            ListingScope::RegionalReview { cre } => {
                let query = format!(
                    "SELECT {COLUMNS} FROM projetos \
                     WHERE cre = $1 AND status_gestor = $2 \
                     ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, ProjetoRow>(&query)
                    .bind(cre)
                    .bind(StatusValidacao::Validado.as_str())
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Persist a transitioned project.
    ///
    /// The write only lands if the stored `version` still matches the
    /// aggregate's; the version is bumped in the same statement. Returns
    /// `None` when another write got there first (or the row is gone).
    pub async fn update_versioned(
        pool: &PgPool,
        projeto: &Projeto,
    ) -> Result<Option<ProjetoRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let row = Self::update_versioned_in(&mut tx, projeto).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Version-checked update within an existing transaction. Used by the
    /// document repositories to flip a review flag in lockstep with the
    /// document write.
    ///
    /// `tipo_projeto` and `created_by` are immutable and never updated.
    pub(crate) async fn update_versioned_in(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        projeto: &Projeto,
    ) -> Result<Option<ProjetoRow>, sqlx::Error> {
        let ident = &projeto.conteudo.identificacao;
        let query = format!(
            "UPDATE projetos SET \
                status = $3, \
                status_gestor = $4, \
                status_cre = $5, \
                justificativa_rejeicao = $6, \
                numero_processo_sei = $7, \
                data_submissao = $8, \
                data_aprovacao = $9, \
                cre = $10, \
                municipio = $11, \
                unidade_educacional = $12, \
                inep = $13, \
                conteudo = $14, \
                version = version + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjetoRow>(&query)
            .bind(projeto.id)
            .bind(projeto.version)
            .bind(projeto.status.as_str())
            .bind(projeto.status_gestor.as_str())
            .bind(projeto.status_cre.as_str())
            .bind(&projeto.justificativa_rejeicao)
            .bind(&projeto.numero_processo_sei)
            .bind(projeto.data_submissao)
            .bind(projeto.data_aprovacao)
            .bind(scope_field(&ident.cre))
            .bind(scope_field(&ident.municipio))
            .bind(scope_field(&ident.unidade_educacional))
            .bind(scope_field(&ident.inep))
            .bind(Json(&projeto.conteudo))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Permanently delete a project by ID. Sibling documents cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projetos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
