//! Repository for the `declaracoes_cre` table.

use arte_educa_core::projeto::Projeto;
use arte_educa_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::declaracao::{CreateDeclaracaoCre, DeclaracaoCre, UpdateDeclaracaoCre};
use crate::models::projeto::ProjetoRow;
use crate::repositories::ProjetoRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, projeto_id, conteudo, validado, data_validacao, created_at, updated_at";

/// Provides persistence for declarações and the lockstep validation write.
pub struct DeclaracaoRepo;

impl DeclaracaoRepo {
    /// Insert a new declaração for a project. At most one exists per
    /// project; a second insert fails on the unique constraint.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDeclaracaoCre,
        conteudo: &str,
    ) -> Result<DeclaracaoCre, sqlx::Error> {
        let query = format!(
            "INSERT INTO declaracoes_cre (projeto_id, conteudo) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeclaracaoCre>(&query)
            .bind(input.projeto_id)
            .bind(conteudo)
            .fetch_one(pool)
            .await
    }

    /// Find a declaração by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DeclaracaoCre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM declaracoes_cre WHERE id = $1");
        sqlx::query_as::<_, DeclaracaoCre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the declaração belonging to a project.
    pub async fn find_by_projeto_id(
        pool: &PgPool,
        projeto_id: DbId,
    ) -> Result<Option<DeclaracaoCre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM declaracoes_cre WHERE projeto_id = $1");
        sqlx::query_as::<_, DeclaracaoCre>(&query)
            .bind(projeto_id)
            .fetch_optional(pool)
            .await
    }

    /// List all declarações, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<DeclaracaoCre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM declaracoes_cre ORDER BY created_at DESC");
        sqlx::query_as::<_, DeclaracaoCre>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a pending declaração. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDeclaracaoCre,
    ) -> Result<Option<DeclaracaoCre>, sqlx::Error> {
        let query = format!(
            "UPDATE declaracoes_cre SET \
                conteudo = COALESCE($2, conteudo), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeclaracaoCre>(&query)
            .bind(id)
            .bind(&input.conteudo)
            .fetch_optional(pool)
            .await
    }

    /// Mark a declaração validated and persist the project's CRE flag in
    /// the same transaction.
    ///
    /// Returns `None` (and rolls back) when either write loses a race.
    pub async fn validate(
        pool: &PgPool,
        id: DbId,
        projeto: &Projeto,
        data_validacao: Timestamp,
    ) -> Result<Option<(DeclaracaoCre, ProjetoRow)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE declaracoes_cre SET \
                validado = TRUE, \
                data_validacao = $2, \
                updated_at = NOW() \
             WHERE id = $1 AND validado = FALSE \
             RETURNING {COLUMNS}"
        );
        let declaracao = sqlx::query_as::<_, DeclaracaoCre>(&query)
            .bind(id)
            .bind(data_validacao)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(declaracao) = declaracao else {
            return Ok(None);
        };

        let row = ProjetoRepo::update_versioned_in(&mut tx, projeto).await?;
        let Some(row) = row else {
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some((declaracao, row)))
    }

    /// Delete a declaração by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM declaracoes_cre WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
