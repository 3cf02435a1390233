//! Repository for the `termos_compromisso` table.

use arte_educa_core::projeto::Projeto;
use arte_educa_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::projeto::ProjetoRow;
use crate::models::termo::{CreateTermoCompromisso, TermoCompromisso, UpdateTermoCompromisso};
use crate::repositories::ProjetoRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, projeto_id, unidade_educacional_id, gestor_nome, gestor_cpf, \
    gestor_rg, portaria, professores, conteudo, validado, data_validacao, \
    created_at, updated_at";

/// Provides persistence for termos and the lockstep validation write.
pub struct TermoRepo;

impl TermoRepo {
    /// Insert a new termo for a project. At most one termo exists per
    /// project; a second insert fails on the unique constraint.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTermoCompromisso,
        unidade_educacional_id: Option<&str>,
        conteudo: &str,
    ) -> Result<TermoCompromisso, sqlx::Error> {
        let query = format!(
            "INSERT INTO termos_compromisso \
                (projeto_id, unidade_educacional_id, gestor_nome, gestor_cpf, \
                 gestor_rg, portaria, professores, conteudo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TermoCompromisso>(&query)
            .bind(input.projeto_id)
            .bind(unidade_educacional_id)
            .bind(&input.gestor_nome)
            .bind(&input.gestor_cpf)
            .bind(&input.gestor_rg)
            .bind(&input.portaria)
            .bind(&input.professores)
            .bind(conteudo)
            .fetch_one(pool)
            .await
    }

    /// Find a termo by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TermoCompromisso>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM termos_compromisso WHERE id = $1");
        sqlx::query_as::<_, TermoCompromisso>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the termo belonging to a project.
    pub async fn find_by_projeto_id(
        pool: &PgPool,
        projeto_id: DbId,
    ) -> Result<Option<TermoCompromisso>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM termos_compromisso WHERE projeto_id = $1");
        sqlx::query_as::<_, TermoCompromisso>(&query)
            .bind(projeto_id)
            .fetch_optional(pool)
            .await
    }

    /// List all termos, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<TermoCompromisso>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM termos_compromisso ORDER BY created_at DESC");
        sqlx::query_as::<_, TermoCompromisso>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a pending termo. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTermoCompromisso,
    ) -> Result<Option<TermoCompromisso>, sqlx::Error> {
        let query = format!(
            "UPDATE termos_compromisso SET \
                gestor_nome = COALESCE($2, gestor_nome), \
                gestor_cpf = COALESCE($3, gestor_cpf), \
                gestor_rg = COALESCE($4, gestor_rg), \
                portaria = COALESCE($5, portaria), \
                professores = COALESCE($6, professores), \
                conteudo = COALESCE($7, conteudo), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TermoCompromisso>(&query)
            .bind(id)
            .bind(&input.gestor_nome)
            .bind(&input.gestor_cpf)
            .bind(&input.gestor_rg)
            .bind(&input.portaria)
            .bind(&input.professores)
            .bind(&input.conteudo)
            .fetch_optional(pool)
            .await
    }

    /// Mark a termo validated and persist the project's gestor flag in
    /// the same transaction.
    ///
    /// `projeto` is the already-transitioned aggregate; its version check
    /// rides along. Returns `None` (and rolls back) when either write
    /// loses a race: the termo was validated concurrently or the project
    /// version no longer matches.
    pub async fn validate(
        pool: &PgPool,
        id: DbId,
        projeto: &Projeto,
        data_validacao: Timestamp,
    ) -> Result<Option<(TermoCompromisso, ProjetoRow)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE termos_compromisso SET \
                validado = TRUE, \
                data_validacao = $2, \
                updated_at = NOW() \
             WHERE id = $1 AND validado = FALSE \
             RETURNING {COLUMNS}"
        );
        let termo = sqlx::query_as::<_, TermoCompromisso>(&query)
            .bind(id)
            .bind(data_validacao)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(termo) = termo else {
            return Ok(None);
        };

        let row = ProjetoRepo::update_versioned_in(&mut tx, projeto).await?;
        let Some(row) = row else {
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some((termo, row)))
    }

    /// Delete a termo by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM termos_compromisso WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
