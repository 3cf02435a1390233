//! Repository for the `escolas` table.

use arte_educa_core::types::DbId;
use sqlx::PgPool;

use crate::models::escola::{CreateEscola, Escola, UpdateEscola};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, inep, nome, cre, municipio, endereco, telefone, email, created_at, updated_at";

/// Provides CRUD operations for the school registry.
pub struct EscolaRepo;

impl EscolaRepo {
    /// Register a school. INEP codes are unique; a duplicate insert fails
    /// on the constraint.
    pub async fn create(pool: &PgPool, input: &CreateEscola) -> Result<Escola, sqlx::Error> {
        let query = format!(
            "INSERT INTO escolas (inep, nome, cre, municipio, endereco, telefone, email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Escola>(&query)
            .bind(&input.inep)
            .bind(&input.nome)
            .bind(&input.cre)
            .bind(&input.municipio)
            .bind(&input.endereco)
            .bind(&input.telefone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a school by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Escola>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM escolas WHERE id = $1");
        sqlx::query_as::<_, Escola>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List schools ordered by name, optionally filtered by a search term
    /// matched against name, municipality, CRE, INEP, and email.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Escola>, sqlx::Error> {
        match search {
            Some(term) if !term.trim().is_empty() => {
                let pattern = format!("%{}%", term.trim());
                let query = format!(
                    "SELECT {COLUMNS} FROM escolas \
                     WHERE nome ILIKE $1 \
                        OR municipio ILIKE $1 \
                        OR cre ILIKE $1 \
                        OR inep ILIKE $1 \
                        OR email ILIKE $1 \
                     ORDER BY nome"
                );
                sqlx::query_as::<_, Escola>(&query)
                    .bind(pattern)
                    .fetch_all(pool)
                    .await
            }
            _ => {
                let query = format!("SELECT {COLUMNS} FROM escolas ORDER BY nome");
                sqlx::query_as::<_, Escola>(&query).fetch_all(pool).await
            }
        }
    }

    /// Update a school. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEscola,
    ) -> Result<Option<Escola>, sqlx::Error> {
        let query = format!(
            "UPDATE escolas SET \
                inep = COALESCE($2, inep), \
                nome = COALESCE($3, nome), \
                cre = COALESCE($4, cre), \
                municipio = COALESCE($5, municipio), \
                endereco = COALESCE($6, endereco), \
                telefone = COALESCE($7, telefone), \
                email = COALESCE($8, email), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Escola>(&query)
            .bind(id)
            .bind(&input.inep)
            .bind(&input.nome)
            .bind(&input.cre)
            .bind(&input.municipio)
            .bind(&input.endereco)
            .bind(&input.telefone)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a school by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM escolas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
