//! Handlers for the `/escolas` school registry.
//!
//! Reads are open to any authenticated actor; mutations are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use arte_educa_core::error::CoreError;
use arte_educa_core::types::DbId;
use arte_educa_db::models::escola::{CreateEscola, Escola, UpdateEscola};
use arte_educa_db::repositories::EscolaRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::actor::CurrentActor;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query for `GET /api/escolas`.
#[derive(Debug, Deserialize)]
pub struct ListEscolasQuery {
    /// Case-insensitive substring match over name, municipality, CRE,
    /// INEP, and email.
    pub search: Option<String>,
}

/// GET /api/escolas
pub async fn list(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Query(query): Query<ListEscolasQuery>,
) -> AppResult<Json<Vec<Escola>>> {
    let escolas = EscolaRepo::list(&state.pool, query.search.as_deref()).await?;
    Ok(Json(escolas))
}

/// POST /api/escolas
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_actor): RequireAdmin,
    Json(input): Json<CreateEscola>,
) -> AppResult<(StatusCode, Json<Escola>)> {
    let escola = EscolaRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(escola)))
}

/// GET /api/escolas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<Escola>> {
    let escola = EscolaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Escola",
            id,
        }))?;
    Ok(Json(escola))
}

/// PUT /api/escolas/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_actor): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEscola>,
) -> AppResult<Json<Escola>> {
    let escola = EscolaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Escola",
            id,
        }))?;
    Ok(Json(escola))
}

/// DELETE /api/escolas/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_actor): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EscolaRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Escola",
            id,
        }))
    }
}
