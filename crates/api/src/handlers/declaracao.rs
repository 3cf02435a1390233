//! Handlers for the `/declaracoes` resource.
//!
//! The declaração is the CRE-signed counterpart of a project. It can only
//! be created once the gestor has validated, and its validation flips the
//! project's `status_cre` in the same transaction as the document flag.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use arte_educa_core::documentos::{self, TipoDocumento};
use arte_educa_core::error::CoreError;
use arte_educa_core::types::DbId;
use arte_educa_core::workflow;
use arte_educa_db::models::declaracao::{
    CreateDeclaracaoCre, DeclaracaoCre, UpdateDeclaracaoCre,
};
use arte_educa_db::models::projeto::ProjetoRecord;
use arte_educa_db::repositories::{DeclaracaoRepo, ProjetoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::actor::CurrentActor;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query for `GET /api/declaracoes`.
#[derive(Debug, Deserialize)]
pub struct ListDeclaracoesQuery {
    pub projeto_id: Option<DbId>,
}

/// Response of `POST /api/declaracoes/{id}/validar`: the signed declaração
/// plus the project whose `status_cre` flipped with it.
#[derive(Debug, Serialize)]
pub struct ValidacaoDeclaracaoResponse {
    pub declaracao: DeclaracaoCre,
    pub projeto: ProjetoRecord,
}

/// POST /api/declaracoes
pub async fn create(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(input): Json<CreateDeclaracaoCre>,
) -> AppResult<(StatusCode, Json<DeclaracaoCre>)> {
    let record = load_projeto(&state, input.projeto_id).await?;
    documentos::ensure_can_create(TipoDocumento::DeclaracaoCre, &record.projeto, actor.perfil)?;

    let conteudo = match &input.conteudo {
        Some(texto) if !texto.trim().is_empty() => texto.clone(),
        _ => documentos::declaracao_default_content(
            record.projeto.tipo_projeto,
            &record.projeto.conteudo.identificacao,
            chrono::Utc::now(),
        ),
    };

    let declaracao = DeclaracaoRepo::create(&state.pool, &input, &conteudo).await?;
    Ok((StatusCode::CREATED, Json(declaracao)))
}

/// GET /api/declaracoes
pub async fn list(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Query(query): Query<ListDeclaracoesQuery>,
) -> AppResult<Json<Vec<DeclaracaoCre>>> {
    let declaracoes = match query.projeto_id {
        Some(projeto_id) => DeclaracaoRepo::find_by_projeto_id(&state.pool, projeto_id)
            .await?
            .into_iter()
            .collect(),
        None => DeclaracaoRepo::list(&state.pool).await?,
    };
    Ok(Json(declaracoes))
}

/// GET /api/declaracoes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeclaracaoCre>> {
    let declaracao = DeclaracaoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DeclaracaoCre",
            id,
        }))?;
    Ok(Json(declaracao))
}

/// PUT /api/declaracoes/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeclaracaoCre>,
) -> AppResult<Json<DeclaracaoCre>> {
    let declaracao = DeclaracaoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DeclaracaoCre",
            id,
        }))?;
    documentos::ensure_can_edit(TipoDocumento::DeclaracaoCre, declaracao.validado, actor.perfil)?;

    let updated = DeclaracaoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DeclaracaoCre",
            id,
        }))?;
    Ok(Json(updated))
}

/// POST /api/declaracoes/{id}/validar
///
/// Marks the declaração as signed and flips the project's `status_cre` in
/// the same transaction. Either both writes land or neither does.
pub async fn validar(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<ValidacaoDeclaracaoResponse>> {
    let declaracao = DeclaracaoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DeclaracaoCre",
            id,
        }))?;
    documentos::ensure_can_validate(
        TipoDocumento::DeclaracaoCre,
        declaracao.validado,
        actor.perfil,
    )?;

    let record = load_projeto(&state, declaracao.projeto_id).await?;
    let action = TipoDocumento::DeclaracaoCre.validation_action();
    let now = chrono::Utc::now();
    let updated = workflow::apply_action(&record.projeto, &actor, &action, now)?;

    match DeclaracaoRepo::validate(&state.pool, id, &updated, now).await? {
        Some((declaracao, row)) => Ok(Json(ValidacaoDeclaracaoResponse {
            declaracao,
            projeto: row.into_record()?,
        })),
        None => Err(AppError::Core(CoreError::ConcurrentModification {
            entity: "DeclaracaoCre",
            id,
        })),
    }
}

/// DELETE /api/declaracoes/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_actor): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DeclaracaoRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "DeclaracaoCre",
            id,
        }))
    }
}

async fn load_projeto(state: &AppState, id: DbId) -> Result<ProjetoRecord, AppError> {
    let row = ProjetoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Projeto",
            id,
        }))?;
    Ok(row.into_record()?)
}
