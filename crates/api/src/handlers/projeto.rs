//! Handlers for the `/projetos` resource.
//!
//! Writes never patch fields directly: creation goes through
//! [`workflow::create_project`] and every later change is a named transition
//! run by [`workflow::apply_action`], persisted with the version check in
//! [`ProjetoRepo::update_versioned`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use arte_educa_core::error::CoreError;
use arte_educa_core::projeto::{ConteudoProjeto, TipoProjeto};
use arte_educa_core::status::StatusProjeto;
use arte_educa_core::types::DbId;
use arte_educa_core::workflow::{self, Actor, WorkflowAction};
use arte_educa_db::models::projeto::ProjetoRecord;
use arte_educa_db::repositories::ProjetoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::actor::CurrentActor;
use crate::state::AppState;

/// Body of `POST /api/projetos`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjetoRequest {
    pub tipo_projeto: TipoProjeto,
    #[serde(default)]
    pub conteudo: ConteudoProjeto,
    /// `save_draft` (default) or `submit`.
    #[serde(default)]
    pub action: CreateAction,
}

/// The two ways a project can come into existence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateAction {
    #[default]
    SaveDraft,
    Submit,
}

/// Body of `PUT /api/projetos/{id}`: the caller's version token plus the
/// named transition (tagged by `action`) to apply.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub version: i64,
    #[serde(flatten)]
    pub action: WorkflowAction,
}

/// Optional exact-match filters for `GET /api/projetos`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjetosQuery {
    pub status: Option<String>,
    pub tipo: Option<String>,
}

/// Read-side projection for `GET /api/projetos/{id}/acoes`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcoesResponse {
    pub somente_leitura: bool,
    pub acoes: Vec<&'static str>,
}

/// POST /api/projetos
pub async fn create(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(input): Json<CreateProjetoRequest>,
) -> AppResult<(StatusCode, Json<ProjetoRecord>)> {
    let projeto = workflow::create_project(
        DbId::new_v4(),
        &actor,
        input.tipo_projeto,
        input.conteudo,
        input.action == CreateAction::Submit,
        chrono::Utc::now(),
    )?;
    let row = ProjetoRepo::create(&state.pool, &projeto).await?;
    Ok((StatusCode::CREATED, Json(row.into_record()?)))
}

/// GET /api/projetos
pub async fn list(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<ListProjetosQuery>,
) -> AppResult<Json<Vec<ProjetoRecord>>> {
    let status = query
        .status
        .as_deref()
        .map(StatusProjeto::from_str_db)
        .transpose()?;
    let tipo = query
        .tipo
        .as_deref()
        .map(TipoProjeto::from_str_db)
        .transpose()?;

    let scope = workflow::listing_scope(&actor)?;
    let rows = ProjetoRepo::list(&state.pool, &scope).await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(row.into_record()?);
    }

    // Exact-match filters on top of the actor's scope.
    if let Some(status) = status {
        records.retain(|r| r.projeto.status == status);
    }
    if let Some(tipo) = tipo {
        records.retain(|r| r.projeto.tipo_projeto == tipo);
    }

    Ok(Json(records))
}

/// GET /api/projetos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjetoRecord>> {
    let record = fetch_visible(&state, &actor, id).await?;
    Ok(Json(record))
}

/// PUT /api/projetos/{id}
pub async fn transition(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<Json<ProjetoRecord>> {
    let row = ProjetoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Projeto",
            id,
        }))?;
    let stored = row.into_record()?;

    if stored.projeto.version != input.version {
        return Err(AppError::Core(CoreError::ConcurrentModification {
            entity: "Projeto",
            id,
        }));
    }

    let updated = workflow::apply_action(&stored.projeto, &actor, &input.action, chrono::Utc::now())?;

    match ProjetoRepo::update_versioned(&state.pool, &updated).await? {
        Some(row) => Ok(Json(row.into_record()?)),
        // The version matched on read but the write landed on nothing:
        // either a concurrent transition won or the row is gone.
        None => {
            if ProjetoRepo::find_by_id(&state.pool, id).await?.is_some() {
                Err(AppError::Core(CoreError::ConcurrentModification {
                    entity: "Projeto",
                    id,
                }))
            } else {
                Err(AppError::Core(CoreError::NotFound {
                    entity: "Projeto",
                    id,
                }))
            }
        }
    }
}

/// DELETE /api/projetos/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let row = ProjetoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Projeto",
            id,
        }))?;
    let record = row.into_record()?;

    if !workflow::can_delete(&record.projeto, &actor) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This project cannot be deleted by the current user".into(),
        )));
    }

    let deleted = ProjetoRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Projeto",
            id,
        }))
    }
}

/// GET /api/projetos/{id}/acoes
pub async fn acoes(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<AcoesResponse>> {
    let record = fetch_visible(&state, &actor, id).await?;
    Ok(Json(AcoesResponse {
        somente_leitura: workflow::is_read_only(&record.projeto, &actor),
        acoes: workflow::available_actions(&record.projeto, &actor),
    }))
}

/// Load a project and apply the actor's listing scope, so records outside
/// the actor's view read exactly like missing ones.
async fn fetch_visible(
    state: &AppState,
    actor: &Actor,
    id: DbId,
) -> Result<ProjetoRecord, AppError> {
    let scope = workflow::listing_scope(actor)?;
    let row = ProjetoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Projeto",
            id,
        }))?;
    let record = row.into_record()?;
    if !scope.matches(&record.projeto) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Projeto",
            id,
        }));
    }
    Ok(record)
}
