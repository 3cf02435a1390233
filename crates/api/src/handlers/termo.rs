//! Handlers for the `/termos` resource.
//!
//! The termo de compromisso is the gestor-signed counterpart of a project.
//! Creation and editing run the gates in `documentos`; validation flips the
//! project's `status_gestor` in the same transaction as the document flag.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use arte_educa_core::documentos::{self, TermoTemplate, TipoDocumento};
use arte_educa_core::error::CoreError;
use arte_educa_core::types::DbId;
use arte_educa_core::workflow;
use arte_educa_db::models::projeto::ProjetoRecord;
use arte_educa_db::models::termo::{
    CreateTermoCompromisso, TermoCompromisso, UpdateTermoCompromisso,
};
use arte_educa_db::repositories::{ProjetoRepo, TermoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::actor::CurrentActor;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query for `GET /api/termos`.
#[derive(Debug, Deserialize)]
pub struct ListTermosQuery {
    pub projeto_id: Option<DbId>,
}

/// Response of `POST /api/termos/{id}/validar`: the signed termo plus the
/// project whose `status_gestor` flipped with it.
#[derive(Debug, Serialize)]
pub struct ValidacaoTermoResponse {
    pub termo: TermoCompromisso,
    pub projeto: ProjetoRecord,
}

/// POST /api/termos
pub async fn create(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(mut input): Json<CreateTermoCompromisso>,
) -> AppResult<(StatusCode, Json<TermoCompromisso>)> {
    let record = load_projeto(&state, input.projeto_id).await?;
    documentos::ensure_can_create(
        TipoDocumento::TermoCompromisso,
        &record.projeto,
        actor.perfil,
    )?;

    let identificacao = &record.projeto.conteudo.identificacao;

    // The signatories list defaults to the professor named on the project.
    let professores_em_branco = input
        .professores
        .as_deref()
        .map_or(true, |p| p.trim().is_empty());
    if professores_em_branco {
        input.professores = Some(identificacao.professor.nome.clone());
    }

    let conteudo = match &input.conteudo {
        Some(texto) if !texto.trim().is_empty() => texto.clone(),
        _ => documentos::termo_default_content(&TermoTemplate {
            gestor_nome: input.gestor_nome.as_deref().unwrap_or(""),
            gestor_rg: input.gestor_rg.as_deref().unwrap_or(""),
            gestor_cpf: input.gestor_cpf.as_deref().unwrap_or(""),
            unidade_educacional: &identificacao.unidade_educacional,
            inep: &identificacao.inep,
            portaria: input.portaria.as_deref().unwrap_or(""),
            professores: input.professores.as_deref().unwrap_or(""),
        }),
    };

    let inep = identificacao.inep.trim();
    let unidade_educacional_id = if inep.is_empty() { None } else { Some(inep) };

    let termo = TermoRepo::create(&state.pool, &input, unidade_educacional_id, &conteudo).await?;
    Ok((StatusCode::CREATED, Json(termo)))
}

/// GET /api/termos
pub async fn list(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Query(query): Query<ListTermosQuery>,
) -> AppResult<Json<Vec<TermoCompromisso>>> {
    let termos = match query.projeto_id {
        Some(projeto_id) => TermoRepo::find_by_projeto_id(&state.pool, projeto_id)
            .await?
            .into_iter()
            .collect(),
        None => TermoRepo::list(&state.pool).await?,
    };
    Ok(Json(termos))
}

/// GET /api/termos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<TermoCompromisso>> {
    let termo = TermoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TermoCompromisso",
            id,
        }))?;
    Ok(Json(termo))
}

/// PUT /api/termos/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTermoCompromisso>,
) -> AppResult<Json<TermoCompromisso>> {
    let termo = TermoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TermoCompromisso",
            id,
        }))?;
    documentos::ensure_can_edit(TipoDocumento::TermoCompromisso, termo.validado, actor.perfil)?;

    let updated = TermoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TermoCompromisso",
            id,
        }))?;
    Ok(Json(updated))
}

/// POST /api/termos/{id}/validar
///
/// Marks the termo as signed and flips the project's `status_gestor` in
/// the same transaction. Either both writes land or neither does.
pub async fn validar(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DbId>,
) -> AppResult<Json<ValidacaoTermoResponse>> {
    let termo = TermoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TermoCompromisso",
            id,
        }))?;
    documentos::ensure_can_validate(TipoDocumento::TermoCompromisso, termo.validado, actor.perfil)?;

    let record = load_projeto(&state, termo.projeto_id).await?;
    let action = TipoDocumento::TermoCompromisso.validation_action();
    let now = chrono::Utc::now();
    let updated = workflow::apply_action(&record.projeto, &actor, &action, now)?;

    match TermoRepo::validate(&state.pool, id, &updated, now).await? {
        Some((termo, row)) => Ok(Json(ValidacaoTermoResponse {
            termo,
            projeto: row.into_record()?,
        })),
        None => Err(AppError::Core(CoreError::ConcurrentModification {
            entity: "TermoCompromisso",
            id,
        })),
    }
}

/// DELETE /api/termos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_actor): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TermoRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TermoCompromisso",
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
