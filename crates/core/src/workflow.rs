//! The approval workflow engine.
//!
//! A pure function over `(project, actor, action, now)`: it either returns
//! the updated project record, ready to persist verbatim, or an error. No
//! I/O, no clock access, no ambient state; the caller supplies everything,
//! including the timestamp.
//!
//! Check order is fixed: role, then ownership, then state precondition,
//! then action input. A wrong role is always `Forbidden`, even in a state
//! where the action would be illegal anyway.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::projeto::{ConteudoProjeto, Projeto, TipoProjeto};
use crate::roles::Perfil;
use crate::status::{StatusProjeto, StatusValidacao};
use crate::types::{DbId, Timestamp};
use crate::validation::validate_submission;

/* --------------------------------------------------------------------------
Actions
-------------------------------------------------------------------------- */

pub const ACTION_SAVE_DRAFT: &str = "save_draft";
pub const ACTION_SUBMIT: &str = "submit";
pub const ACTION_VALIDATE_AS_GESTOR: &str = "validate_as_gestor";
pub const ACTION_VALIDATE_AS_CRE: &str = "validate_as_cre";
pub const ACTION_APPROVE: &str = "approve";
pub const ACTION_REJECT: &str = "reject";
pub const ACTION_UPDATE_SEI_NUMBER: &str = "update_sei_number";

/// A requested transition plus its action-specific payload.
///
/// This is the wire shape of `PUT /api/projetos/{id}` (minus the `version`
/// token): a tagged `action` field selects the transition, the remaining
/// keys carry its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WorkflowAction {
    SaveDraft {
        conteudo: ConteudoProjeto,
    },
    Submit {
        conteudo: ConteudoProjeto,
    },
    ValidateAsGestor,
    ValidateAsCre,
    Approve {
        #[serde(rename = "numeroProcessoSEI")]
        numero_processo_sei: String,
    },
    Reject {
        #[serde(rename = "justificativaRejeicao")]
        justificativa_rejeicao: String,
    },
    UpdateSeiNumber {
        #[serde(rename = "numeroProcessoSEI")]
        numero_processo_sei: String,
    },
}

impl WorkflowAction {
    /// Canonical action name, as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SaveDraft { .. } => ACTION_SAVE_DRAFT,
            Self::Submit { .. } => ACTION_SUBMIT,
            Self::ValidateAsGestor => ACTION_VALIDATE_AS_GESTOR,
            Self::ValidateAsCre => ACTION_VALIDATE_AS_CRE,
            Self::Approve { .. } => ACTION_APPROVE,
            Self::Reject { .. } => ACTION_REJECT,
            Self::UpdateSeiNumber { .. } => ACTION_UPDATE_SEI_NUMBER,
        }
    }

    /// The single role allowed to perform this action.
    pub fn required_role(&self) -> Perfil {
        match self {
            Self::SaveDraft { .. } | Self::Submit { .. } => Perfil::Professor,
            Self::ValidateAsGestor => Perfil::Gestor,
            Self::ValidateAsCre => Perfil::Articulador,
            Self::Approve { .. } | Self::Reject { .. } | Self::UpdateSeiNumber { .. } => {
                Perfil::Admin
            }
        }
    }
}

/* --------------------------------------------------------------------------
Actor
-------------------------------------------------------------------------- */

/// The authenticated actor a transition runs as. Built per request and
/// passed explicitly into every engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub perfil: Perfil,
    pub email: String,
    /// Regional coordination the articulador acts for.
    pub cre: Option<String>,
    /// School INEP code, used for gestor scoping.
    pub inep: Option<String>,
}

impl Actor {
    pub fn new(perfil: Perfil, email: impl Into<String>) -> Self {
        Self {
            perfil,
            email: email.into(),
            cre: None,
            inep: None,
        }
    }
}

/* --------------------------------------------------------------------------
Transitions
-------------------------------------------------------------------------- */

/// Build a brand-new project in `rascunho` for the acting professor,
/// optionally submitting it in the same step (which runs the full
/// submission validation).
///
/// `id` and `now` are supplied by the caller so this stays pure.
pub fn create_project(
    id: DbId,
    actor: &Actor,
    tipo_projeto: TipoProjeto,
    conteudo: ConteudoProjeto,
    submit: bool,
    now: Timestamp,
) -> Result<Projeto, CoreError> {
    if actor.perfil != Perfil::Professor {
        return Err(CoreError::Forbidden(format!(
            "Role '{}' cannot create projects",
            actor.perfil.as_str()
        )));
    }

    let projeto = Projeto {
        id,
        tipo_projeto,
        status: StatusProjeto::Rascunho,
        status_gestor: StatusValidacao::Pendente,
        status_cre: StatusValidacao::Pendente,
        justificativa_rejeicao: None,
        numero_processo_sei: None,
        data_submissao: None,
        data_aprovacao: None,
        created_by: actor.email.clone(),
        version: 1,
        conteudo,
    };

    if submit {
        let action = WorkflowAction::Submit {
            conteudo: projeto.conteudo.clone(),
        };
        apply_action(&projeto, actor, &action, now)
    } else {
        Ok(projeto)
    }
}

/// Apply a named transition to a project, returning the updated record.
///
/// The returned record keeps the caller's `version`; persisting it is the
/// storage layer's job, including the optimistic version check and bump.
pub fn apply_action(
    projeto: &Projeto,
    actor: &Actor,
    action: &WorkflowAction,
    now: Timestamp,
) -> Result<Projeto, CoreError> {
    let required = action.required_role();
    if actor.perfil != required {
        return Err(CoreError::Forbidden(format!(
            "Role '{}' cannot perform action '{}'",
            actor.perfil.as_str(),
            action.name()
        )));
    }

    if required == Perfil::Professor && actor.email != projeto.created_by {
        return Err(CoreError::Forbidden(
            "Only the professor who created this project can modify it".into(),
        ));
    }

    let mut updated = projeto.clone();

    match action {
        WorkflowAction::SaveDraft { conteudo } => {
            if !projeto.status.is_editable() {
                return Err(CoreError::InvalidTransition(format!(
                    "Cannot save draft while status is '{}'",
                    projeto.status.as_str()
                )));
            }
            updated.status = StatusProjeto::Rascunho;
            updated.conteudo = conteudo.clone();
        }

        WorkflowAction::Submit { conteudo } => {
            if !projeto.status.is_editable() {
                return Err(CoreError::InvalidTransition(format!(
                    "Cannot submit while status is '{}'",
                    projeto.status.as_str()
                )));
            }
            let violations = validate_submission(conteudo);
            if !violations.is_empty() {
                return Err(CoreError::ValidationFailed(violations));
            }
            updated.conteudo = conteudo.clone();
            updated.status = StatusProjeto::Enviado;
            updated.data_submissao = Some(now);
            updated.justificativa_rejeicao = None;
            updated.status_gestor = StatusValidacao::Pendente;
            updated.status_cre = StatusValidacao::Pendente;
        }

        WorkflowAction::ValidateAsGestor => {
            if projeto.status != StatusProjeto::Enviado {
                return Err(CoreError::InvalidTransition(format!(
                    "Gestor validation requires a submitted project, status is '{}'",
                    projeto.status.as_str()
                )));
            }
            if projeto.status_gestor != StatusValidacao::Pendente {
                return Err(CoreError::InvalidTransition(
                    "Project is already validated by the gestor".into(),
                ));
            }
            updated.status_gestor = StatusValidacao::Validado;
        }

        WorkflowAction::ValidateAsCre => {
            if projeto.status != StatusProjeto::Enviado {
                return Err(CoreError::InvalidTransition(format!(
                    "CRE validation requires a submitted project, status is '{}'",
                    projeto.status.as_str()
                )));
            }
            if projeto.status_gestor != StatusValidacao::Validado {
                return Err(CoreError::InvalidTransition(
                    "CRE validation requires the gestor validation first".into(),
                ));
            }
            if projeto.status_cre != StatusValidacao::Pendente {
                return Err(CoreError::InvalidTransition(
                    "Project is already validated by the CRE".into(),
                ));
            }
            updated.status_cre = StatusValidacao::Validado;
        }

        WorkflowAction::Approve {
            numero_processo_sei,
        } => {
            if projeto.status_cre != StatusValidacao::Validado {
                return Err(CoreError::InvalidTransition(
                    "Approval requires the CRE validation first".into(),
                ));
            }
            if projeto.status == StatusProjeto::Aprovado {
                return Err(CoreError::InvalidTransition(
                    "Project is already approved".into(),
                ));
            }
            let numero = numero_processo_sei.trim();
            if numero.is_empty() {
                return Err(CoreError::validation(
                    "numeroProcessoSEI",
                    "Número do processo SEI é obrigatório",
                ));
            }
            updated.status = StatusProjeto::Aprovado;
            updated.data_aprovacao = Some(now);
            updated.numero_processo_sei = Some(numero.to_string());
            updated.justificativa_rejeicao = None;
        }

        WorkflowAction::Reject {
            justificativa_rejeicao,
        } => {
            if projeto.status != StatusProjeto::Enviado {
                return Err(CoreError::InvalidTransition(format!(
                    "Only submitted projects can be rejected, status is '{}'",
                    projeto.status.as_str()
                )));
            }
            let justificativa = justificativa_rejeicao.trim();
            if justificativa.is_empty() {
                return Err(CoreError::validation(
                    "justificativaRejeicao",
                    "Justificativa da rejeição é obrigatória",
                ));
            }
            // Rejection is a full reset of the review flags: the project
            // goes back to the professor as an editable draft.
            updated.status = StatusProjeto::Rascunho;
            updated.status_gestor = StatusValidacao::Pendente;
            updated.status_cre = StatusValidacao::Pendente;
            updated.justificativa_rejeicao = Some(justificativa.to_string());
            updated.numero_processo_sei = None;
        }

        WorkflowAction::UpdateSeiNumber {
            numero_processo_sei,
        } => {
            if projeto.status != StatusProjeto::Aprovado {
                return Err(CoreError::InvalidTransition(format!(
                    "SEI number can only be edited on approved projects, status is '{}'",
                    projeto.status.as_str()
                )));
            }
            let numero = numero_processo_sei.trim();
            if numero.is_empty() {
                return Err(CoreError::validation(
                    "numeroProcessoSEI",
                    "Número do processo SEI é obrigatório",
                ));
            }
            updated.numero_processo_sei = Some(numero.to_string());
        }
    }

    Ok(updated)
}

/* --------------------------------------------------------------------------
Read-side projections
-------------------------------------------------------------------------- */

/// Whether the project's content is read-only for this actor. Only the
/// owning professor may edit, and only while the project is draft-like.
pub fn is_read_only(projeto: &Projeto, actor: &Actor) -> bool {
    !(actor.perfil == Perfil::Professor
        && actor.email == projeto.created_by
        && projeto.status.is_editable())
}

/// The actions this actor could perform on the project right now. Mirrors
/// the preconditions of [`apply_action`], ignoring action input.
pub fn available_actions(projeto: &Projeto, actor: &Actor) -> Vec<&'static str> {
    let mut actions = Vec::new();

    match actor.perfil {
        Perfil::Professor => {
            if actor.email == projeto.created_by && projeto.status.is_editable() {
                actions.push(ACTION_SAVE_DRAFT);
                actions.push(ACTION_SUBMIT);
            }
        }
        Perfil::Gestor => {
            if projeto.status == StatusProjeto::Enviado
                && projeto.status_gestor == StatusValidacao::Pendente
            {
                actions.push(ACTION_VALIDATE_AS_GESTOR);
            }
        }
        Perfil::Articulador => {
            if projeto.status == StatusProjeto::Enviado
                && projeto.status_gestor == StatusValidacao::Validado
                && projeto.status_cre == StatusValidacao::Pendente
            {
                actions.push(ACTION_VALIDATE_AS_CRE);
            }
        }
        Perfil::Admin => {
            if projeto.status_cre == StatusValidacao::Validado
                && projeto.status != StatusProjeto::Aprovado
            {
                actions.push(ACTION_APPROVE);
            }
            if projeto.status == StatusProjeto::Enviado {
                actions.push(ACTION_REJECT);
            }
            if projeto.status == StatusProjeto::Aprovado {
                actions.push(ACTION_UPDATE_SEI_NUMBER);
            }
        }
    }

    actions
}

/// Whether this actor may delete the project. Deletion is a CRUD
/// operation, not a workflow transition: admins always may, the owning
/// professor only while the project is draft-like.
pub fn can_delete(projeto: &Projeto, actor: &Actor) -> bool {
    match actor.perfil {
        Perfil::Admin => true,
        Perfil::Professor => {
            actor.email == projeto.created_by && projeto.status.is_editable()
        }
        Perfil::Gestor | Perfil::Articulador => false,
    }
}

/* --------------------------------------------------------------------------
Listing scope
-------------------------------------------------------------------------- */

/// Which projects an actor sees when listing. The storage layer translates
/// this into WHERE clauses; [`ListingScope::matches`] is the reference
/// semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingScope {
    /// Admin: everything.
    All,
    /// Professor: only projects they created.
    OwnedBy(String),
    /// Gestor: submitted (non-draft) projects of their school.
    SchoolReview { inep: String },
    /// Articulador: gestor-validated projects of their regional.
    RegionalReview { cre: String },
}

impl ListingScope {
    pub fn matches(&self, projeto: &Projeto) -> bool {
        match self {
            Self::All => true,
            Self::OwnedBy(email) => projeto.created_by == *email,
            Self::SchoolReview { inep } => {
                projeto.status != StatusProjeto::Rascunho
                    && projeto.conteudo.identificacao.inep == *inep
            }
            Self::RegionalReview { cre } => {
                projeto.status_gestor == StatusValidacao::Validado
                    && projeto.conteudo.identificacao.cre == *cre
            }
        }
    }
}

/// Derive the listing scope for an actor. Gestores need their school INEP
/// and articuladores their CRE; without those the scope is undefined.
pub fn listing_scope(actor: &Actor) -> Result<ListingScope, CoreError> {
    match actor.perfil {
        Perfil::Admin => Ok(ListingScope::All),
        Perfil::Professor => Ok(ListingScope::OwnedBy(actor.email.clone())),
        Perfil::Gestor => actor
            .inep
            .clone()
            .filter(|inep| !inep.trim().is_empty())
            .map(|inep| ListingScope::SchoolReview { inep })
            .ok_or_else(|| {
                CoreError::Forbidden("Gestor scoping requires a school INEP".into())
            }),
        Perfil::Articulador => actor
            .cre
            .clone()
            .filter(|cre| !cre.trim().is_empty())
            .map(|cre| ListingScope::RegionalReview { cre })
            .ok_or_else(|| CoreError::Forbidden("Articulador scoping requires a CRE".into())),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
