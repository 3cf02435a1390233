//! Sibling documents of a project: the school's Termo de Compromisso and
//! the regional Declaração da CRE.
//!
//! Each project carries at most one of each. A document starts from a
//! generated default text, can be edited until it is validated, and
//! becomes immutable afterwards. Validating a document is what flips the
//! project's matching review flag, so the two writes always travel
//! together in one transaction on the storage side.

use crate::error::CoreError;
use crate::projeto::{Identificacao, Projeto, TipoProjeto};
use crate::roles::Perfil;
use crate::status::{StatusProjeto, StatusValidacao};
use crate::types::Timestamp;
use crate::workflow::WorkflowAction;

use chrono::Datelike;

/// Blank line used by the termo template for missing fields.
const LINHA_TERMO: &str = "___________________";
/// Blank used by the declaração template for missing fields.
const LINHA_DECLARACAO: &str = "______";

const MESES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoDocumento {
    TermoCompromisso,
    DeclaracaoCre,
}

impl TipoDocumento {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TermoCompromisso => "Termo de Compromisso",
            Self::DeclaracaoCre => "Declaração da CRE",
        }
    }

    /// Roles allowed to create and edit the document while it is pending.
    pub fn can_edit(&self, perfil: Perfil) -> bool {
        match self {
            Self::TermoCompromisso => matches!(perfil, Perfil::Gestor | Perfil::Admin),
            Self::DeclaracaoCre => matches!(perfil, Perfil::Articulador | Perfil::Admin),
        }
    }

    /// The single role whose signature validates the document. Admins can
    /// edit the text but cannot sign off.
    pub fn can_validate(&self, perfil: Perfil) -> bool {
        match self {
            Self::TermoCompromisso => perfil == Perfil::Gestor,
            Self::DeclaracaoCre => perfil == Perfil::Articulador,
        }
    }

    /// The project transition that accompanies validating this document.
    pub fn validation_action(&self) -> WorkflowAction {
        match self {
            Self::TermoCompromisso => WorkflowAction::ValidateAsGestor,
            Self::DeclaracaoCre => WorkflowAction::ValidateAsCre,
        }
    }
}

/* --------------------------------------------------------------------------
Lifecycle gates
-------------------------------------------------------------------------- */

/// A document only exists once the project has progressed far enough: the
/// termo once the project left draft, the declaração once the gestor has
/// validated.
pub fn ensure_can_create(
    tipo: TipoDocumento,
    projeto: &Projeto,
    perfil: Perfil,
) -> Result<(), CoreError> {
    if !tipo.can_edit(perfil) {
        return Err(CoreError::Forbidden(format!(
            "Role '{}' cannot create the {}",
            perfil.as_str(),
            tipo.label()
        )));
    }
    match tipo {
        TipoDocumento::TermoCompromisso => {
            if projeto.status == StatusProjeto::Rascunho {
                return Err(CoreError::InvalidTransition(
                    "The Termo de Compromisso requires a submitted project".into(),
                ));
            }
        }
        TipoDocumento::DeclaracaoCre => {
            if projeto.status_gestor != StatusValidacao::Validado {
                return Err(CoreError::InvalidTransition(
                    "The Declaração da CRE requires the gestor validation first".into(),
                ));
            }
        }
    }
    Ok(())
}

/// Editing is role-gated and stops permanently once the document is
/// validated.
pub fn ensure_can_edit(
    tipo: TipoDocumento,
    validado: bool,
    perfil: Perfil,
) -> Result<(), CoreError> {
    if !tipo.can_edit(perfil) {
        return Err(CoreError::Forbidden(format!(
            "Role '{}' cannot edit the {}",
            perfil.as_str(),
            tipo.label()
        )));
    }
    if validado {
        return Err(CoreError::InvalidTransition(format!(
            "The {} is already validated and can no longer be edited",
            tipo.label()
        )));
    }
    Ok(())
}

/// Validation happens exactly once, by the signing role.
pub fn ensure_can_validate(
    tipo: TipoDocumento,
    validado: bool,
    perfil: Perfil,
) -> Result<(), CoreError> {
    if !tipo.can_validate(perfil) {
        return Err(CoreError::Forbidden(format!(
            "Role '{}' cannot validate the {}",
            perfil.as_str(),
            tipo.label()
        )));
    }
    if validado {
        return Err(CoreError::InvalidTransition(format!(
            "The {} is already validated",
            tipo.label()
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Default content
-------------------------------------------------------------------------- */

/// Fields interpolated into the termo's default text. Anything left blank
/// renders as a fill-in line.
#[derive(Debug, Clone, Default)]
pub struct TermoTemplate<'a> {
    pub gestor_nome: &'a str,
    pub gestor_rg: &'a str,
    pub gestor_cpf: &'a str,
    pub unidade_educacional: &'a str,
    pub inep: &'a str,
    pub portaria: &'a str,
    pub professores: &'a str,
}

fn campo_ou_linha<'a>(valor: &'a str, linha: &'a str) -> &'a str {
    if valor.trim().is_empty() {
        linha
    } else {
        valor
    }
}

/// The commitment statement the school gestor signs, pre-filled from the
/// project and the gestor's registration data.
pub fn termo_default_content(campos: &TermoTemplate<'_>) -> String {
    format!(
        "Eu, {nome}, portador do RG nº {rg}, CPF {cpf}, Gestor(a) da Unidade Educacional \
{unidade}, INEP {inep}, regulamentado pela Portaria nº {portaria}, declaro para os devidos \
fins que assumo total compromisso e responsabilidade em relação ao desenvolvimento do \
Projeto Arte Educa durante a vigência do mesmo nessa unidade educacional bem como, o \
cumprimento da carga horária do(s) professor(es) do projeto, a saber: {professores}.

Declaro ainda:
- Garantir o cumprimento das Normas e Diretrizes do Projeto Arte Educa, conforme Portaria 2037/2022 – SEDUC;
- Responsabilizar-me pela execução e logística do atendimento aos estudantes;
- Acompanhar o desenvolvimento pedagógico e a frequência dos estudantes;
- Garantir que o professor faça o upload, no Drive da Gerência de Arte e Educação, dos documentos pedagógicos, a saber: Projeto Anual, Frequência Mensal, Planejamento Mensal e Relatório Mensal, devidamente assinados, seja por meio do site gov.br ou de próprio punho;
- Garantir condições e segurança para que os estudantes matriculados no projeto participem de eventos arte/educativos internos e externos à Unidade Educacional;
- Estar ciente de que o não cumprimento das responsabilidades supracitadas, podem ocasionar a penalidade de suspensão do projeto.
",
        nome = campo_ou_linha(campos.gestor_nome, LINHA_TERMO),
        rg = campo_ou_linha(campos.gestor_rg, LINHA_TERMO),
        cpf = campo_ou_linha(campos.gestor_cpf, LINHA_TERMO),
        unidade = campos.unidade_educacional,
        inep = campo_ou_linha(campos.inep, LINHA_TERMO),
        portaria = campo_ou_linha(campos.portaria, LINHA_TERMO),
        professores = campo_ou_linha(campos.professores, LINHA_TERMO),
    )
}

/// The regional approval declaration, dated with the day it is generated.
pub fn declaracao_default_content(
    tipo_projeto: TipoProjeto,
    identificacao: &Identificacao,
    hoje: Timestamp,
) -> String {
    let dia = hoje.day();
    let mes = MESES[hoje.month0() as usize];
    let ano = hoje.year();

    format!(
        "Declaro para os devidos fins que o Projeto Arte Educa na Área Artística {area} com a(s)
Modalidade(s) {modalidade}
a ser desenvolvido na Unidade Educacional {unidade}
pelo(s) Professor(s) {professor}
Foi analisado e aprovado pela CRE de {cre}.

Desta forma o referido projeto está habilitado a ser executado no decorrer do corrente ano.

Por ser verdade, firmo o presente para que surta seus efeitos legais.

{municipio}, {dia} de {mes} de {ano}.


_________________________________________
Articulador(a) do Desporto Educacional, Arte e Educação

_________________________________________
Assessor(a) Pedagógico(a)

_________________________________________
Coordenador(a) Regional de Educação
",
        area = tipo_projeto.area_artistica(),
        modalidade = tipo_projeto.label(),
        unidade = campo_ou_linha(&identificacao.unidade_educacional, LINHA_DECLARACAO),
        professor = campo_ou_linha(&identificacao.professor.nome, LINHA_DECLARACAO),
        cre = campo_ou_linha(&identificacao.cre, LINHA_DECLARACAO),
        municipio = campo_ou_linha(&identificacao.municipio, LINHA_DECLARACAO),
    )
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::DbId;
    use crate::validation::tests::valid_conteudo;
    use crate::workflow::{create_project, Actor};

    fn projeto_com_status(status: StatusProjeto, status_gestor: StatusValidacao) -> Projeto {
        let actor = Actor::new(Perfil::Professor, "maria@escola.go.gov.br");
        let mut projeto = create_project(
            DbId::new_v4(),
            &actor,
            TipoProjeto::Violao,
            valid_conteudo(),
            false,
            Utc::now(),
        )
        .unwrap();
        projeto.status = status;
        projeto.status_gestor = status_gestor;
        projeto
    }

    #[test]
    fn test_edit_roles_per_document() {
        let termo = TipoDocumento::TermoCompromisso;
        assert!(termo.can_edit(Perfil::Gestor));
        assert!(termo.can_edit(Perfil::Admin));
        assert!(!termo.can_edit(Perfil::Professor));
        assert!(!termo.can_edit(Perfil::Articulador));

        let declaracao = TipoDocumento::DeclaracaoCre;
        assert!(declaracao.can_edit(Perfil::Articulador));
        assert!(declaracao.can_edit(Perfil::Admin));
        assert!(!declaracao.can_edit(Perfil::Gestor));
        assert!(!declaracao.can_edit(Perfil::Professor));
    }

    #[test]
    fn test_only_the_signing_role_validates() {
        let termo = TipoDocumento::TermoCompromisso;
        assert!(termo.can_validate(Perfil::Gestor));
        assert!(!termo.can_validate(Perfil::Admin));

        let declaracao = TipoDocumento::DeclaracaoCre;
        assert!(declaracao.can_validate(Perfil::Articulador));
        assert!(!declaracao.can_validate(Perfil::Admin));
    }

    #[test]
    fn test_termo_requires_submitted_project() {
        let rascunho = projeto_com_status(StatusProjeto::Rascunho, StatusValidacao::Pendente);
        let result =
            ensure_can_create(TipoDocumento::TermoCompromisso, &rascunho, Perfil::Gestor);
        assert_matches!(result, Err(CoreError::InvalidTransition(_)));

        let enviado = projeto_com_status(StatusProjeto::Enviado, StatusValidacao::Pendente);
        ensure_can_create(TipoDocumento::TermoCompromisso, &enviado, Perfil::Gestor).unwrap();
    }

    #[test]
    fn test_declaracao_requires_gestor_validation() {
        let enviado = projeto_com_status(StatusProjeto::Enviado, StatusValidacao::Pendente);
        let result =
            ensure_can_create(TipoDocumento::DeclaracaoCre, &enviado, Perfil::Articulador);
        assert_matches!(result, Err(CoreError::InvalidTransition(_)));

        let validado = projeto_com_status(StatusProjeto::Enviado, StatusValidacao::Validado);
        ensure_can_create(TipoDocumento::DeclaracaoCre, &validado, Perfil::Articulador).unwrap();
    }

    #[test]
    fn test_create_is_role_gated_before_state() {
        let rascunho = projeto_com_status(StatusProjeto::Rascunho, StatusValidacao::Pendente);
        let result =
            ensure_can_create(TipoDocumento::TermoCompromisso, &rascunho, Perfil::Professor);
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_validated_documents_are_immutable() {
        let result = ensure_can_edit(TipoDocumento::TermoCompromisso, true, Perfil::Gestor);
        assert_matches!(result, Err(CoreError::InvalidTransition(_)));

        ensure_can_edit(TipoDocumento::TermoCompromisso, false, Perfil::Gestor).unwrap();
        ensure_can_edit(TipoDocumento::TermoCompromisso, false, Perfil::Admin).unwrap();
    }

    #[test]
    fn test_validation_happens_once() {
        ensure_can_validate(TipoDocumento::DeclaracaoCre, false, Perfil::Articulador).unwrap();

        let result = ensure_can_validate(TipoDocumento::DeclaracaoCre, true, Perfil::Articulador);
        assert_matches!(result, Err(CoreError::InvalidTransition(_)));

        let result = ensure_can_validate(TipoDocumento::DeclaracaoCre, false, Perfil::Admin);
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_validation_action_matches_document() {
        assert_eq!(
            TipoDocumento::TermoCompromisso.validation_action(),
            WorkflowAction::ValidateAsGestor
        );
        assert_eq!(
            TipoDocumento::DeclaracaoCre.validation_action(),
            WorkflowAction::ValidateAsCre
        );
    }

    #[test]
    fn test_termo_default_content_fills_fields() {
        let conteudo = termo_default_content(&TermoTemplate {
            gestor_nome: "Carlos Souza",
            gestor_rg: "1234567",
            gestor_cpf: "529.982.247-25",
            unidade_educacional: "Escola Estadual Central",
            inep: "52041234",
            portaria: "123/2024",
            professores: "Maria Silva",
        });

        assert!(conteudo.starts_with("Eu, Carlos Souza, portador do RG nº 1234567"));
        assert!(conteudo.contains("CPF 529.982.247-25"));
        assert!(conteudo.contains("Unidade Educacional Escola Estadual Central, INEP 52041234"));
        assert!(conteudo.contains("Portaria nº 123/2024"));
        assert!(conteudo.contains("a saber: Maria Silva."));
        assert!(conteudo.contains("Portaria 2037/2022 – SEDUC"));
        assert!(conteudo.contains("penalidade de suspensão do projeto."));
    }

    #[test]
    fn test_termo_blank_fields_render_as_lines() {
        let conteudo = termo_default_content(&TermoTemplate::default());
        assert!(conteudo.starts_with("Eu, ___________________, portador do RG nº"));
        assert!(conteudo.contains("Portaria nº ___________________,"));
    }

    #[test]
    fn test_declaracao_default_content() {
        let identificacao = valid_conteudo().identificacao;
        let hoje = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        let conteudo = declaracao_default_content(TipoProjeto::Violao, &identificacao, hoje);

        assert!(conteudo.contains("Área Artística Música"));
        assert!(conteudo.contains("Modalidade(s) Violão"));
        assert!(conteudo.contains("Foi analisado e aprovado pela CRE de Goiânia."));
        assert!(conteudo.contains("10 de março de 2026."));
        assert!(conteudo.contains("Articulador(a) do Desporto Educacional, Arte e Educação"));
        assert!(conteudo.contains("Coordenador(a) Regional de Educação"));
    }

    #[test]
    fn test_declaracao_month_names() {
        let identificacao = valid_conteudo().identificacao;
        let janeiro = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        let dezembro = Utc.with_ymd_and_hms(2026, 12, 20, 12, 0, 0).unwrap();

        let conteudo = declaracao_default_content(TipoProjeto::Teatro, &identificacao, janeiro);
        assert!(conteudo.contains("5 de janeiro de 2026."));

        let conteudo = declaracao_default_content(TipoProjeto::Teatro, &identificacao, dezembro);
        assert!(conteudo.contains("20 de dezembro de 2026."));
    }
}
