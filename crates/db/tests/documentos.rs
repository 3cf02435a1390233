//! Integration tests for the sibling documents: one-per-project
//! constraints, the lockstep validation write, and cascade deletes.

use arte_educa_core::documentos::{self, TermoTemplate, TipoDocumento};
use arte_educa_core::projeto::{
    AcaoCronograma, ConteudoProjeto, LinhaModulacao, Projeto, TipoProjeto,
};
use arte_educa_core::roles::Perfil;
use arte_educa_core::types::DbId;
use arte_educa_core::workflow::{self, Actor, WorkflowAction};
use arte_educa_db::models::declaracao::CreateDeclaracaoCre;
use arte_educa_db::models::termo::{CreateTermoCompromisso, UpdateTermoCompromisso};
use arte_educa_db::repositories::{DeclaracaoRepo, ProjetoRepo, TermoRepo};
use chrono::Utc;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn conteudo_completo() -> ConteudoProjeto {
    let mut conteudo = ConteudoProjeto::default();

    let ident = &mut conteudo.identificacao;
    ident.cre = "Goiânia".into();
    ident.municipio = "Goiânia".into();
    ident.unidade_educacional = "Escola Municipal Sol Nascente".into();
    ident.inep = "52041234".into();
    ident.professor.nome = "Maria Silva".into();
    ident.professor.cpf = "529.982.247-25".into();
    ident.professor.email = "maria.silva@escola.go.gov.br".into();

    conteudo.quadro_horario.modulacao_principal = vec![LinhaModulacao {
        horario: "08:00 - 09:00".into(),
        segunda: true,
        ..Default::default()
    }];

    let descricao = &mut conteudo.descricao;
    descricao.introducao = "Introdução".into();
    descricao.justificativa = "Justificativa".into();
    descricao.objetivo_geral = "Objetivo geral".into();
    descricao.objetivos_especificos = "Objetivo específico".into();
    descricao.metodologia = "Metodologia".into();
    descricao.avaliacao = "Avaliação contínua".into();

    conteudo.cronograma.acoes = vec![AcaoCronograma {
        acao: "Apresentações".into(),
        outubro: true,
        ..Default::default()
    }];

    conteudo
}

/// Create and persist a submitted project, returning the stored aggregate.
async fn projeto_enviado(pool: &PgPool) -> Projeto {
    let actor = Actor::new(Perfil::Professor, "maria.silva@escola.go.gov.br");
    let projeto = workflow::create_project(
        DbId::new_v4(),
        &actor,
        TipoProjeto::CantoCoral,
        conteudo_completo(),
        true,
        Utc::now(),
    )
    .unwrap();
    ProjetoRepo::create(pool, &projeto)
        .await
        .unwrap()
        .into_record()
        .unwrap()
        .projeto
}

fn novo_termo(projeto_id: DbId) -> CreateTermoCompromisso {
    CreateTermoCompromisso {
        projeto_id,
        gestor_nome: Some("Carlos Souza".into()),
        gestor_cpf: Some("529.982.247-25".into()),
        gestor_rg: Some("1234567".into()),
        portaria: Some("123/2024".into()),
        professores: Some("Maria Silva".into()),
        conteudo: None,
    }
}

// ---------------------------------------------------------------------------
// Termo de Compromisso
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_termo_lifecycle(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;

    let conteudo = documentos::termo_default_content(&TermoTemplate {
        gestor_nome: "Carlos Souza",
        gestor_rg: "1234567",
        gestor_cpf: "529.982.247-25",
        unidade_educacional: &projeto.conteudo.identificacao.unidade_educacional,
        inep: &projeto.conteudo.identificacao.inep,
        portaria: "123/2024",
        professores: "Maria Silva",
    });
    let termo = TermoRepo::create(&pool, &novo_termo(projeto.id), Some("52041234"), &conteudo)
        .await
        .unwrap();

    assert!(!termo.validado);
    assert!(termo.data_validacao.is_none());
    assert!(termo.conteudo.starts_with("Eu, Carlos Souza"));
    assert_eq!(termo.unidade_educacional_id.as_deref(), Some("52041234"));

    let found = TermoRepo::find_by_projeto_id(&pool, projeto.id)
        .await
        .unwrap()
        .expect("termo should exist");
    assert_eq!(found.id, termo.id);

    let updated = TermoRepo::update(
        &pool,
        termo.id,
        &UpdateTermoCompromisso {
            gestor_nome: None,
            gestor_cpf: None,
            gestor_rg: None,
            portaria: Some("456/2025".into()),
            professores: None,
            conteudo: Some("Texto revisado".into()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.portaria.as_deref(), Some("456/2025"));
    assert_eq!(updated.conteudo, "Texto revisado");
    // Untouched fields keep their values.
    assert_eq!(updated.gestor_nome.as_deref(), Some("Carlos Souza"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_termo_unique_per_project(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;

    TermoRepo::create(&pool, &novo_termo(projeto.id), None, "")
        .await
        .unwrap();
    let err = TermoRepo::create(&pool, &novo_termo(projeto.id), None, "")
        .await
        .unwrap_err();

    let db_err = match err {
        sqlx::Error::Database(e) => e,
        other => panic!("expected database error, got {other:?}"),
    };
    // 23505 = unique_violation
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert!(db_err
        .constraint()
        .unwrap_or_default()
        .starts_with("uq_termos_compromisso"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_termo_flips_project_flag(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;
    let termo = TermoRepo::create(&pool, &novo_termo(projeto.id), None, "")
        .await
        .unwrap();

    let mut gestor = Actor::new(Perfil::Gestor, "gestor@escola.go.gov.br");
    gestor.inep = Some("52041234".into());
    let transitioned = workflow::apply_action(
        &projeto,
        &gestor,
        &TipoDocumento::TermoCompromisso.validation_action(),
        Utc::now(),
    )
    .unwrap();

    let (termo, row) = TermoRepo::validate(&pool, termo.id, &transitioned, Utc::now())
        .await
        .unwrap()
        .expect("validation should land");

    assert!(termo.validado);
    assert!(termo.data_validacao.is_some());
    assert_eq!(row.status_gestor, "validado");
    assert_eq!(row.version, projeto.version + 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_termo_with_stale_project_rolls_back(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;
    let termo = TermoRepo::create(&pool, &novo_termo(projeto.id), None, "")
        .await
        .unwrap();

    // Another write bumps the project version before the gestor signs.
    ProjetoRepo::update_versioned(&pool, &projeto)
        .await
        .unwrap()
        .unwrap();

    let mut gestor = Actor::new(Perfil::Gestor, "gestor@escola.go.gov.br");
    gestor.inep = Some("52041234".into());
    let transitioned = workflow::apply_action(
        &projeto,
        &gestor,
        &WorkflowAction::ValidateAsGestor,
        Utc::now(),
    )
    .unwrap();

    let result = TermoRepo::validate(&pool, termo.id, &transitioned, Utc::now())
        .await
        .unwrap();
    assert!(result.is_none());

    // The termo update rolled back with the project write.
    let termo = TermoRepo::find_by_id(&pool, termo.id).await.unwrap().unwrap();
    assert!(!termo.validado);
    let row = ProjetoRepo::find_by_id(&pool, projeto.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status_gestor, "pendente");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validate_termo_twice_returns_none(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;
    let termo = TermoRepo::create(&pool, &novo_termo(projeto.id), None, "")
        .await
        .unwrap();

    let mut gestor = Actor::new(Perfil::Gestor, "gestor@escola.go.gov.br");
    gestor.inep = Some("52041234".into());
    let transitioned = workflow::apply_action(
        &projeto,
        &gestor,
        &WorkflowAction::ValidateAsGestor,
        Utc::now(),
    )
    .unwrap();

    TermoRepo::validate(&pool, termo.id, &transitioned, Utc::now())
        .await
        .unwrap()
        .unwrap();

    // A second signature finds the termo already validated and rolls back.
    let again = TermoRepo::validate(&pool, termo.id, &transitioned, Utc::now())
        .await
        .unwrap();
    assert!(again.is_none());
}

// ---------------------------------------------------------------------------
// Declaração CRE
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_declaracao_lifecycle_and_lockstep_validation(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;

    // Gestor validates first.
    let mut gestor = Actor::new(Perfil::Gestor, "gestor@escola.go.gov.br");
    gestor.inep = Some("52041234".into());
    let apos_gestor = workflow::apply_action(
        &projeto,
        &gestor,
        &WorkflowAction::ValidateAsGestor,
        Utc::now(),
    )
    .unwrap();
    let apos_gestor = ProjetoRepo::update_versioned(&pool, &apos_gestor)
        .await
        .unwrap()
        .unwrap()
        .into_record()
        .unwrap()
        .projeto;

    let conteudo = documentos::declaracao_default_content(
        apos_gestor.tipo_projeto,
        &apos_gestor.conteudo.identificacao,
        Utc::now(),
    );
    let declaracao = DeclaracaoRepo::create(
        &pool,
        &CreateDeclaracaoCre {
            projeto_id: projeto.id,
            conteudo: None,
        },
        &conteudo,
    )
    .await
    .unwrap();
    assert!(!declaracao.validado);
    assert!(declaracao.conteudo.contains("Área Artística Música"));

    let mut articulador = Actor::new(Perfil::Articulador, "articulador@cre.go.gov.br");
    articulador.cre = Some("Goiânia".into());
    let transitioned = workflow::apply_action(
        &apos_gestor,
        &articulador,
        &TipoDocumento::DeclaracaoCre.validation_action(),
        Utc::now(),
    )
    .unwrap();

    let (declaracao, row) = DeclaracaoRepo::validate(&pool, declaracao.id, &transitioned, Utc::now())
        .await
        .unwrap()
        .expect("validation should land");

    assert!(declaracao.validado);
    assert_eq!(row.status_cre, "validado");
    assert_eq!(row.status, "enviado");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_declaracao_unique_per_project(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;

    let input = CreateDeclaracaoCre {
        projeto_id: projeto.id,
        conteudo: None,
    };
    DeclaracaoRepo::create(&pool, &input, "").await.unwrap();
    let err = DeclaracaoRepo::create(&pool, &input, "").await.unwrap_err();

    let db_err = match err {
        sqlx::Error::Database(e) => e,
        other => panic!("expected database error, got {other:?}"),
    };
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_project_cascades_to_documents(pool: PgPool) {
    let projeto = projeto_enviado(&pool).await;
    let termo = TermoRepo::create(&pool, &novo_termo(projeto.id), None, "")
        .await
        .unwrap();
    let declaracao = DeclaracaoRepo::create(
        &pool,
        &CreateDeclaracaoCre {
            projeto_id: projeto.id,
            conteudo: None,
        },
        "",
    )
    .await
    .unwrap();

    assert!(ProjetoRepo::delete(&pool, projeto.id).await.unwrap());

    assert!(TermoRepo::find_by_id(&pool, termo.id).await.unwrap().is_none());
    assert!(DeclaracaoRepo::find_by_id(&pool, declaracao.id)
        .await
        .unwrap()
        .is_none());
}
