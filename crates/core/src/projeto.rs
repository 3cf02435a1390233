//! The project aggregate and its typed content payload.
//!
//! The content blocks (`identificacao`, `projeto`, `quadroHorario`,
//! `planoAnual`, `cronograma`) are explicit structs with named fields
//! instead of free-form maps, so a misspelled or dropped key is a parse
//! error rather than a silently lost value. Every block still carries a
//! flattened `extra` map: keys this version does not model round-trip
//! unchanged through storage and transitions.
//!
//! Wire names follow the original JSON contract: camelCase content keys,
//! snake_case for the two review flags.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::status::{StatusProjeto, StatusValidacao};
use crate::types::{DbId, Timestamp};

/// The seven arts disciplines a project can belong to. Immutable after
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TipoProjeto {
    ArtesVisuais,
    BandasEFanfarras,
    CantoCoral,
    Danca,
    PraticaDeConjunto,
    Teatro,
    Violao,
}

impl TipoProjeto {
    /// Parse a discipline string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "artesVisuais" => Ok(Self::ArtesVisuais),
            "bandasEFanfarras" => Ok(Self::BandasEFanfarras),
            "cantoCoral" => Ok(Self::CantoCoral),
            "danca" => Ok(Self::Danca),
            "praticaDeConjunto" => Ok(Self::PraticaDeConjunto),
            "teatro" => Ok(Self::Teatro),
            "violao" => Ok(Self::Violao),
            _ => Err(CoreError::validation(
                "tipoProjeto",
                format!(
                    "Tipo de projeto inválido '{s}'. Deve ser um de: artesVisuais, \
                     bandasEFanfarras, cantoCoral, danca, praticaDeConjunto, teatro, violao"
                ),
            )),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArtesVisuais => "artesVisuais",
            Self::BandasEFanfarras => "bandasEFanfarras",
            Self::CantoCoral => "cantoCoral",
            Self::Danca => "danca",
            Self::PraticaDeConjunto => "praticaDeConjunto",
            Self::Teatro => "teatro",
            Self::Violao => "violao",
        }
    }

    /// Display name used in generated documents.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ArtesVisuais => "Artes Visuais",
            Self::BandasEFanfarras => "Bandas e Fanfarras",
            Self::CantoCoral => "Canto Coral",
            Self::Danca => "Dança",
            Self::PraticaDeConjunto => "Prática de Conjunto",
            Self::Teatro => "Teatro",
            Self::Violao => "Violão",
        }
    }

    /// Broad artistic area the discipline belongs to, used by the
    /// Declaração CRE text.
    pub fn area_artistica(&self) -> &'static str {
        match self {
            Self::ArtesVisuais => "Artes Visuais",
            Self::Danca => "Dança",
            Self::Teatro => "Teatro",
            Self::BandasEFanfarras | Self::CantoCoral | Self::PraticaDeConjunto | Self::Violao => {
                "Música"
            }
        }
    }
}

/// Personal data of the professor responsible for the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DadosProfessor {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub rg: String,
    #[serde(default)]
    pub data_nascimento: String,
    #[serde(default)]
    pub telefone: String,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One requested material resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecursoMaterial {
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub quantidade: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional execution window. Dates are kept as the `YYYY-MM-DD` strings
/// the form produces; validation parses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Periodo {
    #[serde(default)]
    pub inicio: String,
    #[serde(default)]
    pub fim: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// School and professor identification block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identificacao {
    #[serde(default)]
    pub cre: String,
    #[serde(default)]
    pub municipio: String,
    #[serde(default)]
    pub unidade_educacional: String,
    #[serde(default)]
    pub tipo_matriz: String,
    #[serde(default)]
    pub inep: String,
    #[serde(default)]
    pub quantidade_estudantes: Option<i32>,
    #[serde(default)]
    pub quantidade_alunos_fundamental2: Option<i32>,
    #[serde(default)]
    pub quantidade_alunos_medio: Option<i32>,
    #[serde(default)]
    pub etapas_ensino: Vec<String>,
    #[serde(default)]
    pub professor: DadosProfessor,
    /// Per-discipline role configuration; shape varies by `tipoProjeto`,
    /// so it stays a free-form value.
    #[serde(default)]
    pub funcao: Value,
    #[serde(default)]
    pub recursos_materiais: Vec<RecursoMaterial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodo: Option<Periodo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pedagogical text body (the wire key is `projeto`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescricaoProjeto {
    #[serde(default)]
    pub introducao: String,
    #[serde(default)]
    pub justificativa: String,
    #[serde(default)]
    pub objetivo_geral: String,
    #[serde(default)]
    pub objetivos_especificos: String,
    #[serde(default)]
    pub metodologia: String,
    #[serde(default)]
    pub avaliacao: String,
    #[serde(default)]
    pub referencias: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of the weekly schedule grid: a time slot plus six weekday flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinhaModulacao {
    #[serde(default)]
    pub horario: String,
    #[serde(default)]
    pub segunda: bool,
    #[serde(default)]
    pub terca: bool,
    #[serde(default)]
    pub quarta: bool,
    #[serde(default)]
    pub quinta: bool,
    #[serde(default)]
    pub sexta: bool,
    #[serde(default)]
    pub sabado: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinhaModulacao {
    /// A row counts as populated when the time slot is non-blank and at
    /// least one weekday is marked.
    pub fn is_populated(&self) -> bool {
        !self.horario.trim().is_empty()
            && (self.segunda || self.terca || self.quarta || self.quinta || self.sexta || self.sabado)
    }
}

/// Weekly schedule block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadroHorario {
    #[serde(default)]
    pub turno: Vec<String>,
    #[serde(default)]
    pub carga_horaria: String,
    #[serde(default)]
    pub modulacao_principal: Vec<LinhaModulacao>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of the yearly teaching plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPlanoAnual {
    #[serde(default)]
    pub habilidade: String,
    #[serde(default)]
    pub objeto_conhecimento: String,
    #[serde(default)]
    pub desenvolvimento_conteudo: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Yearly teaching plan, split by semester.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanoAnual {
    #[serde(default)]
    pub primeiro_semestre: Vec<ItemPlanoAnual>,
    #[serde(default)]
    pub segundo_semestre: Vec<ItemPlanoAnual>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One timeline action with its month flags. July is absent on the wire
/// (school vacation), so there is no `julho` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcaoCronograma {
    #[serde(default)]
    pub acao: String,
    #[serde(default)]
    pub janeiro: bool,
    #[serde(default)]
    pub fevereiro: bool,
    #[serde(default)]
    pub marco: bool,
    #[serde(default)]
    pub abril: bool,
    #[serde(default)]
    pub maio: bool,
    #[serde(default)]
    pub junho: bool,
    #[serde(default)]
    pub agosto: bool,
    #[serde(default)]
    pub setembro: bool,
    #[serde(default)]
    pub outubro: bool,
    #[serde(default)]
    pub novembro: bool,
    #[serde(default)]
    pub dezembro: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Timeline block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cronograma {
    #[serde(default)]
    pub acoes: Vec<AcaoCronograma>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The full content payload: everything the workflow carries through
/// transitions untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConteudoProjeto {
    #[serde(default)]
    pub identificacao: Identificacao,
    #[serde(default, rename = "projeto")]
    pub descricao: DescricaoProjeto,
    #[serde(default)]
    pub quadro_horario: QuadroHorario,
    #[serde(default)]
    pub plano_anual: PlanoAnual,
    #[serde(default)]
    pub cronograma: Cronograma,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A project record as the workflow engine sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projeto {
    pub id: DbId,
    pub tipo_projeto: TipoProjeto,
    pub status: StatusProjeto,
    #[serde(rename = "status_gestor")]
    pub status_gestor: StatusValidacao,
    #[serde(rename = "status_cre")]
    pub status_cre: StatusValidacao,
    pub justificativa_rejeicao: Option<String>,
    #[serde(rename = "numeroProcessoSEI")]
    pub numero_processo_sei: Option<String>,
    pub data_submissao: Option<Timestamp>,
    pub data_aprovacao: Option<Timestamp>,
    #[serde(rename = "created_by")]
    pub created_by: String,
    /// Optimistic-concurrency token; incremented on every persisted write.
    pub version: i64,
    #[serde(flatten)]
    pub conteudo: ConteudoProjeto,
}
