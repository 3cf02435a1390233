//! Submission validation rules.
//!
//! Pure predicates over the content payload. Only `submit` runs these; the
//! gestor/CRE validation steps do not re-check content. `validate_submission`
//! returns the complete list of violations so the caller can display every
//! problem at once.

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::error::Violacao;
use crate::projeto::ConteudoProjeto;

/// Strip everything but ASCII digits.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a CPF (Brazilian tax id): 11 digits, not all identical, and
/// both check digits match the two-pass weighted mod-11 checksum
/// (weights 10..2 then 11..2, remainder >= 10 maps to 0).
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check_digit = |len: usize| -> u32 {
        let first_weight = (len + 1) as u32;
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, &d)| d * (first_weight - i as u32))
            .sum();
        let remainder = 11 - (sum % 11);
        if remainder >= 10 {
            0
        } else {
            remainder
        }
    };

    check_digit(9) == digits[9] && check_digit(10) == digits[10]
}

/// Validate an INEP school code: exactly 8 digits once separators are
/// stripped.
pub fn validate_inep(inep: &str) -> bool {
    digits_only(inep).len() == 8
}

/// Validate an email address. The `validator` crate does the heavy
/// lifting; the extra dot check keeps the original `local@domain.tld`
/// shape requirement (plain `user@host` is rejected).
pub fn validate_email(email: &str) -> bool {
    email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Check the content payload against every submission rule, returning all
/// violations. An empty result means the project may be submitted.
pub fn validate_submission(conteudo: &ConteudoProjeto) -> Vec<Violacao> {
    let mut violations = Vec::new();
    let mut push = |campo: &str, mensagem: &str| {
        violations.push(Violacao::new(campo, mensagem));
    };

    let ident = &conteudo.identificacao;
    let professor = &ident.professor;

    if is_blank(&professor.nome) {
        push("identificacao.professor.nome", "Nome do professor é obrigatório");
    }
    if is_blank(&professor.cpf) {
        push("identificacao.professor.cpf", "CPF do professor é obrigatório");
    } else if !validate_cpf(&professor.cpf) {
        push("identificacao.professor.cpf", "CPF do professor é inválido");
    }
    if is_blank(&professor.email) {
        push("identificacao.professor.email", "Email do professor é obrigatório");
    } else if !validate_email(&professor.email) {
        push("identificacao.professor.email", "Email do professor é inválido");
    }

    if is_blank(&ident.inep) {
        push("identificacao.inep", "INEP da escola é obrigatório");
    } else if !validate_inep(&ident.inep) {
        push("identificacao.inep", "INEP deve ter 8 dígitos");
    }
    if is_blank(&ident.cre) {
        push("identificacao.cre", "CRE é obrigatória");
    }
    if is_blank(&ident.municipio) {
        push("identificacao.municipio", "Município é obrigatório");
    }
    if is_blank(&ident.unidade_educacional) {
        push("identificacao.unidadeEducacional", "Unidade Educacional é obrigatória");
    }

    let schedule_ok = conteudo
        .quadro_horario
        .modulacao_principal
        .iter()
        .any(|linha| linha.is_populated());
    if !schedule_ok {
        push(
            "quadroHorario.modulacaoPrincipal",
            "Modulação (dias/horários) é obrigatória",
        );
    }

    // The execution window is optional; the rules apply only when present.
    if let Some(periodo) = &ident.periodo {
        if is_blank(&periodo.inicio) {
            push("identificacao.periodo.inicio", "Data de início é obrigatória");
        }
        if is_blank(&periodo.fim) {
            push("identificacao.periodo.fim", "Data de fim é obrigatória");
        }
        if !is_blank(&periodo.inicio) && !is_blank(&periodo.fim) {
            let range_ok = matches!(
                (parse_date(&periodo.inicio), parse_date(&periodo.fim)),
                (Some(inicio), Some(fim)) if inicio < fim
            );
            if !range_ok {
                push(
                    "identificacao.periodo",
                    "Data de fim deve ser posterior à data de início",
                );
            }
        }
    }

    let descricao = &conteudo.descricao;
    if is_blank(&descricao.introducao) {
        push("projeto.introducao", "Introdução do projeto é obrigatória");
    }
    if is_blank(&descricao.justificativa) {
        push("projeto.justificativa", "Justificativa do projeto é obrigatória");
    }
    if is_blank(&descricao.objetivo_geral) {
        push("projeto.objetivoGeral", "Objetivo geral é obrigatório");
    }
    if is_blank(&descricao.objetivos_especificos) {
        push(
            "projeto.objetivosEspecificos",
            "Pelo menos um objetivo específico é obrigatório",
        );
    }
    if is_blank(&descricao.metodologia) {
        push("projeto.metodologia", "Metodologia é obrigatória");
    }

    if conteudo.cronograma.acoes.is_empty() {
        push("cronograma.acoes", "Cronograma deve ter pelo menos uma ação");
    }

    if is_blank(&descricao.avaliacao) {
        push("projeto.avaliacao", "Critérios de avaliação são obrigatórios");
    }

    violations
}
