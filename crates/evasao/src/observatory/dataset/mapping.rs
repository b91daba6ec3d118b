use super::normalizer::normalize_header;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical columns of the roster export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Name,
    Status,
    Area,
    Destination,
    AppointedOn,
    ExoneratedOn,
    ExonerationPublishedOn,
    AppointmentVoidedOn,
    InactiveOn,
    InactivityPublishedOn,
    Remark,
    ContestRank,
    Disability,
    Registration,
}

impl RecordField {
    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "NOME",
            Self::Status => "SITUACAO",
            Self::Area => "AREA",
            Self::Destination => "ORGAO_DESTINO",
            Self::AppointedOn => "DATA_NOMEACAO",
            Self::ExoneratedOn => "DATA_EXONERACAO",
            Self::ExonerationPublishedOn => "DATA_PUBLICACAO_EXONERACAO",
            Self::AppointmentVoidedOn => "DATA_NOMEACAO_SEM_EFEITO",
            Self::InactiveOn => "DATA_INATIVIDADE",
            Self::InactivityPublishedOn => "DATA_PUBLICACAO_INATIVIDADE",
            Self::Remark => "OBSERVACAO",
            Self::ContestRank => "POSICAO_CONCURSO",
            Self::Disability => "PCD",
            Self::Registration => "INSCRICAO",
        }
    }
}

static HEADER_MAP: OnceLock<HashMap<String, RecordField>> = OnceLock::new();

pub(crate) fn field_for_header(header: &str) -> Option<RecordField> {
    header_map().get(&normalize_header(header)).copied()
}

fn header_map() -> &'static HashMap<String, RecordField> {
    HEADER_MAP.get_or_init(|| {
        const HEADER_TO_FIELD: &[(&str, RecordField)] = &[
            ("NOME", RecordField::Name),
            ("Nome do Candidato", RecordField::Name),
            ("NOME DO CANDIDATO", RecordField::Name),
            ("nome", RecordField::Name),
            ("SITUACAO", RecordField::Status),
            ("SITUAÇÃO", RecordField::Status),
            ("Situação", RecordField::Status),
            ("Situacao", RecordField::Status),
            ("AREA", RecordField::Area),
            ("ÁREA", RecordField::Area),
            ("ORGAO_DESTINO", RecordField::Destination),
            ("ÓRGÃO", RecordField::Destination),
            ("ORGAO", RecordField::Destination),
            ("Orgao", RecordField::Destination),
            ("DATA_NOMEACAO", RecordField::AppointedOn),
            ("DATA_EXONERACAO", RecordField::ExoneratedOn),
            ("DATA EXONERAÇÃO", RecordField::ExoneratedOn),
            ("Data Exoneração", RecordField::ExoneratedOn),
            (
                "DATA_PUBLICACAO_EXONERACAO",
                RecordField::ExonerationPublishedOn,
            ),
            (
                "DATA PUBLICACAO EXONERAÇÃO",
                RecordField::ExonerationPublishedOn,
            ),
            ("DATA_NOMEACAO_SEM_EFEITO", RecordField::AppointmentVoidedOn),
            ("DATA_INATIVIDADE", RecordField::InactiveOn),
            (
                "DATA_PUBLICACAO_INATIVIDADE",
                RecordField::InactivityPublishedOn,
            ),
            (
                "DATA PUBLICACAO INATIVIDADE",
                RecordField::InactivityPublishedOn,
            ),
            ("OBSERVACAO", RecordField::Remark),
            ("POSICAO_CONCURSO", RecordField::ContestRank),
            ("POSICAO CONCURSO", RecordField::ContestRank),
            ("PCD", RecordField::Disability),
            ("INSCRICAO", RecordField::Registration),
        ];

        HEADER_TO_FIELD
            .iter()
            .map(|(header, field)| (normalize_header(header), *field))
            .collect()
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(header: &str) -> Option<RecordField> {
    field_for_header(header)
}
