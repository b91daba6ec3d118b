mod mapping;
mod normalizer;
mod parser;
mod record;

use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use mapping::RecordField;
pub use parser::{decode, RawRow};
pub use record::AuditorRecord;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("roster export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("none of the candidate roster exports could be loaded ({})", display_paths(.attempted))]
    NoSource { attempted: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decoded roster export.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<AuditorRecord>,
}

impl Dataset {
    pub fn from_text(text: &str) -> Self {
        let records = decode(text).iter().map(AuditorRecord::from_row).collect();
        Self { records }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DatasetError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)?;
        Ok(Self::from_text(&text))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads the first candidate that reads and decodes to at least one row.
    pub fn from_candidates<P: AsRef<Path>>(paths: &[P]) -> Result<Self, DatasetError> {
        for path in paths {
            let path = path.as_ref();
            match Self::from_path(path) {
                Ok(dataset) if !dataset.is_empty() => {
                    info!(path = %path.display(), records = dataset.len(), "roster export loaded");
                    return Ok(dataset);
                }
                Ok(_) => debug!(path = %path.display(), "roster export has no rows"),
                Err(err) => debug!(path = %path.display(), error = %err, "roster export unavailable"),
            }
        }

        Err(DatasetError::NoSource {
            attempted: paths.iter().map(|path| path.as_ref().to_path_buf()).collect(),
        })
    }

    pub fn records(&self) -> &[AuditorRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AuditorRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<AuditorRecord>> for Dataset {
    fn from(records: Vec<AuditorRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decode_strips_bom_and_skips_blank_lines() {
        let rows = decode("\u{feff}NOME;AREA\r\n\r\n   \r\nAna;TI\r\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("NOME"), Some("Ana"));
        assert_eq!(rows[0].get("AREA"), Some("TI"));
    }

    #[test]
    fn decode_pads_short_rows_and_drops_surplus_fields() {
        let rows = decode("NOME;AREA;SITUACAO\nAna\nBia;TI;EXONERADO;extra\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0].get("AREA"), Some(""));
        assert_eq!(rows[0].get("SITUACAO"), Some(""));
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1].get("SITUACAO"), Some("EXONERADO"));
    }

    #[test]
    fn decode_trims_headers_and_values() {
        let rows = decode(" NOME ; AREA \n  Ana  ;  TI \n");
        assert_eq!(rows[0].get("NOME"), Some("Ana"));
        assert_eq!(rows[0].get("AREA"), Some("TI"));
    }

    #[test]
    fn decode_of_empty_text_yields_no_rows() {
        assert!(decode("").is_empty());
        assert!(decode("\u{feff}").is_empty());
        assert!(decode("NOME;AREA\n").is_empty());
    }

    #[test]
    fn quoted_fields_keep_separators_and_escaped_quotes() {
        let fields = parser::split_line_for_tests(r#"Ana;"Secretaria; Fazenda";"dito ""assim""""#);
        assert_eq!(fields, vec!["Ana", "Secretaria; Fazenda", r#"dito "assim""#]);
    }

    #[test]
    fn whitespace_before_an_opening_quote_keeps_the_field_quoted() {
        let dataset =
            Dataset::from_text("NOME;ORGAO_DESTINO;AREA\nAna; \"Receita; Federal\" ;TI\n");
        let record = &dataset.records()[0];
        assert_eq!(record.destination.as_deref(), Some("Receita; Federal"));
        assert_eq!(record.area.as_deref(), Some("TI"));

        let fields = parser::split_line_for_tests("  \"a;b\";\t\"c\";  d ; ");
        assert_eq!(fields, vec!["a;b", "c", "d", ""]);
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        let rows = decode("NOME;ORGAO_DESTINO;AREA\nAna;\"Receita; Federal\nBia;TCE;TI\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("ORGAO_DESTINO"), Some("Receita; Federal"));
        assert_eq!(rows[0].get("AREA"), Some(""));
        assert_eq!(rows[1].get("ORGAO_DESTINO"), Some("TCE"));
    }

    #[test]
    fn normalize_header_removes_invisible_characters() {
        let normalized = normalizer::normalize_for_tests("\u{feff}DATA  PUBLICACAO\u{200b} EXONERAÇÃO");
        assert_eq!(normalized, "DATA PUBLICACAO EXONERAÇÃO");
    }

    #[test]
    fn mapping_accepts_historical_spellings() {
        assert_eq!(mapping::lookup_for_tests("ÓRGÃO"), Some(RecordField::Destination));
        assert_eq!(mapping::lookup_for_tests("ORGAO_DESTINO"), Some(RecordField::Destination));
        assert_eq!(mapping::lookup_for_tests("Nome do Candidato"), Some(RecordField::Name));
        assert_eq!(mapping::lookup_for_tests("DATA EXONERAÇÃO"), Some(RecordField::ExoneratedOn));
        assert_eq!(mapping::lookup_for_tests("POSICAO CONCURSO"), Some(RecordField::ContestRank));
        assert_eq!(mapping::lookup_for_tests("situacao"), None);
        assert_eq!(mapping::lookup_for_tests("COLUNA_NOVA"), None);
    }

    #[test]
    fn records_resolve_canonical_fields_and_keep_extras() {
        let dataset = Dataset::from_text(
            "Nome do Candidato;ÁREA;SITUACAO;ÓRGÃO;DATA EXONERAÇÃO;COLUNA_NOVA\n\
Ana;TI;EXONERADO;  ;10/01/2024;x\n",
        );
        let record = &dataset.records()[0];
        assert_eq!(record.name, "Ana");
        assert_eq!(record.area.as_deref(), Some("TI"));
        assert_eq!(record.status.as_deref(), Some("EXONERADO"));
        assert_eq!(record.destination, None);
        assert_eq!(record.exonerated_on.as_deref(), Some("10/01/2024"));
        assert_eq!(record.extra_field("COLUNA_NOVA"), Some("x"));
        assert_eq!(record.field(RecordField::ExoneratedOn), Some("10/01/2024"));

        let both_spellings = Dataset::from_text(
            "NOME;ÁREA;AREA;SITUACAO;Situação\nAna;TI;;EXONERADO;NOMEADO\nBia;;FISCALIZAÇÃO;;EXONERADO\n",
        );
        let records = both_spellings.records();
        assert_eq!(records[0].area.as_deref(), Some("TI"));
        assert_eq!(records[0].status.as_deref(), Some("EXONERADO"));
        assert_eq!(records[1].area.as_deref(), Some("FISCALIZAÇÃO"));
        assert_eq!(records[1].status.as_deref(), Some("EXONERADO"));
    }

    #[test]
    fn from_reader_rejects_invalid_utf8() {
        let error = Dataset::from_reader(Cursor::new(vec![0xff, 0xfe, 0x00]))
            .expect_err("invalid encoding");
        assert!(matches!(error, DatasetError::Encoding(_)));
    }

    #[test]
    fn from_candidates_reports_every_attempted_path() {
        let error = Dataset::from_candidates(&["./does-not-exist.csv", "./nor-this.csv"])
            .expect_err("no candidate exists");
        match error {
            DatasetError::NoSource { attempted } => assert_eq!(attempted.len(), 2),
            other => panic!("expected missing source, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = Dataset::from_path("./does-not-exist.csv").expect_err("expected io error");
        assert!(matches!(error, DatasetError::Io(_)));
    }
}
