use evasao::observatory::dataset::{decode, Dataset};
use evasao::observatory::roster::{list_areas, roster, status_counts, RosterQuery};

const SAMPLE: &str = include_str!("data/dados.csv");

#[test]
fn sample_export_decodes_every_non_blank_row() {
    let rows = decode(SAMPLE);
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|row| row.len() == 14));
    assert_eq!(rows[0].get("NOME"), Some("Alberto Nunes"));
}

#[test]
fn quoted_fields_survive_decoding() {
    let dataset = Dataset::from_text(SAMPLE);
    let daniela = dataset
        .records()
        .iter()
        .find(|record| record.name == "Daniela Reis")
        .expect("record present");
    assert_eq!(
        daniela.destination.as_deref(),
        Some("Tribunal de Contas; MG")
    );
    assert_eq!(daniela.remark.as_deref(), Some(r#"Cargo "efetivo""#));
    assert_eq!(daniela.registration.as_deref(), Some("1004"));
}

#[test]
fn short_rows_are_padded_instead_of_rejected() {
    let dataset = Dataset::from_text(SAMPLE);
    let larissa = dataset.records().last().expect("last record");
    assert_eq!(larissa.name, "Larissa Melo");
    assert_eq!(larissa.contest_rank.as_deref(), Some("12"));
    assert!(larissa.disability.is_none());
    assert!(larissa.registration.is_none());
}

#[test]
fn from_reader_matches_from_text() {
    let from_reader = Dataset::from_reader(SAMPLE.as_bytes()).expect("reader decodes");
    assert_eq!(from_reader.records(), Dataset::from_text(SAMPLE).records());
}

#[test]
fn roster_views_over_the_sample() {
    let dataset = Dataset::from_text(SAMPLE);
    let records = dataset.records();

    assert_eq!(
        list_areas(records),
        vec!["FISCALIZAÇÃO", "Outros", "TI", "VETERANO"]
    );

    let rows = roster(records, &RosterQuery::for_area("FISCALIZAÇÃO"));
    let names: Vec<_> = rows.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Eduardo Lima",
            "Alberto Nunes",
            "Beatriz Prado",
            "Carlos Mota",
            "Joana Teles",
            "Larissa Melo",
        ]
    );

    let counts = status_counts(rows.iter().copied());
    assert_eq!(counts[0].status, "EM EXERCÍCIO");
    assert_eq!(
        counts
            .iter()
            .find(|entry| entry.status == "EXONERADO")
            .map(|entry| entry.count),
        Some(3)
    );

    let veterans = roster(records, &RosterQuery::for_area("VETERANO"));
    let names: Vec<_> = veterans.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(names, vec!["Igor Fontes", "Helena Castro"]);
}
