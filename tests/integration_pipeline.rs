//! End-to-end tests for the hashing pipeline
//!
//! These run complete Google and Meta passes over the fixture files in
//! `testdata/` and check the produced artifacts.

use hashify::config::Settings;
use hashify::export::write_artifacts;
use hashify::hasher::{EmptyValuePolicy, sha256_hex};
use hashify::pipeline::{MetaTarget, RunConfig, RunStatus, process_file};
use std::collections::HashSet;
use std::path::PathBuf;
use tempfile::tempdir;

fn clientes() -> PathBuf {
    PathBuf::from("testdata/clientes.csv")
}

fn expect_success(status: RunStatus) -> (usize, hashify::pipeline::RunOutput, Vec<hashify::export::Artifact>) {
    match status {
        RunStatus::Success {
            count,
            output,
            artifacts,
            ..
        } => (count, output, artifacts),
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn test_google_run_on_fixture() {
    let status = process_file(&clientes(), &RunConfig::google(), &Settings::default());
    let (count, output, artifacts) = expect_success(status);

    // Rows 2 and 5 carry no usable value and are dropped.
    assert_eq!(count, 3, "Should keep 3 of 5 rows");
    assert_eq!(output.formatted.height(), output.hashed.height());
    assert_eq!(output.report.rows_in, 5);
    assert_eq!(output.report.columns_classified, 4);

    let formatted = &artifacts[1];
    assert_eq!(formatted.file_name, "clientes - formatado.csv");
    assert_eq!(
        formatted.contents,
        "Nome_FIRST_NAME,Nome_LAST_NAME,telefone1_FORMATADO,FONE2_FORMATADO,EMAIL_FORMATADO\n\
         jose,da silva,+5511987654321,+5521998765432,foo@bar.com\n\
         maria,,,,maria@exemplo.com.br\n\
         angela,maria conceicao,+5511987654321,,maria@exemplo.com.br\n"
    );

    let hashed = &artifacts[0];
    assert_eq!(hashed.file_name, "clientes - hashado.csv");
    let mut lines = hashed.contents.lines();
    assert_eq!(
        lines.next(),
        Some(
            "Nome_FIRST_NAME_HASHED,Nome_LAST_NAME_HASHED,telefone1_FORMATADO_HASHED,\
             FONE2_FORMATADO_HASHED,EMAIL_FORMATADO_HASHED"
        )
    );
    let first_row: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(first_row[0], sha256_hex("jose"));
    assert_eq!(first_row[1], sha256_hex("da silva"));
    assert_eq!(first_row[4], sha256_hex("foo@bar.com"));

    // Single-word name: empty last name, no last-name digest.
    let second_row: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(second_row[1], "");
}

#[test]
fn test_google_digest_policy_hashes_empty_last_name() {
    let settings = Settings {
        empty_value_policy: EmptyValuePolicy::Digest,
        ..Settings::default()
    };
    let (_, output, _) = expect_success(process_file(&clientes(), &RunConfig::google(), &settings));

    let last_names = output.hashed.column("Nome_LAST_NAME_HASHED").unwrap();
    assert_eq!(last_names.get(1), Some(sha256_hex("").as_str()));
}

#[test]
fn test_meta_phone_run_on_fixture() {
    let status = process_file(
        &clientes(),
        &RunConfig::meta(MetaTarget::Phone),
        &Settings::default(),
    );
    let (count, output, _) = expect_success(status);

    assert_eq!(count, 2);
    let values: HashSet<&str> = output.formatted.columns()[0]
        .cells()
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    assert_eq!(values, HashSet::from(["+5511987654321", "+5521998765432"]));

    for (value, digest) in output.formatted.columns()[0]
        .cells()
        .iter()
        .zip(output.hashed.columns()[0].cells())
    {
        assert_eq!(
            digest.as_deref(),
            Some(sha256_hex(value.as_deref().unwrap()).as_str()),
            "Hash row must match formatted row"
        );
    }
}

#[test]
fn test_meta_email_has_no_duplicates() {
    let status = process_file(
        &clientes(),
        &RunConfig::meta(MetaTarget::Email),
        &Settings::default(),
    );
    let (count, output, artifacts) = expect_success(status);

    assert_eq!(count, 2);
    assert_eq!(output.formatted.headers(), vec!["EMAIL_FORMATADO"]);
    assert_eq!(
        artifacts[1].contents,
        "EMAIL_FORMATADO\nfoo@bar.com\nmaria@exemplo.com.br\n"
    );
}

#[test]
fn test_no_matching_columns_is_warning() {
    let status = process_file(
        &PathBuf::from("testdata/sem_colunas.csv"),
        &RunConfig::google(),
        &Settings::default(),
    );
    assert!(
        matches!(status, RunStatus::Warning { .. }),
        "Expected a warning, got {status:?}"
    );

    let status = process_file(
        &PathBuf::from("testdata/sem_colunas.csv"),
        &RunConfig::meta(MetaTarget::Email),
        &Settings::default(),
    );
    assert!(matches!(status, RunStatus::Warning { .. }));
}

#[test]
fn test_malformed_file_is_failure() {
    let status = process_file(
        &PathBuf::from("testdata/malformed.csv"),
        &RunConfig::google(),
        &Settings::default(),
    );
    match status {
        RunStatus::Failed { error } => assert!(error.contains("row 2"), "error: {error}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_artifacts_written_to_disk() {
    let (_, _, artifacts) = expect_success(process_file(
        &clientes(),
        &RunConfig::google(),
        &Settings::default(),
    ));
    let dir = tempdir().unwrap();

    let written = write_artifacts(dir.path(), &artifacts).unwrap();
    assert_eq!(written.len(), 2);
    assert!(dir.path().join("clientes - hashado.csv").is_file());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("clientes - formatado.csv")).unwrap(),
        artifacts[1].contents
    );
}
