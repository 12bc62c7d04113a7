// ==============================================================================
// output.rs - CSV Table I/O
// ==============================================================================
// Description: Readers/writers for the three persisted pipeline tables
// Author: Matt Barham
// Created: 2026-07-24
// Modified: 2026-08-05
// Version: 1.0.0
// ==============================================================================
// Format: comma-separated with header row
//   covid19_genetic_risk_variants.csv  rs_id,chromosome,position,...
//   covid19_gene_summary.csv           gene,variant_count,min_p_value,...
//   covid19_gene_risk_scores.csv       gene,risk_score
// ==============================================================================

use crate::models::{GeneSummaryRecord, RiskScoreRecord, VariantRecord};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

/// Default file name of the variant table.
pub const VARIANTS_FILE: &str = "covid19_genetic_risk_variants.csv";

/// Default file name of the gene summary table.
pub const SUMMARY_FILE: &str = "covid19_gene_summary.csv";

/// Default file name of the risk score table.
pub const SCORES_FILE: &str = "covid19_gene_risk_scores.csv";

/// Errors that can occur reading or writing a persisted table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finalize CSV writer: {0}")]
    Finalize(String),

    #[error("failed to persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("table {0} is empty or contains no valid records")]
    EmptyTable(String),
}

/// Serialize rows to CSV at `path`, all-or-nothing.
///
/// Rows land in a temp file in the destination directory which is renamed
/// into place only after a successful flush, so a failed stage never leaves
/// a partially written table behind.
fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), TableError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(tmp);
    for row in rows {
        writer.serialize(row)?;
    }
    let tmp = writer
        .into_inner()
        .map_err(|e| TableError::Finalize(e.to_string()))?;

    tmp.persist(path)?;
    Ok(())
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, TableError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    if rows.is_empty() {
        return Err(TableError::EmptyTable(path.display().to_string()));
    }
    Ok(rows)
}

pub fn write_variants(path: &Path, variants: &[VariantRecord]) -> Result<(), TableError> {
    write_table(path, variants)?;
    info!("Wrote {} variants to {}", variants.len(), path.display());
    Ok(())
}

pub fn read_variants(path: &Path) -> Result<Vec<VariantRecord>, TableError> {
    read_table(path)
}

pub fn write_gene_summary(path: &Path, summaries: &[GeneSummaryRecord]) -> Result<(), TableError> {
    write_table(path, summaries)?;
    info!("Wrote {} gene summary rows to {}", summaries.len(), path.display());
    Ok(())
}

pub fn read_gene_summary(path: &Path) -> Result<Vec<GeneSummaryRecord>, TableError> {
    read_table(path)
}

pub fn write_risk_scores(path: &Path, scores: &[RiskScoreRecord]) -> Result<(), TableError> {
    write_table(path, scores)?;
    info!("Wrote {} risk scores to {}", scores.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summarize;
    use crate::generator::{generate, GeneratorConfig};
    use crate::models::{SUMMARY_COLUMNS, VARIANT_COLUMNS};
    use std::fs;

    #[test]
    fn test_variant_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(VARIANTS_FILE);

        let variants = generate(&GeneratorConfig::default()).unwrap();
        write_variants(&path, &variants).unwrap();

        let read_back = read_variants(&path).unwrap();
        assert_eq!(read_back, variants);
    }

    #[test]
    fn test_variant_header_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(VARIANTS_FILE);

        let variants = generate(&GeneratorConfig::default()).unwrap();
        write_variants(&path, &variants).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, VARIANT_COLUMNS.join(","));
    }

    #[test]
    fn test_summary_roundtrip_with_diseases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUMMARY_FILE);

        let variants = generate(&GeneratorConfig::default()).unwrap();
        let summaries = summarize(&variants).unwrap();
        write_gene_summary(&path, &summaries).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, SUMMARY_COLUMNS.join(","));

        let read_back = read_gene_summary(&path).unwrap();
        assert_eq!(read_back, summaries);
    }

    #[test]
    fn test_identical_seed_writes_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");

        let config = GeneratorConfig::default();
        write_variants(&first, &generate(&config).unwrap()).unwrap();
        write_variants(&second, &generate(&config).unwrap()).unwrap();

        assert_eq!(
            fs::read(&first).unwrap(),
            fs::read(&second).unwrap()
        );
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_variants(&dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn test_read_empty_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, format!("{}\n", VARIANT_COLUMNS.join(","))).unwrap();

        assert!(matches!(
            read_variants(&path),
            Err(TableError::EmptyTable(_))
        ));
    }
}
