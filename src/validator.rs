// ==============================================================================
// validator.rs - Dataset Validation
// ==============================================================================
// Description: Structural and range checks over the persisted pipeline tables
// Author: Matt Barham
// Created: 2026-07-25
// Modified: 2026-08-05
// Version: 1.0.0
// ==============================================================================
// Every check runs and is reported independently; the report's value is the
// full diagnostic, so a failing check never aborts the remaining ones.
// ==============================================================================

use crate::models::{Chromosome, P_VALUE_MAX, SUMMARY_COLUMNS, VARIANT_COLUMNS};
use crate::reference::pathway_of;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Outcome of a single validation check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Aggregated validation outcome over both tables.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    pub variants_file: String,
    pub summary_file: String,
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

pub struct DatasetValidator {
    expected_record_count: usize,
}

impl DatasetValidator {
    pub fn new(expected_record_count: usize) -> Self {
        Self {
            expected_record_count,
        }
    }

    /// Run all checks over the two persisted tables.
    ///
    /// Returns Err only when a file cannot be read at all; value-level
    /// problems are reported as failing checks in the returned report.
    pub fn validate(&self, variants_path: &Path, summary_path: &Path) -> Result<ValidationReport> {
        info!(
            "Validating {} and {}",
            variants_path.display(),
            summary_path.display()
        );

        let (variant_headers, variant_rows) = read_raw(variants_path)
            .with_context(|| format!("Failed to read variant table {}", variants_path.display()))?;
        let (summary_headers, summary_rows) = read_raw(summary_path)
            .with_context(|| format!("Failed to read summary table {}", summary_path.display()))?;

        let checks = vec![
            self.check_variant_row_count(&variant_rows),
            check_columns("variant_columns", &variant_headers, &VARIANT_COLUMNS),
            check_variant_field_types(&variant_headers, &variant_rows),
            check_p_value_range(&variant_headers, &variant_rows),
            check_genes_known("variant_genes_known", &variant_headers, &variant_rows, "gene"),
            check_rs_id_unique(&variant_headers, &variant_rows),
            check_columns("summary_columns", &summary_headers, &SUMMARY_COLUMNS),
            check_summary_field_types(&summary_headers, &summary_rows),
            check_genes_known("summary_genes_known", &summary_headers, &summary_rows, "gene"),
            check_summary_row_count(&variant_headers, &variant_rows, &summary_rows),
            check_variant_count_total(&summary_headers, &summary_rows, variant_rows.len()),
            check_pathway_consistency(&summary_headers, &summary_rows),
        ];

        let report = ValidationReport {
            generated_at: Utc::now(),
            variants_file: variants_path.display().to_string(),
            summary_file: summary_path.display().to_string(),
            checks,
        };

        info!(
            "Validation complete: {}/{} checks passed",
            report.checks.len() - report.failure_count(),
            report.checks.len()
        );

        Ok(report)
    }

    fn check_variant_row_count(&self, rows: &[StringRecord]) -> CheckResult {
        check(
            "variant_row_count",
            rows.len() == self.expected_record_count,
            format!(
                "{} rows (expected {})",
                rows.len(),
                self.expected_record_count
            ),
        )
    }
}

fn read_raw(path: &Path) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((headers, rows))
}

fn check(name: &str, passed: bool, detail: String) -> CheckResult {
    debug!("{}: {}", name, if passed { "PASS" } else { "FAIL" });
    CheckResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn col(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn field<'a>(row: &'a StringRecord, idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| row.get(i))
}

/// Cap offender lists in check details.
fn list_offenders(offenders: &[String]) -> String {
    const SHOWN: usize = 5;
    if offenders.len() <= SHOWN {
        offenders.join(", ")
    } else {
        format!(
            "{} (+{} more)",
            offenders[..SHOWN].join(", "),
            offenders.len() - SHOWN
        )
    }
}

fn check_columns(name: &str, headers: &StringRecord, expected: &[&str]) -> CheckResult {
    let actual: Vec<&str> = headers.iter().collect();
    check(
        name,
        actual == expected,
        if actual == expected {
            format!("all {} columns present", expected.len())
        } else {
            format!("expected [{}], found [{}]", expected.join(","), actual.join(","))
        },
    )
}

fn check_variant_field_types(headers: &StringRecord, rows: &[StringRecord]) -> CheckResult {
    let chr_idx = col(headers, "chromosome");
    let pos_idx = col(headers, "position");
    let or_idx = col(headers, "odds_ratio");

    let mut offenders = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let chr_ok = field(row, chr_idx)
            .map(|s| Chromosome::from_str(s).is_ok())
            .unwrap_or(false);
        let pos_ok = field(row, pos_idx)
            .map(|s| s.parse::<u64>().map(|p| p > 0).unwrap_or(false))
            .unwrap_or(false);
        let or_ok = field(row, or_idx)
            .map(|s| s.parse::<f64>().map(|v| v > 0.0).unwrap_or(false))
            .unwrap_or(false);
        if !(chr_ok && pos_ok && or_ok) {
            offenders.push(format!("row {}", i + 1));
        }
    }

    check(
        "variant_field_types",
        offenders.is_empty(),
        if offenders.is_empty() {
            format!("{} rows well-typed", rows.len())
        } else {
            format!("malformed fields in {}", list_offenders(&offenders))
        },
    )
}

fn check_p_value_range(headers: &StringRecord, rows: &[StringRecord]) -> CheckResult {
    let p_idx = col(headers, "p_value");
    let rs_idx = col(headers, "rs_id");

    let mut offenders = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let in_range = field(row, p_idx)
            .and_then(|s| s.parse::<f64>().ok())
            .map(|p| p > 0.0 && p <= P_VALUE_MAX)
            .unwrap_or(false);
        if !in_range {
            let label = field(row, rs_idx).unwrap_or("").to_string();
            offenders.push(if label.is_empty() {
                format!("row {}", i + 1)
            } else {
                label
            });
        }
    }

    check(
        "p_value_range",
        offenders.is_empty(),
        if offenders.is_empty() {
            format!("all {} p-values in (0, {:e}]", rows.len(), P_VALUE_MAX)
        } else {
            format!("out of range: {}", list_offenders(&offenders))
        },
    )
}

fn check_genes_known(
    name: &str,
    headers: &StringRecord,
    rows: &[StringRecord],
    column: &str,
) -> CheckResult {
    let gene_idx = col(headers, column);

    let mut offenders = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        match field(row, gene_idx) {
            Some(gene) if pathway_of(gene).is_some() => {}
            Some(gene) => offenders.push(gene.to_string()),
            None => offenders.push(format!("row {}", i + 1)),
        }
    }

    check(
        name,
        offenders.is_empty(),
        if offenders.is_empty() {
            format!("all {} genes in lookup", rows.len())
        } else {
            format!("unknown genes: {}", list_offenders(&offenders))
        },
    )
}

fn check_rs_id_unique(headers: &StringRecord, rows: &[StringRecord]) -> CheckResult {
    let rs_idx = col(headers, "rs_id");

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for row in rows {
        if let Some(rs_id) = field(row, rs_idx) {
            if !seen.insert(rs_id.to_string()) {
                duplicates.push(rs_id.to_string());
            }
        }
    }

    check(
        "rs_id_unique",
        duplicates.is_empty(),
        if duplicates.is_empty() {
            format!("{} distinct rs_ids", seen.len())
        } else {
            format!("duplicates: {}", list_offenders(&duplicates))
        },
    )
}

fn check_summary_field_types(headers: &StringRecord, rows: &[StringRecord]) -> CheckResult {
    let count_idx = col(headers, "variant_count");
    let min_p_idx = col(headers, "min_p_value");
    let or_idx = col(headers, "mean_odds_ratio");

    let mut offenders = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let count_ok = field(row, count_idx)
            .map(|s| s.parse::<u64>().map(|c| c > 0).unwrap_or(false))
            .unwrap_or(false);
        let min_p_ok = field(row, min_p_idx)
            .map(|s| s.parse::<f64>().is_ok())
            .unwrap_or(false);
        let or_ok = field(row, or_idx)
            .map(|s| s.parse::<f64>().is_ok())
            .unwrap_or(false);
        if !(count_ok && min_p_ok && or_ok) {
            offenders.push(format!("row {}", i + 1));
        }
    }

    check(
        "summary_field_types",
        offenders.is_empty(),
        if offenders.is_empty() {
            format!("{} rows well-typed", rows.len())
        } else {
            format!("malformed fields in {}", list_offenders(&offenders))
        },
    )
}

fn check_summary_row_count(
    variant_headers: &StringRecord,
    variant_rows: &[StringRecord],
    summary_rows: &[StringRecord],
) -> CheckResult {
    let gene_idx = col(variant_headers, "gene");
    let distinct: HashSet<&str> = variant_rows
        .iter()
        .filter_map(|row| field(row, gene_idx))
        .collect();

    check(
        "summary_row_count",
        summary_rows.len() == distinct.len(),
        format!(
            "{} summary rows, {} distinct variant genes",
            summary_rows.len(),
            distinct.len()
        ),
    )
}

fn check_variant_count_total(
    summary_headers: &StringRecord,
    summary_rows: &[StringRecord],
    variant_row_count: usize,
) -> CheckResult {
    let count_idx = col(summary_headers, "variant_count");
    let total: u64 = summary_rows
        .iter()
        .filter_map(|row| field(row, count_idx))
        .filter_map(|s| s.parse::<u64>().ok())
        .sum();

    check(
        "variant_count_total",
        total as usize == variant_row_count,
        format!(
            "variant_count sums to {}, variant table has {} rows",
            total, variant_row_count
        ),
    )
}

fn check_pathway_consistency(headers: &StringRecord, rows: &[StringRecord]) -> CheckResult {
    let gene_idx = col(headers, "gene");
    let pathway_idx = col(headers, "pathway_category");

    let mut offenders = Vec::new();
    for row in rows {
        let gene = match field(row, gene_idx) {
            Some(g) => g,
            None => continue,
        };
        // Unknown genes are already reported by summary_genes_known
        let expected = match pathway_of(gene) {
            Some(category) => category,
            None => continue,
        };
        if field(row, pathway_idx) != Some(expected.as_str()) {
            offenders.push(gene.to_string());
        }
    }

    check(
        "pathway_consistency",
        offenders.is_empty(),
        if offenders.is_empty() {
            format!("{} rows match the gene->pathway lookup", rows.len())
        } else {
            format!("mismatched categories: {}", list_offenders(&offenders))
        },
    )
}
