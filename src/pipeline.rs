// ==============================================================================
// pipeline.rs - Batch Pipeline Orchestration
// ==============================================================================
// Description: Runs generate -> summarize -> score over one output directory
// Author: Matt Barham
// Created: 2026-07-27
// Modified: 2026-08-05
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::aggregator::summarize;
use crate::generator::{generate, GeneratorConfig};
use crate::output::{
    read_gene_summary, read_variants, write_gene_summary, write_risk_scores, write_variants,
    SCORES_FILE, SUMMARY_FILE, VARIANTS_FILE,
};
use crate::scoring::RiskWeights;

/// Paths of the three tables a pipeline run leaves behind.
#[derive(Debug)]
pub struct PipelineArtifacts {
    pub variants_path: PathBuf,
    pub summary_path: PathBuf,
    pub scores_path: PathBuf,
}

pub struct PipelineRunner {
    out_dir: PathBuf,
    config: GeneratorConfig,
}

impl PipelineRunner {
    pub fn new(out_dir: PathBuf, config: GeneratorConfig) -> Self {
        Self { out_dir, config }
    }

    /// Run all three stages in order.
    ///
    /// Stages communicate only through the persisted tables: each stage
    /// re-reads its predecessor's file rather than passing rows in memory,
    /// so every artifact is exercised exactly as downstream consumers see it.
    pub fn run(&self) -> Result<PipelineArtifacts> {
        info!("Starting pipeline run into {}", self.out_dir.display());
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create output directory {}", self.out_dir.display()))?;

        // 1. Generate the variant table
        let variants = generate(&self.config).context("Variant generation failed")?;
        let variants_path = self.out_dir.join(VARIANTS_FILE);
        write_variants(&variants_path, &variants).context("Failed to write variant table")?;

        // 2. Aggregate per gene
        let variants = read_variants(&variants_path).context("Failed to re-read variant table")?;
        let summaries = summarize(&variants).context("Gene aggregation failed")?;
        let summary_path = self.out_dir.join(SUMMARY_FILE);
        write_gene_summary(&summary_path, &summaries).context("Failed to write gene summary")?;

        // 3. Score
        let summaries = read_gene_summary(&summary_path).context("Failed to re-read gene summary")?;
        let scores = RiskWeights::default()
            .score_table(&summaries)
            .context("Risk scoring failed")?;
        let scores_path = self.out_dir.join(SCORES_FILE);
        write_risk_scores(&scores_path, &scores).context("Failed to write risk scores")?;

        info!("Pipeline complete: {} variants, {} genes", variants.len(), scores.len());

        Ok(PipelineArtifacts {
            variants_path,
            summary_path,
            scores_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::DatasetValidator;

    #[test]
    fn test_full_run_produces_valid_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::default();
        let runner = PipelineRunner::new(dir.path().to_path_buf(), config.clone());

        let artifacts = runner.run().unwrap();
        assert!(artifacts.variants_path.exists());
        assert!(artifacts.summary_path.exists());
        assert!(artifacts.scores_path.exists());

        let report = DatasetValidator::new(config.record_count)
            .validate(&artifacts.variants_path, &artifacts.summary_path)
            .unwrap();
        assert!(report.passed());
    }

    #[test]
    fn test_bad_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            record_count: 0,
            ..GeneratorConfig::default()
        };

        let result = PipelineRunner::new(dir.path().to_path_buf(), config).run();
        assert!(result.is_err());
        assert!(!dir.path().join(VARIANTS_FILE).exists());
    }
}
