// ==============================================================================
// main.rs - Variant Pipeline Entry Point
// ==============================================================================
// Description: CLI for the synthetic COVID-19 genetic-risk dataset pipeline
// Author: Matt Barham
// Created: 2026-07-21
// Modified: 2026-08-05
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use covid_variant_pipeline::aggregator::summarize;
use covid_variant_pipeline::generator::{generate, GeneratorConfig};
use covid_variant_pipeline::output::{
    read_gene_summary, read_variants, write_gene_summary, write_risk_scores, write_variants,
    SCORES_FILE, SUMMARY_FILE, VARIANTS_FILE,
};
use covid_variant_pipeline::pipeline::PipelineRunner;
use covid_variant_pipeline::scoring::RiskWeights;
use covid_variant_pipeline::validator::DatasetValidator;

#[derive(Parser, Debug)]
#[command(author, version, about = "Synthetic COVID-19 genetic-risk dataset pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the synthetic variant table
    Generate {
        /// Number of variant records to produce
        #[arg(long, default_value_t = 109)]
        records: usize,

        /// Seed for the pseudo-random source
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Hub genes per pathway category
        #[arg(long, default_value_t = 2)]
        hub_genes: usize,

        /// Selection weight of a hub gene (non-hubs weigh 1.0)
        #[arg(long, default_value_t = 4.0)]
        hub_weight: f64,

        /// Output CSV path
        #[arg(long, default_value = VARIANTS_FILE)]
        output: PathBuf,
    },

    /// Aggregate the variant table into per-gene summary rows
    Summarize {
        /// Variant table CSV
        #[arg(long, default_value = VARIANTS_FILE)]
        input: PathBuf,

        /// Output CSV path
        #[arg(long, default_value = SUMMARY_FILE)]
        output: PathBuf,
    },

    /// Compute composite risk scores from the gene summary table
    Score {
        /// Gene summary CSV
        #[arg(long, default_value = SUMMARY_FILE)]
        input: PathBuf,

        /// Output CSV path
        #[arg(long, default_value = SCORES_FILE)]
        output: PathBuf,
    },

    /// Check both persisted tables and report every failing invariant
    Validate {
        /// Variant table CSV
        #[arg(long, default_value = VARIANTS_FILE)]
        variants: PathBuf,

        /// Gene summary CSV
        #[arg(long, default_value = SUMMARY_FILE)]
        summary: PathBuf,

        /// Expected variant row count
        #[arg(long, default_value_t = 109)]
        records: usize,

        /// Optional JSON report path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Run generate -> summarize -> score into one directory
    Pipeline {
        /// Output directory for all three tables
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Number of variant records to produce
        #[arg(long, default_value_t = 109)]
        records: usize,

        /// Seed for the pseudo-random source
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Hub genes per pathway category
        #[arg(long, default_value_t = 2)]
        hub_genes: usize,

        /// Selection weight of a hub gene (non-hubs weigh 1.0)
        #[arg(long, default_value_t = 4.0)]
        hub_weight: f64,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "covid_variant_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            records,
            seed,
            hub_genes,
            hub_weight,
            output,
        } => {
            let config = GeneratorConfig {
                record_count: records,
                seed,
                hub_genes_per_category: hub_genes,
                hub_weight,
            };
            let variants = generate(&config).context("Variant generation failed")?;
            write_variants(&output, &variants).context("Failed to write variant table")?;
        }

        Command::Summarize { input, output } => {
            let variants = read_variants(&input)
                .with_context(|| format!("Failed to read variant table {}", input.display()))?;
            let summaries = summarize(&variants).context("Gene aggregation failed")?;
            write_gene_summary(&output, &summaries).context("Failed to write gene summary")?;
        }

        Command::Score { input, output } => {
            let summaries = read_gene_summary(&input)
                .with_context(|| format!("Failed to read gene summary {}", input.display()))?;
            let scores = RiskWeights::default()
                .score_table(&summaries)
                .context("Risk scoring failed")?;
            write_risk_scores(&output, &scores).context("Failed to write risk scores")?;
        }

        Command::Validate {
            variants,
            summary,
            records,
            report,
        } => {
            let validation = DatasetValidator::new(records).validate(&variants, &summary)?;

            for check in &validation.checks {
                println!(
                    "[{}] {}: {}",
                    if check.passed { "PASS" } else { "FAIL" },
                    check.name,
                    check.detail
                );
            }

            if let Some(path) = report {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("Failed to create report file {}", path.display()))?;
                serde_json::to_writer_pretty(file, &validation)
                    .context("Failed to write JSON report")?;
                info!("Wrote validation report to {}", path.display());
            }

            if !validation.passed() {
                warn!(
                    "{} of {} checks failed",
                    validation.failure_count(),
                    validation.checks.len()
                );
                std::process::exit(1);
            }
            println!("All {} checks passed", validation.checks.len());
        }

        Command::Pipeline {
            out_dir,
            records,
            seed,
            hub_genes,
            hub_weight,
        } => {
            let config = GeneratorConfig {
                record_count: records,
                seed,
                hub_genes_per_category: hub_genes,
                hub_weight,
            };
            let artifacts = PipelineRunner::new(out_dir, config).run()?;
            info!(
                "Artifacts: {}, {}, {}",
                artifacts.variants_path.display(),
                artifacts.summary_path.display(),
                artifacts.scores_path.display()
            );
        }
    }

    Ok(())
}
