// ==============================================================================
// generator.rs - Synthetic Variant Generator
// ==============================================================================
// Description: Seeded generation of the synthetic variant table
// Author: Matt Barham
// Created: 2026-07-22
// Modified: 2026-08-05
// Version: 1.0.0
// ==============================================================================
// The output is SYNTHETIC data shaped for tutorial visualizations: hub genes
// are deliberately oversampled and given more significant p-values so the
// dataset shows visible structure when plotted. No field reproduces real
// effect sizes.
// ==============================================================================

use crate::models::{Chromosome, Population, VariantRecord, P_VALUE_MAX};
use crate::reference;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Smallest generated genomic coordinate.
const MIN_POSITION: u64 = 1_000_000;

/// Hard cap on mean variants per gene; beyond this the per-gene
/// distribution is implausibly skewed for a ~60-gene universe.
const MAX_VARIANTS_PER_GENE: usize = 100;

/// log10 p-value band for hub genes.
const HUB_EXPONENT_RANGE: (f64, f64) = (-8.0, -6.0);

/// Lower log10 bound for non-hub genes; the upper bound is log10(5e-5).
const NON_HUB_EXPONENT_MIN: f64 = -6.5;

/// Errors raised by [`GeneratorConfig::validate`] before any file is written.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("record_count must be positive")]
    ZeroRecordCount,

    #[error(
        "record_count {requested} exceeds the sane maximum {max} for a {universe}-gene universe"
    )]
    RecordCountTooLarge {
        requested: usize,
        max: usize,
        universe: usize,
    },

    #[error("hub_weight must be a positive finite number, got {0}")]
    InvalidHubWeight(f64),

    #[error("failed to build gene sampling weights: {0}")]
    Weights(#[from] WeightedError),
}

/// Generator parameters. Defaults reproduce the tutorial dataset shape:
/// 109 records over the 60-gene universe, seed 42.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of variant records to produce
    pub record_count: usize,

    /// Seed for the pseudo-random source; same seed + config = identical output
    pub seed: u64,

    /// How many leading genes of each pathway category are hubs
    pub hub_genes_per_category: usize,

    /// Selection weight of a hub gene (non-hubs weigh 1.0)
    pub hub_weight: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: 109,
            seed: 42,
            hub_genes_per_category: 2,
            hub_weight: 4.0,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self, universe_size: usize) -> Result<(), ConfigError> {
        if self.record_count == 0 {
            return Err(ConfigError::ZeroRecordCount);
        }
        let max = MAX_VARIANTS_PER_GENE * universe_size;
        if self.record_count > max {
            return Err(ConfigError::RecordCountTooLarge {
                requested: self.record_count,
                max,
                universe: universe_size,
            });
        }
        if !self.hub_weight.is_finite() || self.hub_weight <= 0.0 {
            return Err(ConfigError::InvalidHubWeight(self.hub_weight));
        }
        Ok(())
    }
}

/// Generate the synthetic variant table.
///
/// Deterministic: the RNG is seeded from `config.seed` and threaded through
/// every draw, so the same configuration yields byte-identical rows in the
/// same order. Each field is drawn independently except position, which is
/// bounded by the assigned chromosome's GRCh38 length.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<VariantRecord>, ConfigError> {
    let genes = reference::gene_universe();
    config.validate(genes.len())?;

    let hubs: HashSet<&str> = reference::hub_genes(config.hub_genes_per_category)
        .into_iter()
        .collect();
    let weights: Vec<f64> = genes
        .iter()
        .map(|g| if hubs.contains(g) { config.hub_weight } else { 1.0 })
        .collect();
    let gene_dist = WeightedIndex::new(&weights)?;

    debug!(
        "Generating {} variants, seed {}, {} hub genes (weight {})",
        config.record_count,
        config.seed,
        hubs.len(),
        config.hub_weight
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rs_ids: HashSet<String> = HashSet::with_capacity(config.record_count);
    let mut records = Vec::with_capacity(config.record_count);
    let non_hub_exponent_max = P_VALUE_MAX.log10();

    for _ in 0..config.record_count {
        let gene = genes[gene_dist.sample(&mut rng)];

        let chromosome = Chromosome::ALL[rng.gen_range(0..Chromosome::ALL.len())];
        let position = rng.gen_range(MIN_POSITION..=reference::chromosome_length(chromosome));

        let functional_consequence = reference::FUNCTIONAL_CONSEQUENCES
            [rng.gen_range(0..reference::FUNCTIONAL_CONSEQUENCES.len())]
        .to_string();

        // Retry on collision so rs_ids stay unique across the table
        let rs_id = loop {
            let candidate = format!("rs{}", rng.gen_range(1_000_000u64..100_000_000));
            if rs_ids.insert(candidate.clone()) {
                break candidate;
            }
        };

        // Hubs draw from a lower log10 band; both bands sit inside (0, 5e-5]
        let exponent = if hubs.contains(gene) {
            rng.gen_range(HUB_EXPONENT_RANGE.0..HUB_EXPONENT_RANGE.1)
        } else {
            rng.gen_range(NON_HUB_EXPONENT_MIN..non_hub_exponent_max)
        };
        let p_value = 10f64.powf(exponent);

        let odds_ratio = rng.gen_range(1.1..3.5);
        let population = Population::ALL[rng.gen_range(0..Population::ALL.len())];
        let disease_association =
            reference::DISEASES[rng.gen_range(0..reference::DISEASES.len())].to_string();

        records.push(VariantRecord {
            rs_id,
            chromosome,
            position,
            functional_consequence,
            gene: gene.to_string(),
            p_value,
            odds_ratio,
            population,
            disease_association,
        });
    }

    info!(
        "Generated {} variants across {} distinct genes",
        records.len(),
        records
            .iter()
            .map(|r| r.gene.as_str())
            .collect::<HashSet<_>>()
            .len()
    );

    Ok(records)
}
