// ==============================================================================
// aggregator.rs - Gene Summary Aggregator
// ==============================================================================
// Description: Group-by-gene reduction of the variant table
// Author: Matt Barham
// Created: 2026-07-23
// Modified: 2026-08-04
// Version: 1.0.0
// ==============================================================================

use crate::models::{DataIntegrityError, GeneSummaryRecord, PathwayCategory, VariantRecord};
use crate::reference::pathway_of;
use std::collections::BTreeMap;
use tracing::info;

struct GeneAccumulator {
    pathway_category: PathwayCategory,
    variant_count: u64,
    min_p_value: f64,
    odds_ratio_sum: f64,
    diseases: Vec<String>,
}

/// Reduce the variant table to one summary row per distinct gene.
///
/// The reduction is a total, lossless partition: every input row lands in
/// exactly one group, and the sum of `variant_count` across the output
/// equals the input length. Output rows are ordered by gene symbol.
///
/// A gene missing from the pathway lookup is a data-integrity failure,
/// never silently categorized.
pub fn summarize(variants: &[VariantRecord]) -> Result<Vec<GeneSummaryRecord>, DataIntegrityError> {
    let mut groups: BTreeMap<&str, GeneAccumulator> = BTreeMap::new();

    for variant in variants {
        let pathway_category =
            pathway_of(&variant.gene).ok_or_else(|| DataIntegrityError::UnknownGene {
                gene: variant.gene.clone(),
            })?;

        let entry = groups
            .entry(variant.gene.as_str())
            .or_insert_with(|| GeneAccumulator {
                pathway_category,
                variant_count: 0,
                min_p_value: f64::INFINITY,
                odds_ratio_sum: 0.0,
                diseases: Vec::new(),
            });

        entry.variant_count += 1;
        entry.min_p_value = entry.min_p_value.min(variant.p_value);
        entry.odds_ratio_sum += variant.odds_ratio;
        if !entry.diseases.contains(&variant.disease_association) {
            entry.diseases.push(variant.disease_association.clone());
        }
    }

    let summaries: Vec<GeneSummaryRecord> = groups
        .into_iter()
        .map(|(gene, acc)| GeneSummaryRecord {
            gene: gene.to_string(),
            variant_count: acc.variant_count,
            min_p_value: acc.min_p_value,
            mean_odds_ratio: acc.odds_ratio_sum / acc.variant_count as f64,
            pathway_category: acc.pathway_category,
            diseases: acc.diseases,
        })
        .collect();

    info!(
        "Summarized {} variants into {} gene rows",
        variants.len(),
        summaries.len()
    );

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, GeneratorConfig};
    use crate::models::{Chromosome, Population};
    use std::collections::HashSet;

    fn variant(gene: &str, rs_id: &str, p_value: f64, odds_ratio: f64, disease: &str) -> VariantRecord {
        VariantRecord {
            rs_id: rs_id.to_string(),
            chromosome: Chromosome::Autosome(21),
            position: 33_000_000,
            functional_consequence: "intron_variant".to_string(),
            gene: gene.to_string(),
            p_value,
            odds_ratio,
            population: Population::European,
            disease_association: disease.to_string(),
        }
    }

    #[test]
    fn test_ifnar2_worked_example() {
        let variants = vec![
            variant("IFNAR2", "rs1001", 1e-6, 1.5, "Severe COVID-19"),
            variant("IFNAR2", "rs1002", 2e-6, 2.0, "ARDS"),
            variant("IFNAR2", "rs1003", 5e-6, 1.8, "Severe COVID-19"),
        ];

        let summaries = summarize(&variants).unwrap();
        assert_eq!(summaries.len(), 1);

        let row = &summaries[0];
        assert_eq!(row.gene, "IFNAR2");
        assert_eq!(row.variant_count, 3);
        assert_eq!(row.min_p_value, 1e-6);
        assert!((row.mean_odds_ratio - 1.7667).abs() < 1e-3);
        assert_eq!(row.pathway_category, PathwayCategory::ImmuneResponse);
        assert_eq!(row.diseases, vec!["Severe COVID-19", "ARDS"]);
    }

    #[test]
    fn test_single_variant_degrades_to_value() {
        let variants = vec![variant("ACE2", "rs2001", 3e-7, 2.2, "Pneumonia")];
        let summaries = summarize(&variants).unwrap();

        assert_eq!(summaries[0].variant_count, 1);
        assert_eq!(summaries[0].min_p_value, 3e-7);
        assert_eq!(summaries[0].mean_odds_ratio, 2.2);
    }

    #[test]
    fn test_lossless_partition_of_generated_table() {
        let variants = generate(&GeneratorConfig::default()).unwrap();
        let summaries = summarize(&variants).unwrap();

        let distinct: HashSet<&str> = variants.iter().map(|v| v.gene.as_str()).collect();
        assert_eq!(summaries.len(), distinct.len());

        let total: u64 = summaries.iter().map(|s| s.variant_count).sum();
        assert_eq!(total as usize, variants.len());

        // min_p_value bounds every constituent p-value
        for summary in &summaries {
            for v in variants.iter().filter(|v| v.gene == summary.gene) {
                assert!(summary.min_p_value <= v.p_value);
            }
        }
    }

    #[test]
    fn test_output_sorted_by_gene() {
        let variants = vec![
            variant("VWF", "rs3001", 1e-6, 1.5, "Thrombosis"),
            variant("ACE2", "rs3002", 2e-6, 2.0, "Pneumonia"),
            variant("IL6", "rs3003", 3e-6, 1.2, "Cytokine storm"),
        ];
        let summaries = summarize(&variants).unwrap();
        let genes: Vec<&str> = summaries.iter().map(|s| s.gene.as_str()).collect();
        assert_eq!(genes, vec!["ACE2", "IL6", "VWF"]);
    }

    #[test]
    fn test_unknown_gene_rejected() {
        let variants = vec![variant("NOT_A_GENE", "rs4001", 1e-6, 1.5, "Sepsis")];
        match summarize(&variants) {
            Err(DataIntegrityError::UnknownGene { gene }) => assert_eq!(gene, "NOT_A_GENE"),
            other => panic!("expected UnknownGene, got {:?}", other.map(|_| ())),
        }
    }
}
