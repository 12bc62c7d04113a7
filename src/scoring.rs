// ==============================================================================
// scoring.rs - Composite Risk Score Calculator
// ==============================================================================
// Description: Fixed-weight composite score per gene summary row
// Author: Matt Barham
// Created: 2026-07-23
// Modified: 2026-08-04
// Version: 1.0.0
// ==============================================================================

use crate::models::{DataIntegrityError, GeneSummaryRecord, RiskScoreRecord};
use tracing::info;

/// Weights of the composite score components. Fixed defaults; they must not
/// drift or downstream results stop being reproducible.
///
/// ```text
/// p_score       = -log10(min_p_value) * p_weight
/// or_score      = mean_odds_ratio * or_weight
/// variant_score = variant_count * count_weight
/// risk_score    = p_score + or_score + variant_score
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    /// Weight of the -log10(min p-value) term
    pub p_weight: f64,
    /// Weight of the mean odds ratio term
    pub or_weight: f64,
    /// Weight of the variant count term
    pub count_weight: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            p_weight: 0.4,
            or_weight: 0.4,
            count_weight: 0.2,
        }
    }
}

impl RiskWeights {
    /// Score a single gene summary row.
    ///
    /// A non-positive `min_p_value` is undefined for log10 and is rejected
    /// as a data-integrity error rather than clamped. No normalization or
    /// ranking happens here; presentation order is the consumer's concern.
    pub fn score_gene(
        &self,
        summary: &GeneSummaryRecord,
    ) -> Result<RiskScoreRecord, DataIntegrityError> {
        if summary.min_p_value <= 0.0 {
            return Err(DataIntegrityError::NonPositivePValue {
                gene: summary.gene.clone(),
                p_value: summary.min_p_value,
            });
        }

        let p_score = -summary.min_p_value.log10() * self.p_weight;
        let or_score = summary.mean_odds_ratio * self.or_weight;
        let variant_score = summary.variant_count as f64 * self.count_weight;

        Ok(RiskScoreRecord {
            gene: summary.gene.clone(),
            risk_score: p_score + or_score + variant_score,
        })
    }

    /// Score every row of a gene summary table, preserving input order.
    pub fn score_table(
        &self,
        summaries: &[GeneSummaryRecord],
    ) -> Result<Vec<RiskScoreRecord>, DataIntegrityError> {
        let scores = summaries
            .iter()
            .map(|s| self.score_gene(s))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Scored {} genes", scores.len());
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PathwayCategory;

    fn summary(gene: &str, variant_count: u64, min_p_value: f64, mean_odds_ratio: f64) -> GeneSummaryRecord {
        GeneSummaryRecord {
            gene: gene.to_string(),
            variant_count,
            min_p_value,
            mean_odds_ratio,
            pathway_category: PathwayCategory::ImmuneResponse,
            diseases: vec!["Severe COVID-19".to_string()],
        }
    }

    #[test]
    fn test_ifnar2_worked_example() {
        // -log10(1e-6)*0.4 + 1.76667*0.4 + 3*0.2 = 2.4 + 0.70667 + 0.6
        let row = summary("IFNAR2", 3, 1e-6, 5.3 / 3.0);
        let score = RiskWeights::default().score_gene(&row).unwrap();

        assert_eq!(score.gene, "IFNAR2");
        assert!((score.risk_score - 3.70668).abs() < 1e-3);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let row = summary("TYK2", 5, 2.5e-7, 2.1);
        let weights = RiskWeights::default();

        let first = weights.score_gene(&row).unwrap();
        let second = weights.score_gene(&row).unwrap();
        assert_eq!(first, second);
        assert!(first.risk_score.is_finite());
    }

    #[test]
    fn test_zero_p_value_rejected() {
        let row = summary("ACE2", 2, 0.0, 1.5);
        match RiskWeights::default().score_gene(&row) {
            Err(DataIntegrityError::NonPositivePValue { gene, p_value }) => {
                assert_eq!(gene, "ACE2");
                assert_eq!(p_value, 0.0);
            }
            other => panic!("expected NonPositivePValue, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_negative_p_value_rejected() {
        let row = summary("ACE2", 2, -1e-6, 1.5);
        assert!(RiskWeights::default().score_gene(&row).is_err());
    }

    #[test]
    fn test_score_table_preserves_order() {
        let rows = vec![
            summary("OAS1", 1, 1e-6, 1.2),
            summary("IL6", 4, 1e-7, 2.8),
        ];
        let scores = RiskWeights::default().score_table(&rows).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].gene, "OAS1");
        assert_eq!(scores[1].gene, "IL6");
    }
}
