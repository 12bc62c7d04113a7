// ==============================================================================
// reference.rs - Fixed Reference Data
// ==============================================================================
// Description: Gene universe, gene->pathway lookup, chromosome length table
// Author: Matt Barham
// Created: 2026-07-21
// Modified: 2026-08-04
// Version: 1.0.0
// ==============================================================================
// The gene universe is a fixed set of 60 COVID-19-associated gene symbols
// partitioned into pathway categories. It is reference data for a SYNTHETIC
// tutorial dataset; membership is curated for plausibility, not a literal
// reproduction of any published study.
// ==============================================================================

use crate::models::{Chromosome, PathwayCategory};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Interferon signaling, antiviral effectors, innate sensing.
pub const IMMUNE_RESPONSE_GENES: [&str; 18] = [
    "IFNAR2", "TYK2", "OAS1", "OAS2", "OAS3", "IFIH1", "IRF7", "IRF3", "IRF8",
    "STAT1", "STAT2", "CD14", "TLR3", "TLR7", "TLR8", "MYD88", "IRAK4", "IFNG",
];

/// Cytokines, inflammasome components, acute-phase reactants.
pub const INFLAMMATION_GENES: [&str; 16] = [
    "IL6", "IL1B", "TNF", "CCL2", "CXCL10", "IL10", "IL4", "IL13", "NLRP3",
    "CASP1", "IL18", "HMGB1", "S100A8", "S100A9", "CRP", "SAA1",
];

/// SARS-CoV-2 cell entry factors.
pub const VIRAL_ENTRY_GENES: [&str; 5] = ["ACE2", "TMPRSS2", "FURIN", "NRP1", "CTSL"];

/// Coagulation cascade and fibrinolysis.
pub const COAGULATION_GENES: [&str; 14] = [
    "VWF", "F8", "SERPINE1", "PLAT", "PLG", "FGB", "FGA", "FGG", "PROC",
    "PROS1", "THBD", "TFPI", "AT3", "PC",
];

/// Metabolic and lipid-handling genes without a dedicated category.
pub const OTHER_GENES: [&str; 7] = [
    "LCN2", "RETN", "ADIPOQ", "LEP", "APOE", "LDLR", "PCSK9",
];

/// Disease/phenotype labels a variant association may carry.
pub const DISEASES: [&str; 14] = [
    "Severe COVID-19",
    "Respiratory failure",
    "ARDS",
    "Pneumonia",
    "Thrombosis",
    "Cardiovascular disease",
    "Diabetes",
    "Hypertension",
    "Immune deficiency",
    "Inflammatory response",
    "Cytokine storm",
    "Sepsis",
    "Multi-organ failure",
    "Coagulopathy",
];

/// Annotated functional consequence labels.
pub const FUNCTIONAL_CONSEQUENCES: [&str; 9] = [
    "missense_variant",
    "synonymous_variant",
    "intron_variant",
    "upstream_gene_variant",
    "downstream_gene_variant",
    "3_prime_UTR_variant",
    "5_prime_UTR_variant",
    "splice_region_variant",
    "regulatory_region_variant",
];

/// GRCh38 chromosome lengths in base pairs, chr1 through chr22.
const AUTOSOME_LENGTHS: [u64; 22] = [
    248_956_422,
    242_193_529,
    198_295_559,
    190_214_555,
    181_538_259,
    170_805_979,
    159_345_973,
    145_138_636,
    138_394_717,
    133_797_422,
    135_086_622,
    133_275_309,
    114_364_328,
    107_043_718,
    101_991_189,
    90_338_345,
    83_257_441,
    80_373_285,
    58_617_616,
    64_444_167,
    46_709_983,
    50_818_468,
];

const X_LENGTH: u64 = 156_040_895;
const Y_LENGTH: u64 = 57_227_415;

/// GRCh38 length of a chromosome in base pairs.
pub fn chromosome_length(chromosome: Chromosome) -> u64 {
    match chromosome {
        Chromosome::Autosome(n) => AUTOSOME_LENGTHS[(n - 1) as usize],
        Chromosome::X => X_LENGTH,
        Chromosome::Y => Y_LENGTH,
    }
}

/// Genes belonging to one pathway category, in curated order.
pub fn category_genes(category: PathwayCategory) -> &'static [&'static str] {
    match category {
        PathwayCategory::ImmuneResponse => &IMMUNE_RESPONSE_GENES,
        PathwayCategory::Inflammation => &INFLAMMATION_GENES,
        PathwayCategory::ViralEntry => &VIRAL_ENTRY_GENES,
        PathwayCategory::Coagulation => &COAGULATION_GENES,
        PathwayCategory::Other => &OTHER_GENES,
    }
}

/// The full gene universe: all categories concatenated, curated order.
pub fn gene_universe() -> &'static [&'static str] {
    static UNIVERSE: OnceLock<Vec<&'static str>> = OnceLock::new();
    UNIVERSE.get_or_init(|| {
        PathwayCategory::ALL
            .iter()
            .flat_map(|c| category_genes(*c).iter().copied())
            .collect()
    })
}

/// Look up the pathway category for a gene symbol.
///
/// Returns None for genes outside the universe; callers must treat that as
/// a data-integrity failure, never default to [`PathwayCategory::Other`].
pub fn pathway_of(gene: &str) -> Option<PathwayCategory> {
    static INDEX: OnceLock<HashMap<&'static str, PathwayCategory>> = OnceLock::new();
    let index = INDEX.get_or_init(|| {
        let mut map = HashMap::new();
        for category in PathwayCategory::ALL {
            for gene in category_genes(category) {
                map.insert(*gene, category);
            }
        }
        map
    });
    index.get(gene).copied()
}

/// Hub genes: the first `per_category` symbols of every category list.
///
/// Hubs receive a higher share of generated variants and more significant
/// p-values so the synthetic dataset shows visible structure downstream.
pub fn hub_genes(per_category: usize) -> Vec<&'static str> {
    PathwayCategory::ALL
        .iter()
        .flat_map(|c| {
            let genes = category_genes(*c);
            genes[..per_category.min(genes.len())].iter().copied()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_size() {
        assert_eq!(gene_universe().len(), 60);
    }

    #[test]
    fn test_universe_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for gene in gene_universe() {
            assert!(seen.insert(*gene), "duplicate gene symbol: {}", gene);
        }
    }

    #[test]
    fn test_pathway_lookup_consistency() {
        for category in PathwayCategory::ALL {
            for gene in category_genes(category) {
                assert_eq!(pathway_of(gene), Some(category));
            }
        }
        assert_eq!(pathway_of("ACE2"), Some(PathwayCategory::ViralEntry));
        assert_eq!(pathway_of("IFNAR2"), Some(PathwayCategory::ImmuneResponse));
        assert_eq!(pathway_of("NOT_A_GENE"), None);
    }

    #[test]
    fn test_chromosome_lengths() {
        assert_eq!(chromosome_length(Chromosome::Autosome(1)), 248_956_422);
        assert_eq!(chromosome_length(Chromosome::Autosome(22)), 50_818_468);
        for chr in Chromosome::ALL {
            assert!(chromosome_length(chr) > 40_000_000);
        }
    }

    #[test]
    fn test_hub_genes() {
        let hubs = hub_genes(2);
        assert_eq!(hubs.len(), 10);
        assert!(hubs.contains(&"IFNAR2"));
        assert!(hubs.contains(&"ACE2"));
        assert!(hubs.contains(&"VWF"));

        // Oversized request saturates at each category's size
        let all = hub_genes(usize::MAX);
        assert_eq!(all.len(), gene_universe().len());
    }
}
