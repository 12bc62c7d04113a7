// ==============================================================================
// models.rs - Variant Pipeline Data Models
// ==============================================================================
// Description: Data structures for the synthetic variant / gene summary tables
// Author: Matt Barham
// Created: 2026-07-21
// Modified: 2026-08-04
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column order of the variant table CSV. Must match the serde field order
/// of [`VariantRecord`].
pub const VARIANT_COLUMNS: [&str; 9] = [
    "rs_id",
    "chromosome",
    "position",
    "functional_consequence",
    "gene",
    "p_value",
    "odds_ratio",
    "population",
    "disease_association",
];

/// Column order of the gene summary table CSV.
pub const SUMMARY_COLUMNS: [&str; 6] = [
    "gene",
    "variant_count",
    "min_p_value",
    "mean_odds_ratio",
    "pathway_category",
    "diseases",
];

/// Upper bound (inclusive) for generated association p-values.
pub const P_VALUE_MAX: f64 = 5e-5;

/// Chromosome identifier: autosomes 1-22 plus the sex chromosomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chromosome {
    /// Autosome, 1..=22
    Autosome(u8),
    X,
    Y,
}

impl Chromosome {
    /// All 24 chromosomes in reference order.
    pub const ALL: [Chromosome; 24] = [
        Chromosome::Autosome(1),
        Chromosome::Autosome(2),
        Chromosome::Autosome(3),
        Chromosome::Autosome(4),
        Chromosome::Autosome(5),
        Chromosome::Autosome(6),
        Chromosome::Autosome(7),
        Chromosome::Autosome(8),
        Chromosome::Autosome(9),
        Chromosome::Autosome(10),
        Chromosome::Autosome(11),
        Chromosome::Autosome(12),
        Chromosome::Autosome(13),
        Chromosome::Autosome(14),
        Chromosome::Autosome(15),
        Chromosome::Autosome(16),
        Chromosome::Autosome(17),
        Chromosome::Autosome(18),
        Chromosome::Autosome(19),
        Chromosome::Autosome(20),
        Chromosome::Autosome(21),
        Chromosome::Autosome(22),
        Chromosome::X,
        Chromosome::Y,
    ];
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chromosome::Autosome(n) => write!(f, "{}", n),
            Chromosome::X => write!(f, "X"),
            Chromosome::Y => write!(f, "Y"),
        }
    }
}

#[derive(Error, Debug)]
#[error("invalid chromosome '{0}' (expected 1-22, X, or Y)")]
pub struct ParseChromosomeError(String);

impl FromStr for Chromosome {
    type Err = ParseChromosomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Chromosome::X),
            "Y" => Ok(Chromosome::Y),
            _ => match s.parse::<u8>() {
                Ok(n) if (1..=22).contains(&n) => Ok(Chromosome::Autosome(n)),
                _ => Err(ParseChromosomeError(s.to_string())),
            },
        }
    }
}

impl Serialize for Chromosome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Chromosome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Study population a variant association was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Population {
    European,
    #[serde(rename = "East Asian")]
    EastAsian,
    Mixed,
    Other,
}

impl Population {
    pub const ALL: [Population; 4] = [
        Population::European,
        Population::EastAsian,
        Population::Mixed,
        Population::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Population::European => "European",
            Population::EastAsian => "East Asian",
            Population::Mixed => "Mixed",
            Population::Other => "Other",
        }
    }
}

/// Coarse functional grouping assigned per gene via the fixed lookup in
/// [`crate::reference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathwayCategory {
    #[serde(rename = "Immune Response")]
    ImmuneResponse,
    Inflammation,
    #[serde(rename = "Viral Entry")]
    ViralEntry,
    Coagulation,
    Other,
}

impl PathwayCategory {
    pub const ALL: [PathwayCategory; 5] = [
        PathwayCategory::ImmuneResponse,
        PathwayCategory::Inflammation,
        PathwayCategory::ViralEntry,
        PathwayCategory::Coagulation,
        PathwayCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathwayCategory::ImmuneResponse => "Immune Response",
            PathwayCategory::Inflammation => "Inflammation",
            PathwayCategory::ViralEntry => "Viral Entry",
            PathwayCategory::Coagulation => "Coagulation",
            PathwayCategory::Other => "Other",
        }
    }
}

/// One row of the variant table (covid19_genetic_risk_variants.csv).
///
/// The pathway category is not a column of this table; it is always derived
/// through [`crate::reference::pathway_of`] so the lookup stays the single
/// source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// SNP identifier, "rs" + digits, unique per table
    pub rs_id: String,

    /// Chromosome (1-22, X, Y)
    pub chromosome: Chromosome,

    /// Base pair position within the chromosome
    pub position: u64,

    /// Annotated consequence (missense_variant, intron_variant, ...)
    pub functional_consequence: String,

    /// Host gene symbol, member of the fixed gene universe
    pub gene: String,

    /// Association p-value, in (0, 5e-5]
    pub p_value: f64,

    /// Effect size as odds ratio
    pub odds_ratio: f64,

    /// Study population
    pub population: Population,

    /// Associated disease/phenotype label
    pub disease_association: String,
}

/// One row of the gene summary table (covid19_gene_summary.csv), one per
/// distinct gene present in the variant table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneSummaryRecord {
    /// Gene symbol (primary key)
    pub gene: String,

    /// Number of variants grouped under this gene
    pub variant_count: u64,

    /// Exact minimum p-value across the gene's variants
    pub min_p_value: f64,

    /// Arithmetic mean of the gene's odds ratios
    pub mean_odds_ratio: f64,

    /// Category from the gene->pathway lookup
    pub pathway_category: PathwayCategory,

    /// Distinct observed disease labels, first-occurrence order,
    /// semicolon-joined in the CSV field
    #[serde(
        serialize_with = "serialize_diseases",
        deserialize_with = "deserialize_diseases"
    )]
    pub diseases: Vec<String>,
}

fn serialize_diseases<S: Serializer>(diseases: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&diseases.join("; "))
}

fn deserialize_diseases<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let joined = String::deserialize(deserializer)?;
    Ok(split_diseases(&joined))
}

/// Split a semicolon-joined disease field back into its labels.
pub fn split_diseases(field: &str) -> Vec<String> {
    field
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// One derived composite score per gene (covid19_gene_risk_scores.csv).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreRecord {
    pub gene: String,
    pub risk_score: f64,
}

/// Data-level failures: never coerced silently, fatal for the stage that
/// detects them.
#[derive(Error, Debug)]
pub enum DataIntegrityError {
    #[error("gene '{gene}' is not in the gene->pathway lookup")]
    UnknownGene { gene: String },

    #[error("gene '{gene}' has non-positive min_p_value {p_value} (log10 undefined)")]
    NonPositivePValue { gene: String, p_value: f64 },

    #[error("duplicate rs_id '{rs_id}'")]
    DuplicateRsId { rs_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromosome_parse_display() {
        assert_eq!("7".parse::<Chromosome>().unwrap(), Chromosome::Autosome(7));
        assert_eq!("X".parse::<Chromosome>().unwrap(), Chromosome::X);
        assert_eq!(Chromosome::Autosome(22).to_string(), "22");
        assert_eq!(Chromosome::Y.to_string(), "Y");

        assert!("0".parse::<Chromosome>().is_err());
        assert!("23".parse::<Chromosome>().is_err());
        assert!("chr1".parse::<Chromosome>().is_err());
    }

    #[test]
    fn test_chromosome_all_roundtrip() {
        for chr in Chromosome::ALL {
            let parsed: Chromosome = chr.to_string().parse().unwrap();
            assert_eq!(parsed, chr);
        }
    }

    #[test]
    fn test_population_str() {
        assert_eq!(Population::EastAsian.as_str(), "East Asian");
        assert_eq!(Population::European.as_str(), "European");
    }

    #[test]
    fn test_pathway_category_str() {
        assert_eq!(PathwayCategory::ImmuneResponse.as_str(), "Immune Response");
        assert_eq!(PathwayCategory::ViralEntry.as_str(), "Viral Entry");
    }

    #[test]
    fn test_split_diseases() {
        assert_eq!(
            split_diseases("ARDS; Thrombosis; Severe COVID-19"),
            vec!["ARDS", "Thrombosis", "Severe COVID-19"]
        );
        assert_eq!(split_diseases("Sepsis"), vec!["Sepsis"]);
        assert!(split_diseases("").is_empty());
    }
}
