use crate::error::{ChromLocError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "+" => Self::Forward,
            "-" => Self::Reverse,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "+",
            Self::Reverse => "-",
            Self::Unknown => ".",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    pub name: String,
    /// Length in source units (base pairs).
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub strand: Strand,
}

impl Feature {
    /// Integer midpoint of `[start, end]`. Odd-length spans drop the last
    /// coordinate before halving, so the result is always whole.
    pub fn midpoint(&self) -> u64 {
        self.start + (self.end - self.start) / 2
    }
}

/// Chromosomes in name order plus the features attached to each of them.
#[derive(Debug, Clone, Default)]
pub struct Genome {
    chromosomes: BTreeMap<String, Chromosome>,
    features: BTreeMap<String, Vec<Feature>>,
}

impl Genome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a chromosome. Returns the previous entry, if any.
    pub fn insert_chromosome(&mut self, name: &str, length: u64) -> Option<Chromosome> {
        self.features.entry(name.to_string()).or_default();
        self.chromosomes.insert(
            name.to_string(),
            Chromosome {
                name: name.to_string(),
                length,
            },
        )
    }

    /// Attaches a feature to its chromosome. `source_name` and `line` locate
    /// the row the feature came from in error reports.
    pub fn push_feature(&mut self, feature: Feature, source_name: &str, line: usize) -> Result<()> {
        let Some(chrom) = self.chromosomes.get(&feature.chromosome) else {
            return Err(ChromLocError::UnknownChromosome {
                name: feature.chromosome,
                source_name: source_name.to_string(),
                line,
            });
        };
        if feature.end > chrom.length {
            return Err(ChromLocError::FeatureOutOfBounds {
                feature: feature.name,
                chromosome: feature.chromosome,
                end: feature.end,
                length: chrom.length,
                source_name: source_name.to_string(),
                line,
            });
        }
        self.features
            .entry(feature.chromosome.clone())
            .or_default()
            .push(feature);
        Ok(())
    }

    pub fn chromosome(&self, name: &str) -> Option<&Chromosome> {
        self.chromosomes.get(name)
    }

    /// Chromosomes in lexicographic name order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.values()
    }

    pub fn features(&self, name: &str) -> &[Feature] {
        self.features.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn chromosome_count(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn feature_count(&self) -> usize {
        self.features.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
}
