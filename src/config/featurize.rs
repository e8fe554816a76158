use super::traits::ConfigSection;
use crate::error::FreqgenError;
use serde::{Deserialize, Serialize};

/// Which usage profiles to compute when featurizing a sequence corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturizeConfig {
    /// k-mer lengths to profile, counted from frame-aligned
    /// non-overlapping windows like codons.
    pub k_mers: Vec<usize>,
    /// Whether to also profile frame-aligned codon usage.
    pub codons: bool,
}

impl Default for FeaturizeConfig {
    fn default() -> Self {
        Self {
            k_mers: Vec::new(),
            codons: true,
        }
    }
}

impl ConfigSection for FeaturizeConfig {
    fn section_name() -> &'static str {
        "featurize"
    }

    fn validate(&self) -> Result<(), FreqgenError> {
        if self.k_mers.is_empty() && !self.codons {
            return Err(FreqgenError::NoTargetSpecified);
        }
        if let Some(&k) = self.k_mers.iter().find(|&&k| k == 0) {
            return Err(FreqgenError::Configuration(format!(
                "k-mer length must be at least 1, got {}",
                k
            )));
        }
        Ok(())
    }
}
