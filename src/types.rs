use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Normalized k-mer (or codon) usage frequencies, keyed by the k-mer string.
pub type FrequencyProfile = HashMap<String, f64>;

/// A full featurization result or optimization target: one profile per
/// requested key.
pub type ProfileSet = HashMap<ProfileKey, FrequencyProfile>;

/// Identifies one frequency profile within a profile document.
///
/// Serializes as the map key the original YAML/JSON documents use:
/// `"codons"` for the reading-frame codon profile, the decimal integer
/// (e.g. `"2"`) for a k-mer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKey {
    Codons,
    K(usize),
}

impl ProfileKey {
    /// Window length used when profiling a sequence under this key.
    pub fn k(&self) -> usize {
        match self {
            ProfileKey::Codons => 3,
            ProfileKey::K(k) => *k,
        }
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKey::Codons => write!(f, "codons"),
            ProfileKey::K(k) => write!(f, "{}", k),
        }
    }
}

impl FromStr for ProfileKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "codons" {
            return Ok(ProfileKey::Codons);
        }
        s.parse::<usize>()
            .map(ProfileKey::K)
            .map_err(|_| format!("expected \"codons\" or an integer, got {:?}", s))
    }
}

impl Serialize for ProfileKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct ProfileKeyVisitor;

impl Visitor<'_> for ProfileKeyVisitor {
    type Value = ProfileKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"codons\" or a k-mer length")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ProfileKey, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ProfileKey, E> {
        Ok(ProfileKey::K(v as usize))
    }
}

impl<'de> Deserialize<'de> for ProfileKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ProfileKeyVisitor)
    }
}

/// The single fittest individual across all population runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub sequence: String,
    pub fitness: f64,
}

/// Run parameters and outcome, in the shape the JSON run log expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub fitness: f64,
    pub duration_milliseconds: u128,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub population_size: usize,
    pub population_count: usize,
    pub early_stopping: usize,
    pub rel_tol: f64,
}

impl RunMetadata {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
