use crate::engines::featurize::profile_sequence;
use crate::error::Result;
use crate::types::ProfileSet;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scores candidate sequences against a set of target usage profiles.
///
/// The distance is the sum, over every requested profile key, of the squared
/// frequency differences between the candidate's profile and the target
/// (keys missing on either side count as frequency 0). Keys are weighted
/// equally. Zero means an exact match; lower is better.
pub struct FitnessEvaluator {
    targets: ProfileSet,
    cache: Option<Mutex<HashMap<String, f64>>>,
}

impl FitnessEvaluator {
    pub fn new(targets: ProfileSet, use_cache: bool) -> Self {
        Self {
            targets,
            cache: use_cache.then(|| Mutex::new(HashMap::new())),
        }
    }

    pub fn targets(&self) -> &ProfileSet {
        &self.targets
    }

    /// Distance from `seq` to the target profiles. Memoized by exact
    /// sequence content when the cache is enabled; a cold cache, a warm
    /// cache and no cache all produce the same value.
    pub fn evaluate(&self, seq: &str) -> Result<f64> {
        if let Some(cache) = &self.cache {
            if let Some(&fitness) = cache.lock().unwrap().get(seq) {
                return Ok(fitness);
            }
        }

        let mut distance = 0.0;
        for (key, target) in &self.targets {
            let own = profile_sequence(seq, *key)?;
            for (kmer, &target_freq) in target {
                let own_freq = own.get(kmer).copied().unwrap_or(0.0);
                distance += (target_freq - own_freq).powi(2);
            }
            for (kmer, &own_freq) in &own {
                if !target.contains_key(kmer) {
                    distance += own_freq * own_freq;
                }
            }
        }

        if let Some(cache) = &self.cache {
            let mut cache = cache.lock().unwrap();
            cache.insert(seq.to_string(), distance);
            log::trace!("fitness cache now holds {} sequences", cache.len());
        }
        Ok(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProfileKey;

    fn target_aaa_ttt() -> ProfileSet {
        let mut profile = HashMap::new();
        profile.insert("AAA".to_string(), 0.5);
        profile.insert("TTT".to_string(), 0.5);
        let mut targets = ProfileSet::new();
        targets.insert(ProfileKey::K(3), profile);
        targets
    }

    #[test]
    fn exact_match_scores_zero() {
        let mut profile = HashMap::new();
        profile.insert("AAA".to_string(), 0.5);
        profile.insert("TTT".to_string(), 0.5);
        let mut targets = ProfileSet::new();
        targets.insert(ProfileKey::Codons, profile);

        let evaluator = FitnessEvaluator::new(targets, true);
        assert_eq!(evaluator.evaluate("AAATTT").unwrap(), 0.0);
    }

    #[test]
    fn mismatched_keys_count_as_zero_frequency() {
        let evaluator = FitnessEvaluator::new(target_aaa_ttt(), false);
        // "GGG" has the single 3-mer GGG at frequency 1: distance is
        // 0.5^2 + 0.5^2 (missing targets) + 1.0^2 (unmatched own key).
        let fitness = evaluator.evaluate("GGG").unwrap();
        assert!((fitness - 1.5).abs() < 1e-9);
    }

    #[test]
    fn cache_does_not_change_the_value() {
        let cached = FitnessEvaluator::new(target_aaa_ttt(), true);
        let uncached = FitnessEvaluator::new(target_aaa_ttt(), false);
        for seq in ["AAATTT", "AAGTTT", "AAATTC", "GGGCCC"] {
            let a = cached.evaluate(seq).unwrap();
            let b = cached.evaluate(seq).unwrap(); // warm hit
            let c = uncached.evaluate(seq).unwrap();
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }

    #[test]
    fn distance_sums_over_profile_keys() {
        let mut codons = HashMap::new();
        codons.insert("AAA".to_string(), 1.0);
        let mut mono = HashMap::new();
        mono.insert("A".to_string(), 1.0);
        let mut targets = ProfileSet::new();
        targets.insert(ProfileKey::Codons, codons);
        targets.insert(ProfileKey::K(1), mono);

        let evaluator = FitnessEvaluator::new(targets, false);
        assert_eq!(evaluator.evaluate("AAAAAA").unwrap(), 0.0);
        let fitness = evaluator.evaluate("TTTTTT").unwrap();
        // Each key contributes 1 + 1 = 2.
        assert!((fitness - 4.0).abs() < 1e-9);
    }
}
