use super::kmer::kmers;
use crate::config::{ConfigSection, FeaturizeConfig};
use crate::error::{FreqgenError, Result};
use crate::types::{FrequencyProfile, ProfileKey, ProfileSet};
use std::collections::HashMap;

/// Raw k-mer occurrence counts.
pub type KmerCounts = HashMap<String, u64>;

/// Tally each produced k-mer.
pub fn count<'a, I>(kmers: I) -> KmerCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = KmerCounts::new();
    for kmer in kmers {
        *counts.entry(kmer.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Key-wise sum of `other` into `counts`. Merging is commutative and
/// associative in aggregate, so counts from many sequences or files can be
/// folded together in any order.
pub fn merge(counts: &mut KmerCounts, other: &KmerCounts) {
    for (kmer, n) in other {
        *counts.entry(kmer.clone()).or_insert(0) += n;
    }
}

/// Counts divided by the total. A zero total yields an empty profile rather
/// than a division by zero.
pub fn normalize(counts: &KmerCounts) -> FrequencyProfile {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return FrequencyProfile::new();
    }
    counts
        .iter()
        .map(|(kmer, &n)| (kmer.clone(), n as f64 / total as f64))
        .collect()
}

/// Profile one sequence under a single key.
///
/// Profiles are always counted from frame-aligned, non-overlapping windows,
/// for targets and candidates alike: a sequence whose window multiset equals
/// the target distribution then scores a distance of exactly zero.
pub fn profile_sequence(seq: &str, key: ProfileKey) -> Result<FrequencyProfile> {
    Ok(normalize(&count(kmers(seq, key.k(), false)?)))
}

/// Compute the usage profiles a config requests, aggregated over a whole
/// sequence corpus. Counts for each key are merged across all sequences
/// before normalization, so the result is the profile of the corpus as one
/// combined multiset.
pub fn featurize<S: AsRef<str>>(seqs: &[S], config: &FeaturizeConfig) -> Result<ProfileSet> {
    config.validate()?;
    if seqs.is_empty() {
        return Err(FreqgenError::InvalidInput(
            "no sequences to featurize".to_string(),
        ));
    }

    let mut keys: Vec<ProfileKey> = config.k_mers.iter().map(|&k| ProfileKey::K(k)).collect();
    if config.codons {
        keys.push(ProfileKey::Codons);
    }

    let mut profiles = ProfileSet::new();
    for key in keys {
        let mut aggregate = KmerCounts::new();
        for seq in seqs {
            let seq = seq.as_ref();
            if seq.len() < key.k() {
                return Err(FreqgenError::InvalidInput(format!(
                    "sequence of length {} is shorter than k = {}",
                    seq.len(),
                    key.k()
                )));
            }
            merge(&mut aggregate, &count(kmers(seq, key.k(), false)?));
        }
        profiles.insert(key, normalize(&aggregate));
    }

    log::debug!(
        "featurized {} sequence(s) into {} profile(s)",
        seqs.len(),
        profiles.len()
    );
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_totals_match_window_counts() {
        let counts = count(kmers("ACGTACGT", 2, true).unwrap());
        let total: u64 = counts.values().sum();
        assert_eq!(total, 7);
        assert_eq!(counts["AC"], 2);
        assert_eq!(counts["TA"], 1);
    }

    #[test]
    fn merge_equals_counting_combined_multiset() {
        let a = count(kmers("AAACCC", 3, false).unwrap());
        let b = count(kmers("AAAGGG", 3, false).unwrap());

        let mut ab = a.clone();
        merge(&mut ab, &b);
        let mut ba = b.clone();
        merge(&mut ba, &a);
        assert_eq!(ab, ba);

        assert_eq!(ab["AAA"], 2);
        assert_eq!(ab["CCC"], 1);
        assert_eq!(ab["GGG"], 1);
    }

    #[test]
    fn normalize_sums_to_one() {
        let counts = count(kmers("ACGTACGTAA", 2, true).unwrap());
        let profile = normalize(&counts);
        let sum: f64 = profile.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert!(normalize(&KmerCounts::new()).is_empty());
    }

    #[test]
    fn featurize_rejects_empty_corpus() {
        let config = FeaturizeConfig::default();
        let seqs: Vec<&str> = vec![];
        assert!(featurize(&seqs, &config).is_err());
    }

    #[test]
    fn featurize_rejects_short_sequence() {
        let config = FeaturizeConfig {
            k_mers: vec![5],
            codons: false,
        };
        assert!(featurize(&["ACG"], &config).is_err());
    }

    #[test]
    fn featurize_aggregates_across_sequences() {
        let config = FeaturizeConfig {
            k_mers: vec![1],
            codons: true,
        };
        let profiles = featurize(&["AAATTT", "AAAAAA"], &config).unwrap();

        let codons = &profiles[&ProfileKey::Codons];
        assert!((codons["AAA"] - 0.75).abs() < 1e-9);
        assert!((codons["TTT"] - 0.25).abs() < 1e-9);

        let mono = &profiles[&ProfileKey::K(1)];
        assert!((mono["A"] - 0.75).abs() < 1e-9);
        assert!((mono["T"] - 0.25).abs() < 1e-9);
    }
}
