//! Partitioning of alleles and peptides into external invocations

use crate::result::PredictionWarning;
use std::collections::BTreeMap;

/// Alleles sent to one external invocation, in tool spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlleleBatch(Vec<String>);

impl AlleleBatch {
    pub fn alleles(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined list as substituted into `{alleles}`
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

/// Split supported alleles into batches of at most `max_per_batch`.
///
/// `candidates` yields `(tool_string, generic_name, supported)`. Unsupported
/// entries produce a warning and do not count toward any batch.
pub fn allele_batches<'a, I>(
    method: &str,
    candidates: I,
    max_per_batch: usize,
) -> (Vec<AlleleBatch>, Vec<PredictionWarning>)
where
    I: IntoIterator<Item = (&'a str, String, bool)>,
{
    let max_per_batch = max_per_batch.max(1);
    let mut batches = Vec::new();
    let mut warnings = Vec::new();
    let mut current: Vec<String> = Vec::with_capacity(max_per_batch);

    for (tool_name, generic_name, supported) in candidates {
        if !supported {
            tracing::warn!("Allele {} is not supported by {}", generic_name, method);
            warnings.push(PredictionWarning::UnsupportedAllele {
                method: method.to_string(),
                allele: generic_name,
            });
            continue;
        }
        current.push(tool_name.to_string());
        if current.len() == max_per_batch {
            batches.push(AlleleBatch(std::mem::take(&mut current)));
        }
    }

    if !current.is_empty() {
        batches.push(AlleleBatch(current));
    }

    (batches, warnings)
}

/// Group peptide sequences by length, ascending, dropping unsupported lengths
pub fn length_groups<'a, I>(
    method: &str,
    sequences: I,
    supported: &[usize],
) -> (BTreeMap<usize, Vec<String>>, Vec<PredictionWarning>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for seq in sequences {
        groups.entry(seq.len()).or_default().push(seq.to_string());
    }

    let mut sorted_supported = supported.to_vec();
    sorted_supported.sort_unstable();

    let mut warnings = Vec::new();
    groups.retain(|length, peptides| {
        if supported.contains(length) {
            return true;
        }
        tracing::warn!(
            "Peptide length {} is not supported by {} ({} peptides skipped)",
            length,
            method,
            peptides.len()
        );
        warnings.push(PredictionWarning::UnsupportedLength {
            method: method.to_string(),
            length: *length,
            supported: sorted_supported.clone(),
        });
        false
    });

    (groups, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("HLA-A{:02}:01", i)).collect()
    }

    #[test]
    fn test_allele_batches_cut_at_limit() {
        let alleles = names(120);
        let (batches, warnings) = allele_batches(
            "netmhc",
            alleles.iter().map(|a| (a.as_str(), a.clone(), true)),
            50,
        );

        let sizes: Vec<usize> = batches.iter().map(AlleleBatch::len).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unsupported_alleles_do_not_count() {
        let alleles = names(4);
        let candidates = alleles
            .iter()
            .enumerate()
            .map(|(i, a)| (a.as_str(), format!("A*{:02}:01", i), i % 2 == 0));
        let (batches, warnings) = allele_batches("netmhc", candidates, 1);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].alleles(), &["HLA-A00:01".to_string()]);
        assert_eq!(batches[1].joined(), "HLA-A02:01");
        assert_eq!(
            warnings,
            vec![
                PredictionWarning::UnsupportedAllele {
                    method: "netmhc".to_string(),
                    allele: "A*01:01".to_string()
                },
                PredictionWarning::UnsupportedAllele {
                    method: "netmhc".to_string(),
                    allele: "A*03:01".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_only_unsupported_alleles_yields_no_batches() {
        let (batches, warnings) =
            allele_batches("netmhc", vec![("HLA-Z01:01", "Z*01:01".to_string(), false)], 50);
        assert!(batches.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_length_groups_sorted_and_filtered() {
        let peptides = ["SIINFEKLL", "SIINFEKL", "GILGFVFTL", "AAAA", "SIINFEKLLLLLLLL"];
        let (groups, warnings) = length_groups("netmhc", peptides, &[8, 9, 10, 11]);

        let lengths: Vec<usize> = groups.keys().copied().collect();
        assert_eq!(lengths, vec![8, 9]);
        assert_eq!(groups[&9], vec!["SIINFEKLL".to_string(), "GILGFVFTL".to_string()]);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            warnings[0],
            PredictionWarning::UnsupportedLength { length: 4, .. }
        ));
    }

    #[test]
    fn test_length_above_supported_set_is_dropped() {
        let (groups, warnings) = length_groups("netmhcii", ["AAAAAAAAAAAAAAAA"], &[15]);
        assert!(groups.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_batches_partition_supported_subset(
            flags in proptest::collection::vec(any::<bool>(), 0..300),
            max in 1usize..=50,
        ) {
            let alleles = names(flags.len());
            let candidates = alleles
                .iter()
                .zip(flags.iter())
                .map(|(a, &ok)| (a.as_str(), a.clone(), ok));
            let (batches, warnings) = allele_batches("m", candidates, max);

            let supported: Vec<&String> = alleles
                .iter()
                .zip(flags.iter())
                .filter(|(_, ok)| **ok)
                .map(|(a, _)| a)
                .collect();
            let expected_batches = (supported.len() + max - 1) / max;
            prop_assert_eq!(batches.len(), expected_batches);
            prop_assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= max));

            let flat: Vec<&String> = batches.iter().flat_map(|b| b.alleles()).collect();
            let unique: HashSet<&String> = flat.iter().copied().collect();
            prop_assert_eq!(unique.len(), flat.len());
            prop_assert_eq!(flat, supported);
            prop_assert_eq!(warnings.len(), flags.iter().filter(|ok| !**ok).count());
        }

        #[test]
        fn prop_unsupported_lengths_never_grouped(
            lengths in proptest::collection::vec(1usize..25, 0..60),
        ) {
            let peptides: Vec<String> = lengths.iter().map(|&n| "A".repeat(n)).collect();
            let (groups, _) = length_groups("m", peptides.iter().map(String::as_str), &[8, 9, 10, 11]);
            for (length, group) in &groups {
                prop_assert!((8..=11).contains(length));
                prop_assert!(group.iter().all(|p| p.len() == *length));
            }
        }
    }
}
