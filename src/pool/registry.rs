use std::cmp::Ordering;
use std::collections::BTreeSet;

use getset::Getters;

use crate::record::natural_cmp;
use crate::types::Sample;

/// The samples of a pool, in genotype column order.
#[derive(Debug, Clone, Default, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct SamplePool {
    pool_id: String,
    names: Vec<Sample>,
}

impl SamplePool {
    pub fn new<S: Into<String>>(pool_id: S, names: Vec<Sample>) -> Self {
        SamplePool {
            pool_id: pool_id.into(),
            names,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, sample: &str) -> Option<usize> {
        self.names.iter().position(|s| s == sample)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Contig(String);

impl Ord for Contig {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for Contig {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Every chromosome seen by a pool, in natural order.
#[derive(Debug, Clone, Default)]
pub struct ContigRegistry {
    contigs: BTreeSet<Contig>,
}

impl ContigRegistry {
    pub fn insert(&mut self, contig: &str) -> bool {
        self.contigs.insert(Contig(contig.to_owned()))
    }

    pub fn contains(&self, contig: &str) -> bool {
        self.contigs.contains(&Contig(contig.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.contigs.iter().map(|c| c.0.as_str())
    }

    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_contigs_in_natural_order() {
        let mut registry = ContigRegistry::default();
        for contig in &["chrX", "chr10", "chr2", "chr2"] {
            registry.insert(contig);
        }
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.iter().collect_vec(), vec!["chr2", "chr10", "chrX"]);
        assert!(registry.contains("chr10"));
    }
}
