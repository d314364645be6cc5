use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use getset::{CopyGetters, Getters};

use crate::error::PoolError;

/// Identity of a record within a pool: `(chrom, pos, ref)`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Getters, CopyGetters)]
pub struct VariantKey {
    #[getset(get = "pub")]
    chrom: String,
    #[getset(get_copy = "pub")]
    pos: u64,
    #[getset(get = "pub")]
    ref_allele: String,
}

impl VariantKey {
    pub fn new<C: Into<String>, R: Into<String>>(chrom: C, pos: u64, ref_allele: R) -> Self {
        VariantKey {
            chrom: chrom.into(),
            pos,
            ref_allele: ref_allele.into(),
        }
    }

    pub fn locus(&self) -> Locus {
        Locus::new(self.chrom.clone(), self.pos)
    }
}

impl Ord for VariantKey {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.chrom, &other.chrom)
            .then(self.pos.cmp(&other.pos))
            .then_with(|| self.ref_allele.cmp(&other.ref_allele))
    }
}

impl PartialOrd for VariantKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.chrom, self.pos, self.ref_allele)
    }
}

impl FromStr for VariantKey {
    type Err = PoolError;

    /// Parses `chr:pos:ref`. The chromosome itself may contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PoolError::InvalidKey(s.to_owned());
        let mut parts = s.rsplitn(3, ':');
        let ref_allele = parts.next().filter(|r| !r.is_empty()).ok_or_else(invalid)?;
        let pos = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let chrom = parts.next().filter(|c| !c.is_empty()).ok_or_else(invalid)?;
        Ok(VariantKey::new(chrom, pos, ref_allele))
    }
}

/// A `(chrom, pos)` pair; all records at a locus share a position bucket.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Getters, CopyGetters)]
pub struct Locus {
    #[getset(get = "pub")]
    chrom: String,
    #[getset(get_copy = "pub")]
    pos: u64,
}

impl Locus {
    pub fn new<C: Into<String>>(chrom: C, pos: u64) -> Self {
        Locus {
            chrom: chrom.into(),
            pos,
        }
    }
}

impl Ord for Locus {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.chrom, &other.chrom).then(self.pos.cmp(&other.pos))
    }
}

impl PartialOrd for Locus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chrom, self.pos)
    }
}

/// "Natural" string order: digit runs compare numerically, everything else
/// lexically, so `chr2 < chr10 < chrX`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    // "chr01" and "chr1" may compare equal numerically but must not be Equal
    natord::compare(a, b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_natural_cmp() {
        let mut contigs = vec!["chrX", "chr10", "chr2", "chr1", "chrY", "chr22", "chrM"];
        contigs.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            contigs,
            vec!["chr1", "chr2", "chr10", "chr22", "chrM", "chrX", "chrY"]
        );
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("chr", "chr1"), Ordering::Less);
        assert_ne!(natural_cmp("chr01", "chr1"), Ordering::Equal);
        assert_eq!(natural_cmp("GL000192.1", "GL000192.1"), Ordering::Equal);
    }

    #[test]
    fn test_key_order() {
        let mut keys = vec![
            VariantKey::new("chr10", 5, "A"),
            VariantKey::new("chr2", 100, "A"),
            VariantKey::new("chr2", 5, "C"),
            VariantKey::new("chr2", 5, "A"),
        ];
        keys.sort();
        assert_eq!(
            keys.iter().map(ToString::to_string).collect_vec(),
            vec!["chr2:5:A", "chr2:5:C", "chr2:100:A", "chr10:5:A"]
        );
    }

    #[test]
    fn test_key_from_str() {
        let key: VariantKey = "chr2:111:CC".parse().unwrap();
        assert_eq!(key, VariantKey::new("chr2", 111, "CC"));
        let key: VariantKey = "HLA-A*01:01:01:5:A".parse().unwrap();
        assert_eq!(key.chrom(), "HLA-A*01:01:01");
        assert_eq!(key.pos(), 5);
        assert!("chr2:x:A".parse::<VariantKey>().is_err());
        assert!("chr2:5".parse::<VariantKey>().is_err());
    }
}
