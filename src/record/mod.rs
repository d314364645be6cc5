mod genotype;
mod key;

use getset::{CopyGetters, Getters};
use indexmap::IndexMap;

use crate::types::Sample;
pub use genotype::Genotype;
pub use key::{natural_cmp, Locus, VariantKey};

pub trait Record {
    fn chrom(&self) -> &str;

    fn pos(&self) -> u64;

    fn ref_allele(&self) -> &str;

    fn alt_alleles(&self) -> &[String];

    fn key(&self) -> VariantKey {
        VariantKey::new(self.chrom(), self.pos(), self.ref_allele())
    }

    fn locus(&self) -> Locus {
        Locus::new(self.chrom(), self.pos())
    }
}

/// One VCF data line. Values are immutable; use [`RecordBuilder`] to derive
/// a modified copy.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct VariantRecord {
    chrom: String,
    pos: u64,
    #[getset(get_copy = "pub")]
    end: u64,
    #[getset(get = "pub")]
    id: String,
    ref_allele: String,
    alt_alleles: Vec<String>,
    #[getset(get_copy = "pub")]
    qual: Option<f64>,
    #[getset(get = "pub")]
    filters: Vec<String>,
    // empty value marks a flag
    #[getset(get = "pub")]
    info: IndexMap<String, String>,
    #[getset(get = "pub")]
    genotypes: Vec<Genotype>,
    #[getset(get = "pub")]
    source: String,
}

impl VariantRecord {
    pub fn sample_names(&self) -> Vec<Sample> {
        self.genotypes.iter().map(|g| g.sample().clone()).collect()
    }

    pub fn has_genotypes(&self) -> bool {
        !self.genotypes.is_empty()
    }
}

impl Record for VariantRecord {
    /// Returns the chromosome of this record, i.e. CHROM.
    ///
    /// # Examples
    ///
    /// ```
    /// use variant_pool::{Record, RecordBuilder};
    ///
    /// let record = RecordBuilder::new("chr1", 817185, "G").alt("A").build();
    /// assert_eq!(record.chrom(), "chr1");
    /// ```
    fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Returns the 1-based position of this record, i.e. POS.
    fn pos(&self) -> u64 {
        self.pos
    }

    fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    fn alt_alleles(&self) -> &[String] {
        &self.alt_alleles
    }
}

/// Builds a [`VariantRecord`] from scratch or from an existing record plus a
/// set of overrides.
///
/// # Examples
///
/// ```
/// use variant_pool::{Record, RecordBuilder};
///
/// let record = RecordBuilder::new("2", 100, "ACG").alt("A").qual(50.0).build();
/// let renamed = RecordBuilder::from(&record).chrom("chr2").build();
/// assert_eq!(renamed.chrom(), "chr2");
/// assert_eq!(renamed.alt_alleles(), record.alt_alleles());
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: VariantRecord,
}

impl RecordBuilder {
    pub fn new<C: Into<String>, R: Into<String>>(chrom: C, pos: u64, ref_allele: R) -> Self {
        let ref_allele = ref_allele.into();
        let end = pos.saturating_add(ref_allele.len().max(1) as u64 - 1);
        RecordBuilder {
            record: VariantRecord {
                chrom: chrom.into(),
                pos,
                end,
                id: String::new(),
                ref_allele,
                alt_alleles: Vec::new(),
                qual: None,
                filters: Vec::new(),
                info: IndexMap::new(),
                genotypes: Vec::new(),
                source: String::new(),
            },
        }
    }

    pub fn chrom<C: Into<String>>(mut self, chrom: C) -> Self {
        self.record.chrom = chrom.into();
        self
    }

    pub fn pos(mut self, pos: u64) -> Self {
        self.record.pos = pos;
        self
    }

    pub fn end(mut self, end: u64) -> Self {
        self.record.end = end;
        self
    }

    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.record.id = id.into();
        self
    }

    pub fn ref_allele<S: Into<String>>(mut self, ref_allele: S) -> Self {
        self.record.ref_allele = ref_allele.into();
        self
    }

    pub fn alt<S: Into<String>>(mut self, alt: S) -> Self {
        self.record.alt_alleles.push(alt.into());
        self
    }

    pub fn alt_alleles(mut self, alt_alleles: Vec<String>) -> Self {
        self.record.alt_alleles = alt_alleles;
        self
    }

    pub fn qual(mut self, qual: f64) -> Self {
        self.record.qual = Some(qual);
        self
    }

    pub fn no_qual(mut self) -> Self {
        self.record.qual = None;
        self
    }

    pub fn filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.record.filters.push(filter.into());
        self
    }

    pub fn filters(mut self, filters: Vec<String>) -> Self {
        self.record.filters = filters;
        self
    }

    pub fn info<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.record.info.insert(key.into(), value.into());
        self
    }

    pub fn flag<K: Into<String>>(self, key: K) -> Self {
        self.info(key, "")
    }

    pub fn attributes(mut self, info: IndexMap<String, String>) -> Self {
        self.record.info = info;
        self
    }

    pub fn genotype(mut self, genotype: Genotype) -> Self {
        self.record.genotypes.push(genotype);
        self
    }

    pub fn genotypes(mut self, genotypes: Vec<Genotype>) -> Self {
        self.record.genotypes = genotypes;
        self
    }

    pub fn source<S: Into<String>>(mut self, source: S) -> Self {
        self.record.source = source.into();
        self
    }

    pub fn build(self) -> VariantRecord {
        self.record
    }
}

impl From<&VariantRecord> for RecordBuilder {
    fn from(record: &VariantRecord) -> Self {
        RecordBuilder {
            record: record.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = RecordBuilder::new("chr1", 100, "ACG").alt("A").build();
        assert_eq!(record.end(), 102);
        assert_eq!(record.qual(), None);
        assert!(record.filters().is_empty());
        assert_eq!(record.key().to_string(), "chr1:100:ACG");
        assert_eq!(record.locus(), Locus::new("chr1", 100));
    }

    #[test]
    fn test_end_saturates_at_last_position() {
        let record = RecordBuilder::new("chr1", u64::MAX, "ACG").build();
        assert_eq!(record.pos(), u64::MAX);
        assert_eq!(record.end(), u64::MAX);
        assert_eq!(RecordBuilder::new("chr1", 7, "").build().end(), 7);
    }

    #[test]
    fn test_override_leaves_base_untouched() {
        let base = RecordBuilder::new("1", 5, "A")
            .alt("T")
            .info("DP", "10")
            .genotype(Genotype::new("S1", vec![Some(0), Some(1)], false))
            .build();
        let derived = RecordBuilder::from(&base).chrom("chr1").build();
        assert_eq!(base.chrom(), "1");
        assert_eq!(derived.chrom(), "chr1");
        assert_eq!(derived.info(), base.info());
        assert_eq!(derived.genotypes(), base.genotypes());
        assert_eq!(derived.sample_names(), vec!["S1"]);
    }
}
