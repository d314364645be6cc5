use std::cmp::max;

use strum::Display;

use crate::pool::VariantPool;
use crate::record::{Locus, Record, VariantRecord};

/// The kind of change an alternate allele makes to its reference allele.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display)]
pub enum AltType {
    Snv,
    Mnp,
    Insertion,
    Deletion,
    StructuralVariant,
    Missing,
}

impl AltType {
    pub fn classify(ref_allele: &str, alt: &str) -> Self {
        if alt == "." || alt == "*" {
            AltType::Missing
        } else if alt.starts_with('<') || alt.contains('[') || alt.contains(']') {
            AltType::StructuralVariant
        } else if ref_allele.len() == alt.len() {
            if alt.len() == 1 {
                AltType::Snv
            } else {
                AltType::Mnp
            }
        } else if ref_allele.len() < alt.len() {
            AltType::Insertion
        } else {
            AltType::Deletion
        }
    }

    pub fn is_indel(self) -> bool {
        matches!(self, AltType::Insertion | AltType::Deletion)
    }
}

/// Decides which alleles count as indels and of which kind.
pub trait AlleleClassifier {
    fn classify(&self, ref_allele: &str, alt: &str) -> AltType;

    fn is_indel(&self, kind: AltType) -> bool {
        kind.is_indel()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultClassifier;

impl AlleleClassifier for DefaultClassifier {
    fn classify(&self, ref_allele: &str, alt: &str) -> AltType {
        AltType::classify(ref_allele, alt)
    }
}

impl<F: Fn(&str, &str) -> AltType> AlleleClassifier for F {
    fn classify(&self, ref_allele: &str, alt: &str) -> AltType {
        self(ref_allele, alt)
    }
}

// length of an indel is the longer of its two alleles
fn allele_length(ref_allele: &str, alt: &str) -> u64 {
    max(ref_allele.len(), alt.len()) as u64
}

impl VariantPool {
    /// Counts the indel alleles of `query` that have a same-kind, same-length
    /// indel in this pool within their own length of `query`'s position.
    pub fn count_overlapping_indel_alleles<R: Record>(&self, query: &R) -> usize {
        self.count_overlapping_indel_alleles_with(query, &DefaultClassifier)
    }

    pub fn count_overlapping_indel_alleles_with<R: Record, C: AlleleClassifier + ?Sized>(
        &self,
        query: &R,
        classifier: &C,
    ) -> usize {
        query
            .alt_alleles()
            .iter()
            .filter(|alt| {
                let kind = classifier.classify(query.ref_allele(), alt);
                classifier.is_indel(kind)
                    && self
                        .find_overlapping_indel_with(
                            query.chrom(),
                            query.pos(),
                            allele_length(query.ref_allele(), alt),
                            kind,
                            classifier,
                        )
                        .is_some()
            })
            .count()
    }

    /// The first record in `pos - length ..= pos + length` on `chrom` with an
    /// alternate allele of the given kind and length.
    pub fn find_overlapping_indel(
        &self,
        chrom: &str,
        pos: u64,
        length: u64,
        kind: AltType,
    ) -> Option<&VariantRecord> {
        self.find_overlapping_indel_with(chrom, pos, length, kind, &DefaultClassifier)
    }

    pub fn find_overlapping_indel_with<C: AlleleClassifier + ?Sized>(
        &self,
        chrom: &str,
        pos: u64,
        length: u64,
        kind: AltType,
        classifier: &C,
    ) -> Option<&VariantRecord> {
        let chrom = self.config.normalize_chrom(chrom);
        (pos.saturating_sub(length)..=pos.saturating_add(length))
            .flat_map(|p| self.at_locus(&Locus::new(chrom.as_ref(), p)))
            .find(|record| {
                record.alt_alleles().iter().any(|alt| {
                    classifier.classify(record.ref_allele(), alt) == kind
                        && allele_length(record.ref_allele(), alt) == length
                })
            })
    }
}
