use getset::{CopyGetters, Getters};
use indexmap::IndexMap;
use itertools::Itertools;

use crate::types::Sample;

/// A single sample's call at a record.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Genotype {
    #[getset(get = "pub")]
    sample: Sample,
    /// Allele indices, `None` for a no-call.
    #[getset(get = "pub")]
    alleles: Vec<Option<usize>>,
    #[getset(get_copy = "pub")]
    phased: bool,
    #[getset(get_copy = "pub")]
    depth: Option<i32>,
    #[getset(get_copy = "pub")]
    quality: Option<i32>,
    #[getset(get = "pub")]
    allele_depths: Option<Vec<i32>>,
    #[getset(get = "pub")]
    likelihoods: Option<Vec<i32>>,
    #[getset(get = "pub")]
    filters: Option<String>,
    #[getset(get = "pub")]
    attributes: IndexMap<String, String>,
}

impl Genotype {
    pub fn new<S: Into<Sample>>(sample: S, alleles: Vec<Option<usize>>, phased: bool) -> Self {
        Genotype {
            sample: sample.into(),
            alleles,
            phased,
            depth: None,
            quality: None,
            allele_depths: None,
            likelihoods: None,
            filters: None,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_allele_depths(mut self, allele_depths: Vec<i32>) -> Self {
        self.allele_depths = Some(allele_depths);
        self
    }

    pub fn with_likelihoods(mut self, likelihoods: Vec<i32>) -> Self {
        self.likelihoods = Some(likelihoods);
        self
    }

    pub fn with_filters<S: Into<String>>(mut self, filters: S) -> Self {
        self.filters = Some(filters.into());
        self
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The same call attributed to another sample.
    pub fn renamed<S: Into<Sample>>(&self, sample: S) -> Self {
        Genotype {
            sample: sample.into(),
            ..self.clone()
        }
    }

    /// The same call with its allele indices replaced.
    pub fn with_new_alleles(&self, alleles: Vec<Option<usize>>) -> Self {
        Genotype {
            alleles,
            ..self.clone()
        }
    }

    pub fn is_called(&self) -> bool {
        self.alleles.iter().any(Option::is_some)
    }

    /// The `GT` value, e.g. `0/1`, `1|0` or `./.`.
    pub fn gt(&self) -> String {
        let separator = if self.phased { "|" } else { "/" };
        self.alleles
            .iter()
            .map(|a| a.map_or_else(|| ".".to_owned(), |i| i.to_string()))
            .join(separator)
    }

    /// Parses a `GT` value; mixed separators count as phased if any `|` is
    /// present.
    pub(crate) fn parse_gt(gt: &str) -> Option<(Vec<Option<usize>>, bool)> {
        let phased = gt.contains('|');
        let alleles = gt
            .split(|c| c == '/' || c == '|')
            .map(|a| match a {
                "." => Some(None),
                a => a.parse().ok().map(Some),
            })
            .collect::<Option<Vec<_>>>()?;
        Some((alleles, phased))
    }
}
