//! An in-memory pool of variant records indexed by key and by locus.

mod overlap;
mod registry;
mod serialize;
mod traversal;

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::anyhow;
use itertools::Itertools;
use multimap::MultiMap;

use crate::config::PoolConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{PoolError, Result};
use crate::reader::{companion_index, RecordSource, VcfRecords};
use crate::record::{Locus, Record, RecordBuilder, VariantKey, VariantRecord};
use crate::types::{Header, Sample};
pub use overlap::{AlleleClassifier, AltType, DefaultClassifier};
pub use registry::{ContigRegistry, SamplePool};
pub use serialize::WriteSummary;
pub use traversal::Traversal;

/// Where [`VariantPool::next_record`] takes its records from.
enum Stream {
    /// Pulling from the source and indexing as we go.
    Streaming(Box<dyn RecordSource>),
    /// The source is exhausted; replaying the indices in natural order.
    Replay(Traversal),
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Streaming(_) => f.write_str("Streaming"),
            Stream::Replay(traversal) => f.debug_tuple("Replay").field(traversal).finish(),
        }
    }
}

#[derive(Debug)]
pub struct VariantPool {
    config: PoolConfig,
    file: Option<PathBuf>,
    header: Option<Header>,
    samples: Option<SamplePool>,
    contigs: ContigRegistry,
    records: HashMap<VariantKey, Rc<VariantRecord>>,
    // keys, not records, so a replaced record is never seen through here
    by_locus: MultiMap<Locus, VariantKey>,
    stream: Stream,
    pulled: usize,
    has_genotype_data: Cell<Option<bool>>,
    potential_matching_indel_alleles: usize,
    potential_matching_indel_records: usize,
    diagnostics: Box<dyn Diagnostics>,
}

impl VariantPool {
    /// An empty pool, for building from scratch rather than from a file.
    pub fn new(config: PoolConfig) -> Self {
        VariantPool {
            config,
            file: None,
            header: None,
            samples: None,
            contigs: ContigRegistry::default(),
            records: HashMap::new(),
            by_locus: MultiMap::new(),
            stream: Stream::Replay(Traversal::default()),
            pulled: 0,
            has_genotype_data: Cell::new(None),
            potential_matching_indel_alleles: 0,
            potential_matching_indel_records: 0,
            diagnostics: Box::new(TracingDiagnostics),
        }
    }

    /// A pool that indexes `source` lazily as records are pulled through
    /// [`next_record`](Self::next_record).
    pub fn from_source<S: RecordSource + 'static>(config: PoolConfig, source: S) -> Self {
        let mut pool = VariantPool::new(config);
        pool.header = source.header().cloned();
        pool.stream = Stream::Streaming(Box::new(source));
        pool
    }

    /// Opens the VCF at `path` without reading any records yet.
    pub fn open<P: AsRef<Path>>(path: P, config: PoolConfig) -> Result<Self> {
        let path = path.as_ref();
        if config.require_index() && companion_index(path).is_none() {
            return Err(PoolError::MissingIndex {
                path: path.to_owned(),
            });
        }
        let source = VcfRecords::from_path(path)?;
        let mut pool = VariantPool::from_source(config, source);
        pool.file = Some(path.to_owned());
        Ok(pool)
    }

    /// Reads the whole VCF at `path` into a new pool.
    pub fn from_path<P: AsRef<Path>>(path: P, config: PoolConfig) -> Result<Self> {
        let mut pool = VariantPool::open(path, config)?;
        pool.load()?;
        Ok(pool)
    }

    /// A fresh pool read again from the file this pool was read from.
    pub fn reopen(&self) -> Result<Self> {
        let path = self
            .file
            .as_ref()
            .ok_or_else(|| anyhow!("pool {} was not read from a file", self.pool_id()))?;
        let mut pool = VariantPool::open(path, self.config.clone())?;
        pool.load()?;
        Ok(pool)
    }

    pub fn with_diagnostics<D: Diagnostics + 'static>(mut self, diagnostics: D) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn pool_id(&self) -> &str {
        self.config.pool_id()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn header_mut(&mut self) -> Option<&mut Header> {
        self.header.as_mut()
    }

    pub fn set_header(&mut self, header: Header) {
        self.header = Some(header);
    }

    pub fn samples(&self) -> Option<&SamplePool> {
        self.samples.as_ref()
    }

    /// Binds the sample names of this pool. The sample pool always carries
    /// this pool's id.
    pub fn set_samples(&mut self, names: Vec<Sample>) {
        self.samples = Some(SamplePool::new(self.config.pool_id().to_owned(), names));
    }

    pub fn sample_names(&self) -> &[Sample] {
        self.samples.as_ref().map_or(&[], |s| s.names().as_slice())
    }

    pub fn contigs(&self) -> &ContigRegistry {
        &self.contigs
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source has been fully read into the indices.
    pub fn is_loaded(&self) -> bool {
        matches!(self.stream, Stream::Replay(_))
    }

    pub fn get(&self, key: &VariantKey) -> Option<&VariantRecord> {
        self.records.get(key).map(|record| &**record)
    }

    /// Looks a record up by its parts; `chrom` is normalized first.
    pub fn get_variant(&self, chrom: &str, pos: u64, ref_allele: &str) -> Option<&VariantRecord> {
        let chrom = self.config.normalize_chrom(chrom);
        self.get(&VariantKey::new(chrom.as_ref(), pos, ref_allele))
    }

    /// Looks a record up by its `chr:pos:ref` key text.
    pub fn get_by_key_str(&self, key: &str) -> Result<Option<&VariantRecord>> {
        let key: VariantKey = key.parse()?;
        Ok(self.get_variant(key.chrom(), key.pos(), key.ref_allele()))
    }

    /// Records at exactly `locus`, in natural key order.
    pub fn at_locus(&self, locus: &Locus) -> Vec<&VariantRecord> {
        self.by_locus
            .get_vec(locus)
            .map(|keys| {
                keys.iter()
                    .sorted()
                    .filter_map(|k| self.get(k))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All keys in natural order.
    pub fn keys(&self) -> Vec<VariantKey> {
        self.records.keys().cloned().sorted().collect()
    }

    /// All records in natural key order.
    pub fn iter(&self) -> impl Iterator<Item = &VariantRecord> + '_ {
        self.records
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, record)| record.as_ref())
    }

    /// A natural-order traversal over a snapshot of the current keys.
    pub fn traversal(&self) -> Traversal {
        Traversal::new(self.records.keys().cloned())
    }

    pub fn potential_matching_indel_alleles(&self) -> usize {
        self.potential_matching_indel_alleles
    }

    /// Number of potentially matching indel alleles between the pools a
    /// set operation compared to build this pool.
    pub fn set_potential_matching_indel_alleles(&mut self, count: usize) {
        self.potential_matching_indel_alleles = count;
    }

    pub fn potential_matching_indel_records(&self) -> usize {
        self.potential_matching_indel_records
    }

    pub fn set_potential_matching_indel_records(&mut self, count: usize) {
        self.potential_matching_indel_records = count;
    }

    /// Whether the first record in natural order carries genotypes. The
    /// answer is cached once the pool has records.
    pub fn has_genotype_data(&self) -> bool {
        if let Some(cached) = self.has_genotype_data.get() {
            return cached;
        }
        match self.iter().next() {
            Some(record) => {
                let has = record.has_genotypes();
                self.has_genotype_data.set(Some(has));
                has
            }
            None => false,
        }
    }

    fn normalized(&self, record: VariantRecord) -> VariantRecord {
        let chrom = self.config.normalize_chrom(record.chrom()).into_owned();
        if chrom == record.chrom() {
            return record;
        }
        RecordBuilder::from(&record).chrom(chrom).build()
    }

    /// Adds `record`, returning whether it was stored.
    ///
    /// Unless `allow_duplicate_key` is set, a record whose key is already
    /// present is dropped and the existing record kept.
    pub fn insert(&mut self, record: VariantRecord, allow_duplicate_key: bool) -> bool {
        self.insert_shared(record, allow_duplicate_key).1
    }

    fn insert_shared(
        &mut self,
        record: VariantRecord,
        allow_duplicate_key: bool,
    ) -> (Rc<VariantRecord>, bool) {
        let record = Rc::new(self.normalized(record));
        self.contigs.insert(record.chrom());
        let key = record.key();

        if self.samples.is_none() && record.has_genotypes() {
            self.set_samples(record.sample_names());
        }
        if let Some(samples) = &self.samples {
            if record.has_genotypes() && record.genotypes().len() != samples.len() {
                self.diagnostics.error(&format!(
                    "Record at {}:{} has {} genotypes but pool {} has {} samples. Ignoring it.",
                    record.chrom(),
                    record.pos(),
                    record.genotypes().len(),
                    self.config.pool_id(),
                    samples.len()
                ));
                return (record, false);
            }
        }

        let existed = self.records.contains_key(&key);
        if existed && !allow_duplicate_key {
            self.diagnostics.error(&format!(
                "Found separate variant records with the same Chr, pos, and ref. Ignoring subsequent variants at: {}:{}",
                record.chrom(),
                record.pos()
            ));
            return (record, false);
        }
        if !existed {
            self.by_locus.insert(key.locus(), key.clone());
        }
        self.records.insert(key, Rc::clone(&record));
        (record, true)
    }

    /// Replaces the record stored under `key`. The new record must keep the
    /// key; an absent key is stored as a new record.
    pub fn update(&mut self, key: &VariantKey, record: VariantRecord) -> Result<()> {
        let record = self.normalized(record);
        let found = record.key();
        if &found != key {
            return Err(PoolError::KeyChanged {
                expected: key.to_string(),
                found: found.to_string(),
            });
        }
        if !self.records.contains_key(key) {
            self.contigs.insert(record.chrom());
            self.by_locus.insert(key.locus(), key.clone());
        }
        self.records.insert(found, Rc::new(record));
        Ok(())
    }

    /// Pulls the next record.
    ///
    /// While the source lasts, records come from it and are indexed on the
    /// way through; records the pool rejects are skipped, so streaming
    /// yields exactly the records a replay does. The pull that finds the
    /// source exhausted returns `None` and switches to replaying the indices
    /// in natural order; each replay pass also ends with a single `None`.
    pub fn next_record(&mut self) -> Result<Option<Rc<VariantRecord>>> {
        loop {
            let pulled = match &mut self.stream {
                Stream::Streaming(source) => source.next_record()?,
                Stream::Replay(traversal) => {
                    if let Some(key) = traversal.next() {
                        return Ok(self.records.get(&key).cloned());
                    }
                    // pick up records added since the last pass
                    self.stream = Stream::Replay(self.traversal());
                    return Ok(None);
                }
            };
            let record = match pulled {
                Some(record) => record,
                None => {
                    self.stream = Stream::Replay(self.traversal());
                    return Ok(None);
                }
            };
            if self.pulled == 0 {
                self.set_samples(record.sample_names());
            }
            self.pulled += 1;
            if self.pulled % 10_000 == 0 {
                tracing::debug!("Parsed variants: {}", self.pulled);
            }
            let (record, stored) = self.insert_shared(record, false);
            if stored {
                return Ok(Some(record));
            }
        }
    }

    /// Drains the source into the indices. Returns the number of records
    /// pulled from the source, rejected ones included; zero if the pool was
    /// already loaded.
    pub fn load(&mut self) -> Result<usize> {
        let before = self.pulled;
        while !self.is_loaded() {
            self.next_record()?;
        }
        Ok(self.pulled - before)
    }

    /// Renames the samples of this pool. `names` must be given in the
    /// current genotype column order.
    pub fn change_sample_names(&mut self, names: Vec<Sample>) -> Result<()> {
        let expected = self.sample_names().len();
        if names.len() != expected {
            return Err(PoolError::SampleCountMismatch {
                expected,
                found: names.len(),
            });
        }
        for key in self.keys() {
            let record = match self.records.get(&key) {
                Some(record) => Rc::clone(record),
                None => continue,
            };
            let genotypes = record
                .genotypes()
                .iter()
                .zip(&names)
                .map(|(genotype, name)| genotype.renamed(name.as_str()))
                .collect();
            let renamed = RecordBuilder::from(record.as_ref())
                .genotypes(genotypes)
                .build();
            self.update(&key, renamed)?;
        }
        if let Some(header) = self.header.as_mut() {
            header.set_samples(names.clone());
        }
        self.set_samples(names);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::diagnostics::{CollectingDiagnostics, Level};
    use crate::reader::IterSource;
    use crate::record::Genotype;

    pub(crate) fn snv(chrom: &str, pos: u64, ref_allele: &str, alt: &str) -> VariantRecord {
        crate::RecordBuilder::new(chrom, pos, ref_allele).alt(alt).build()
    }

    fn called(record: VariantRecord, samples: &[&str]) -> VariantRecord {
        let genotypes = samples
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Genotype::new(*s, vec![Some(0), Some(1)], i % 2 == 0)
                    .with_depth(10 + i as i32)
                    .with_quality(40)
                    .with_attribute("AB", "0.5")
            })
            .collect();
        RecordBuilder::from(&record).genotypes(genotypes).build()
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let diagnostics = Rc::new(CollectingDiagnostics::new());
        let mut pool = VariantPool::new(PoolConfig::new("p", true))
            .with_diagnostics(Rc::clone(&diagnostics));
        assert!(pool.insert(snv("chr2", 111, "C", "A"), false));
        assert!(!pool.insert(snv("2", 111, "C", "T"), false));
        assert_eq!(pool.len(), 1);
        let stored = pool.get_variant("chr2", 111, "C").unwrap();
        assert_eq!(stored.alt_alleles(), ["A".to_owned()]);
        assert_eq!(diagnostics.count(Level::Error), 1);
    }

    #[test]
    fn test_duplicate_key_allowed_replaces() {
        let mut pool = VariantPool::new(PoolConfig::new("p", false));
        pool.insert(snv("1", 5, "A", "C"), false);
        assert!(pool.insert(snv("1", 5, "A", "G"), true));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.at_locus(&Locus::new("1", 5)).len(), 1);
        assert_eq!(
            pool.get_variant("1", 5, "A").unwrap().alt_alleles(),
            ["G".to_owned()]
        );
    }

    #[test]
    fn test_insert_normalizes_and_registers_contig() {
        let mut pool = VariantPool::new(PoolConfig::new("p", false));
        pool.insert(snv("chr10", 5, "A", "C"), false);
        pool.insert(snv("chr2", 5, "A", "C"), false);
        assert_eq!(pool.contigs().iter().collect_vec(), vec!["2", "10"]);
        assert!(pool.get_variant("chr10", 5, "A").is_some());
        assert_eq!(pool.get(&VariantKey::new("10", 5, "A")).unwrap().chrom(), "10");
        assert!(pool.get_by_key_str("chr2:5:A").unwrap().is_some());
        assert!(pool.get_by_key_str("chr2:6:A").unwrap().is_none());
        assert!(pool.get_by_key_str("nonsense").is_err());
    }

    #[test]
    fn test_secondary_index_sees_updates() {
        let mut pool = VariantPool::new(PoolConfig::new("p", true));
        pool.insert(snv("chr1", 100, "A", "C"), false);
        pool.insert(snv("chr1", 100, "AT", "A"), false);
        let key = VariantKey::new("chr1", 100, "A");
        let replacement = RecordBuilder::from(pool.get(&key).unwrap())
            .id("rs42")
            .build();
        pool.update(&key, replacement).unwrap();
        let at_locus = pool.at_locus(&Locus::new("chr1", 100));
        assert_eq!(at_locus.len(), 2);
        assert_eq!(at_locus[0].id(), "rs42");
    }

    #[test]
    fn test_update_rejects_key_change() {
        let mut pool = VariantPool::new(PoolConfig::new("p", true));
        pool.insert(snv("chr1", 100, "A", "C"), false);
        let key = VariantKey::new("chr1", 100, "A");
        let moved = snv("chr1", 101, "A", "C");
        assert!(matches!(
            pool.update(&key, moved),
            Err(PoolError::KeyChanged { .. })
        ));
        assert_eq!(pool.get(&key).unwrap().pos(), 100);
    }

    #[test]
    fn test_update_absent_key_indexes_it() {
        let mut pool = VariantPool::new(PoolConfig::new("p", true));
        let key = VariantKey::new("chr3", 7, "G");
        pool.update(&key, snv("3", 7, "G", "T")).unwrap();
        assert_eq!(pool.len(), 1);
        assert!(pool.contigs().contains("chr3"));
        assert_eq!(pool.at_locus(&key.locus()).len(), 1);
    }

    #[test]
    fn test_streaming_then_replay() {
        let records = vec![
            called(snv("chr10", 5, "A", "C"), &["S2", "S1"]),
            called(snv("chr2", 100, "A", "C"), &["S2", "S1"]),
            called(snv("chr2", 5, "A", "C"), &["S2", "S1"]),
        ];
        let mut pool =
            VariantPool::from_source(PoolConfig::new("p", true), IterSource::new(records));
        assert!(!pool.is_loaded());

        let mut streamed = Vec::new();
        while let Some(record) = pool.next_record().unwrap() {
            streamed.push(record.key().to_string());
        }
        assert_eq!(streamed, vec!["chr10:5:A", "chr2:100:A", "chr2:5:A"]);
        assert!(pool.is_loaded());
        assert_eq!(pool.sample_names(), ["S2".to_owned(), "S1".to_owned()]);
        assert_eq!(pool.samples().unwrap().pool_id(), "p");

        let mut replay = || {
            let mut keys = Vec::new();
            while let Some(record) = pool.next_record().unwrap() {
                keys.push(record.key().to_string());
            }
            keys
        };
        let first = replay();
        let second = replay();
        assert_eq!(first, vec!["chr2:5:A", "chr2:100:A", "chr10:5:A"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_streaming_skips_rejected_records() {
        let records = vec![
            called(snv("chr1", 5, "A", "C"), &["S1", "S2"]),
            called(snv("chr1", 5, "A", "G"), &["S1", "S2"]),
            called(snv("chr1", 7, "T", "G"), &["S1"]),
            called(snv("chr1", 3, "G", "T"), &["S1", "S2"]),
        ];
        let diagnostics = Rc::new(CollectingDiagnostics::new());
        let mut pool =
            VariantPool::from_source(PoolConfig::new("p", true), IterSource::new(records))
                .with_diagnostics(Rc::clone(&diagnostics));

        let mut streamed = Vec::new();
        while let Some(record) = pool.next_record().unwrap() {
            streamed.push((record.key().to_string(), record.alt_alleles().to_vec()));
        }
        let mut replayed = Vec::new();
        while let Some(record) = pool.next_record().unwrap() {
            replayed.push((record.key().to_string(), record.alt_alleles().to_vec()));
        }

        assert_eq!(
            streamed,
            vec![
                ("chr1:5:A".to_owned(), vec!["C".to_owned()]),
                ("chr1:3:G".to_owned(), vec!["T".to_owned()]),
            ]
        );
        streamed.sort_by_key(|(key, _)| key.parse::<VariantKey>().unwrap());
        assert_eq!(streamed, replayed);
        assert_eq!(diagnostics.count(Level::Error), 2);
    }

    #[test]
    fn test_load_counts_pulled_records() {
        let records = vec![snv("1", 5, "A", "C"), snv("1", 5, "A", "G"), snv("1", 6, "A", "G")];
        let diagnostics = Rc::new(CollectingDiagnostics::new());
        let mut pool =
            VariantPool::from_source(PoolConfig::new("p", false), IterSource::new(records))
                .with_diagnostics(Rc::clone(&diagnostics));
        assert_eq!(pool.load().unwrap(), 3);
        assert_eq!(pool.len(), 2);
        assert_eq!(diagnostics.count(Level::Error), 1);
        assert_eq!(pool.load().unwrap(), 0);
    }

    #[test]
    fn test_genotype_count_must_match_samples() {
        let diagnostics = Rc::new(CollectingDiagnostics::new());
        let mut pool = VariantPool::new(PoolConfig::new("p", true))
            .with_diagnostics(Rc::clone(&diagnostics));
        pool.set_samples(vec!["S1".to_owned(), "S2".to_owned()]);
        assert!(!pool.insert(called(snv("chr1", 1, "A", "C"), &["S1"]), false));
        assert!(pool.insert(called(snv("chr1", 1, "A", "C"), &["S1", "S2"]), false));
        assert_eq!(diagnostics.count(Level::Error), 1);
    }

    #[test]
    fn test_change_sample_names() {
        let records = vec![
            called(snv("chr1", 5, "A", "C"), &["S1", "S2"]),
            called(snv("chr1", 9, "G", "T"), &["S1", "S2"]),
        ];
        let mut pool =
            VariantPool::from_source(PoolConfig::new("p", true), IterSource::new(records));
        pool.load().unwrap();
        let before = pool.iter().cloned().collect_vec();

        pool.change_sample_names(vec!["A".to_owned(), "B".to_owned()])
            .unwrap();
        assert_eq!(pool.sample_names(), ["A".to_owned(), "B".to_owned()]);
        for (old, new) in before.iter().zip(pool.iter()) {
            assert_eq!(old.key(), new.key());
            assert_eq!(new.sample_names(), vec!["A", "B"]);
            for (g_old, g_new) in old.genotypes().iter().zip(new.genotypes()) {
                assert_eq!(g_new.alleles(), g_old.alleles());
                assert_eq!(g_new.phased(), g_old.phased());
                assert_eq!(g_new.depth(), g_old.depth());
                assert_eq!(g_new.quality(), g_old.quality());
                assert_eq!(g_new.attributes(), g_old.attributes());
            }
        }
        assert!(matches!(
            pool.change_sample_names(vec!["A".to_owned()]),
            Err(PoolError::SampleCountMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_has_genotype_data() {
        let mut pool = VariantPool::new(PoolConfig::new("p", true));
        assert!(!pool.has_genotype_data());
        pool.insert(called(snv("chr1", 5, "A", "C"), &["S1"]), false);
        assert!(pool.has_genotype_data());
    }

    #[test]
    fn test_from_path() {
        let pool = VariantPool::from_path("resources/example.vcf", PoolConfig::new("ex", true))
            .unwrap();
        assert_eq!(pool.len(), 5);
        assert_eq!(pool.sample_names(), ["NA00001".to_owned(), "NA00002".to_owned()]);
        assert!(pool.header().is_some());
        assert!(pool.contigs().iter().all(|c| c.starts_with("chr")));
        let again = pool.reopen().unwrap();
        assert_eq!(again.keys(), pool.keys());
    }

    #[test]
    fn test_require_index() {
        let mut config = PoolConfig::new("ex", true);
        config.set_require_index(true);
        assert!(matches!(
            VariantPool::open("resources/example.vcf", config.clone()),
            Err(PoolError::MissingIndex { .. })
        ));
        let dir = tempfile::tempdir().unwrap();
        let vcf = dir.path().join("example.vcf");
        std::fs::copy("resources/example.vcf", &vcf).unwrap();
        std::fs::write(dir.path().join("example.vcf.tbi"), b"").unwrap();
        let mut pool = VariantPool::open(&vcf, config).unwrap();
        assert!(!pool.is_loaded());
        assert_eq!(pool.load().unwrap(), 6);
    }

    #[test]
    fn test_indel_counters() {
        let mut pool = VariantPool::new(PoolConfig::default());
        pool.set_potential_matching_indel_alleles(100);
        pool.set_potential_matching_indel_records(40);
        assert_eq!(pool.potential_matching_indel_alleles(), 100);
        assert_eq!(pool.potential_matching_indel_records(), 40);
    }
}
