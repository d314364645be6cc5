//! VCF text output.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use itertools::Itertools;

use crate::error::{PoolError, Result};
use crate::record::{Genotype, Record, VariantRecord};
use crate::types::{Header, HeaderSection};

const MISSING: &str = ".";
const STANDARD_FORMAT_KEYS: [&str; 5] = ["AD", "DP", "GQ", "PL", "FT"];

/// A destination that can be rewritten from scratch.
pub trait Sink {
    /// A fresh writer; anything written by an earlier writer is gone.
    fn open(&mut self) -> Result<Box<dyn Write + '_>>;

    /// Drops partial output.
    fn discard(&mut self) -> Result<()>;
}

impl Sink for Vec<u8> {
    fn open(&mut self) -> Result<Box<dyn Write + '_>> {
        self.clear();
        Ok(Box::new(self))
    }

    fn discard(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }
}

/// A file on disk. Paths ending in `.gz` are gzip compressed. `.bgz` paths
/// are refused: the output is plain gzip, not block gzip, so it could not be
/// indexed.
#[derive(Debug, Clone)]
pub struct PathSink {
    path: PathBuf,
    compressed: bool,
}

impl PathSink {
    /// Validates `path` without touching the file system.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: &str| PoolError::InvalidOutputPath {
            path: path.to_owned(),
            reason: reason.to_owned(),
        };
        if path.as_os_str().is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.is_dir() {
            return Err(invalid("path is a directory"));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(invalid("parent directory does not exist"));
            }
        }
        let compressed = match path.extension().and_then(|e| e.to_str()) {
            Some("bgz") => return Err(invalid("block gzip output is not supported")),
            Some("gz") => true,
            _ => false,
        };
        Ok(PathSink {
            path: path.to_owned(),
            compressed,
        })
    }

    /// `file_name` inside `dir`, with `.` and `..` components resolved.
    pub fn in_dir<D: AsRef<Path>, F: AsRef<Path>>(dir: D, file_name: F) -> Result<Self> {
        PathSink::new(normalize(&dir.as_ref().join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for PathSink {
    fn open(&mut self) -> Result<Box<dyn Write + '_>> {
        if self.compressed {
            let writer = niffler::to_path(
                &self.path,
                niffler::compression::Format::Gzip,
                niffler::Level::Six,
            )
            .with_context(|| format!("could not create {}", self.path.display()))?;
            Ok(Box::new(BufWriter::new(writer)))
        } else {
            Ok(Box::new(BufWriter::new(File::create(&self.path)?)))
        }
    }

    fn discard(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            result => Ok(result?),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Writes a header and records, refusing records that use INFO, FORMAT or
/// FILTER identifiers the header does not declare.
pub struct VcfWriter<'h, W: Write> {
    inner: W,
    header: &'h Header,
    records_written: usize,
}

impl<'h, W: Write> VcfWriter<'h, W> {
    pub fn new(inner: W, header: &'h Header) -> Self {
        VcfWriter {
            inner,
            header,
            records_written: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        for line in self.header.lines() {
            writeln!(self.inner, "{}", line)?;
        }
        Ok(())
    }

    pub fn write_record(&mut self, record: &VariantRecord) -> Result<()> {
        let sample_count = self.header.samples().len();
        check_declared(self.header, record, sample_count)?;
        writeln!(self.inner, "{}", encode_record(record, sample_count))?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush()?;
        Ok(self.records_written)
    }
}

/// Fails with [`PoolError::UndeclaredField`] on the first identifier of
/// `record` missing from `header`, checking INFO, then FORMAT, then FILTER.
pub fn check_declared(header: &Header, record: &VariantRecord, sample_count: usize) -> Result<()> {
    let undeclared = |section, name: &str| PoolError::UndeclaredField {
        name: name.to_owned(),
        section,
    };
    if let Some(key) = record
        .info()
        .keys()
        .find(|k| !header.is_declared(HeaderSection::Info, k))
    {
        return Err(undeclared(HeaderSection::Info, key));
    }
    if sample_count > 0 {
        if let Some(key) = format_keys(record)
            .into_iter()
            .find(|k| !header.is_declared(HeaderSection::Format, k))
        {
            return Err(undeclared(HeaderSection::Format, key));
        }
    }
    if let Some(filter) = record
        .filters()
        .iter()
        .find(|f| !header.is_declared(HeaderSection::Filter, f))
    {
        return Err(undeclared(HeaderSection::Filter, filter));
    }
    Ok(())
}

/// The FORMAT keys a record is written with: `GT`, the standard keys any
/// genotype carries, then extended keys in first-seen order.
pub fn format_keys(record: &VariantRecord) -> Vec<&str> {
    let genotypes = record.genotypes();
    let mut keys = vec!["GT"];
    keys.extend(STANDARD_FORMAT_KEYS.iter().copied().filter(|key| {
        genotypes
            .iter()
            .any(|g| standard_value(g, key).is_some())
    }));
    keys.extend(
        genotypes
            .iter()
            .flat_map(|g| g.attributes().keys())
            .map(String::as_str)
            .unique(),
    );
    keys
}

fn join_integers(values: &[i32]) -> String {
    values.iter().join(",")
}

fn standard_value(genotype: &Genotype, key: &str) -> Option<String> {
    match key {
        "AD" => genotype.allele_depths().as_deref().map(join_integers),
        "DP" => genotype.depth().map(|d| d.to_string()),
        "GQ" => genotype.quality().map(|q| q.to_string()),
        "PL" => genotype.likelihoods().as_deref().map(join_integers),
        "FT" => genotype.filters().clone(),
        _ => None,
    }
}

fn encode_genotype(genotype: &Genotype, keys: &[&str]) -> String {
    let mut values = keys
        .iter()
        .map(|key| match *key {
            "GT" => genotype.gt(),
            key if STANDARD_FORMAT_KEYS.contains(&key) => {
                standard_value(genotype, key).unwrap_or_else(|| MISSING.to_owned())
            }
            key => genotype
                .attributes()
                .get(key)
                .cloned()
                .unwrap_or_else(|| MISSING.to_owned()),
        })
        .collect_vec();
    while values.len() > 1 && values.last().map_or(false, |v| v == MISSING) {
        values.pop();
    }
    values.join(":")
}

fn encode_qual(qual: f64) -> String {
    let text = format!("{:.2}", qual);
    match text.strip_suffix(".00") {
        Some(integer) => integer.to_owned(),
        None => text,
    }
}

fn or_missing(values: String) -> String {
    if values.is_empty() {
        MISSING.to_owned()
    } else {
        values
    }
}

/// One VCF data line, without the line break. FORMAT and sample columns are
/// written only when `sample_count` is positive.
pub fn encode_record(record: &VariantRecord, sample_count: usize) -> String {
    let info = record
        .info()
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                key.clone()
            } else {
                format!("{}={}", key, value)
            }
        })
        .join(";");
    let mut columns = vec![
        record.chrom().to_owned(),
        record.pos().to_string(),
        or_missing(record.id().clone()),
        record.ref_allele().to_owned(),
        or_missing(record.alt_alleles().join(",")),
        record.qual().map_or_else(|| MISSING.to_owned(), encode_qual),
        or_missing(record.filters().join(";")),
        or_missing(info),
    ];
    if sample_count > 0 {
        if record.has_genotypes() {
            let keys = format_keys(record);
            columns.push(keys.join(":"));
            columns.extend(record.genotypes().iter().map(|g| encode_genotype(g, &keys)));
        } else {
            columns.push("GT".to_owned());
            columns.extend((0..sample_count).map(|_| MISSING.to_owned()));
        }
    }
    columns.join("\t")
}
