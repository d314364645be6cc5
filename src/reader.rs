use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use crate::error::Result;
use crate::parser;
use crate::record::VariantRecord;
use crate::types::Header;

const INDEX_EXTENSIONS: [&str; 3] = ["tbi", "csi", "idx"];

/// A pull-based supply of records. `Ok(None)` signals exhaustion; pulling
/// again afterwards is not supported.
pub trait RecordSource {
    fn next_record(&mut self) -> Result<Option<VariantRecord>>;

    /// The header of the underlying file, if the source has one.
    fn header(&self) -> Option<&Header> {
        None
    }
}

/// Adapts any iterator of records.
#[derive(Debug)]
pub struct IterSource<I> {
    inner: I,
}

impl<I: Iterator<Item = VariantRecord>> IterSource<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(records: T) -> Self {
        IterSource {
            inner: records.into_iter(),
        }
    }
}

impl<I: Iterator<Item = VariantRecord>> RecordSource for IterSource<I> {
    fn next_record(&mut self) -> Result<Option<VariantRecord>> {
        Ok(self.inner.next())
    }
}

/// Records of a text VCF file.
pub struct VcfRecords<R: BufRead> {
    header: Header,
    inner: R,
    line: String,
    line_number: usize,
    source: String,
}

impl<R: BufRead> VcfRecords<R> {
    pub fn header(&self) -> &Header {
        &self.header
    }
}

impl VcfRecords<BufReader<Box<dyn Read>>> {
    /// Opens a plain or compressed VCF file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let (reader, _format) = niffler::from_path(path)
            .with_context(|| format!("could not open {}", path.display()))?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(BufReader::new(reader), label)
    }
}

impl<R: BufRead> VcfRecords<R> {
    pub fn new<S: Into<String>>(mut reader: R, source: S) -> anyhow::Result<Self> {
        let mut header = Header::default();
        let mut line = String::new();
        let mut line_number = 0;
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(anyhow!("VCF ended before the #CHROM line"));
            }
            line_number += 1;
            let trimmed = line.trim_end_matches(&['\n', '\r'][..]);
            if trimmed.starts_with("##") {
                let (key, value) = parser::header_entry(trimmed)
                    .map_err(|e| anyhow!("line {}: {}", line_number, e))?;
                header.push(&key, value);
            } else if trimmed.starts_with("#CHROM") {
                let samples = parser::column_header(trimmed)
                    .map_err(|e| anyhow!("line {}: {}", line_number, e))?;
                header.set_samples(samples);
                break;
            } else {
                return Err(anyhow!("line {}: expected a header line", line_number));
            }
        }
        Ok(VcfRecords {
            header,
            inner: reader,
            line,
            line_number,
            source: source.into(),
        })
    }

    fn read_record(&mut self) -> anyhow::Result<Option<VariantRecord>> {
        loop {
            self.line.clear();
            if self.inner.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let trimmed = self.line.trim_end_matches(&['\n', '\r'][..]);
            if trimmed.is_empty() {
                continue;
            }
            return parser::record_line(trimmed, &self.header.samples, &self.source)
                .map(Some)
                .map_err(|e| anyhow!("line {}: {}", self.line_number, e));
        }
    }
}

impl<R: BufRead> Iterator for VcfRecords<R> {
    type Item = anyhow::Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

impl<R: BufRead> RecordSource for VcfRecords<R> {
    fn next_record(&mut self) -> Result<Option<VariantRecord>> {
        Ok(self.read_record()?)
    }

    fn header(&self) -> Option<&Header> {
        Some(&self.header)
    }
}

/// The tabix, CSI or tribble index next to `path`, if there is one.
pub fn companion_index<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    INDEX_EXTENSIONS.iter().find_map(|extension| {
        let mut candidate = path.as_os_str().to_owned();
        candidate.push(".");
        candidate.push(extension);
        let candidate = PathBuf::from(candidate);
        if candidate.is_file() {
            Some(candidate)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::Record;

    const VCF: &str = "##fileformat=VCFv4.2\n\
                       ##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">\n\
                       ##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n\
                       #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
                       chr1\t100\t.\tA\tT\t50\tPASS\tDP=10\tGT\t0/1\n\
                       \n\
                       chr2\t200\t.\tACG\tA\t.\t.\t.\tGT\t1/1\n";

    #[test]
    fn test_read_text_vcf() {
        let records = VcfRecords::new(VCF.as_bytes(), "mem").unwrap();
        assert_eq!(records.header().version(), "VCFv4.2");
        assert_eq!(records.header().samples(), &["S1"]);
        let records: Vec<_> = records.collect::<anyhow::Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].chrom(), "chr2");
        assert_eq!(records[1].source(), "mem");
    }

    #[test]
    fn test_missing_column_header() {
        assert!(VcfRecords::new("##fileformat=VCFv4.2\n".as_bytes(), "mem").is_err());
    }

    #[test]
    fn test_from_path() {
        let mut records = VcfRecords::from_path("resources/example.vcf").unwrap();
        assert_eq!(records.header().samples(), &["NA00001", "NA00002"]);
        assert!(RecordSource::next_record(&mut records).unwrap().is_some());
    }

    #[test]
    fn test_companion_index() {
        assert!(companion_index("resources/example.vcf").is_none());
        let dir = tempfile::tempdir().unwrap();
        let vcf = dir.path().join("calls.vcf.gz");
        std::fs::copy("resources/example.vcf", &vcf).unwrap();
        assert!(companion_index(&vcf).is_none());
        std::fs::write(dir.path().join("calls.vcf.gz.csi"), b"").unwrap();
        assert_eq!(companion_index(&vcf), Some(dir.path().join("calls.vcf.gz.csi")));
    }
}
