use std::collections::HashSet;
use std::path::Path;

use getset::{CopyGetters, Getters};

use crate::dictionary::SequenceDictionary;
use crate::error::{PoolError, Result};
use crate::pool::VariantPool;
use crate::types::{Header, HeaderSection};
use crate::writer::{PathSink, Sink, VcfWriter};

/// What a successful [`VariantPool::write`] did.
#[derive(Debug, Clone, Default, PartialEq, Getters, CopyGetters)]
pub struct WriteSummary {
    #[getset(get_copy = "pub")]
    records_written: usize,
    /// Number of times output was discarded and rewritten.
    #[getset(get_copy = "pub")]
    restarts: usize,
    /// Fields given a placeholder declaration, in repair order.
    #[getset(get = "pub")]
    repaired: Vec<(HeaderSection, String)>,
}

impl VariantPool {
    /// Writes the header and every record in natural key order to `sink`.
    ///
    /// A pool without a header gets a minimal one built from `dictionary`.
    /// When a record uses an INFO or FORMAT key the header does not declare
    /// and `repair_header` is set, a placeholder declaration is added and the
    /// whole write starts over. Any failure discards what was written.
    pub fn write<S: Sink + ?Sized>(
        &mut self,
        sink: &mut S,
        dictionary: &SequenceDictionary,
        repair_header: bool,
    ) -> Result<WriteSummary> {
        if dictionary.is_empty() {
            return Err(PoolError::MissingReferenceDictionary { path: None });
        }
        self.load()?;
        if self.header.is_none() {
            self.header = Some(Header::basic(dictionary, self.sample_names()));
        }

        let mut summary = WriteSummary::default();
        let mut repaired = HashSet::new();
        loop {
            let error = match self.write_once(sink) {
                Ok(count) => {
                    summary.records_written = count;
                    return Ok(summary);
                }
                Err(error) => error,
            };
            sink.discard()?;

            let repairable = error.is_repairable();
            let (name, section) = match error {
                PoolError::UndeclaredField { name, section } => (name, section),
                other => return Err(other),
            };
            if !repairable || (repair_header && repaired.contains(&(section, name.clone()))) {
                return Err(PoolError::UnrepairableField { name, section });
            }
            if !repair_header {
                return Err(PoolError::UndeclaredField { name, section });
            }

            let message = format!(
                "Variant pool ({}) missing header line with key '{}' and type '{}'. Creating and adding dummy line to header.",
                self.pool_id(),
                name,
                section
            );
            self.diagnostics.warn(&message);
            self.diagnostics.echo(&message);
            if let Some(header) = self.header.as_mut() {
                header.declare_placeholder(section, &name)?;
            }
            repaired.insert((section, name.clone()));
            summary.repaired.push((section, name));
            summary.restarts += 1;
        }
    }

    fn write_once<S: Sink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let header = match &self.header {
            Some(header) => header,
            None => return Err(PoolError::MissingReferenceDictionary { path: None }),
        };
        let mut writer = VcfWriter::new(sink.open()?, header);
        writer.write_header()?;
        for record in self.iter() {
            writer.write_record(record)?;
        }
        writer.finish()
    }

    /// Writes to the file at `path`, taking contig lines from the sequence
    /// dictionary next to the FASTA file `reference`.
    pub fn write_path<P: AsRef<Path>, R: AsRef<Path>>(
        &mut self,
        path: P,
        reference: R,
        repair_header: bool,
    ) -> Result<WriteSummary> {
        let dictionary = SequenceDictionary::from_reference(reference)?;
        let mut sink = PathSink::new(path)?;
        self.write(&mut sink, &dictionary, repair_header)
    }

    /// Like [`write_path`](Self::write_path) for `file_name` inside `dir`.
    pub fn write_to_dir<D: AsRef<Path>, F: AsRef<Path>, R: AsRef<Path>>(
        &mut self,
        dir: D,
        file_name: F,
        reference: R,
        repair_header: bool,
    ) -> Result<WriteSummary> {
        let dictionary = SequenceDictionary::from_reference(reference)?;
        let mut sink = PathSink::in_dir(dir, file_name)?;
        self.write(&mut sink, &dictionary, repair_header)
    }
}
