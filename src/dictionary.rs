//! Reference sequence dictionaries, read from the `.dict` or `.fai`
//! companion files of a FASTA reference.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use getset::Getters;

use crate::error::{PoolError, Result};
use crate::parser;

#[derive(Debug, Clone, Eq, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct DictionaryEntry {
    name: String,
    length: u64,
}

impl DictionaryEntry {
    pub fn new<S: Into<String>>(name: S, length: u64) -> Self {
        DictionaryEntry {
            name: name.into(),
            length,
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SequenceDictionary {
    entries: Vec<DictionaryEntry>,
}

impl SequenceDictionary {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        SequenceDictionary { entries }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&DictionaryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Loads the dictionary belonging to the FASTA file at `reference`.
    ///
    /// Looks for `ref.dict` (Picard naming), `ref.fa.dict` and finally the
    /// samtools index `ref.fa.fai`.
    pub fn from_reference<P: AsRef<Path>>(reference: P) -> Result<Self> {
        let reference = reference.as_ref();
        for candidate in dict_candidates(reference) {
            if candidate.is_file() {
                return Self::from_dict(std::fs::File::open(candidate)?);
            }
        }
        let fai = append_extension(reference, "fai");
        if fai.is_file() {
            return Self::from_fai(std::fs::File::open(fai)?);
        }
        Err(PoolError::MissingReferenceDictionary {
            path: Some(reference.to_owned()),
        })
    }

    /// Reads the `@SQ` lines of a SAM-style `.dict` file.
    pub fn from_dict<R: Read>(reader: R) -> Result<Self> {
        let mut entries = Vec::new();
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if !line.starts_with("@SQ") {
                continue;
            }
            let (name, length) = parser::sequence_line(&line).map_err(|message| {
                PoolError::Parse {
                    line: i + 1,
                    message,
                }
            })?;
            entries.push(DictionaryEntry::new(name, length));
        }
        Ok(SequenceDictionary { entries })
    }

    pub fn from_fai<R: Read>(reader: R) -> Result<Self> {
        let mut entries = Vec::new();
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (name, length) = parser::fai_line(&line).map_err(|message| PoolError::Parse {
                line: i + 1,
                message,
            })?;
            entries.push(DictionaryEntry::new(name, length));
        }
        Ok(SequenceDictionary { entries })
    }
}

fn dict_candidates(reference: &Path) -> Vec<PathBuf> {
    let mut stem = reference.to_owned();
    // ref.fa.gz -> ref
    if stem.extension().map_or(false, |e| e == "gz") {
        stem.set_extension("");
    }
    stem.set_extension("dict");
    vec![stem, append_extension(reference, "dict")]
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(extension);
    PathBuf::from(s)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_dict() {
        let dict = "@HD\tVN:1.5\n\
                    @SQ\tSN:chr1\tLN:248956422\tM5:6aef897c3d6ff0c78aff06ac189178dd\n\
                    @SQ\tSN:chr2\tLN:242193529\n";
        let dictionary = SequenceDictionary::from_dict(dict.as_bytes()).unwrap();
        assert_eq!(
            dictionary.entries(),
            &[
                DictionaryEntry::new("chr1", 248956422),
                DictionaryEntry::new("chr2", 242193529)
            ]
        );
    }

    #[test]
    fn test_from_fai() {
        let fai = "chr1\t1000\t6\t60\t61\nchrM\t16569\t1030\t60\t61\n";
        let dictionary = SequenceDictionary::from_fai(fai.as_bytes()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get("chrM").map(|e| *e.length()), Some(16569));
    }

    #[test]
    fn test_from_reference() {
        let dictionary = SequenceDictionary::from_reference("resources/ref.fa").unwrap();
        assert_eq!(dictionary.len(), 3);
        assert_eq!(dictionary.entries()[0].name(), "chr1");
    }

    #[test]
    fn test_missing_dictionary() {
        assert!(matches!(
            SequenceDictionary::from_reference("resources/does-not-exist.fa"),
            Err(PoolError::MissingReferenceDictionary { .. })
        ));
    }
}
