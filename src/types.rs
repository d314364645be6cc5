use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use getset::Getters;
use indexmap::IndexMap;
use itertools::Itertools;
use multimap::MultiMap;
use strum::{Display, EnumString};

use crate::dictionary::SequenceDictionary;
use crate::error::{PoolError, Result};
use crate::parser;

pub const VCF_VERSION: &str = "VCFv4.1";
pub(crate) const PLACEHOLDER_DESCRIPTION: &str = "This is a dummy description";

pub type Sample = String;

/// The sections of a header that declare identifiers a record may reference.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Display, EnumString)]
pub enum HeaderSection {
    #[strum(serialize = "INFO")]
    Info,
    #[strum(serialize = "FORMAT")]
    Format,
    #[strum(serialize = "FILTER")]
    Filter,
}

#[derive(Debug, Clone, Eq, PartialEq, Display, EnumString)]
pub enum InfoType {
    Integer,
    Float,
    Flag,
    Character,
    String,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum InfoNumber {
    Count(usize),
    Alleles,
    AlternateAlleles,
    Genotypes,
    Unknown,
}

impl fmt::Display for InfoNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoNumber::Count(n) => write!(f, "{}", n),
            InfoNumber::Alleles => f.write_str("R"),
            InfoNumber::AlternateAlleles => f.write_str("A"),
            InfoNumber::Genotypes => f.write_str("G"),
            InfoNumber::Unknown => f.write_str("."),
        }
    }
}

impl FromStr for InfoNumber {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match parser::info_number(s) {
            Ok(("", number)) => Ok(number),
            _ => Err(format!("unknown Number {:?}", s)),
        }
    }
}

/// An `##INFO` or `##FORMAT` line.
#[derive(Debug, Getters, Clone, PartialEq)]
#[getset(get = "pub")]
pub struct FieldDeclaration {
    pub(crate) id: String,
    number: InfoNumber,
    kind: InfoType,
    description: String,
    // may be empty
    source: String,
    // may be empty
    version: String,
    additional: IndexMap<String, String>,
}

impl FieldDeclaration {
    pub fn new<S: Into<String>, D: Into<String>>(
        id: S,
        number: InfoNumber,
        kind: InfoType,
        description: D,
    ) -> Self {
        FieldDeclaration {
            id: id.into(),
            number,
            kind,
            description: description.into(),
            source: String::new(),
            version: String::new(),
            additional: IndexMap::new(),
        }
    }

    /// Declaration used to patch a header that lacks a field a record uses.
    pub(crate) fn placeholder(section: HeaderSection, id: &str) -> Option<Self> {
        let number = match section {
            HeaderSection::Info => InfoNumber::Unknown,
            HeaderSection::Format => InfoNumber::Count(1),
            HeaderSection::Filter => return None,
        };
        Some(FieldDeclaration::new(
            id,
            number,
            InfoType::String,
            PLACEHOLDER_DESCRIPTION,
        ))
    }

    fn render(&self, section: HeaderSection) -> String {
        let mut fields = vec![
            format!("ID={}", self.id),
            format!("Number={}", self.number),
            format!("Type={}", self.kind),
            format!("Description={}", quote(&self.description)),
        ];
        if !self.source.is_empty() {
            fields.push(format!("Source={}", quote(&self.source)));
        }
        if !self.version.is_empty() {
            fields.push(format!("Version={}", quote(&self.version)));
        }
        fields.extend(self.additional.iter().map(|(k, v)| format!("{}={}", k, v)));
        format!("##{}=<{}>", section, fields.join(","))
    }
}

impl<'a> TryFrom<Vec<(&'a str, &'a str)>> for FieldDeclaration {
    type Error = String;

    fn try_from(data: Vec<(&'a str, &'a str)>) -> std::result::Result<Self, Self::Error> {
        let mut h: IndexMap<_, _> = data.into_iter().collect();
        let mut declaration = FieldDeclaration {
            id: h.shift_remove("ID").ok_or("ID is mandatory")?.into(),
            number: h.shift_remove("Number").ok_or("Number is mandatory")?.parse()?,
            kind: InfoType::from_str(h.shift_remove("Type").ok_or("Type is mandatory")?)
                .map_err(|e| e.to_string())?,
            description: h
                .shift_remove("Description")
                .ok_or("Description is mandatory")?
                .into(),
            source: h.shift_remove("Source").unwrap_or("").into(),
            version: h.shift_remove("Version").unwrap_or("").into(),
            additional: Default::default(),
        };
        declaration.additional = h.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Ok(declaration)
    }
}

#[derive(Debug, Getters, Clone, PartialEq)]
#[getset(get = "pub")]
pub struct ContigDeclaration {
    pub(crate) id: String,
    length: Option<u64>,
    additional: IndexMap<String, String>,
}

impl ContigDeclaration {
    pub fn new<S: Into<String>>(id: S, length: Option<u64>) -> Self {
        ContigDeclaration {
            id: id.into(),
            length,
            additional: IndexMap::new(),
        }
    }

    fn render(&self) -> String {
        let mut fields = vec![format!("ID={}", self.id)];
        if let Some(length) = self.length {
            fields.push(format!("length={}", length));
        }
        fields.extend(self.additional.iter().map(|(k, v)| format!("{}={}", k, v)));
        format!("##contig=<{}>", fields.join(","))
    }
}

impl<'a> TryFrom<Vec<(&'a str, &'a str)>> for ContigDeclaration {
    type Error = String;

    fn try_from(data: Vec<(&'a str, &'a str)>) -> std::result::Result<Self, Self::Error> {
        let mut h: IndexMap<_, _> = data.into_iter().collect();
        let mut contig = ContigDeclaration {
            id: h.shift_remove("ID").ok_or("ID is mandatory")?.into(),
            length: h.shift_remove("length").and_then(|s| s.parse().ok()),
            additional: Default::default(),
        };
        contig.additional = h.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Ok(contig)
    }
}

#[derive(Debug, Getters, Clone, PartialEq)]
#[getset(get = "pub")]
pub struct FilterDeclaration {
    pub(crate) id: String,
    description: String,
}

impl FilterDeclaration {
    pub fn new<S: Into<String>, D: Into<String>>(id: S, description: D) -> Self {
        FilterDeclaration {
            id: id.into(),
            description: description.into(),
        }
    }
}

impl<'a> TryFrom<Vec<(&'a str, &'a str)>> for FilterDeclaration {
    type Error = String;

    fn try_from(data: Vec<(&'a str, &'a str)>) -> std::result::Result<Self, Self::Error> {
        let mut h: HashMap<_, _> = data.into_iter().collect();
        Ok(FilterDeclaration {
            id: h.remove("ID").ok_or("ID is mandatory")?.into(),
            description: h.remove("Description").unwrap_or("").into(),
        })
    }
}

/// A parsed `##` header entry.
#[derive(Debug, Clone)]
pub enum HeaderValue {
    String(String),
    Info(FieldDeclaration),
    Filter(FilterDeclaration),
    Format(FieldDeclaration),
    Contig(ContigDeclaration),
}

#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Header {
    pub(crate) version: String,
    pub(crate) meta: MultiMap<String, String>,
    pub(crate) info: IndexMap<String, FieldDeclaration>,
    pub(crate) format: IndexMap<String, FieldDeclaration>,
    pub(crate) filters: IndexMap<String, FilterDeclaration>,
    pub(crate) contigs: Vec<ContigDeclaration>,
    pub(crate) samples: Vec<Sample>,
}

impl Default for Header {
    fn default() -> Self {
        Header::new(VCF_VERSION)
    }
}

impl Header {
    pub fn new<S: Into<String>>(version: S) -> Self {
        Header {
            version: version.into(),
            meta: MultiMap::new(),
            info: IndexMap::new(),
            format: IndexMap::new(),
            filters: IndexMap::new(),
            contigs: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Minimal header accepted by VCF readers: the file format, a `GT`
    /// declaration and one contig line per dictionary entry.
    pub fn basic(dictionary: &SequenceDictionary, samples: &[Sample]) -> Self {
        let mut header = Header::new(VCF_VERSION);
        header.add_format(FieldDeclaration::new(
            "GT",
            InfoNumber::Count(1),
            InfoType::String,
            "Genotype",
        ));
        for entry in dictionary.entries() {
            header.add_contig(ContigDeclaration::new(entry.name(), Some(*entry.length())));
        }
        header.samples = samples.to_vec();
        header
    }

    pub(crate) fn push(&mut self, key: &str, value: HeaderValue) {
        match value {
            HeaderValue::Info(info) => self.add_info(info),
            HeaderValue::Format(format) => self.add_format(format),
            HeaderValue::Filter(filter) => self.add_filter(filter),
            HeaderValue::Contig(contig) => self.add_contig(contig),
            HeaderValue::String(value) if key == "fileformat" => self.version = value,
            HeaderValue::String(value) => self.meta.insert(key.to_owned(), value),
        }
    }

    pub fn add_info(&mut self, declaration: FieldDeclaration) {
        self.info.insert(declaration.id.clone(), declaration);
    }

    pub fn add_format(&mut self, declaration: FieldDeclaration) {
        self.format.insert(declaration.id.clone(), declaration);
    }

    pub fn add_filter(&mut self, declaration: FilterDeclaration) {
        self.filters.insert(declaration.id.clone(), declaration);
    }

    pub fn add_contig(&mut self, declaration: ContigDeclaration) {
        match self.contigs.iter_mut().find(|c| c.id == declaration.id) {
            Some(existing) => *existing = declaration,
            None => self.contigs.push(declaration),
        }
    }

    pub fn set_samples(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
    }

    /// `PASS` is implicitly declared.
    pub fn is_declared(&self, section: HeaderSection, id: &str) -> bool {
        match section {
            HeaderSection::Info => self.info.contains_key(id),
            HeaderSection::Format => self.format.contains_key(id),
            HeaderSection::Filter => id == "PASS" || self.filters.contains_key(id),
        }
    }

    /// Adds a placeholder declaration for `id`. Only INFO and FORMAT fields
    /// can be declared this way.
    pub fn declare_placeholder(&mut self, section: HeaderSection, id: &str) -> Result<()> {
        let declaration =
            FieldDeclaration::placeholder(section, id).ok_or_else(|| {
                PoolError::UnrepairableField {
                    name: id.to_owned(),
                    section,
                }
            })?;
        match section {
            HeaderSection::Info => self.add_info(declaration),
            _ => self.add_format(declaration),
        }
        Ok(())
    }

    /// The header block as VCF text lines, ending with the `#CHROM` line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("##fileformat={}", self.version)];
        for key in self.meta.keys().sorted() {
            if let Some(values) = self.meta.get_vec(key) {
                lines.extend(values.iter().map(|v| format!("##{}={}", key, v)));
            }
        }
        lines.extend(self.filters.values().map(|f| {
            format!(
                "##FILTER=<ID={},Description={}>",
                f.id,
                quote(&f.description)
            )
        }));
        lines.extend(self.info.values().map(|i| i.render(HeaderSection::Info)));
        lines.extend(self.format.values().map(|i| i.render(HeaderSection::Format)));
        lines.extend(self.contigs.iter().map(ContigDeclaration::render));

        let mut columns = vec!["#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO"];
        if !self.samples.is_empty() {
            columns.push("FORMAT");
            columns.extend(self.samples.iter().map(String::as_str));
        }
        lines.push(columns.join("\t"));
        lines
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dictionary::DictionaryEntry;

    #[test]
    fn test_basic_header() {
        let dictionary = SequenceDictionary::new(vec![
            DictionaryEntry::new("chr1", 1000),
            DictionaryEntry::new("chr2", 500),
        ]);
        let header = Header::basic(&dictionary, &["S1".to_owned()]);
        assert_eq!(
            header.lines(),
            vec![
                "##fileformat=VCFv4.1",
                "##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">",
                "##contig=<ID=chr1,length=1000>",
                "##contig=<ID=chr2,length=500>",
                "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1",
            ]
        );
    }

    #[test]
    fn test_placeholder_declarations() {
        let mut header = Header::default();
        header.declare_placeholder(HeaderSection::Info, "AC").unwrap();
        header.declare_placeholder(HeaderSection::Format, "AB").unwrap();
        assert_eq!(header.info()["AC"].number(), &InfoNumber::Unknown);
        assert_eq!(header.format()["AB"].number(), &InfoNumber::Count(1));
        assert_eq!(header.info()["AC"].description(), PLACEHOLDER_DESCRIPTION);
        assert!(matches!(
            header.declare_placeholder(HeaderSection::Filter, "q10"),
            Err(PoolError::UnrepairableField { .. })
        ));
    }

    #[test]
    fn test_pass_is_implicit() {
        let header = Header::default();
        assert!(header.is_declared(HeaderSection::Filter, "PASS"));
        assert!(!header.is_declared(HeaderSection::Filter, "q10"));
    }

    #[test]
    fn test_info_number_round_trip() {
        for s in &["0", "1", "A", "R", "G", "."] {
            assert_eq!(&s.parse::<InfoNumber>().unwrap().to_string(), s);
        }
        assert!("X".parse::<InfoNumber>().is_err());
    }
}
