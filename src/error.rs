use std::path::PathBuf;

use thiserror::Error;

use crate::types::HeaderSection;

pub type Result<T, E = PoolError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("reference dictionary for {path:?} is missing or empty; create one with Picard CreateSequenceDictionary or samtools faidx")]
    MissingReferenceDictionary { path: Option<PathBuf> },

    #[error("key {name} found in record field {section} but this key isn't declared in the header")]
    UndeclaredField { name: String, section: HeaderSection },

    #[error("could not repair missing header line {name} in field {section}")]
    UnrepairableField { name: String, section: HeaderSection },

    #[error("invalid output path {path:?}: {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },

    #[error("no companion index found for {path:?}")]
    MissingIndex { path: PathBuf },

    #[error("update of {expected} would change the record key to {found}")]
    KeyChanged { expected: String, found: String },

    #[error("expected {expected} sample names, got {found}")]
    SampleCountMismatch { expected: usize, found: usize },

    #[error("invalid variant key {0:?}, expected chr:pos:ref")]
    InvalidKey(String),

    #[error("could not parse line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Source(#[from] anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PoolError {
    /// Whether the header repair loop knows how to fix this failure.
    pub fn is_repairable(&self) -> bool {
        matches!(
            self,
            PoolError::UndeclaredField {
                section: HeaderSection::Info | HeaderSection::Format,
                ..
            }
        )
    }
}
