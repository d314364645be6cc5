pub mod config;
pub mod diagnostics;
pub mod dictionary;
pub mod error;
pub(crate) mod parser;
pub mod pool;
pub mod reader;
pub mod record;
pub mod types;
pub mod writer;

pub use config::PoolConfig;
pub use error::{PoolError, Result};
pub use pool::VariantPool;
pub use reader::VcfRecords;
pub use record::{Record, RecordBuilder, VariantKey, VariantRecord};
