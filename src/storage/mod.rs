//! The in-memory columnar storage core.
//!
//! A [`Table`] owns an ordered list of [`Chunk`]s sharing one schema.
//! Chunks start out mutable, with one append-only [`ValueColumn`] per
//! schema column; [`DictionaryCompression`] freezes a chunk by replacing
//! every value column with a [`DictionaryColumn`] and installing
//! [`ChunkStatistics`]. Frozen chunks are immutable and freely shared
//! across threads, which is what makes the zero-copy pruned views built by
//! [`GetTable`](crate::executor::GetTable) sound.

use std::collections::HashMap;

use itertools::Itertools;
use parking_lot::Mutex;
use thiserror::Error;

use crate::types::{DataTypeKind, DataValue, ValueId};

mod attribute_vector;
mod chunk;
mod column;
mod dictionary_column;
mod dictionary_compression;
mod options;
mod statistics;
mod table;
mod value_column;

#[cfg(test)]
mod tests;

pub use self::attribute_vector::FittedAttributeVector;
pub use self::chunk::{Chunk, ChunkRef, MvccColumns, PackedVec};
pub use self::column::{ColumnImpl, DictionaryColumnImpl, ValueColumnImpl};
pub use self::dictionary_column::DictionaryColumn;
pub use self::dictionary_compression::DictionaryCompression;
pub use self::options::{StorageOptions, DEFAULT_CHUNK_SIZE};
pub use self::statistics::{ChunkStatistics, ColumnStatistics, ColumnStatisticsImpl};
pub use self::table::{Table, TableRef};
pub use self::value_column::ValueColumn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("{0}({1}) not found")]
    NotFound(&'static str, String),
    #[error("duplicated {0}: {1}")]
    Duplicated(&'static str, String),
    #[error("column is already compressed")]
    AlreadyCompressed,
    #[error("chunk is frozen and can no longer be appended to")]
    FrozenChunk,
    #[error("null value appended to a non-nullable column")]
    NullNotAllowed,
    #[error("unordered value (NaN) cannot be dictionary-encoded")]
    UnorderedValue,
    #[error("value id {0} does not fit into a {1}-byte attribute vector")]
    ValueIdOverflow(ValueId, usize),
    #[error("expected {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },
    #[error("expected {expected} rows, got {actual}")]
    RowCountMismatch { expected: usize, actual: usize },
    #[error("cannot store {actual:?} in a column of type {expected}")]
    TypeMismatch {
        expected: DataTypeKind,
        actual: DataValue,
    },
    #[error("column of type {actual} does not match schema type {expected}")]
    ColumnTypeMismatch {
        expected: DataTypeKind,
        actual: DataTypeKind,
    },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// The process-wide registry of stored tables.
///
/// The registry hands out shared [`TableRef`]s; dropping a table only
/// unregisters it, readers holding a reference keep it alive.
#[derive(Default)]
pub struct StorageManager {
    tables: Mutex<HashMap<String, TableRef>>,
}

impl StorageManager {
    pub fn new() -> StorageManager {
        StorageManager::default()
    }

    pub fn add_table(&self, name: impl Into<String>, table: TableRef) -> StorageResult<()> {
        let name = name.into();
        let mut tables = self.tables.lock();
        if tables.contains_key(&name) {
            return Err(StorageError::Duplicated("table", name));
        }
        tables.insert(name, table);
        Ok(())
    }

    pub fn get_table(&self, name: &str) -> StorageResult<TableRef> {
        self.tables
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound("table", name.into()))
    }

    pub fn drop_table(&self, name: &str) -> StorageResult<()> {
        self.tables
            .lock()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound("table", name.into()))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.lock().contains_key(name)
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.lock().keys().cloned().sorted().collect()
    }
}
