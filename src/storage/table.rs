use std::sync::Arc;

use itertools::Itertools;
use parking_lot::RwLock;

use super::{Chunk, ChunkRef, StorageOptions, StorageResult};
use crate::catalog::ColumnCatalog;
use crate::types::{ChunkId, ColumnId, DataType, Row};

/// A table can be freely cloned as a reference; pruned views share the
/// underlying chunks with the original.
pub type TableRef = Arc<Table>;

#[derive(Debug)]
struct TableInner {
    chunks: Vec<ChunkRef>,
    /// Slot 0 still holds the constructor's untouched chunk. The first
    /// emplaced chunk replaces it instead of appending, and any appended
    /// row claims it for good.
    placeholder: bool,
}

/// An ordered sequence of chunks sharing one schema and one chunk-size
/// policy.
///
/// The chunk list is append-only: a slot, once filled, never changes
/// identity, so readers may hold on to [`ChunkRef`]s across appends.
#[derive(Debug)]
pub struct Table {
    columns: Arc<[ColumnCatalog]>,
    options: StorageOptions,
    inner: RwLock<TableInner>,
}

impl Table {
    /// Creates an empty table with one open chunk.
    pub fn new(columns: Vec<ColumnCatalog>, options: StorageOptions) -> Table {
        assert!(!columns.is_empty(), "table must have at least one column");
        debug_assert!(
            columns
                .iter()
                .enumerate()
                .all(|(index, column)| column.id().as_usize() == index),
            "column ids must be dense and positional"
        );
        let chunk = Arc::new(RwLock::new(Chunk::new(&columns, options.use_mvcc)));
        Table {
            columns: columns.into(),
            options,
            inner: RwLock::new(TableInner {
                chunks: vec![chunk],
                placeholder: true,
            }),
        }
    }

    /// The layout-cloning constructor: an empty table sharing `other`'s
    /// schema and policy.
    pub fn with_layout_of(other: &Table) -> Table {
        let chunk = Arc::new(RwLock::new(Chunk::new(&other.columns, other.options.use_mvcc)));
        Table {
            columns: other.columns.clone(),
            options: other.options,
            inner: RwLock::new(TableInner {
                chunks: vec![chunk],
                placeholder: true,
            }),
        }
    }

    /// Appends one row, allocating a fresh chunk when the last one is full
    /// or frozen. Rows are never split across chunks.
    pub fn append_row(&self, row: Row) -> StorageResult<()> {
        let mut inner = self.inner.write();
        let last = inner.chunks.last().expect("table always has a chunk").clone();
        let mut chunk = last.write();
        if chunk.row_count() >= self.options.max_chunk_size || !chunk.is_mutable() {
            drop(chunk);
            let fresh = Arc::new(RwLock::new(Chunk::new(&self.columns, self.options.use_mvcc)));
            inner.chunks.push(fresh.clone());
            // the list grew, so slot 0 is no longer the lone placeholder
            inner.placeholder = false;
            let result = fresh.write().append_row(&row);
            result
        } else {
            chunk.append_row(&row)?;
            inner.placeholder = false;
            Ok(())
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.inner.read().chunks.len()
    }

    pub fn get_chunk(&self, chunk_id: ChunkId) -> ChunkRef {
        let inner = self.inner.read();
        assert!(
            chunk_id.as_usize() < inner.chunks.len(),
            "chunk id out of range"
        );
        inner.chunks[chunk_id.as_usize()].clone()
    }

    /// Adopts a chunk shared with another table.
    ///
    /// The first emplaced chunk takes the constructor placeholder's slot;
    /// later ones append. The placeholder is recognized by identity, never
    /// by looking at its contents: an adopted chunk may itself be empty.
    pub fn emplace_chunk(&self, chunk: ChunkRef) {
        let mut inner = self.inner.write();
        if inner.placeholder {
            inner.chunks[0] = chunk;
            inner.placeholder = false;
        } else {
            inner.chunks.push(chunk);
        }
    }

    pub fn columns(&self) -> &[ColumnCatalog] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_types(&self) -> Vec<DataType> {
        self.columns.iter().map(ColumnCatalog::datatype).collect()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.name().to_owned())
            .collect()
    }

    pub fn column_id_by_name(&self, name: &str) -> Option<ColumnId> {
        self.columns
            .iter()
            .find_position(|column| column.name() == name)
            .map(|(index, _)| ColumnId(index as u32))
    }

    /// Total number of rows across all chunks.
    pub fn row_count(&self) -> usize {
        self.inner
            .read()
            .chunks
            .iter()
            .map(|chunk| chunk.read().row_count())
            .sum()
    }

    pub fn max_chunk_size(&self) -> usize {
        self.options.max_chunk_size
    }
}
