use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

use super::{ChunkStatistics, ColumnImpl, StorageError, StorageResult};
use crate::catalog::ColumnCatalog;
use crate::types::{ColumnId, DataValue};

pub type PackedVec<T> = SmallVec<[T; 16]>;

/// A chunk shared between a table and any pruned views of it. The lock
/// serializes the single writer against readers; once the chunk is frozen
/// its payload never changes again.
pub type ChunkRef = Arc<RwLock<Chunk>>;

/// Commit-id value of a row slot no transaction has touched.
const UNSET_CID: u64 = u64::MAX;

/// MVCC auxiliary vectors, one entry per row.
///
/// The storage core grows them on append and shrinks them after
/// compression; their contents are owned by the transaction layer and are
/// opaque here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MvccColumns {
    tids: Vec<u64>,
    begin_cids: Vec<u64>,
    end_cids: Vec<u64>,
}

impl MvccColumns {
    fn push_row(&mut self) {
        self.tids.push(0);
        self.begin_cids.push(UNSET_CID);
        self.end_cids.push(UNSET_CID);
    }

    fn shrink_to_fit(&mut self) {
        self.tids.shrink_to_fit();
        self.begin_cids.shrink_to_fit();
        self.end_cids.shrink_to_fit();
    }

    pub fn len(&self) -> usize {
        self.tids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tids.is_empty()
    }

    pub fn tids(&self) -> &[u64] {
        &self.tids
    }

    pub fn begin_cids(&self) -> &[u64] {
        &self.begin_cids
    }

    pub fn end_cids(&self) -> &[u64] {
        &self.end_cids
    }
}

/// A horizontal partition of a table, holding one column per schema column.
///
/// A chunk is mutable while every column is still a value column; the
/// first column replacement freezes it for good.
#[derive(Debug)]
pub struct Chunk {
    columns: PackedVec<ColumnImpl>,
    mvcc_columns: Option<MvccColumns>,
    statistics: Option<Arc<ChunkStatistics>>,
}

impl Chunk {
    /// Creates an empty mutable chunk laid out after `columns`.
    pub fn new(columns: &[ColumnCatalog], use_mvcc: bool) -> Chunk {
        Chunk {
            columns: columns
                .iter()
                .map(|column| ColumnImpl::new_value(&column.datatype()))
                .collect(),
            mvcc_columns: use_mvcc.then(MvccColumns::default),
            statistics: None,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows; every column has the same length.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, ColumnImpl::len)
    }

    pub fn get_column(&self, column_id: ColumnId) -> &ColumnImpl {
        assert!(
            column_id.as_usize() < self.columns.len(),
            "column id out of range"
        );
        &self.columns[column_id.as_usize()]
    }

    /// Whether the chunk still accepts appends.
    pub fn is_mutable(&self) -> bool {
        self.columns
            .iter()
            .all(|column| !column.is_compressed())
    }

    /// Appends one row across all columns.
    ///
    /// The row is validated as a whole before any column is touched, so a
    /// rejected row leaves the chunk unchanged.
    pub fn append_row(&mut self, row: &[DataValue]) -> StorageResult<()> {
        if !self.is_mutable() {
            return Err(StorageError::FrozenChunk);
        }
        if row.len() != self.column_count() {
            return Err(StorageError::SchemaMismatch {
                expected: self.column_count(),
                actual: row.len(),
            });
        }
        for (column, value) in self.columns.iter().zip(row) {
            column.validate(value)?;
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.append(value.clone())?;
        }
        if let Some(mvcc_columns) = &mut self.mvcc_columns {
            mvcc_columns.push_row();
        }
        Ok(())
    }

    /// Swaps in a replacement column of the same length.
    pub fn replace_column(&mut self, column_id: ColumnId, column: ColumnImpl) -> StorageResult<()> {
        assert!(
            column_id.as_usize() < self.columns.len(),
            "column id out of range"
        );
        if column.len() != self.row_count() {
            return Err(StorageError::RowCountMismatch {
                expected: self.row_count(),
                actual: column.len(),
            });
        }
        self.columns[column_id.as_usize()] = column;
        Ok(())
    }

    /// The statistics snapshot installed by the last compression pass.
    pub fn statistics(&self) -> Option<Arc<ChunkStatistics>> {
        self.statistics.clone()
    }

    pub(super) fn set_statistics(&mut self, statistics: Arc<ChunkStatistics>) {
        self.statistics = Some(statistics);
    }

    pub fn has_mvcc_columns(&self) -> bool {
        self.mvcc_columns.is_some()
    }

    pub fn mvcc_columns(&self) -> Option<&MvccColumns> {
        self.mvcc_columns.as_ref()
    }

    pub(super) fn shrink_mvcc_columns(&mut self) {
        if let Some(mvcc_columns) = &mut self.mvcc_columns {
            mvcc_columns.shrink_to_fit();
        }
    }

    pub fn estimated_size(&self) -> usize {
        self.columns.iter().map(ColumnImpl::estimated_size).sum()
    }
}
