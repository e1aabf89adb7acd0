// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

//! Dictionary compression of value columns.
//!
//! Compressing a chunk replaces every value column with a
//! [`DictionaryColumn`]: a sorted, deduplicated dictionary of the non-null
//! values plus a width-fitted attribute vector mapping each row to its
//! entry. Value id 0 is reserved for null, so row ids are dictionary
//! positions shifted by one and the attribute vector is fitted to
//! `dictionary.len()`, not `dictionary.len() - 1`.

use std::sync::Arc;

use itertools::Itertools;
use tracing::debug;

use super::{
    ChunkRef, ChunkStatistics, ColumnImpl, ColumnStatistics, ColumnStatisticsImpl,
    DictionaryColumn, FittedAttributeVector, StorageError, StorageResult, Table, ValueColumn,
    ValueColumnImpl,
};
use crate::for_all_variants;
use crate::types::{ChunkId, ColumnId, DataType, ElementType, ValueId, NULL_VALUE_ID};

/// The engine turning mutable chunks into frozen, dictionary-encoded ones.
pub struct DictionaryCompression;

impl DictionaryCompression {
    /// Compresses a single value column, returning the replacement column
    /// and its statistics (absent when the dictionary came out empty).
    ///
    /// Compressing an already-compressed column is a state error.
    pub fn compress_column(
        data_type: &DataType,
        column: &ColumnImpl,
    ) -> StorageResult<(ColumnImpl, Option<ColumnStatisticsImpl>)> {
        let value_column = match column {
            ColumnImpl::Value(column) => column,
            ColumnImpl::Dictionary(_) => return Err(StorageError::AlreadyCompressed),
        };
        if value_column.kind() != data_type.kind() {
            return Err(StorageError::ColumnTypeMismatch {
                expected: data_type.kind(),
                actual: value_column.kind(),
            });
        }

        macro_rules! compress {
            ($({ $Abc:ident, $Value:ident, $ty:ty }),*) => {
                match value_column {
                    $(ValueColumnImpl::$Abc(column) => {
                        let (column, statistics) = compress_value_column(column)?;
                        (
                            ColumnImpl::Dictionary(column.into()),
                            statistics.map(ColumnStatisticsImpl::from),
                        )
                    })*
                }
            };
        }
        Ok(for_all_variants! { compress })
    }

    /// Compresses every column of a chunk and installs the new columns and
    /// statistics as one atomic update.
    ///
    /// All replacement columns are computed up front; an error on any
    /// column commits nothing.
    pub fn compress_chunk(
        column_types: &[DataType],
        chunk: &ChunkRef,
    ) -> StorageResult<Arc<ChunkStatistics>> {
        let mut chunk = chunk.write();
        if column_types.len() != chunk.column_count() {
            return Err(StorageError::SchemaMismatch {
                expected: chunk.column_count(),
                actual: column_types.len(),
            });
        }

        let compressed: Vec<_> = column_types
            .iter()
            .enumerate()
            .map(|(index, data_type)| {
                Self::compress_column(data_type, chunk.get_column(ColumnId(index as u32)))
            })
            .try_collect()?;

        // commit point: nothing above has modified the chunk
        let mut column_statistics = Vec::with_capacity(compressed.len());
        for (index, (column, statistics)) in compressed.into_iter().enumerate() {
            let column_id = ColumnId(index as u32);
            if let ColumnImpl::Dictionary(dictionary) = &column {
                debug!(
                    "compressed column {}: {} rows, {} distinct values, width {}",
                    column_id,
                    dictionary.len(),
                    dictionary.unique_values_count(),
                    dictionary.attribute_vector().width(),
                );
            }
            chunk.replace_column(column_id, column)?;
            column_statistics.push(statistics);
        }
        if chunk.has_mvcc_columns() {
            chunk.shrink_mvcc_columns();
        }
        let statistics = Arc::new(ChunkStatistics::new(column_statistics));
        chunk.set_statistics(statistics.clone());
        Ok(statistics)
    }

    /// Compresses the given chunks of a table in the order passed in.
    pub fn compress_chunks(
        table: &Table,
        chunk_ids: &[ChunkId],
    ) -> StorageResult<Vec<Arc<ChunkStatistics>>> {
        let column_types = table.column_types();
        chunk_ids
            .iter()
            .map(|&chunk_id| Self::compress_chunk(&column_types, &table.get_chunk(chunk_id)))
            .try_collect()
    }

    /// Compresses every chunk of a table in ascending chunk-id order.
    pub fn compress_table(table: &Table) -> StorageResult<Vec<Arc<ChunkStatistics>>> {
        let column_types = table.column_types();
        (0..table.chunk_count())
            .map(|index| {
                Self::compress_chunk(&column_types, &table.get_chunk(ChunkId(index as u32)))
            })
            .try_collect()
    }
}

fn compress_value_column<T: ElementType>(
    column: &ValueColumn<T>,
) -> StorageResult<(DictionaryColumn<T>, Option<ColumnStatistics<T>>)> {
    let mut dictionary = column.values().to_vec();

    // Partition null-masked slots to the tail and drop them, so the
    // defaults stored behind the mask never reach the dictionary.
    if let Some(null_values) = column.null_values() {
        let mut retained = dictionary.len();
        for index in (0..dictionary.len()).rev() {
            if null_values[index] {
                retained -= 1;
                dictionary.swap(index, retained);
            }
        }
        dictionary.truncate(retained);
    }

    if dictionary.iter().any(|value| !value.is_comparable()) {
        return Err(StorageError::UnorderedValue);
    }

    dictionary.sort_unstable();
    dictionary.dedup();
    dictionary.shrink_to_fit();

    // Fitted to the dictionary size itself: ids are positions shifted by
    // one, so the largest id handed out is exactly `dictionary.len()`.
    let max_value_id = ValueId(dictionary.len() as u32);
    let mut attribute_vector = FittedAttributeVector::new(column.len(), max_value_id);

    for (index, value) in column.iter().enumerate() {
        let value_id = match value {
            None => NULL_VALUE_ID,
            Some(value) => {
                let position = dictionary.partition_point(|entry| entry < value);
                debug_assert!(
                    position < dictionary.len() && dictionary[position] == *value,
                    "dictionary must contain every non-null value"
                );
                ValueId(position as u32 + 1)
            }
        };
        attribute_vector.set(index, value_id)?;
    }

    let statistics = match (dictionary.first(), dictionary.last()) {
        (Some(min), Some(max)) => Some(ColumnStatistics::new(min.clone(), max.clone())),
        _ => None,
    };
    Ok((
        DictionaryColumn::new(dictionary, attribute_vector),
        statistics,
    ))
}
