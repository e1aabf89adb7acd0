// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

use serde::{Deserialize, Serialize};

use crate::for_all_variants;
use crate::types::{ColumnId, DataValue, ElementType, F32, F64};

/// Minimum and maximum of the non-null values of one column in one chunk.
///
/// Produced by the compression engine from the first and last dictionary
/// entry; absent when the dictionary is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics<T: ElementType> {
    min: T,
    max: T,
}

impl<T: ElementType> ColumnStatistics<T> {
    pub fn new(min: T, max: T) -> ColumnStatistics<T> {
        debug_assert!(min <= max);
        ColumnStatistics { min, max }
    }

    pub fn min(&self) -> &T {
        &self.min
    }

    pub fn max(&self) -> &T {
        &self.max
    }
}

/// [`ColumnStatistics`] over the closed element-type set, parallel to the
/// column variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnStatisticsImpl {
    Int32(ColumnStatistics<i32>),
    Int64(ColumnStatistics<i64>),
    Float32(ColumnStatistics<F32>),
    Float64(ColumnStatistics<F64>),
    Utf8(ColumnStatistics<String>),
}

macro_rules! impl_column_statistics_dispatch {
    ($({ $Abc:ident, $Value:ident, $ty:ty }),*) => {
        impl ColumnStatisticsImpl {
            /// The smallest value of the column, for external pruning decisions.
            pub fn min(&self) -> DataValue {
                match self {
                    $(Self::$Abc(stats) => DataValue::$Value(stats.min().clone()),)*
                }
            }

            /// The largest value of the column.
            pub fn max(&self) -> DataValue {
                match self {
                    $(Self::$Abc(stats) => DataValue::$Value(stats.max().clone()),)*
                }
            }
        }

        $(
            impl From<ColumnStatistics<$ty>> for ColumnStatisticsImpl {
                fn from(stats: ColumnStatistics<$ty>) -> Self {
                    Self::$Abc(stats)
                }
            }
        )*
    };
}

for_all_variants! { impl_column_statistics_dispatch }

/// The positional per-column statistics of one chunk.
///
/// Installed on the chunk as one shared value at the end of a compression
/// pass, so readers always observe a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkStatistics {
    column_statistics: Vec<Option<ColumnStatisticsImpl>>,
}

impl ChunkStatistics {
    pub fn new(column_statistics: Vec<Option<ColumnStatisticsImpl>>) -> ChunkStatistics {
        ChunkStatistics { column_statistics }
    }

    pub fn column_statistics(&self) -> &[Option<ColumnStatisticsImpl>] {
        &self.column_statistics
    }

    /// Statistics of one column; `None` when the column's dictionary was
    /// empty (no rows or all rows null).
    pub fn get(&self, column_id: ColumnId) -> Option<&ColumnStatisticsImpl> {
        self.column_statistics
            .get(column_id.as_usize())
            .and_then(Option::as_ref)
    }

    pub fn column_count(&self) -> usize {
        self.column_statistics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_as_values() {
        let stats = ColumnStatisticsImpl::from(ColumnStatistics::new(1i32, 5i32));
        assert_eq!(stats.min(), DataValue::Int32(1));
        assert_eq!(stats.max(), DataValue::Int32(5));
    }

    #[test]
    fn test_chunk_statistics_lookup() {
        let stats = ChunkStatistics::new(vec![
            Some(ColumnStatistics::new("a".to_string(), "b".to_string()).into()),
            None,
        ]);
        assert_eq!(stats.column_count(), 2);
        assert_eq!(
            stats.get(ColumnId(0)).unwrap().max(),
            DataValue::String("b".into())
        );
        assert!(stats.get(ColumnId(1)).is_none());
        assert!(stats.get(ColumnId(9)).is_none());
    }
}
