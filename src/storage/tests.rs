// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

//! End-to-end tests of the storage pipeline: append rows, compress, read
//! back, prune.

use std::sync::Arc;

use super::*;
use crate::catalog::ColumnCatalog;
use crate::executor::GetTable;
use crate::types::{ChunkId, ColumnId, DataTypeExt, DataTypeKind, DataValue, Row};

fn scores_table(max_chunk_size: usize) -> TableRef {
    Arc::new(Table::new(
        vec![
            ColumnCatalog::new(ColumnId(0), "id", DataTypeKind::Int32.not_null()),
            ColumnCatalog::new(ColumnId(1), "name", DataTypeKind::String.nullable()),
        ],
        StorageOptions {
            max_chunk_size,
            use_mvcc: true,
        },
    ))
}

fn row(id: i32, name: Option<&str>) -> Row {
    vec![
        DataValue::Int32(id),
        match name {
            Some(name) => DataValue::String(name.into()),
            None => DataValue::Null,
        },
    ]
}

#[test]
fn test_compress_table_end_to_end() {
    let table = scores_table(3);
    let rows = [
        row(5, Some("e")),
        row(1, None),
        row(3, Some("c")),
        row(1, Some("a")),
        row(5, None),
    ];
    for row in &rows {
        table.append_row(row.clone()).unwrap();
    }
    assert_eq!(table.chunk_count(), 2);

    let statistics = DictionaryCompression::compress_table(&table).unwrap();
    assert_eq!(statistics.len(), 2);

    // every chunk is frozen, with statistics installed and MVCC columns
    // still aligned to the row count
    for chunk_id in 0..table.chunk_count() {
        let chunk = table.get_chunk(ChunkId(chunk_id as u32));
        let chunk = chunk.read();
        assert!(!chunk.is_mutable());
        assert_eq!(
            chunk.statistics().unwrap().as_ref(),
            statistics[chunk_id].as_ref()
        );
        assert_eq!(chunk.mvcc_columns().unwrap().len(), chunk.row_count());
        for column_id in 0..chunk.column_count() {
            assert_eq!(
                chunk.get_column(ColumnId(column_id as u32)).len(),
                chunk.row_count()
            );
        }
    }

    // decoding reproduces the appended rows, nulls included
    let decoded: Vec<Row> = (0..table.chunk_count())
        .flat_map(|chunk_id| {
            let chunk = table.get_chunk(ChunkId(chunk_id as u32));
            let chunk = chunk.read();
            (0..chunk.row_count())
                .map(|index| {
                    (0..chunk.column_count())
                        .map(|column_id| chunk.get_column(ColumnId(column_id as u32)).get(index))
                        .collect()
                })
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(decoded, rows);

    // chunk 0 holds ids {5, 1, 3} and names {"e", "c"}
    let chunk = table.get_chunk(ChunkId(0));
    let chunk = chunk.read();
    let chunk_statistics = chunk.statistics().unwrap();
    let id_stats = chunk_statistics.get(ColumnId(0)).unwrap();
    assert_eq!(id_stats.min(), DataValue::Int32(1));
    assert_eq!(id_stats.max(), DataValue::Int32(5));
    let name_stats = chunk_statistics.get(ColumnId(1)).unwrap();
    assert_eq!(name_stats.min(), DataValue::String("c".into()));
    assert_eq!(name_stats.max(), DataValue::String("e".into()));
}

#[test]
fn test_statistics_match_dictionary_bounds() {
    let table = scores_table(16);
    for id in [7, 2, 9, 2] {
        table.append_row(row(id, Some("x"))).unwrap();
    }
    DictionaryCompression::compress_table(&table).unwrap();

    let chunk = table.get_chunk(ChunkId(0));
    let chunk = chunk.read();
    let dictionary = match chunk.get_column(ColumnId(0)) {
        ColumnImpl::Dictionary(DictionaryColumnImpl::Int32(dictionary)) => dictionary,
        _ => panic!("expected a compressed int column"),
    };
    let statistics = chunk.statistics().unwrap();
    let stats = statistics.get(ColumnId(0)).unwrap();
    assert_eq!(stats.min(), DataValue::Int32(*dictionary.dictionary().first().unwrap()));
    assert_eq!(stats.max(), DataValue::Int32(*dictionary.dictionary().last().unwrap()));
}

#[test]
fn test_recompressing_a_table_commits_nothing() {
    let table = scores_table(16);
    table.append_row(row(1, Some("a"))).unwrap();
    DictionaryCompression::compress_table(&table).unwrap();
    assert_eq!(
        DictionaryCompression::compress_table(&table).unwrap_err(),
        StorageError::AlreadyCompressed
    );
}

#[test]
fn test_partial_chunk_is_never_committed() {
    let table = scores_table(16);
    table.append_row(row(1, Some("a"))).unwrap();

    // freeze only the second column, leaving the chunk half-compressed
    let chunk = table.get_chunk(ChunkId(0));
    let types = table.column_types();
    {
        let replacement = {
            let chunk = chunk.read();
            DictionaryCompression::compress_column(&types[1], chunk.get_column(ColumnId(1)))
                .unwrap()
                .0
        };
        chunk.write().replace_column(ColumnId(1), replacement).unwrap();
    }

    assert_eq!(
        DictionaryCompression::compress_chunk(&types, &chunk).unwrap_err(),
        StorageError::AlreadyCompressed
    );
    // column 0 must still be a value column and no statistics installed
    let chunk = chunk.read();
    assert!(!chunk.get_column(ColumnId(0)).is_compressed());
    assert!(chunk.statistics().is_none());
}

#[test]
fn test_compress_chunks_subset() {
    let table = scores_table(1);
    for id in 0..3 {
        table.append_row(row(id, None)).unwrap();
    }
    let statistics =
        DictionaryCompression::compress_chunks(&table, &[ChunkId(0), ChunkId(2)]).unwrap();
    assert_eq!(statistics.len(), 2);
    assert!(!table.get_chunk(ChunkId(0)).read().is_mutable());
    assert!(table.get_chunk(ChunkId(1)).read().is_mutable());
    assert!(!table.get_chunk(ChunkId(2)).read().is_mutable());
}

#[test]
fn test_append_after_freeze_opens_a_new_chunk() {
    let table = scores_table(16);
    table.append_row(row(1, Some("a"))).unwrap();
    DictionaryCompression::compress_table(&table).unwrap();

    // the frozen chunk is not full, yet the append must not touch it
    table.append_row(row(2, Some("b"))).unwrap();
    assert_eq!(table.chunk_count(), 2);
    assert_eq!(table.get_chunk(ChunkId(0)).read().row_count(), 1);
    assert_eq!(table.get_chunk(ChunkId(1)).read().row_count(), 1);
}

#[test]
fn test_pruning_a_compressed_table() {
    let storage = StorageManager::new();
    let table = scores_table(1);
    for id in 0..4 {
        table.append_row(row(id, Some("x"))).unwrap();
    }
    DictionaryCompression::compress_table(&table).unwrap();
    storage.add_table("scores", table.clone()).unwrap();

    let mut get_table = GetTable::new("scores");
    get_table.set_excluded_chunks(vec![ChunkId(1), ChunkId(3)]);
    let pruned = get_table.execute(&storage).unwrap();

    assert_eq!(pruned.chunk_count(), 2);
    assert_eq!(pruned.row_count(), 2);
    for (view_id, original_id) in [(0u32, 0u32), (1, 2)] {
        assert!(Arc::ptr_eq(
            &pruned.get_chunk(ChunkId(view_id)),
            &table.get_chunk(ChunkId(original_id))
        ));
    }
    // shared chunks expose the same statistics snapshot
    let original_stats = table.get_chunk(ChunkId(2)).read().statistics().unwrap();
    let view_stats = pruned.get_chunk(ChunkId(1)).read().statistics().unwrap();
    assert!(Arc::ptr_eq(&original_stats, &view_stats));
}

#[test]
fn test_pruning_retains_an_empty_frozen_chunk() {
    let storage = StorageManager::new();
    let table = scores_table(1);
    // freeze chunk 0 while it is still empty, then grow the table
    DictionaryCompression::compress_table(&table).unwrap();
    table.append_row(row(1, Some("a"))).unwrap();
    table.append_row(row(2, Some("b"))).unwrap();
    assert_eq!(table.chunk_count(), 3);
    storage.add_table("scores", table.clone()).unwrap();

    let mut get_table = GetTable::new("scores");
    get_table.set_excluded_chunks(vec![ChunkId(2)]);
    let pruned = get_table.execute(&storage).unwrap();

    // the empty frozen chunk must survive in place, not be overwritten by
    // the next retained chunk
    assert_eq!(pruned.chunk_count(), 2);
    assert_eq!(pruned.row_count(), 1);
    for chunk_id in [0u32, 1] {
        assert!(Arc::ptr_eq(
            &pruned.get_chunk(ChunkId(chunk_id)),
            &table.get_chunk(ChunkId(chunk_id))
        ));
    }
}

#[test]
fn test_registry() {
    let storage = StorageManager::new();
    let table = scores_table(4);
    storage.add_table("a", table.clone()).unwrap();
    assert!(storage.has_table("a"));
    assert_eq!(
        storage.add_table("a", table).unwrap_err(),
        StorageError::Duplicated("table", "a".into())
    );
    storage.add_table("b", scores_table(4)).unwrap();
    assert_eq!(storage.table_names(), vec!["a", "b"]);
    storage.drop_table("a").unwrap();
    assert!(!storage.has_table("a"));
    assert_eq!(
        storage.get_table("a").unwrap_err(),
        StorageError::NotFound("table", "a".into())
    );
}
