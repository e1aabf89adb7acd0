// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::storage::{StorageManager, StorageResult, Table, TableRef};
use crate::types::ChunkId;

/// How an operator renders its description string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionMode {
    SingleLine,
    MultiLine,
}

/// The table-access operator.
///
/// Resolves a named table in the storage registry and produces a view of
/// it. When the optimizer has supplied a set of chunks whose statistics
/// rule them out, the view is a layout clone sharing only the surviving
/// chunks; otherwise the original table is returned untouched.
pub struct GetTable {
    table_name: String,
    excluded_chunks: Option<Vec<ChunkId>>,
}

impl GetTable {
    pub fn new(table_name: impl Into<String>) -> GetTable {
        GetTable {
            table_name: table_name.into(),
            excluded_chunks: None,
        }
    }

    pub fn name(&self) -> &'static str {
        "GetTable"
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Supplies the chunks to drop from the produced view.
    pub fn set_excluded_chunks(&mut self, excluded_chunks: Vec<ChunkId>) {
        self.excluded_chunks = Some(excluded_chunks);
    }

    pub fn description(&self, mode: DescriptionMode) -> String {
        let separator = match mode {
            DescriptionMode::SingleLine => " ",
            DescriptionMode::MultiLine => "\n",
        };
        let mut description = format!("{}{}({})", self.name(), separator, self.table_name);
        if let Some(excluded_chunks) = &self.excluded_chunks {
            description += &format!("{}({} Chunks pruned)", separator, excluded_chunks.len());
        }
        description
    }

    /// Produces the (possibly pruned) table view.
    ///
    /// With no exclusions the original reference is returned as is; the
    /// pruned path never copies chunk payloads.
    pub fn execute(&self, storage: &StorageManager) -> StorageResult<TableRef> {
        let original = storage.get_table(&self.table_name)?;
        let excluded_chunks = match &self.excluded_chunks {
            Some(excluded_chunks) if !excluded_chunks.is_empty() => excluded_chunks,
            _ => return Ok(original),
        };
        let excluded_chunks: HashSet<ChunkId> = excluded_chunks.iter().copied().collect();

        let pruned = Table::with_layout_of(&original);
        let chunk_count = original.chunk_count();
        for chunk_id in (0..chunk_count as u32).map(ChunkId) {
            if excluded_chunks.contains(&chunk_id) {
                continue;
            }
            pruned.emplace_chunk(original.get_chunk(chunk_id));
        }
        debug!(
            "pruned {} of {} chunks from table {}",
            chunk_count - pruned.chunk_count(),
            chunk_count,
            self.table_name,
        );
        Ok(Arc::new(pruned))
    }
}
