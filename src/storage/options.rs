// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

use serde::{Deserialize, Serialize};

/// Number of rows a chunk may hold unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 65536;

/// Configuration of a table's physical layout, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOptions {
    /// Maximum number of rows per chunk. Appending past this bound
    /// allocates a fresh chunk; rows are never split across chunks.
    pub max_chunk_size: usize,
    /// Whether chunks carry MVCC auxiliary columns alongside the data
    /// columns. The core grows and shrinks them but never interprets them.
    pub use_mvcc: bool,
}

impl Default for StorageOptions {
    fn default() -> StorageOptions {
        StorageOptions {
            max_chunk_size: DEFAULT_CHUNK_SIZE,
            use_mvcc: false,
        }
    }
}

impl StorageOptions {
    pub fn with_max_chunk_size(max_chunk_size: usize) -> StorageOptions {
        StorageOptions {
            max_chunk_size,
            ..StorageOptions::default()
        }
    }
}
