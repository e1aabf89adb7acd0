//! Opalite is the columnar storage core of an in-memory analytical database.
//!
//! Data lives in [`storage::Table`]s, horizontally partitioned into
//! [`storage::Chunk`]s of at most `max_chunk_size` rows. Fresh rows are
//! appended to mutable value columns; the
//! [`storage::DictionaryCompression`] engine later freezes a chunk by
//! replacing every value column with a sorted-dictionary encoding and
//! attaching per-column min/max statistics. The [`executor::GetTable`]
//! operator exposes stored tables to a query pipeline, dropping chunks an
//! external optimizer has ruled out.

#![deny(unused_must_use)]

pub mod catalog;
pub mod executor;
pub mod storage;
pub mod types;
