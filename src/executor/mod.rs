// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

//! Execution glue over the storage core.
//!
//! Only table access lives here; every other operator belongs to the query
//! engine built on top of this crate.

mod get_table;

pub use self::get_table::{DescriptionMode, GetTable};
