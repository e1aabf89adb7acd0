//! Column metadata shared by tables and the compression engine.

mod column;

pub use self::column::ColumnCatalog;
