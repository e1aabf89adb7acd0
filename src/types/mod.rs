//! The runtime type registry: the closed set of scalar kinds, the value
//! variant carrying any of them, and the identifier newtypes used across
//! the storage core.

use ordered_float::OrderedFloat;
use parse_display::Display;
use serde::{Deserialize, Serialize};

mod element;

pub use self::element::ElementType;

/// A wrapper around floats providing implementations of `Eq`, `Ord` and
/// `Hash`, so that float columns can be dictionary-sorted.
pub type F32 = OrderedFloat<f32>;
pub type F64 = OrderedFloat<f64>;

/// Kind of a scalar element.
///
/// The set is closed: every column in the system stores exactly one of
/// these kinds, and all polymorphic operations dispatch on this tag.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypeKind {
    #[display("INT")]
    Int32,
    #[display("BIGINT")]
    Int64,
    #[display("REAL")]
    Float32,
    #[display("DOUBLE")]
    Float64,
    #[display("STRING")]
    String,
}

/// Data type with nullability.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    kind: DataTypeKind,
    nullable: bool,
}

impl std::fmt::Debug for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if self.nullable {
            write!(f, " (null)")?;
        }
        Ok(())
    }
}

impl DataType {
    pub const fn new(kind: DataTypeKind, nullable: bool) -> DataType {
        DataType { kind, nullable }
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn kind(&self) -> DataTypeKind {
        self.kind
    }
}

/// The extension methods for [`DataType`].
pub trait DataTypeExt {
    fn nullable(self) -> DataType;
    fn not_null(self) -> DataType;
}

impl DataTypeExt for DataTypeKind {
    fn nullable(self) -> DataType {
        DataType::new(self, true)
    }

    fn not_null(self) -> DataType {
        DataType::new(self, false)
    }
}

macro_rules! impl_id {
    ($($(#[$doc:meta])* $Id:ident),*) => {
        $(
            $(#[$doc])*
            #[derive(
                Debug, Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
                Serialize, Deserialize,
            )]
            #[display("{0}")]
            pub struct $Id(pub u32);

            impl $Id {
                pub fn as_usize(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

impl_id! {
    /// Position of a column inside a table schema.
    ColumnId,
    /// Position of a chunk inside a table.
    ChunkId,
    /// Index of an entry in a dictionary, offset by one.
    ///
    /// Id `0` is reserved for null ([`NULL_VALUE_ID`]); entry `i` of a
    /// dictionary is referenced by value id `i + 1`.
    ValueId
}

/// The reserved [`ValueId`] denoting a null row in an attribute vector.
pub const NULL_VALUE_ID: ValueId = ValueId(0);

/// Primitive scalar value.
#[derive(Debug, Display, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    #[display("null")]
    Null,
    #[display("{0}")]
    Int32(i32),
    #[display("{0}")]
    Int64(i64),
    #[display("{0}")]
    Float32(F32),
    #[display("{0}")]
    Float64(F64),
    #[display("'{0}'")]
    String(String),
}

impl DataValue {
    /// Returns `true` if value is null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type of the value. `None` means NULL.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int32(_) => Some(DataTypeKind::Int32.not_null()),
            Self::Int64(_) => Some(DataTypeKind::Int64.not_null()),
            Self::Float32(_) => Some(DataTypeKind::Float32.not_null()),
            Self::Float64(_) => Some(DataTypeKind::Float64.not_null()),
            Self::String(_) => Some(DataTypeKind::String.not_null()),
        }
    }
}

/// Row type appended to tables.
pub type Row = Vec<DataValue>;
