//! Tagged column variants over the closed element-type set.
//!
//! Every runtime-polymorphic operation on columns pattern-matches on these
//! enums; the [`for_all_variants`] macro keeps the matches in one place.

use serde::{Deserialize, Serialize};

use super::{DictionaryColumn, FittedAttributeVector, StorageError, StorageResult, ValueColumn};
use crate::types::{DataType, DataTypeKind, DataValue, F32, F64};

/// `{ column variant, value/kind variant, element type }` for each
/// supported element type.
#[macro_export]
macro_rules! for_all_variants {
    ($macro:ident) => {
        $macro! {
            { Int32, Int32, i32 },
            { Int64, Int64, i64 },
            { Float32, Float32, F32 },
            { Float64, Float64, F64 },
            { Utf8, String, String }
        }
    };
}

/// A mutable column in one of the supported element types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueColumnImpl {
    Int32(ValueColumn<i32>),
    Int64(ValueColumn<i64>),
    Float32(ValueColumn<F32>),
    Float64(ValueColumn<F64>),
    Utf8(ValueColumn<String>),
}

/// A frozen dictionary column in one of the supported element types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DictionaryColumnImpl {
    Int32(DictionaryColumn<i32>),
    Int64(DictionaryColumn<i64>),
    Float32(DictionaryColumn<F32>),
    Float64(DictionaryColumn<F64>),
    Utf8(DictionaryColumn<String>),
}

macro_rules! impl_value_column_dispatch {
    ($({ $Abc:ident, $Value:ident, $ty:ty }),*) => {
        impl ValueColumnImpl {
            /// Creates an empty column of the given type.
            pub fn new(ty: &DataType) -> ValueColumnImpl {
                match ty.kind() {
                    $(DataTypeKind::$Value => Self::$Abc(ValueColumn::new(ty.is_nullable())),)*
                }
            }

            /// Checks that `value` may be appended without mutating anything.
            pub fn validate(&self, value: &DataValue) -> StorageResult<()> {
                match (self, value) {
                    $(
                        (Self::$Abc(_), DataValue::$Value(_)) => Ok(()),
                        (Self::$Abc(column), DataValue::Null) => {
                            if column.is_nullable() {
                                Ok(())
                            } else {
                                Err(StorageError::NullNotAllowed)
                            }
                        }
                    )*
                    (this, value) => Err(StorageError::TypeMismatch {
                        expected: this.kind(),
                        actual: value.clone(),
                    }),
                }
            }

            pub fn append(&mut self, value: DataValue) -> StorageResult<()> {
                self.validate(&value)?;
                match (self, value) {
                    $(
                        (Self::$Abc(column), DataValue::$Value(value)) => column.append(Some(value)),
                        (Self::$Abc(column), DataValue::Null) => column.append(None),
                    )*
                    _ => unreachable!("validated above"),
                }
            }

            pub fn get(&self, index: usize) -> DataValue {
                match self {
                    $(Self::$Abc(column) => match column.get(index) {
                        Some(value) => DataValue::$Value(value.clone()),
                        None => DataValue::Null,
                    },)*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(Self::$Abc(column) => column.len(),)*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            pub fn is_nullable(&self) -> bool {
                match self {
                    $(Self::$Abc(column) => column.is_nullable(),)*
                }
            }

            pub fn kind(&self) -> DataTypeKind {
                match self {
                    $(Self::$Abc(_) => DataTypeKind::$Value,)*
                }
            }

            pub fn estimated_size(&self) -> usize {
                match self {
                    $(Self::$Abc(column) => column.estimated_size(),)*
                }
            }
        }

        impl DictionaryColumnImpl {
            pub fn get(&self, index: usize) -> DataValue {
                match self {
                    $(Self::$Abc(column) => match column.get(index) {
                        Some(value) => DataValue::$Value(value.clone()),
                        None => DataValue::Null,
                    },)*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(Self::$Abc(column) => column.len(),)*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            pub fn kind(&self) -> DataTypeKind {
                match self {
                    $(Self::$Abc(_) => DataTypeKind::$Value,)*
                }
            }

            pub fn unique_values_count(&self) -> usize {
                match self {
                    $(Self::$Abc(column) => column.unique_values_count(),)*
                }
            }

            pub fn attribute_vector(&self) -> &FittedAttributeVector {
                match self {
                    $(Self::$Abc(column) => column.attribute_vector(),)*
                }
            }

            pub fn estimated_size(&self) -> usize {
                match self {
                    $(Self::$Abc(column) => column.estimated_size(),)*
                }
            }
        }

        $(
            impl From<ValueColumn<$ty>> for ValueColumnImpl {
                fn from(column: ValueColumn<$ty>) -> Self {
                    Self::$Abc(column)
                }
            }

            impl From<DictionaryColumn<$ty>> for DictionaryColumnImpl {
                fn from(column: DictionaryColumn<$ty>) -> Self {
                    Self::$Abc(column)
                }
            }
        )*
    };
}

for_all_variants! { impl_value_column_dispatch }

/// A column slot inside a chunk: either a still-mutable value column or a
/// frozen dictionary column. The variant encodes the chunk lifecycle at
/// the type level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnImpl {
    Value(ValueColumnImpl),
    Dictionary(DictionaryColumnImpl),
}

impl ColumnImpl {
    /// Creates an empty mutable column of the given type.
    pub fn new_value(ty: &DataType) -> ColumnImpl {
        ColumnImpl::Value(ValueColumnImpl::new(ty))
    }

    pub fn validate(&self, value: &DataValue) -> StorageResult<()> {
        match self {
            ColumnImpl::Value(column) => column.validate(value),
            ColumnImpl::Dictionary(_) => Err(StorageError::FrozenChunk),
        }
    }

    pub fn append(&mut self, value: DataValue) -> StorageResult<()> {
        match self {
            ColumnImpl::Value(column) => column.append(value),
            ColumnImpl::Dictionary(_) => Err(StorageError::FrozenChunk),
        }
    }

    pub fn get(&self, index: usize) -> DataValue {
        match self {
            ColumnImpl::Value(column) => column.get(index),
            ColumnImpl::Dictionary(column) => column.get(index),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnImpl::Value(column) => column.len(),
            ColumnImpl::Dictionary(column) => column.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> DataTypeKind {
        match self {
            ColumnImpl::Value(column) => column.kind(),
            ColumnImpl::Dictionary(column) => column.kind(),
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, ColumnImpl::Dictionary(_))
    }

    pub fn estimated_size(&self) -> usize {
        match self {
            ColumnImpl::Value(column) => column.estimated_size(),
            ColumnImpl::Dictionary(column) => column.estimated_size(),
        }
    }
}
