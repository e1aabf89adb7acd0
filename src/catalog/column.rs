use serde::{Deserialize, Serialize};

use crate::types::{ColumnId, DataType, DataTypeKind};

/// The catalog of a column: its position in the schema, its name, and its
/// data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCatalog {
    id: ColumnId,
    name: String,
    datatype: DataType,
}

impl ColumnCatalog {
    pub fn new(id: ColumnId, name: impl Into<String>, datatype: DataType) -> ColumnCatalog {
        ColumnCatalog {
            id,
            name: name.into(),
            datatype,
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    pub fn kind(&self) -> DataTypeKind {
        self.datatype.kind()
    }

    pub fn is_nullable(&self) -> bool {
        self.datatype.is_nullable()
    }
}
