// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

use serde::{Deserialize, Serialize};

use super::FittedAttributeVector;
use crate::types::{ElementType, ValueId, NULL_VALUE_ID};

/// An immutable dictionary-encoded column.
///
/// The dictionary is strictly sorted ascending with no duplicates and no
/// nulls. Every attribute-vector entry is either [`NULL_VALUE_ID`] or
/// `i + 1` for the dictionary entry `i` holding the row's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryColumn<T: ElementType> {
    dictionary: Vec<T>,
    attribute_vector: FittedAttributeVector,
}

impl<T: ElementType> DictionaryColumn<T> {
    pub fn new(
        dictionary: Vec<T>,
        attribute_vector: FittedAttributeVector,
    ) -> DictionaryColumn<T> {
        debug_assert!(
            dictionary.windows(2).all(|pair| pair[0] < pair[1]),
            "dictionary must be strictly sorted"
        );
        DictionaryColumn {
            dictionary,
            attribute_vector,
        }
    }

    /// Decodes the row at `index`; `None` if the row is null.
    pub fn get(&self, index: usize) -> Option<&T> {
        let value_id = self.attribute_vector.get(index);
        (value_id != NULL_VALUE_ID).then(|| self.value_by_value_id(value_id))
    }

    /// Resolves a non-null value id to its dictionary entry.
    pub fn value_by_value_id(&self, value_id: ValueId) -> &T {
        debug_assert!(value_id != NULL_VALUE_ID, "null has no dictionary entry");
        &self.dictionary[value_id.as_usize() - 1]
    }

    /// Decodes all rows in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.attribute_vector
            .iter()
            .map(|value_id| (value_id != NULL_VALUE_ID).then(|| self.value_by_value_id(value_id)))
    }

    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    pub fn attribute_vector(&self) -> &FittedAttributeVector {
        &self.attribute_vector
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attribute_vector.is_empty()
    }

    pub fn estimated_size(&self) -> usize {
        let dictionary: usize = self
            .dictionary
            .iter()
            .map(ElementType::estimated_size)
            .sum();
        dictionary + self.attribute_vector.estimated_size()
    }
}
