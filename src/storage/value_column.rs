use bitvec::vec::BitVec;
use serde::{Deserialize, Serialize};

use super::{StorageError, StorageResult};
use crate::types::ElementType;

/// A mutable, append-only column of `T` values.
///
/// A nullable column keeps a null mask parallel to the values; appending a
/// null stores a default-constructed `T` and flags the position. The mask
/// has the same length as the value vector at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueColumn<T: ElementType> {
    values: Vec<T>,
    null_values: Option<BitVec>,
}

impl<T: ElementType> ValueColumn<T> {
    pub fn new(nullable: bool) -> ValueColumn<T> {
        ValueColumn {
            values: Vec::new(),
            null_values: nullable.then(BitVec::new),
        }
    }

    pub fn with_capacity(capacity: usize, nullable: bool) -> ValueColumn<T> {
        ValueColumn {
            values: Vec::with_capacity(capacity),
            null_values: nullable.then(|| BitVec::with_capacity(capacity)),
        }
    }

    /// Appends a value, or a null on a nullable column.
    pub fn append(&mut self, value: Option<T>) -> StorageResult<()> {
        match (value, &mut self.null_values) {
            (Some(value), null_values) => {
                self.values.push(value);
                if let Some(null_values) = null_values {
                    null_values.push(false);
                }
            }
            (None, Some(null_values)) => {
                self.values.push(T::default());
                null_values.push(true);
            }
            (None, None) => return Err(StorageError::NullNotAllowed),
        }
        Ok(())
    }

    /// Retrieves the value at `index`; `None` if the row is null.
    pub fn get(&self, index: usize) -> Option<&T> {
        match &self.null_values {
            Some(null_values) if null_values[index] => None,
            _ => Some(&self.values[index]),
        }
    }

    /// Iterates over the rows as `(value, is_null)` pairs collapsed into
    /// `Option`s.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        (0..self.len()).map(|index| self.get(index))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_nullable(&self) -> bool {
        self.null_values.is_some()
    }

    /// The raw value buffer, including the defaults stored at null rows.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The null mask, if the column is nullable.
    pub fn null_values(&self) -> Option<&BitVec> {
        self.null_values.as_ref()
    }

    pub fn estimated_size(&self) -> usize {
        let values: usize = self.values.iter().map(ElementType::estimated_size).sum();
        let mask = self.null_values.as_ref().map_or(0, |mask| mask.len() / 8);
        values + mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_get() {
        let mut column = ValueColumn::<i32>::new(false);
        column.append(Some(3)).unwrap();
        column.append(Some(5)).unwrap();
        assert_eq!(column.len(), 2);
        assert_eq!(column.get(0), Some(&3));
        assert_eq!(column.get(1), Some(&5));
        assert!(!column.is_nullable());
    }

    #[test]
    fn test_nullable_column_keeps_mask_aligned() {
        let mut column = ValueColumn::<String>::new(true);
        column.append(Some("b".into())).unwrap();
        column.append(None).unwrap();
        column.append(Some("a".into())).unwrap();
        let null_values = column.null_values().unwrap();
        assert_eq!(null_values.len(), column.len());
        // the null row stores a default value behind the mask
        assert_eq!(column.values()[1], String::default());
        assert_eq!(
            column.iter().collect::<Vec<_>>(),
            vec![Some(&"b".to_string()), None, Some(&"a".to_string())]
        );
    }

    #[test]
    fn test_null_on_non_nullable_column() {
        let mut column = ValueColumn::<i64>::new(false);
        assert_eq!(column.append(None), Err(StorageError::NullNotAllowed));
        assert!(column.is_empty());
    }
}
