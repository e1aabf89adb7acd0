// Copyright 2026 Opalite Project Authors. Licensed under Apache-2.0.

use serde::{Deserialize, Serialize};

use super::{StorageError, StorageResult};
use crate::types::ValueId;

/// A fixed-length sequence of [`ValueId`]s stored in the narrowest of the
/// 1/2/4-byte unsigned widths that can represent every id the column may
/// reference.
///
/// The width is picked once at construction from the cardinality bound and
/// never changes; `set` rejects ids the physical width cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FittedAttributeVector {
    Width1(Vec<u8>),
    Width2(Vec<u16>),
    Width4(Vec<u32>),
}

impl FittedAttributeVector {
    /// Creates a zero-initialized vector of `size` entries, fitted so that
    /// every id in `[0, max_value_id]` is representable.
    pub fn new(size: usize, max_value_id: ValueId) -> FittedAttributeVector {
        if max_value_id.0 <= u8::MAX as u32 {
            FittedAttributeVector::Width1(vec![0; size])
        } else if max_value_id.0 <= u16::MAX as u32 {
            FittedAttributeVector::Width2(vec![0; size])
        } else {
            FittedAttributeVector::Width4(vec![0; size])
        }
    }

    pub fn get(&self, index: usize) -> ValueId {
        match self {
            FittedAttributeVector::Width1(values) => ValueId(values[index] as u32),
            FittedAttributeVector::Width2(values) => ValueId(values[index] as u32),
            FittedAttributeVector::Width4(values) => ValueId(values[index]),
        }
    }

    /// Stores `value_id` at `index`.
    ///
    /// Returns a domain error if the id does not fit the physical width.
    /// `index` must be within bounds; the vector's length is fixed.
    pub fn set(&mut self, index: usize, value_id: ValueId) -> StorageResult<()> {
        assert!(index < self.len(), "attribute vector index out of range");
        match self {
            FittedAttributeVector::Width1(values) => {
                values[index] = u8::try_from(value_id.0)
                    .map_err(|_| StorageError::ValueIdOverflow(value_id, 1))?;
            }
            FittedAttributeVector::Width2(values) => {
                values[index] = u16::try_from(value_id.0)
                    .map_err(|_| StorageError::ValueIdOverflow(value_id, 2))?;
            }
            FittedAttributeVector::Width4(values) => {
                values[index] = value_id.0;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        match self {
            FittedAttributeVector::Width1(values) => values.len(),
            FittedAttributeVector::Width2(values) => values.len(),
            FittedAttributeVector::Width4(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical width of one entry in bytes: 1, 2 or 4.
    pub fn width(&self) -> usize {
        match self {
            FittedAttributeVector::Width1(_) => 1,
            FittedAttributeVector::Width2(_) => 2,
            FittedAttributeVector::Width4(_) => 4,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueId> + '_ {
        (0..self.len()).map(|index| self.get(index))
    }

    /// In-memory footprint in bytes, as reported by memory accounting.
    pub fn estimated_size(&self) -> usize {
        self.len() * self.width()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0, 1)]
    #[test_case(255, 1)]
    #[test_case(256, 2)]
    #[test_case(65535, 2)]
    #[test_case(65536, 4)]
    #[test_case(1 << 20, 4)]
    fn test_width_fitting(max_value_id: u32, width: usize) {
        let av = FittedAttributeVector::new(8, ValueId(max_value_id));
        assert_eq!(av.width(), width);
        assert_eq!(av.estimated_size(), 8 * width);
    }

    #[test]
    fn test_zero_initialized() {
        let av = FittedAttributeVector::new(4, ValueId(300));
        assert!(av.iter().all(|id| id == ValueId(0)));
    }

    #[test]
    fn test_set_get() {
        let mut av = FittedAttributeVector::new(3, ValueId(3));
        av.set(0, ValueId(3)).unwrap();
        av.set(2, ValueId(1)).unwrap();
        assert_eq!(av.get(0), ValueId(3));
        assert_eq!(av.get(1), ValueId(0));
        assert_eq!(av.get(2), ValueId(1));
        assert_eq!(av.len(), 3);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut av = FittedAttributeVector::new(2, ValueId(255));
        assert_eq!(av.width(), 1);
        assert_eq!(
            av.set(0, ValueId(256)),
            Err(StorageError::ValueIdOverflow(ValueId(256), 1))
        );
        // the failed set must not clobber the slot
        assert_eq!(av.get(0), ValueId(0));
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_out_of_range_index_panics() {
        let mut av = FittedAttributeVector::new(2, ValueId(1));
        let _ = av.set(2, ValueId(1));
    }
}
