use std::fmt::Debug;
use std::mem;

use super::{F32, F64};

/// A scalar element storable in a typed column.
///
/// The trait is implemented exactly for the closed set of kinds in
/// [`DataTypeKind`](super::DataTypeKind). `Ord` supplies the dictionary
/// order; floats get theirs from [`OrderedFloat`](ordered_float::OrderedFloat),
/// which is total, so [`ElementType::is_comparable`] is what keeps NaN out
/// of dictionaries.
pub trait ElementType:
    Clone + Ord + Default + Debug + Send + Sync + Sized + 'static
{
    /// Whether the value participates in the dictionary order. `false`
    /// only for float NaN.
    fn is_comparable(&self) -> bool {
        true
    }

    /// In-memory footprint of the element in bytes.
    fn estimated_size(&self) -> usize {
        mem::size_of::<Self>()
    }
}

impl ElementType for i32 {}
impl ElementType for i64 {}

impl ElementType for F32 {
    fn is_comparable(&self) -> bool {
        !self.is_nan()
    }
}

impl ElementType for F64 {
    fn is_comparable(&self) -> bool {
        !self.is_nan()
    }
}

impl ElementType for String {
    fn estimated_size(&self) -> usize {
        mem::size_of::<String>() + self.len()
    }
}
