//! Structural equality for value objects.

use std::fmt::Debug;

/// An immutable value compared by its attributes.
///
/// Equality is the statically dispatched `Eq` implementation of the value
/// type, normally derived. Derived equality walks every owned field:
/// nested value objects compare with their own equality, timestamps compare
/// as instants, and sequences compare element by element in order. Values
/// own their data, so mutating the inputs a value was built from cannot
/// change it afterwards.
pub trait ValueObject: Clone + Eq + Debug {
    /// Returns `true` when every attribute of `self` equals the
    /// corresponding attribute of `other`.
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}
