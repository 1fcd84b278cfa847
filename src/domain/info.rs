use std::fmt;

/// Capability set every node payload must provide.
///
/// The tree never looks inside a payload beyond these two operations:
/// equality against another payload of the same type, and its `Display` form
/// (used by rendering and by the CLI).
pub trait Info: fmt::Display {
    fn equals(&self, other: &Self) -> bool;
}

impl<T> Info for T
where
    T: PartialEq + fmt::Display,
{
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}
