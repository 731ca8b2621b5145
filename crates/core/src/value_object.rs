//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** and are **immutable**: two instances with
/// the same attribute values are equal, and "modifying" one means producing a
/// new value (e.g. `Quantity::adjust` returns a fresh quantity).
///
/// - **Value Object**: `Quantity(3)`, a catalog label
/// - **Entity**: an item in a list, identified by its store-assigned id
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
