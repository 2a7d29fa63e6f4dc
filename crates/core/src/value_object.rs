//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values.
///
/// - **Value Object**: no identity (`Money` of 100 USD equals any other 100 USD)
/// - **Entity**: has identity (two listings with the same fields are still
///   distinct listings)
///
/// The bounds keep value objects cheap to copy, comparable and debuggable,
/// which is what test assertions and log lines need from them.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
