//! Shared primitive types used across the entire portal.

/// A stable, unique identifier for any persisted entity (UUIDv4 text).
pub type EntityId = String;

/// A hostel block label, e.g. "A" or "B".
pub type BlockId = String;
