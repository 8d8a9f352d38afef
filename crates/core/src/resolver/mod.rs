//! Composite field resolution.
//!
//! A single composite value (a timestamp or a geographic position) may be
//! spread across several columns (latitude column + longitude column) or
//! concentrated in one column behind a delimiter pattern
//! (`"52.2°, 7.4°, 21m"`). Elements sharing a group id jointly encode one
//! value; this module reconstructs it, treating both representations
//! uniformly.
//!
//! # Example
//!
//! ```ignore
//! use obsbind_core::resolver::composite::resolve_position;
//!
//! let position = resolve_position(&table, "A", row, '.')?;
//! assert!(position.latitude.is_some());
//! ```
pub mod composite;
pub mod context;
pub mod numeric;
pub mod pattern;
