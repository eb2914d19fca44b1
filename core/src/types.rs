//! Shared primitive types used across the data core.

/// Master seed for a generation run. One seed reproduces both tables.
pub type Seed = u64;

/// A whole-day count, used for recency windows and timestamp offsets.
pub type Days = i64;
