//! Shared primitive types used across the entire engine.

/// Daily average number of patients present in a unit.
pub type Census = f64;

/// A duration in days (length of stay, mean residence time).
pub type Days = f64;

/// A percentage on the 0–100 scale (values above 100 are legal).
pub type Percent = f64;

/// Number of `true` criteria for one lever.
pub type FeasibilityScore = u32;

/// Display name of an organizational unit (department or ward).
pub type UnitName = String;

/// Days per week, used to turn weekly admission totals into daily rates.
pub const DAYS_PER_WEEK: f64 = 7.0;
