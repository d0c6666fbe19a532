//! Range and age arguments for filter construction.

use chrono::NaiveDate;

use super::Value;

/// A value range with optional bounds.
///
/// An omitted bound is dropped from the generated predicate, never
/// zero-filled. A range with no bounds removes the condition instead.
///
/// # Example
///
/// ```
/// use linelist_lib::model::ValueRange;
///
/// let both = ValueRange::new(18, 65);
/// let lower_only = ValueRange::at_least(18);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRange {
    /// Inclusive lower bound.
    pub min: Option<Value>,
    /// Inclusive upper bound.
    pub max: Option<Value>,
}

impl ValueRange {
    /// Creates a range with both bounds set.
    pub fn new(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self {
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }

    /// Creates a range with only a lower bound.
    pub fn at_least(min: impl Into<Value>) -> Self {
        Self {
            min: Some(min.into()),
            max: None,
        }
    }

    /// Creates a range with only an upper bound.
    pub fn at_most(max: impl Into<Value>) -> Self {
        Self {
            min: None,
            max: Some(max.into()),
        }
    }

    /// Returns `true` if neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// A calendar date range with optional bounds, both inclusive.
///
/// Bounds are calendar days; the filter builder widens them to the full day
/// (start of day for `start`, end of day for `end`) when generating the
/// predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the range.
    pub start: Option<NaiveDate>,
    /// Last day of the range.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range covering `start` through `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Creates a range open toward the future.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Creates a range open toward the past.
    pub fn ending(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Returns `true` if neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// An age expressed as whole years plus leftover months.
///
/// Years and months always combine into a single offset; an age of
/// 2 years 6 months is one boundary 30 months in the past, not two
/// independent predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Age {
    /// Whole years.
    pub years: u32,
    /// Months beyond the whole years.
    pub months: u32,
}

impl Age {
    /// Creates an age from years and months.
    pub fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// Creates an age from whole years.
    pub fn years(years: u32) -> Self {
        Self { years, months: 0 }
    }

    /// Returns the age as a total month count, saturating at `u32::MAX`.
    pub fn total_months(&self) -> u32 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }
}

/// An age range with optional bounds, both inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeRange {
    /// Youngest age to match.
    pub min: Option<Age>,
    /// Oldest age to match.
    pub max: Option<Age>,
}

impl AgeRange {
    /// Creates a range with both bounds set.
    pub fn new(min: Age, max: Age) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Creates a range matching ages of `min` and above.
    pub fn at_least(min: Age) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Creates a range matching ages of `max` and below.
    pub fn at_most(max: Age) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Returns `true` if neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_bounds() {
        assert!(ValueRange::default().is_empty());
        assert!(ValueRange::at_least(1).max.is_none());
        assert!(!ValueRange::new(1, 2).is_empty());
    }

    #[test]
    fn test_age_total_months() {
        assert_eq!(Age::years(3).total_months(), 36);
        assert_eq!(Age::new(2, 6).total_months(), 30);
        assert_eq!(Age::default().total_months(), 0);
    }

    #[test]
    fn test_age_total_months_saturates() {
        assert_eq!(Age::new(u32::MAX, 7).total_months(), u32::MAX);
        assert_eq!(Age::new(u32::MAX / 12 + 1, 0).total_months(), u32::MAX);
    }
}
