//! Per-cell checks: emptiness, type, range, pattern, and uniqueness.

use std::cmp::Ordering;
use std::fmt;

use crate::template::{FieldRule, FieldType};

use super::issue::{IssueCollector, Severity};
use super::uniqueness::UniquenessTracker;

/// A cell value read as a whole number.
///
/// Magnitudes beyond `i64` are kept rather than rejected, so range checks
/// and messages still see the value the sheet actually holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WholeNumber(f64);

impl WholeNumber {
    /// The value as an `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        (self.0 >= i64::MIN as f64 && self.0 < i64::MAX as f64).then_some(self.0 as i64)
    }

    /// Whether the value is below an inclusive minimum.
    pub fn is_below(&self, min: i64) -> bool {
        self.cmp_bound(min) == Ordering::Less
    }

    /// Whether the value is above an inclusive maximum.
    pub fn exceeds(&self, max: i64) -> bool {
        self.cmp_bound(max) == Ordering::Greater
    }

    fn cmp_bound(&self, bound: i64) -> Ordering {
        // Integral values under 2^127 convert to i128 exactly.
        if self.0.abs() < i128::MAX as f64 {
            (self.0 as i128).cmp(&i128::from(bound))
        } else if self.0 > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

impl fmt::Display for WholeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

/// Coerce text to a whole number the way sample sheets are read: parse as a
/// floating-point number, then truncate toward zero.
///
/// Returns `None` for text that isn't numeric and for NaN and infinities.
pub fn coerce_integer(text: &str) -> Option<WholeNumber> {
    let parsed: f64 = text.trim().parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }

    let truncated = parsed.trunc();
    // -0.5 truncates to -0, which reads as 0.
    Some(WholeNumber(if truncated == 0.0 { 0.0 } else { truncated }))
}

/// Evaluates one field's rule against the cells of its column.
pub struct CellValidator<'a> {
    rule: &'a FieldRule,
}

impl<'a> CellValidator<'a> {
    /// Create a validator for a field rule.
    pub fn new(rule: &'a FieldRule) -> Self {
        Self { rule }
    }

    /// Check one cell, recording findings in check order.
    ///
    /// An empty cell stops all further checks (with a Blocker when the field
    /// is required). Otherwise the type/range, pattern, and uniqueness checks
    /// each run independently.
    pub fn check(
        &self,
        raw: Option<&str>,
        row_index: usize,
        tracker: &mut UniquenessTracker,
        issues: &mut IssueCollector,
    ) {
        let name = self.rule.name.as_str();

        let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
            if self.rule.required {
                issues.cell(
                    Severity::Blocker,
                    row_index,
                    name,
                    format!("Required field '{}' is empty", name),
                );
            }
            return;
        };
        let value = raw.trim();

        if self.rule.field_type == FieldType::Integer {
            self.check_integer(raw, row_index, issues);
        }

        if !self.rule.matches_pattern(value) {
            issues.cell(
                Severity::Warning,
                row_index,
                name,
                format!("Value '{}' doesn't match expected format", value),
            );
        }

        if self.rule.is_identifier() {
            if let Some(first_row) = tracker.observe(name, value, row_index) {
                issues.cell(
                    Severity::Warning,
                    row_index,
                    name,
                    format!(
                        "Duplicate value '{}' (first seen in row {})",
                        value, first_row
                    ),
                );
            }
        }
    }

    fn check_integer(&self, raw: &str, row_index: usize, issues: &mut IssueCollector) {
        let name = self.rule.name.as_str();

        let Some(int_val) = coerce_integer(raw) else {
            issues.cell(
                Severity::Blocker,
                row_index,
                name,
                format!("Expected integer, got '{}'", raw),
            );
            return;
        };

        if let Some(min) = self.rule.min {
            if int_val.is_below(min) {
                issues.cell(
                    Severity::Blocker,
                    row_index,
                    name,
                    format!("Value {} is below minimum {}", int_val, min),
                );
            }
        }
        if let Some(max) = self.rule.max {
            if int_val.exceeds(max) {
                issues.cell(
                    Severity::Blocker,
                    row_index,
                    name,
                    format!("Value {} exceeds maximum {}", int_val, max),
                );
            }
        }
    }
}
