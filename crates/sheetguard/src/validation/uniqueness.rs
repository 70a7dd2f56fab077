//! Duplicate detection for identifier fields.

use std::collections::HashMap;

/// Per-field record of where each identifier value was first seen.
///
/// One tracker lives for one single-file validation. Each field's map is
/// reset when that field's row checks begin, so values never carry over
/// between fields or files.
#[derive(Debug, Default)]
pub struct UniquenessTracker {
    fields: HashMap<String, HashMap<String, usize>>,
}

impl UniquenessTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) tracking a field with an empty value map.
    pub fn begin_field(&mut self, field: &str) {
        self.fields.insert(field.to_string(), HashMap::new());
    }

    /// Record a value at a row.
    ///
    /// Returns the row where the value was first seen if it is a duplicate;
    /// otherwise records the current row and returns `None`. Duplicates do
    /// not move the first-seen row.
    pub fn observe(&mut self, field: &str, value: &str, row_index: usize) -> Option<usize> {
        let seen = self.fields.entry(field.to_string()).or_default();
        match seen.get(value) {
            Some(&first_row) => Some(first_row),
            None => {
                seen.insert(value.to_string(), row_index);
                None
            }
        }
    }

    /// Number of distinct values recorded for a field.
    pub fn distinct_values(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_reference_first_row() {
        let mut tracker = UniquenessTracker::new();
        tracker.begin_field("Sample_ID");

        assert_eq!(tracker.observe("Sample_ID", "S1", 2), None);
        assert_eq!(tracker.observe("Sample_ID", "S1", 3), Some(2));
        assert_eq!(tracker.observe("Sample_ID", "S1", 4), Some(2));
        assert_eq!(tracker.observe("Sample_ID", "S2", 5), None);
        assert_eq!(tracker.distinct_values("Sample_ID"), 2);
    }

    #[test]
    fn test_fields_are_independent() {
        let mut tracker = UniquenessTracker::new();
        tracker.begin_field("Run_ID");
        tracker.begin_field("Library_ID");

        assert_eq!(tracker.observe("Run_ID", "X", 2), None);
        assert_eq!(tracker.observe("Library_ID", "X", 2), None);
    }

    #[test]
    fn test_begin_field_resets() {
        let mut tracker = UniquenessTracker::new();
        tracker.begin_field("Run_ID");
        tracker.observe("Run_ID", "R1", 2);

        tracker.begin_field("Run_ID");
        assert_eq!(tracker.distinct_values("Run_ID"), 0);
        assert_eq!(tracker.observe("Run_ID", "R1", 7), None);
    }
}
