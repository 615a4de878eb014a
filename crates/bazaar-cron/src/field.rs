//! A single cron field parsed to the set of values it admits.

use std::collections::BTreeSet;

use crate::error::{CronError, CronResult};

/// The admitted values of one cron field.
///
/// Keeps whether the field was written as a bare `*`, which the
/// day-of-month/day-of-week union rule needs to distinguish from an
/// explicit full range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldSet {
    values: BTreeSet<u32>,
    wildcard: bool,
}

impl FieldSet {
    /// Parse one field. `min..=max` bounds the admitted values; `name` is
    /// used in errors.
    pub(crate) fn parse(text: &str, name: &'static str, min: u32, max: u32) -> CronResult<Self> {
        let err = |reason: String| CronError::Field {
            field: name,
            value: text.to_string(),
            reason,
        };

        if text.is_empty() {
            return Err(err("empty field".to_string()));
        }

        let mut values = BTreeSet::new();
        let mut wildcard = false;

        for term in text.split(',') {
            let (range, step) = match term.split_once('/') {
                Some((range, step)) => {
                    let step: u32 = step
                        .parse()
                        .map_err(|_| err(format!("bad step `{step}`")))?;
                    if step == 0 {
                        return Err(err("step must be positive".to_string()));
                    }
                    (range, step)
                },
                None => (term, 1),
            };

            let (lo, hi) = if range == "*" {
                if term == "*" {
                    wildcard = true;
                }
                (min, max)
            } else if let Some((lo, hi)) = range.split_once('-') {
                let lo: u32 = lo.parse().map_err(|_| err(format!("bad value `{lo}`")))?;
                let hi: u32 = hi.parse().map_err(|_| err(format!("bad value `{hi}`")))?;
                if lo > hi {
                    return Err(err(format!("descending range `{range}`")));
                }
                (lo, hi)
            } else {
                let value: u32 = range
                    .parse()
                    .map_err(|_| err(format!("bad value `{range}`")))?;
                // A bare value with a step means "from value to max".
                if step > 1 { (value, max) } else { (value, value) }
            };

            if lo < min || hi > max {
                return Err(err(format!("value out of range {min}-{max}")));
            }

            values.extend((lo..=hi).step_by(step as usize));
        }

        Ok(Self { values, wildcard })
    }

    /// A field admitting exactly one value (used for the implicit seconds
    /// field of five-field expressions).
    pub(crate) fn exactly(value: u32) -> Self {
        Self {
            values: BTreeSet::from([value]),
            wildcard: false,
        }
    }

    /// Whether the field was written as a bare `*`.
    pub(crate) fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Whether `value` is admitted.
    pub(crate) fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    /// Smallest admitted value.
    pub(crate) fn first(&self) -> u32 {
        self.values.first().copied().unwrap_or_default()
    }

    /// Smallest admitted value that is `>= from`, if any.
    pub(crate) fn at_or_after(&self, from: u32) -> Option<u32> {
        self.values.range(from..).next().copied()
    }

    /// Admitted values `>= from`, ascending.
    pub(crate) fn iter_from(&self, from: u32) -> impl Iterator<Item = u32> + '_ {
        self.values.range(from..).copied()
    }

    /// Remap an admitted value in place (used to fold day-of-week 7 to 0).
    pub(crate) fn remap(&mut self, from: u32, to: u32) {
        if self.values.remove(&from) {
            self.values.insert(to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(text: &str) -> CronResult<FieldSet> {
        FieldSet::parse(text, "minute", 0, 59)
    }

    #[test]
    fn test_wildcard() {
        let field = minutes("*").unwrap();
        assert!(field.is_wildcard());
        assert!(field.contains(0));
        assert!(field.contains(59));
    }

    #[test]
    fn test_stepped_wildcard_is_not_bare() {
        let field = minutes("*/15").unwrap();
        assert!(!field.is_wildcard());
        assert!(field.contains(0));
        assert!(field.contains(45));
        assert!(!field.contains(10));
    }

    #[test]
    fn test_list_and_range() {
        let field = minutes("5,10-12,30").unwrap();
        for v in [5, 10, 11, 12, 30] {
            assert!(field.contains(v));
        }
        assert!(!field.contains(13));
    }

    #[test]
    fn test_range_with_step() {
        let field = minutes("10-30/10").unwrap();
        assert!(field.contains(10));
        assert!(field.contains(20));
        assert!(field.contains(30));
        assert!(!field.contains(15));
    }

    #[test]
    fn test_bare_value_with_step_runs_to_max() {
        let field = minutes("50/5").unwrap();
        assert!(field.contains(50));
        assert!(field.contains(55));
        assert!(!field.contains(45));
    }

    #[test]
    fn test_at_or_after() {
        let field = minutes("5,30").unwrap();
        assert_eq!(field.at_or_after(0), Some(5));
        assert_eq!(field.at_or_after(6), Some(30));
        assert_eq!(field.at_or_after(31), None);
        assert_eq!(field.first(), 5);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(minutes("60"), Err(CronError::Field { .. })));
        assert!(matches!(minutes("0-60"), Err(CronError::Field { .. })));
    }

    #[test]
    fn test_rejects_bad_syntax() {
        assert!(minutes("").is_err());
        assert!(minutes("a").is_err());
        assert!(minutes("10-5").is_err());
        assert!(minutes("*/0").is_err());
        assert!(minutes("1//2").is_err());
    }
}
