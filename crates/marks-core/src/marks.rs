//! Range-checked student marks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Message returned when marks fall outside `[0, 100]`.
pub const MARKS_OUT_OF_RANGE: &str = "Marks must be between 0 and 100";

/// Inclusive upper bound for a student's marks.
pub const MAX_MARKS: u8 = 100;

/// A mark value guaranteed to lie in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Marks(u8);

impl Marks {
    /// Build a `Marks` value, rejecting anything outside `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `value` is out of range.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_MARKS)
            .map(Self)
            .ok_or_else(|| CoreError::validation(MARKS_OUT_OF_RANGE))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Sum two marks, or `None` when the total would exceed 100.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        let total = self.0 + other.0;
        if total > MAX_MARKS { None } else { Some(Self(total)) }
    }
}

impl TryFrom<i64> for Marks {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Marks> for i64 {
    fn from(marks: Marks) -> Self {
        Self::from(marks.0)
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(100)]
    fn accepts_values_in_range(#[case] value: i64) {
        assert_eq!(i64::from(Marks::new(value).unwrap()), value);
    }

    #[rstest]
    #[case(-1)]
    #[case(101)]
    #[case(256)]
    #[case(i64::MAX)]
    fn rejects_values_out_of_range(#[case] value: i64) {
        let err = Marks::new(value).unwrap_err();
        assert_eq!(err.to_string(), MARKS_OUT_OF_RANGE);
    }

    #[test]
    fn checked_add_caps_at_one_hundred() {
        let forty = Marks::new(40).unwrap();
        assert_eq!(
            forty.checked_add(Marks::new(30).unwrap()),
            Some(Marks::new(70).unwrap())
        );
        assert_eq!(
            forty.checked_add(Marks::new(60).unwrap()),
            Some(Marks::new(100).unwrap())
        );
        assert_eq!(forty.checked_add(Marks::new(70).unwrap()), None);
    }

    #[test]
    fn deserialize_enforces_range() {
        let ok: Marks = serde_json::from_str("55").unwrap();
        assert_eq!(ok.get(), 55);
        assert!(serde_json::from_str::<Marks>("120").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "55");
    }
}
