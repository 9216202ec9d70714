//! Calendar months for timeline navigation.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month. Ordering is chronological (year, then month).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before this one.
    pub fn pred(self) -> Self {
        if self.month == 1 {
            YearMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after this one.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_chronologically() {
        let jan = YearMonth { year: 2024, month: 1 };
        let mar = YearMonth { year: 2024, month: 3 };
        let dec_prev = YearMonth { year: 2023, month: 12 };
        assert!(jan < mar);
        assert!(dec_prev < jan);
    }

    #[test]
    fn pred_and_succ_cross_year_boundaries() {
        let jan = YearMonth { year: 2024, month: 1 };
        assert_eq!(jan.pred(), YearMonth { year: 2023, month: 12 });
        assert_eq!(jan.pred().succ(), jan);

        let dec = YearMonth { year: 2024, month: 12 };
        assert_eq!(dec.succ(), YearMonth { year: 2025, month: 1 });
    }

    #[test]
    fn displays_as_iso_month() {
        let month = YearMonth { year: 2024, month: 3 };
        assert_eq!(month.to_string(), "2024-03");
    }
}
