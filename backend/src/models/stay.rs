use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed date interval `[check_in, check_out]` occupied by a reservation.
///
/// Both endpoints belong to the stay, so a guest checking out on the 10th
/// still occupies the property on the 10th.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Stay {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Inclusive-boundary overlap: `a.in <= b.out && a.out >= b.in`.
    ///
    /// Touching endpoints count as overlapping.
    pub fn overlaps(&self, other: &Stay) -> bool {
        self.check_in <= other.check_out && self.check_out >= other.check_in
    }

    /// Whether `check_in <= check_out`.
    pub fn is_ordered(&self) -> bool {
        self.check_in <= self.check_out
    }
}

impl std::fmt::Display for Stay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.check_in, self.check_out)
    }
}

#[cfg(test)]
#[path = "stay_tests.rs"]
mod tests;
