use std::{fmt, ops::Range};

use serde::{Serialize, Serializer};

use crate::numeric::Numeric;

/// A half-open integer class interval `[start, stop)`.
///
/// Intervals order by `start` first and then by `stop`, so sorting a table
/// keyed by intervals puts the classes in their natural sequence.
///
/// The rendered form is `"start-stop"`, which is also the form used when an
/// interval is serialized as a map key.
///
/// # Examples
///
/// ```
/// use freqdist_stats::interval::ClassInterval;
///
/// let interval = ClassInterval::new(10, 15);
/// assert!(interval.contains(10.0));
/// assert!(!interval.contains(15.0));
/// assert_eq!(interval.to_string(), "10-15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassInterval {
    start: i64,
    stop: i64,
}

impl ClassInterval {
    /// Creates the interval `[start, stop)`.
    ///
    /// # Panics
    ///
    /// Panics if `stop < start`.
    #[must_use]
    pub const fn new(start: i64, stop: i64) -> Self {
        assert!(start <= stop, "interval stop must not precede its start");
        Self { start, stop }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn stop(&self) -> i64 {
        self.stop
    }

    #[must_use]
    pub const fn width(&self) -> i64 {
        self.stop - self.start
    }

    /// Returns `true` if `value` lies in `[start, stop)`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.start.to_f64() <= value && value < self.stop.to_f64()
    }

    /// The class mark used when the interval stands in for its members.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.start.to_f64(), self.stop.to_f64())
    }

    #[must_use]
    pub const fn as_range(&self) -> Range<i64> {
        self.start..self.stop
    }
}

impl From<Range<i64>> for ClassInterval {
    fn from(range: Range<i64>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for ClassInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.stop)
    }
}

impl Serialize for ClassInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Numeric for ClassInterval {
    fn to_f64(&self) -> f64 {
        self.midpoint()
    }
}
