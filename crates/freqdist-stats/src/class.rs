//! Class frequency tables for numeric samples.
//!
//! A numeric sample is partitioned into contiguous half-open integer
//! intervals ([`ClassInterval`]) and each interval is tagged with the number
//! of sample values it contains. Intervals are produced in one of two modes
//! selected by [`Classing`]:
//!
//! - **Equal width**: `k` classes (default `⌈√n⌉`) of width
//!   `⌈(max − min) / k⌉`, starting at the sample minimum.
//! - **Cut points**: caller-supplied boundaries, widened to take in the
//!   sample minimum and maximum when they fall outside.
//!
//! In both modes the final interval always includes the sample maximum, so
//! the frequencies add up to the sample size.
//!
//! # Counting
//!
//! The sample is reduced once to its sorted distinct values with a running
//! cumulative count. The count of values below an interval's upper bound is
//! then a binary search away, and an interval's frequency is that count
//! minus what the previous intervals already took. This costs
//! `O(d log d)` for `d` distinct values instead of a pass over the sample per
//! interval.
//!
//! Samples and boundaries are compared as `f64`, so both are confined to the
//! range in which every integer is exact (`±2^53`). Inputs outside it fail
//! with [`ClassError::SampleOutOfRange`] or [`ClassError::BoundaryOutOfRange`]
//! rather than being miscounted.
//!
//! # Derivations
//!
//! [`relative_class_frequency_table`] adds `rfreq = freq / freqsum` to every
//! class and [`cumulative_class_frequency_table`] adds the running total
//! `cfreq`. Each call buckets the sample afresh; a returned table is never
//! modified afterwards.
//!
//! # Examples
//!
//! ```
//! use freqdist_stats::class::{Classing, cumulative_class_frequency_table};
//!
//! let sample = [1, 2, 2, 3, 4, 4, 4, 5];
//! let table = cumulative_class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
//!
//! assert_eq!(table.freqsum(), 8);
//! let last = table.entries().last().unwrap();
//! assert_eq!(last.cfreq, Some(8));
//! ```

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap as _};

use crate::{
    interval::ClassInterval,
    numeric::Numeric,
    table::{DISPLAY_PADDING, FrequencyTable},
};

/// How a sample is partitioned into classes.
///
/// The two modes are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classing {
    /// Equal-width classes. `None` picks `⌈√n⌉` classes for a sample of size `n`.
    EqualWidth { num_classes: Option<usize> },
    /// Strictly increasing class boundaries; at least two are required.
    CutPoints(Vec<i64>),
}

impl Default for Classing {
    fn default() -> Self {
        Classing::EqualWidth { num_classes: None }
    }
}

impl Classing {
    /// Equal-width classing with an explicit number of classes.
    #[must_use]
    pub const fn with_classes(num_classes: usize) -> Self {
        Classing::EqualWidth {
            num_classes: Some(num_classes),
        }
    }

    /// Classing with explicit boundaries.
    #[must_use]
    pub fn with_cut_points<I>(cut_points: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Classing::CutPoints(cut_points.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClassError {
    #[display("cannot build classes from an empty sample")]
    EmptySample,
    #[display("sample value at index {index} is not a finite number")]
    NonFiniteSample { index: usize },
    #[display("the number of classes must be greater than zero")]
    ZeroClasses,
    #[display("at least two cut points are required, got {len}")]
    TooFewCutPoints { len: usize },
    #[display("cut points must be strictly increasing (violated at index {index})")]
    UnsortedCutPoints { index: usize },
    #[display("sample value at index {index} is outside the exact integer range of f64 (±2^53)")]
    SampleOutOfRange { index: usize },
    #[display("class boundaries would leave the exact integer range of f64 (±2^53)")]
    BoundaryOutOfRange,
    #[display("{num_classes} classes requested, at most {limit} allowed for this sample")]
    TooManyClasses { num_classes: usize, limit: usize },
}

/// Which derived columns to compute on top of the plain frequencies.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivations {
    /// Add `rfreq` to every class and `rfreqsum` to the table.
    pub relative: bool,
    /// Add `cfreq` to every class.
    pub cumulative: bool,
}

/// One class of a [`ClassFrequencyTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassEntry {
    #[serde(skip)]
    pub interval: ClassInterval,
    /// Number of sample values in the interval.
    pub freq: u64,
    /// `freq / freqsum`, when relative frequencies were derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfreq: Option<f64>,
    /// Running total of `freq` up to and including this class, when
    /// cumulative frequencies were derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfreq: Option<u64>,
}

/// Frequencies of a numeric sample over contiguous class intervals.
///
/// The intervals are contiguous, non-overlapping and cover the whole sample.
/// `freq` values sum to [`Self::freqsum`], the sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFrequencyTable {
    entries: Vec<ClassEntry>,
    freqsum: u64,
    rfreqsum: Option<f64>,
}

impl ClassFrequencyTable {
    /// The classes in interval order.
    #[must_use]
    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn intervals(&self) -> impl Iterator<Item = ClassInterval> + '_ {
        self.entries.iter().map(|entry| entry.interval)
    }

    pub fn frequencies(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|entry| entry.freq)
    }

    /// Returns the class for `interval`, if it is one of the table's intervals.
    #[must_use]
    pub fn get(&self, interval: ClassInterval) -> Option<&ClassEntry> {
        self.entries
            .binary_search_by(|entry| entry.interval.cmp(&interval))
            .ok()
            .map(|pos| &self.entries[pos])
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total frequency, equal to the sample size.
    #[must_use]
    pub fn freqsum(&self) -> u64 {
        self.freqsum
    }

    /// Sum of the relative frequencies, when they were derived.
    ///
    /// Close to `1.0` up to floating-point rounding.
    #[must_use]
    pub fn rfreqsum(&self) -> Option<f64> {
        self.rfreqsum
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.freqsum
    }

    /// Converts to an interval-keyed [`FrequencyTable`].
    ///
    /// Empty classes are left out, since a frequency table only holds
    /// positive frequencies.
    #[must_use]
    pub fn to_frequency_table(&self) -> FrequencyTable<ClassInterval> {
        let mut table = FrequencyTable::new();
        for entry in &self.entries {
            table.add_frequency(entry.interval, entry.freq);
        }
        table
    }

    #[expect(clippy::cast_precision_loss)]
    fn derive_relative(&mut self) {
        let freqsum = self.freqsum as f64;
        let mut rfreqsum = 0.0;
        for entry in &mut self.entries {
            let rfreq = entry.freq as f64 / freqsum;
            rfreqsum += rfreq;
            entry.rfreq = Some(rfreq);
        }
        self.rfreqsum = Some(rfreqsum);
    }

    fn derive_cumulative(&mut self) {
        let mut running_total = 0;
        for entry in &mut self.entries {
            running_total += entry.freq;
            entry.cfreq = Some(running_total);
        }
    }
}

/// Renders `Class` and `Frequency` columns, followed by `Relative` and
/// `Cumulative` columns when those were derived.
impl fmt::Display for ClassFrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self
            .entries
            .iter()
            .map(|entry| entry.interval.to_string())
            .collect::<Vec<_>>();
        let width = labels.iter().map(String::len).max().unwrap_or(0) + DISPLAY_PADDING;
        let has_relative = self.rfreqsum.is_some();
        let has_cumulative = self.entries.iter().any(|entry| entry.cfreq.is_some());
        let freq_width = "Frequency".len() + DISPLAY_PADDING;
        let rel_width = "Relative".len() + DISPLAY_PADDING;

        write!(f, "{:<width$}", "Class")?;
        match (has_relative, has_cumulative) {
            (false, false) => write!(f, "Frequency")?,
            (true, false) => write!(f, "{:<freq_width$}Relative", "Frequency")?,
            (false, true) => write!(f, "{:<freq_width$}Cumulative", "Frequency")?,
            (true, true) => write!(
                f,
                "{:<freq_width$}{:<rel_width$}Cumulative",
                "Frequency", "Relative"
            )?,
        }

        for (label, entry) in labels.iter().zip(&self.entries) {
            write!(f, "\n{label:<width$}")?;
            let freq = entry.freq.to_string();
            let rfreq = entry.rfreq.map(|r| format!("{r:.4}"));
            match (rfreq, entry.cfreq) {
                (None, None) => write!(f, "{freq}")?,
                (Some(rfreq), None) => write!(f, "{freq:<freq_width$}{rfreq}")?,
                (None, Some(cfreq)) => write!(f, "{freq:<freq_width$}{cfreq}")?,
                (Some(rfreq), Some(cfreq)) => {
                    write!(f, "{freq:<freq_width$}{rfreq:<rel_width$}{cfreq}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serializes as one flat map: `"start-stop"` keys for the classes, followed
/// by `freqsum` and, when derived, `rfreqsum`.
impl Serialize for ClassFrequencyTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.entries.len() + 1 + usize::from(self.rfreqsum.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.interval, entry)?;
        }
        map.serialize_entry("freqsum", &self.freqsum)?;
        if let Some(rfreqsum) = self.rfreqsum {
            map.serialize_entry("rfreqsum", &rfreqsum)?;
        }
        map.end()
    }
}

/// Sorted distinct sample values with the running count of values seen.
#[derive(Debug)]
struct CumulativeTally {
    values: Vec<f64>,
    cumulative: Vec<u64>,
}

impl CumulativeTally {
    fn from_sorted(sorted: &[f64]) -> Self {
        let mut values: Vec<f64> = vec![];
        let mut cumulative: Vec<u64> = vec![];
        let mut count = 0;
        for &value in sorted {
            count += 1;
            match (values.last(), cumulative.last_mut()) {
                (Some(&last), Some(running)) if last == value => *running = count,
                _ => {
                    values.push(value);
                    cumulative.push(count);
                }
            }
        }
        Self { values, cumulative }
    }

    /// Number of sample values strictly below `bound`.
    fn count_below(&self, bound: f64) -> u64 {
        match self.values.partition_point(|&value| value < bound) {
            0 => 0,
            pos => self.cumulative[pos - 1],
        }
    }
}

/// Builds the plain class frequency table of `samples`.
///
/// # Examples
///
/// ```
/// use freqdist_stats::class::{Classing, class_frequency_table};
/// use freqdist_stats::interval::ClassInterval;
///
/// let table = class_frequency_table(&[3, 7, 8, 12], &Classing::with_cut_points([0, 5, 10])).unwrap();
/// assert_eq!(
///     table.intervals().collect::<Vec<_>>(),
///     [ClassInterval::new(0, 5), ClassInterval::new(5, 10), ClassInterval::new(10, 13)],
/// );
/// assert_eq!(table.frequencies().collect::<Vec<_>>(), [1, 2, 1]);
/// ```
pub fn class_frequency_table<T>(
    samples: &[T],
    classing: &Classing,
) -> Result<ClassFrequencyTable, ClassError>
where
    T: Numeric,
{
    derived_class_frequency_table(samples, classing, Derivations::default())
}

/// Builds a class frequency table with relative frequencies.
pub fn relative_class_frequency_table<T>(
    samples: &[T],
    classing: &Classing,
) -> Result<ClassFrequencyTable, ClassError>
where
    T: Numeric,
{
    derived_class_frequency_table(
        samples,
        classing,
        Derivations {
            relative: true,
            cumulative: false,
        },
    )
}

/// Builds a class frequency table with cumulative frequencies.
pub fn cumulative_class_frequency_table<T>(
    samples: &[T],
    classing: &Classing,
) -> Result<ClassFrequencyTable, ClassError>
where
    T: Numeric,
{
    derived_class_frequency_table(
        samples,
        classing,
        Derivations {
            relative: false,
            cumulative: true,
        },
    )
}

/// Builds a class frequency table with the requested derived columns.
pub fn derived_class_frequency_table<T>(
    samples: &[T],
    classing: &Classing,
    derivations: Derivations,
) -> Result<ClassFrequencyTable, ClassError>
where
    T: Numeric,
{
    let mut table = bucket(samples, classing)?;
    if derivations.relative {
        table.derive_relative();
    }
    if derivations.cumulative {
        table.derive_cumulative();
    }
    Ok(table)
}

fn bucket<T>(samples: &[T], classing: &Classing) -> Result<ClassFrequencyTable, ClassError>
where
    T: Numeric,
{
    let sorted = sorted_finite(samples)?;
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);

    let boundaries = match classing {
        Classing::EqualWidth { num_classes } => {
            let num_classes = num_classes.unwrap_or_else(|| default_num_classes(sorted.len()));
            equal_width_boundaries(min, max, num_classes, sorted.len())?
        }
        Classing::CutPoints(cut_points) => adjusted_cut_points(min, max, cut_points)?,
    };
    log::debug!("class boundaries for {} values: {boundaries:?}", sorted.len());

    let tally = CumulativeTally::from_sorted(&sorted);
    let mut consumed = 0;
    let entries = boundaries
        .windows(2)
        .map(|bounds| {
            let interval = ClassInterval::new(bounds[0], bounds[1]);
            let below = tally.count_below(interval.stop().to_f64());
            let freq = below - consumed;
            consumed = below;
            ClassEntry {
                interval,
                freq,
                rfreq: None,
                cfreq: None,
            }
        })
        .collect::<Vec<_>>();

    let freqsum = sorted.len() as u64;
    debug_assert_eq!(consumed, freqsum, "classes must cover the whole sample");

    Ok(ClassFrequencyTable {
        entries,
        freqsum,
        rfreqsum: None,
    })
}

fn sorted_finite<T>(samples: &[T]) -> Result<Vec<f64>, ClassError>
where
    T: Numeric,
{
    if samples.is_empty() {
        return Err(ClassError::EmptySample);
    }
    let mut sorted = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let value = sample.to_f64();
            if !value.is_finite() {
                Err(ClassError::NonFiniteSample { index })
            } else if value.abs() >= EXACT_LIMIT_F64 {
                Err(ClassError::SampleOutOfRange { index })
            } else {
                Ok(value)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// `⌈√n⌉`, the number of classes used when none is given.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
fn default_num_classes(n: usize) -> usize {
    (n as f64).sqrt().ceil() as usize
}

/// Every integer of magnitude up to `2^53` has an exact `f64` representation.
///
/// Samples must lie strictly inside this range and boundaries within it, so
/// that comparing samples against boundaries in `f64` is exact.
const EXACT_LIMIT: i64 = 1 << 53;
const EXACT_LIMIT_F64: f64 = 9_007_199_254_740_992.0;

/// `value` must already be known to lie inside `±2^53`.
#[expect(clippy::cast_possible_truncation)]
fn floor_to_i64(value: f64) -> i64 {
    value.floor() as i64
}

fn exact_boundary(boundary: i64) -> Result<i64, ClassError> {
    if (-EXACT_LIMIT..=EXACT_LIMIT).contains(&boundary) {
        Ok(boundary)
    } else {
        Err(ClassError::BoundaryOutOfRange)
    }
}

/// Boundaries of `num_classes` equal-width intervals starting at `min`.
///
/// The last boundary is raised to `⌊max⌋ + 1` when needed so that `max`
/// falls inside the final half-open interval.
///
/// At most `max(⌊max⌋ − ⌊min⌋ + 1, sample_len)` classes may be requested:
/// beyond that every extra class is an empty interval past the maximum.
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn equal_width_boundaries(
    min: f64,
    max: f64,
    num_classes: usize,
    sample_len: usize,
) -> Result<Vec<i64>, ClassError> {
    if num_classes == 0 {
        return Err(ClassError::ZeroClasses);
    }
    let start = floor_to_i64(min);
    let top = floor_to_i64(max);
    let slots = usize::try_from(top - start + 1).unwrap_or(usize::MAX);
    let limit = slots.max(sample_len);
    if num_classes > limit {
        return Err(ClassError::TooManyClasses { num_classes, limit });
    }

    let width = (((max - min) / num_classes as f64).ceil() as i64).max(1);
    log::debug!("{num_classes} classes of width {width} starting at {start}");
    let last = i64::try_from(num_classes)
        .ok()
        .and_then(|k| k.checked_mul(width))
        .and_then(|span| start.checked_add(span))
        .ok_or(ClassError::BoundaryOutOfRange)
        .and_then(exact_boundary)?;

    let mut boundaries = (0..num_classes)
        .scan(start, |boundary, _| {
            let current = *boundary;
            *boundary += width;
            Some(current)
        })
        .collect::<Vec<_>>();
    boundaries.push(last.max(top + 1));
    Ok(boundaries)
}

/// Validates `cut_points` and widens them to cover `[min, max]`.
///
/// `⌊min⌋` is prepended when `min` lies below the first cut point and `⌊max⌋`
/// is appended when it lies above the last one. The final boundary is then
/// extended by one whenever `max` would otherwise sit on or past it.
fn adjusted_cut_points(min: f64, max: f64, cut_points: &[i64]) -> Result<Vec<i64>, ClassError> {
    if cut_points.len() < 2 {
        return Err(ClassError::TooFewCutPoints {
            len: cut_points.len(),
        });
    }
    if let Some(pos) = cut_points.windows(2).position(|w| w[0] >= w[1]) {
        return Err(ClassError::UnsortedCutPoints { index: pos + 1 });
    }
    for &cut_point in cut_points {
        exact_boundary(cut_point)?;
    }

    let mut boundaries = Vec::with_capacity(cut_points.len() + 2);
    if min < cut_points[0].to_f64() {
        boundaries.push(floor_to_i64(min));
    }
    boundaries.extend_from_slice(cut_points);

    let top = floor_to_i64(max);
    if top > boundaries[boundaries.len() - 1] {
        boundaries.push(top);
    }
    let last = boundaries.len() - 1;
    if max >= boundaries[last].to_f64() {
        // last <= max < 2^53
        boundaries[last] += 1;
    }
    log::debug!("adjusted cut points {cut_points:?} to {boundaries:?}");
    Ok(boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(table: &ClassFrequencyTable) -> Vec<(i64, i64)> {
        table
            .intervals()
            .map(|interval| (interval.start(), interval.stop()))
            .collect()
    }

    fn freqs(table: &ClassFrequencyTable) -> Vec<u64> {
        table.frequencies().collect()
    }

    #[test]
    fn test_two_equal_width_classes() {
        let sample = [1, 2, 2, 3, 4, 4, 4, 5];
        let table = class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
        assert_eq!(bounds(&table), [(1, 3), (3, 6)]);
        assert_eq!(freqs(&table), [3, 5]);
        assert_eq!(table.freqsum(), 8);
        assert_eq!(table.rfreqsum(), None);
    }

    #[test]
    fn test_default_number_of_classes() {
        // 10 values -> ceil(sqrt(10)) = 4 classes of width ceil(9 / 4) = 3
        let sample = (1..=10).collect::<Vec<i32>>();
        let table = class_frequency_table(&sample, &Classing::default()).unwrap();
        assert_eq!(bounds(&table), [(1, 4), (4, 7), (7, 10), (10, 13)]);
        assert_eq!(freqs(&table), [3, 3, 3, 1]);
    }

    #[test]
    fn test_single_distinct_value() {
        let table = class_frequency_table(&[7, 7, 7], &Classing::with_classes(3)).unwrap();
        assert_eq!(bounds(&table), [(7, 8), (8, 9), (9, 10)]);
        assert_eq!(freqs(&table), [3, 0, 0]);
    }

    #[test]
    fn test_float_samples() {
        let sample = [0.5, 1.2, 2.9, 3.0, 4.7];
        let table = class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
        // width = ceil(4.2 / 2) = 3, start = floor(0.5) = 0
        assert_eq!(bounds(&table), [(0, 3), (3, 6)]);
        assert_eq!(freqs(&table), [3, 2]);
    }

    #[test]
    fn test_negative_samples() {
        let sample = [-5, -4, -1, 0, 2];
        let table = class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
        // width = ceil(7 / 2) = 4
        assert_eq!(bounds(&table), [(-5, -1), (-1, 3)]);
        assert_eq!(freqs(&table), [2, 3]);
    }

    #[test]
    fn test_cut_points_inside_sample_range() {
        let sample = [0, 3, 5, 9, 10, 14];
        let table = class_frequency_table(&sample, &Classing::with_cut_points([2, 6, 10])).unwrap();
        assert_eq!(bounds(&table), [(0, 2), (2, 6), (6, 10), (10, 15)]);
        assert_eq!(freqs(&table), [1, 2, 1, 2]);
    }

    #[test]
    fn test_cut_points_covering_sample_range() {
        let sample = [1, 2, 8];
        let table = class_frequency_table(&sample, &Classing::with_cut_points([0, 5, 20])).unwrap();
        assert_eq!(bounds(&table), [(0, 5), (5, 20)]);
        assert_eq!(freqs(&table), [2, 1]);
    }

    #[test]
    fn test_max_on_last_cut_point_is_counted() {
        let sample = [1, 5, 10];
        let table = class_frequency_table(&sample, &Classing::with_cut_points([0, 5, 10])).unwrap();
        assert_eq!(bounds(&table), [(0, 5), (5, 11)]);
        assert_eq!(freqs(&table), [1, 2]);
    }

    #[test]
    fn test_cut_point_validation() {
        let sample = [1, 2, 3];
        assert_eq!(
            class_frequency_table(&sample, &Classing::with_cut_points([4])),
            Err(ClassError::TooFewCutPoints { len: 1 })
        );
        assert_eq!(
            class_frequency_table(&sample, &Classing::with_cut_points([0, 5, 5])),
            Err(ClassError::UnsortedCutPoints { index: 2 })
        );
        assert_eq!(
            class_frequency_table(&sample, &Classing::with_cut_points([3, 1])),
            Err(ClassError::UnsortedCutPoints { index: 1 })
        );
    }

    #[test]
    fn test_sample_validation() {
        assert_eq!(
            class_frequency_table::<i32>(&[], &Classing::default()),
            Err(ClassError::EmptySample)
        );
        assert_eq!(
            class_frequency_table(&[1.0, f64::NAN], &Classing::default()),
            Err(ClassError::NonFiniteSample { index: 1 })
        );
        assert_eq!(
            class_frequency_table(&[1, 2], &Classing::with_classes(0)),
            Err(ClassError::ZeroClasses)
        );
    }

    #[test]
    fn test_samples_at_the_edge_of_exact_range() {
        let max = (1_i64 << 53) - 1;
        let table = class_frequency_table(&[0, max], &Classing::with_classes(2)).unwrap();
        assert_eq!(bounds(&table), [(0, 1 << 52), (1 << 52, 1 << 53)]);
        assert_eq!(freqs(&table), [1, 1]);

        let table = class_frequency_table(&[-max, 0], &Classing::with_cut_points([0, 5])).unwrap();
        assert_eq!(bounds(&table), [(-max, 0), (0, 5)]);
        assert_eq!(freqs(&table), [1, 1]);
    }

    #[test]
    fn test_samples_beyond_exact_range_are_rejected() {
        assert_eq!(
            class_frequency_table(&[0_i64, 1 << 53], &Classing::with_classes(2)),
            Err(ClassError::SampleOutOfRange { index: 1 })
        );
        assert_eq!(
            class_frequency_table(&[i64::MIN, 0], &Classing::default()),
            Err(ClassError::SampleOutOfRange { index: 0 })
        );
        assert_eq!(
            class_frequency_table(&[1.0, 1e20], &Classing::with_classes(2)),
            Err(ClassError::SampleOutOfRange { index: 1 })
        );
        assert_eq!(
            class_frequency_table(&[1.0, 1e20], &Classing::with_cut_points([0, 10])),
            Err(ClassError::SampleOutOfRange { index: 1 })
        );
    }

    #[test]
    fn test_boundaries_beyond_exact_range_are_rejected() {
        // width = ceil((2^53 - 1) / 3) pushes the third stop to 2^53 + 1
        let max = (1_i64 << 53) - 1;
        assert_eq!(
            class_frequency_table(&[0, max], &Classing::with_classes(3)),
            Err(ClassError::BoundaryOutOfRange)
        );
        assert_eq!(
            class_frequency_table(&[1, 2], &Classing::with_cut_points([0, (1 << 53) + 1])),
            Err(ClassError::BoundaryOutOfRange)
        );
        assert_eq!(
            class_frequency_table(&[1, 2], &Classing::with_cut_points([i64::MIN, 0, i64::MAX])),
            Err(ClassError::BoundaryOutOfRange)
        );
    }

    #[test]
    fn test_class_count_limit() {
        assert_eq!(
            class_frequency_table(&[1, 2], &Classing::with_classes(5)),
            Err(ClassError::TooManyClasses {
                num_classes: 5,
                limit: 2
            })
        );
        assert_eq!(
            class_frequency_table(&[1, 2], &Classing::with_classes(usize::MAX)),
            Err(ClassError::TooManyClasses {
                num_classes: usize::MAX,
                limit: 2
            })
        );
        // a span of four integers allows four classes even for two values
        let table = class_frequency_table(&[1, 4], &Classing::with_classes(4)).unwrap();
        assert_eq!(bounds(&table), [(1, 2), (2, 3), (3, 4), (4, 5)]);
        assert_eq!(freqs(&table), [1, 0, 0, 1]);
    }

    #[test]
    fn test_relative_frequencies() {
        let sample = [1, 2, 2, 3, 4, 4, 4, 5];
        let table = relative_class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
        let rfreqs = table
            .entries()
            .iter()
            .map(|entry| entry.rfreq.unwrap())
            .collect::<Vec<_>>();
        assert_eq!(rfreqs, [0.375, 0.625]);
        assert!((table.rfreqsum().unwrap() - 1.0).abs() < 1e-9);
        assert!(table.entries().iter().all(|entry| entry.cfreq.is_none()));
    }

    #[test]
    fn test_cumulative_frequencies() {
        let sample = [1, 2, 2, 3, 4, 4, 4, 5, 9, 9];
        let table = cumulative_class_frequency_table(&sample, &Classing::with_classes(4)).unwrap();
        let cfreqs = table
            .entries()
            .iter()
            .map(|entry| entry.cfreq.unwrap())
            .collect::<Vec<_>>();
        assert!(cfreqs.is_sorted());
        assert_eq!(cfreqs.last(), Some(&table.freqsum()));
        assert_eq!(table.rfreqsum(), None);
    }

    #[test]
    fn test_derivations_do_not_share_state() {
        let sample = [1, 2, 3];
        let plain = class_frequency_table(&sample, &Classing::default()).unwrap();
        let _relative = relative_class_frequency_table(&sample, &Classing::default()).unwrap();
        assert!(plain.entries().iter().all(|entry| entry.rfreq.is_none()));
    }

    #[test]
    fn test_get_and_convert() {
        let sample = [1, 2, 2, 3, 4, 4, 4, 5];
        let table = class_frequency_table(&sample, &Classing::with_cut_points([1, 3, 5, 8])).unwrap();
        assert_eq!(freqs(&table), [3, 4, 1]);
        assert_eq!(table.get(ClassInterval::new(3, 5)).unwrap().freq, 4);
        assert!(table.get(ClassInterval::new(3, 4)).is_none());

        let converted = table.to_frequency_table();
        assert_eq!(converted.get(&ClassInterval::new(5, 8)), Some(1));
        assert_eq!(converted.total(), 8);
    }

    #[test]
    fn test_convert_drops_empty_classes() {
        let table = class_frequency_table(&[7, 7, 7], &Classing::with_classes(3)).unwrap();
        let converted = table.to_frequency_table();
        assert_eq!(converted.to_vec(), [(ClassInterval::new(7, 8), 3)]);
    }

    #[test]
    fn test_display() {
        let sample = [1, 2, 2, 3, 4, 4, 4, 5];
        let table = class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
        assert_eq!(
            table.to_string(),
            "Class     Frequency\n1-3       3\n3-6       5"
        );

        let table =
            derived_class_frequency_table(&sample, &Classing::with_classes(2), Derivations {
                relative: true,
                cumulative: true,
            })
            .unwrap();
        let lines = table.to_string().lines().map(str::to_owned).collect::<Vec<_>>();
        assert_eq!(lines[0], "Class     Frequency       Relative       Cumulative");
        assert_eq!(lines[1], "1-3       3               0.3750         3");
        assert_eq!(lines[2], "3-6       5               0.6250         8");
    }

    #[test]
    fn test_serialize_flat_map() {
        let sample = [1, 2, 2, 3, 4, 4, 4, 5];
        let table = cumulative_class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"1-3":{"freq":3,"cfreq":3},"3-6":{"freq":5,"cfreq":8},"freqsum":8}"#
        );

        let table = relative_class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["1-3"]["rfreq"], 0.375);
        assert_eq!(value["freqsum"], 8);
        assert!((value["rfreqsum"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cumulative_tally() {
        let tally = CumulativeTally::from_sorted(&[1.0, 1.0, 2.0, 4.0, 4.0, 4.0]);
        assert_eq!(tally.values, [1.0, 2.0, 4.0]);
        assert_eq!(tally.cumulative, [2, 3, 6]);
        assert_eq!(tally.count_below(1.0), 0);
        assert_eq!(tally.count_below(1.5), 2);
        assert_eq!(tally.count_below(4.0), 3);
        assert_eq!(tally.count_below(100.0), 6);
    }
}
