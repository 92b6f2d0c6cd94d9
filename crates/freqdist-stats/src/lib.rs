//! Frequency distributions for small in-memory samples.
//!
//! This crate provides:
//!
//! - **Frequency tables**: a mutable item-to-frequency mapping with merging,
//!   filtering, top/bottom-k selection, remapping and resampling
//! - **Central tendency**: mean, median and mode over a frequency table read
//!   as a weighted multiset
//! - **Class frequency tables**: bucketing of numeric samples into
//!   half-open integer intervals, with relative and cumulative frequencies
//! - **Sample summaries**: mean, variance, percentiles and IQR of a raw sample
//!
//! # Modules
//!
//! - [`table`]: The [`FrequencyTable`](table::FrequencyTable) type and its algebra
//! - [`statistics`]: The [`CentralTendency`](statistics::CentralTendency) trait
//! - [`class`]: Interval bucketing and its relative/cumulative derivations
//! - [`interval`]: Half-open class intervals
//! - [`summary`]: Descriptive statistics of raw samples
//! - [`numeric`]: Conversion of items and samples to `f64`
//!
//! # Examples
//!
//! ## Counting discrete values
//!
//! ```
//! use freqdist_stats::{statistics::CentralTendency as _, table::FrequencyTable};
//!
//! let table = FrequencyTable::from_items([1, 2, 2, 3, 3, 3]);
//! assert_eq!(table.get(&3), Some(3));
//! assert_eq!(table.mode().unwrap(), 3);
//! assert_eq!(table.median().unwrap(), 2.5);
//! ```
//!
//! ## Bucketing a numeric sample
//!
//! ```
//! use freqdist_stats::class::{Classing, relative_class_frequency_table};
//!
//! let sample = [1, 2, 2, 3, 4, 4, 4, 5];
//! let table = relative_class_frequency_table(&sample, &Classing::with_classes(2)).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.freqsum(), 8);
//! assert!((table.rfreqsum().unwrap() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Summarizing a raw sample
//!
//! ```
//! use freqdist_stats::summary::SampleSummary;
//!
//! let summary = SampleSummary::new([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
//! assert_eq!(summary.mean, 5.5);
//! assert_eq!(summary.percentile(0.2), 2.5);
//! ```

pub mod class;
pub mod interval;
pub mod numeric;
pub mod statistics;
pub mod summary;
pub mod table;
