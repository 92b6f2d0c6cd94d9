use std::hash::Hash;

use crate::{
    numeric::Numeric,
    table::{FrequencyTable, TableError},
};

/// Measures of central tendency over a weighted multiset.
///
/// A frequency table is read as a multiset in which each item is repeated
/// `frequency` times. None of the measures has a meaningful value for an
/// empty table, so they all fail with [`TableError::EmptyTable`] instead of
/// returning a sentinel.
pub trait CentralTendency {
    /// The type returned by [`Self::mode`].
    type Item;

    /// `Σ(item × frequency) / total`.
    fn mean(&self) -> Result<f64, TableError>;

    /// The middle value of the weighted multiset in ascending order.
    ///
    /// With `total` values, an odd `total` yields the value at index
    /// `total / 2`; an even `total` yields the average of the values at
    /// indices `total / 2 - 1` and `total / 2`.
    fn median(&self) -> Result<f64, TableError>;

    /// An item with maximal frequency.
    ///
    /// When several items share the maximal frequency only one is returned:
    /// the first of them in table order.
    fn mode(&self) -> Result<Self::Item, TableError>;
}

/// Statistics for discrete values and for class intervals.
///
/// Intervals are placed at their midpoint, which turns mean and median into
/// the usual grouped-data estimates and mode into the modal class.
///
/// # Examples
///
/// ```
/// use freqdist_stats::{statistics::CentralTendency as _, table::FrequencyTable};
///
/// let table = FrequencyTable::from_items([1, 2, 2, 3, 3, 3]);
/// assert!((table.mean().unwrap() - 7.0 / 3.0).abs() < 1e-12);
/// assert_eq!(table.median().unwrap(), 2.5);
/// assert_eq!(table.mode().unwrap(), 3);
/// ```
impl<K> CentralTendency for FrequencyTable<K>
where
    K: Numeric + Ord + Eq + Hash + Clone,
{
    type Item = K;

    #[expect(clippy::cast_precision_loss)]
    fn mean(&self) -> Result<f64, TableError> {
        if self.is_empty() {
            return Err(TableError::EmptyTable { operation: "mean" });
        }
        let weighted_sum = self
            .iter()
            .map(|(item, freq)| item.to_f64() * freq as f64)
            .sum::<f64>();
        Ok(weighted_sum / self.total() as f64)
    }

    fn median(&self) -> Result<f64, TableError> {
        if self.is_empty() {
            return Err(TableError::EmptyTable {
                operation: "median",
            });
        }

        let mut sorted = self.iter().collect::<Vec<_>>();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let total = self.total();
        let mid = total / 2;
        if total % 2 == 1 {
            Ok(weighted_nth(&sorted, mid).to_f64())
        } else {
            let upper = weighted_nth(&sorted, mid).to_f64();
            let lower = weighted_nth(&sorted, mid - 1).to_f64();
            Ok(f64::midpoint(lower, upper))
        }
    }

    fn mode(&self) -> Result<K, TableError> {
        if self.is_empty() {
            return Err(TableError::EmptyTable { operation: "mode" });
        }
        self.top_n(1)?
            .items()
            .next()
            .cloned()
            .ok_or(TableError::EmptyTable { operation: "mode" })
    }
}

/// Returns the element at `index` of the multiset expanded in the order of
/// `sorted`, without materializing the expansion.
fn weighted_nth<'a, K>(sorted: &[(&'a K, u64)], index: u64) -> &'a K {
    let mut seen = 0;
    for &(item, freq) in sorted {
        seen += freq;
        if index < seen {
            return item;
        }
    }
    panic!("index {index} out of range for a multiset of {seen} values");
}
