//! Mutable frequency tables.
//!
//! A [`FrequencyTable`] maps each distinct item to the number of times it has
//! been observed. Frequencies are always positive: an entry whose frequency
//! would drop to zero or below is removed instead of stored.
//!
//! Entries are kept in an explicit order. Items appear in first-insertion
//! order until [`FrequencyTable::sort`] or
//! [`FrequencyTable::sort_by_frequency`] reorders them, and every operation
//! that walks the table walks it in that order.
//!
//! Operations that filter or select ([`filter_by_freq`], [`filter_by_class`],
//! [`subset`], [`top_n`], [`lowest_n`], [`generate_random_data`]) return a
//! new table and leave the receiver untouched. The new table owns its own
//! copy of every entry it retains.
//!
//! [`filter_by_freq`]: FrequencyTable::filter_by_freq
//! [`filter_by_class`]: FrequencyTable::filter_by_class
//! [`subset`]: FrequencyTable::subset
//! [`top_n`]: FrequencyTable::top_n
//! [`lowest_n`]: FrequencyTable::lowest_n
//! [`generate_random_data`]: FrequencyTable::generate_random_data
//!
//! # Examples
//!
//! ```
//! use freqdist_stats::table::{FrequencyTable, SortKey};
//!
//! let mut table = FrequencyTable::from_items(["b", "a", "b", "c", "b", "a"]);
//! assert_eq!(table.get("b"), Some(3));
//! assert_eq!(table.total(), 6);
//!
//! table.sort(SortKey::Item, true);
//! assert_eq!(table.items().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
//!
//! let common = table.top_n(2).unwrap();
//! assert_eq!(common.to_vec(), [("b", 3), ("a", 2)]);
//! ```

use std::{
    borrow::Borrow,
    collections::{HashMap, HashSet},
    fmt,
    hash::Hash,
    mem,
    str::FromStr,
};

use rand::Rng;
use serde::{Serialize, Serializer, ser::SerializeMap as _};

/// Extra width added to the widest rendered key in the text form of a table.
pub(crate) const DISPLAY_PADDING: usize = 7;

/// Errors raised by frequency table operations.
///
/// All of them are raised before the receiver is touched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("cannot compute the {operation} of an empty frequency table")]
    EmptyTable { operation: &'static str },
    #[display("invalid count {n}: it must be greater than zero")]
    NonPositiveCount { n: usize },
    #[display("invalid sort type `{name}`: expected `item` or `freq`")]
    InvalidSortType { name: String },
}

/// What [`FrequencyTable::sort`] orders entries by.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Order by the item itself.
    Item,
    /// Order by frequency.
    #[default]
    Frequency,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::Item => "item",
            SortKey::Frequency => "freq",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(SortKey::Item),
            "freq" => Ok(SortKey::Frequency),
            _ => Err(TableError::InvalidSortType { name: s.to_owned() }),
        }
    }
}

/// Why a bulk operation skipped, kept or dropped one item.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DiagnosticKind {
    /// The filter predicate failed; the item was excluded.
    #[display("predicate failed: {message}")]
    PredicateFailed { message: String },
    /// The mapping function failed; the item was left unmodified.
    #[display("mapping failed: {message}")]
    MappingFailed { message: String },
    /// The frequency operation produced a non-positive value; the item was removed.
    #[display("removed since its new frequency {frequency} <= 0")]
    NonPositiveFrequency { frequency: i64 },
}

/// A per-item report from a best-effort bulk operation.
///
/// Bulk operations never abort for a single bad item. Each one that has to
/// skip, keep or remove an item returns one of these and also emits it
/// through the `log` facade at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic<K> {
    pub item: K,
    pub kind: DiagnosticKind,
}

impl<K> Diagnostic<K>
where
    K: fmt::Debug,
{
    fn new(item: K, kind: DiagnosticKind) -> Self {
        log::warn!("{item:?}: {kind}");
        Self { item, kind }
    }
}

impl<K> fmt::Display for Diagnostic<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.item, self.kind)
    }
}

/// A mapping from item to positive frequency with a stable iteration order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

/// A frequency table over discrete, orderable values.
///
/// Tables keyed by [`ClassInterval`](crate::interval::ClassInterval) are the
/// interval variant; both share the same algebra and the same
/// [`CentralTendency`](crate::statistics::CentralTendency) implementation.
pub type DiscreteFrequencyTable<K> = FrequencyTable<K>;

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: vec![],
            index: HashMap::new(),
        }
    }
}

impl<K> PartialEq for FrequencyTable<K>
where
    K: Eq + Hash,
{
    /// Two tables are equal when they hold the same items with the same
    /// frequencies, whatever their order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(item, freq)| other.get(item) == Some(*freq))
    }
}

impl<K> Eq for FrequencyTable<K> where K: Eq + Hash {}

impl<K> FrequencyTable<K> {
    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all frequencies.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, freq)| freq).sum()
    }

    /// Iterates over `(item, frequency)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.entries.iter().map(|(item, freq)| (item, *freq))
    }

    /// Iterates over the distinct items in table order.
    pub fn items(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(item, _)| item)
    }

    /// Iterates over the frequencies in table order.
    pub fn frequencies(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(_, freq)| *freq)
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash,
{
    /// Returns the frequency of `item`, or `None` if it was never observed.
    #[must_use]
    pub fn get<Q>(&self, item: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(item).map(|&pos| self.entries[pos].1)
    }

    #[must_use]
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(item)
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table by tallying `items`.
    #[must_use]
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut table = Self::new();
        table.append(items);
        table
    }

    fn from_entries(entries: Vec<(K, u64)>) -> Self {
        let mut table = Self {
            entries,
            index: HashMap::new(),
        };
        table.reindex();
        table
    }

    fn reindex(&mut self) {
        self.index.clear();
        self.index.reserve(self.entries.len());
        for (pos, (item, _)) in self.entries.iter().enumerate() {
            self.index.insert(item.clone(), pos);
        }
    }

    fn add(&mut self, item: K, freq: u64) {
        debug_assert!(freq > 0, "frequencies must be positive");
        if let Some(&pos) = self.index.get(&item) {
            self.entries[pos].1 += freq;
        } else {
            self.index.insert(item.clone(), self.entries.len());
            self.entries.push((item, freq));
        }
    }

    /// Adds `freq` occurrences of `item`.
    ///
    /// A zero frequency leaves the table unchanged.
    pub fn add_frequency(&mut self, item: K, freq: u64) {
        if freq > 0 {
            self.add(item, freq);
        }
    }

    /// Returns an independent copy of the item-to-frequency mapping.
    #[must_use]
    pub fn to_map(&self) -> HashMap<K, u64> {
        self.entries.iter().cloned().collect()
    }

    /// Returns an independent copy of the `(item, frequency)` pairs in table order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<(K, u64)> {
        self.entries.clone()
    }

    /// Tallies `items` and adds the counts to the table.
    ///
    /// Items not yet present are appended in first-seen order.
    pub fn append<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = K>,
    {
        for item in items {
            self.add(item, 1);
        }
    }

    /// Adds every `(item, frequency)` pair of `other` to the table.
    pub fn merge(&mut self, other: &Self) {
        for (item, freq) in &other.entries {
            self.add(item.clone(), *freq);
        }
    }

    /// Reorders the entries by frequency.
    ///
    /// The sort is stable: items with equal frequencies keep their relative order.
    pub fn sort_by_frequency(&mut self, ascending: bool) {
        if ascending {
            self.entries.sort_by(|a, b| a.1.cmp(&b.1));
        } else {
            self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        }
        self.reindex();
    }

    /// Reorders the entries by item or by frequency.
    ///
    /// The sort is stable in both directions.
    pub fn sort(&mut self, by: SortKey, ascending: bool)
    where
        K: Ord,
    {
        match by {
            SortKey::Frequency => self.sort_by_frequency(ascending),
            SortKey::Item => {
                if ascending {
                    self.entries.sort_by(|a, b| a.0.cmp(&b.0));
                } else {
                    self.entries.sort_by(|a, b| b.0.cmp(&a.0));
                }
                self.reindex();
            }
        }
    }

    /// Returns a table of the items whose frequency lies in `[min, max]`.
    #[must_use]
    pub fn filter_by_freq(&self, min: u64, max: u64) -> Self {
        self.filter_by_class(|_, freq| (min..=max).contains(&freq))
    }

    /// Returns a table of the items for which `predicate(item, frequency)` holds.
    #[must_use]
    pub fn filter_by_class<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, u64) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .filter(|(item, freq)| predicate(item, *freq))
            .cloned()
            .collect();
        Self::from_entries(entries)
    }

    /// Like [`Self::filter_by_class`], with a fallible predicate.
    ///
    /// An item whose predicate fails is excluded and reported; the remaining
    /// items are still evaluated.
    pub fn try_filter_by_class<P, E>(&self, mut predicate: P) -> (Self, Vec<Diagnostic<K>>)
    where
        K: fmt::Debug,
        P: FnMut(&K, u64) -> Result<bool, E>,
        E: fmt::Display,
    {
        let mut diagnostics = vec![];
        let mut entries = vec![];
        for (item, freq) in &self.entries {
            match predicate(item, *freq) {
                Ok(true) => entries.push((item.clone(), *freq)),
                Ok(false) => {}
                Err(e) => diagnostics.push(Diagnostic::new(
                    item.clone(),
                    DiagnosticKind::PredicateFailed {
                        message: e.to_string(),
                    },
                )),
            }
        }
        (Self::from_entries(entries), diagnostics)
    }

    /// Returns a table restricted to `elements`.
    ///
    /// Elements that are not in the table are omitted rather than inserted
    /// with a zero frequency. The result follows the order of `elements`.
    #[must_use]
    pub fn subset<'a, Q, I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = &'a Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let mut seen = HashSet::new();
        let entries = elements
            .into_iter()
            .filter_map(|element| self.index.get(element))
            .filter(|&&pos| seen.insert(pos))
            .map(|&pos| self.entries[pos].clone())
            .collect();
        Self::from_entries(entries)
    }

    /// Returns a table of the `n` items with the highest frequencies.
    ///
    /// Selection looks at frequencies only. Among equal frequencies the item
    /// that comes first in table order wins. The result is ordered from the
    /// highest frequency down.
    pub fn top_n(&self, n: usize) -> Result<Self, TableError> {
        self.select_n(n, |a, b| b.cmp(&a))
    }

    /// Returns a table of the `n` items with the lowest frequencies.
    ///
    /// Ties are broken as in [`Self::top_n`]. The result is ordered from the
    /// lowest frequency up.
    pub fn lowest_n(&self, n: usize) -> Result<Self, TableError> {
        self.select_n(n, |a, b| a.cmp(&b))
    }

    fn select_n<F>(&self, n: usize, mut compare: F) -> Result<Self, TableError>
    where
        F: FnMut(u64, u64) -> std::cmp::Ordering,
    {
        if n == 0 {
            return Err(TableError::NonPositiveCount { n });
        }
        let mut ranked = self.entries.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| compare(a.1, b.1));
        let entries = ranked.into_iter().take(n).cloned().collect();
        Ok(Self::from_entries(entries))
    }

    /// Replaces every item `k` with `f(k)`.
    ///
    /// All items are mapped at once; items that map to the same new item have
    /// their frequencies summed.
    pub fn map_elements<F>(&mut self, mut f: F)
    where
        F: FnMut(&K) -> K,
    {
        let entries = mem::take(&mut self.entries);
        self.index.clear();
        for (item, freq) in entries {
            self.add(f(&item), freq);
        }
    }

    /// Like [`Self::map_elements`], with a fallible mapping.
    ///
    /// An item whose mapping fails keeps its key and is reported.
    pub fn try_map_elements<F, E>(&mut self, mut f: F) -> Vec<Diagnostic<K>>
    where
        K: fmt::Debug,
        F: FnMut(&K) -> Result<K, E>,
        E: fmt::Display,
    {
        let mut diagnostics = vec![];
        let entries = mem::take(&mut self.entries);
        self.index.clear();
        for (item, freq) in entries {
            match f(&item) {
                Ok(mapped) => self.add(mapped, freq),
                Err(e) => {
                    diagnostics.push(Diagnostic::new(
                        item.clone(),
                        DiagnosticKind::MappingFailed {
                            message: e.to_string(),
                        },
                    ));
                    self.add(item, freq);
                }
            }
        }
        diagnostics
    }

    /// Replaces every frequency `v` with `f(v)`.
    ///
    /// Items whose new frequency is zero or negative are removed from the
    /// table and reported.
    pub fn apply_frequency_operation<F>(&mut self, mut f: F) -> Vec<Diagnostic<K>>
    where
        K: fmt::Debug,
        F: FnMut(u64) -> i64,
    {
        let mut diagnostics = vec![];
        let entries = mem::take(&mut self.entries);
        for (item, freq) in entries {
            let frequency = f(freq);
            match u64::try_from(frequency) {
                Ok(new_freq) if new_freq > 0 => self.entries.push((item, new_freq)),
                _ => diagnostics.push(Diagnostic::new(
                    item,
                    DiagnosticKind::NonPositiveFrequency { frequency },
                )),
            }
        }
        self.reindex();
        diagnostics
    }

    /// Draws `n` items from the table's empirical distribution using the
    /// thread-local random generator.
    ///
    /// See [`Self::generate_random_data_with`].
    pub fn generate_random_data(&self, n: usize) -> Result<Self, TableError> {
        self.generate_random_data_with(n, &mut rand::rng())
    }

    /// Draws `n` items from the table's empirical distribution.
    ///
    /// Each item is drawn with probability `frequency / total` by inverse-CDF
    /// lookup over the cumulative frequencies: a uniform draw `u` in
    /// `[0, total)` selects the first item whose cumulative frequency is
    /// strictly greater than `u`. A draw that lands exactly on a cumulative
    /// boundary therefore belongs to the following item.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqdist_stats::table::FrequencyTable;
    /// use rand::{SeedableRng as _, rngs::StdRng};
    ///
    /// let table = FrequencyTable::from_items([1, 1, 1, 2]);
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let sample = table.generate_random_data_with(100, &mut rng).unwrap();
    /// assert_eq!(sample.total(), 100);
    /// assert!(sample.items().all(|item| table.contains(item)));
    /// ```
    pub fn generate_random_data_with<R>(&self, n: usize, rng: &mut R) -> Result<Self, TableError>
    where
        R: Rng + ?Sized,
    {
        if n == 0 {
            return Err(TableError::NonPositiveCount { n });
        }
        if self.is_empty() {
            return Err(TableError::EmptyTable {
                operation: "random sample",
            });
        }

        let cumulative = self
            .entries
            .iter()
            .scan(0, |acc, (_, freq)| {
                *acc += freq;
                Some(*acc)
            })
            .collect::<Vec<u64>>();
        let total = cumulative[cumulative.len() - 1];

        let mut sample = Self::new();
        for _ in 0..n {
            let draw = rng.random_range(0..total);
            let pos = bucket_of(&cumulative, draw);
            sample.add(self.entries[pos].0.clone(), 1);
        }
        Ok(sample)
    }
}

/// Index of the first bucket whose cumulative frequency exceeds `draw`.
fn bucket_of(cumulative: &[u64], draw: u64) -> usize {
    cumulative.partition_point(|&bound| bound <= draw)
}

impl<K> FromIterator<K> for FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<K> Extend<K> for FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.append(iter);
    }
}

/// Renders the table as two left-justified columns, `Class` and `Frequency`.
impl<K> fmt::Display for FrequencyTable<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self
            .entries
            .iter()
            .map(|(item, _)| item.to_string())
            .collect::<Vec<_>>();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) + DISPLAY_PADDING;

        write!(f, "{:<width$}Frequency", "Class")?;
        for (label, (_, freq)) in labels.iter().zip(&self.entries) {
            write!(f, "\n{label:<width$}{freq}")?;
        }
        Ok(())
    }
}

/// Serializes as a map from item to frequency, in table order.
impl<K> Serialize for FrequencyTable<K>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (item, freq) in &self.entries {
            map.serialize_entry(item, freq)?;
        }
        map.end()
    }
}
