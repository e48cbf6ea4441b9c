//! # Queries
//!
//! Filtered, sorted listings. Filters are predicates combined with logical AND; a query
//! sorts on at most one key.

use std::cmp::Ordering;
use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Direction of a [`Query`] sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A listing request evaluated inside the owning actor.
///
/// ```rust
/// use entity_store::{Query, SortOrder};
///
/// let query = Query::<(u32, &'static str)>::all()
///     .filter(|row| row.0 > 1)
///     .sort_by(|row| row.0, SortOrder::Descending);
///
/// let rows = vec![(1, "a"), (3, "c"), (2, "b")];
/// let picked = query.apply(rows.iter());
/// assert_eq!(picked, vec![(3, "c"), (2, "b")]);
/// ```
pub struct Query<T> {
    filters: Vec<Predicate<T>>,
    sort: Option<(Comparator<T>, SortOrder)>,
    limit: Option<usize>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            limit: None,
        }
    }
}

impl<T: 'static> Query<T> {
    /// Matches every entity, unsorted.
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a predicate. All predicates must hold for an entity to be listed.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Adds a predicate only when `value` is present.
    pub fn filter_opt<V>(
        self,
        value: Option<V>,
        predicate: impl Fn(&T, &V) -> bool + Send + Sync + 'static,
    ) -> Self
    where
        V: Send + Sync + 'static,
    {
        match value {
            Some(value) => self.filter(move |item| predicate(item, &value)),
            None => self,
        }
    }

    /// Sorts the result on one key. A later call replaces the earlier key.
    pub fn sort_by<K>(
        mut self,
        key: impl Fn(&T) -> K + Send + Sync + 'static,
        order: SortOrder,
    ) -> Self
    where
        K: Ord + 'static,
    {
        self.sort = Some((Box::new(move |a: &T, b: &T| key(a).cmp(&key(b))), order));
        self
    }

    /// Truncates the result after sorting.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when `item` passes every filter.
    pub fn matches(&self, item: &T) -> bool {
        self.filters.iter().all(|predicate| predicate(item))
    }

    /// Runs the query over `items`.
    pub fn apply<'a, I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        let mut picked: Vec<T> = items
            .into_iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect();

        if let Some((compare, order)) = &self.sort {
            match order {
                SortOrder::Ascending => picked.sort_by(|a, b| compare(a, b)),
                SortOrder::Descending => picked.sort_by(|a, b| compare(b, a)),
            }
        }
        if let Some(limit) = self.limit {
            picked.truncate(limit);
        }
        picked
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filters", &self.filters.len())
            .field("sort", &self.sort.as_ref().map(|(_, order)| *order))
            .field("limit", &self.limit)
            .finish()
    }
}
