//! Sorted sets of document ids.

/// An ascending, duplicate-free set of document ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocSet {
    ids: Vec<u64>,
}

impl DocSet {
    /// The empty set.
    pub fn new() -> Self {
        DocSet { ids: Vec::new() }
    }

    /// Wrap ids that are already ascending and unique.
    pub fn from_sorted(ids: Vec<u64>) -> Self {
        debug_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        DocSet { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, doc_id: u64) -> bool {
        self.ids.binary_search(&doc_id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.ids
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.ids
    }

    /// Ids present in both sets.
    pub fn intersect(&self, other: &DocSet) -> DocSet {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        DocSet {
            ids: small.iter().filter(|&id| large.contains(id)).collect(),
        }
    }

    /// Ids present in either set.
    pub fn union(&self, other: &DocSet) -> DocSet {
        let mut ids = Vec::with_capacity(self.len() + other.len());
        let (mut a, mut b) = (self.ids.iter().peekable(), other.ids.iter().peekable());
        loop {
            let heads = (a.peek().map(|&&x| x), b.peek().map(|&&y| y));
            let next = match heads {
                (Some(x), Some(y)) if x < y => a.next(),
                (Some(x), Some(y)) if x > y => b.next(),
                (Some(_), Some(_)) => {
                    b.next();
                    a.next()
                }
                (Some(_), None) => a.next(),
                (None, Some(_)) => b.next(),
                (None, None) => break,
            };
            ids.extend(next.copied());
        }
        DocSet { ids }
    }

    /// Ids in `self` but not in `other`.
    pub fn difference(&self, other: &DocSet) -> DocSet {
        if other.is_empty() {
            return self.clone();
        }
        DocSet {
            ids: self.iter().filter(|&id| !other.contains(id)).collect(),
        }
    }

    /// Intersection of every set; empty for no sets.
    pub fn intersect_all<I: IntoIterator<Item = DocSet>>(sets: I) -> DocSet {
        let mut sets: Vec<DocSet> = sets.into_iter().collect();
        sets.sort_by_key(DocSet::len);
        let mut sets = sets.into_iter();
        let Some(first) = sets.next() else {
            return DocSet::new();
        };
        sets.fold(first, |acc, set| {
            if acc.is_empty() {
                acc
            } else {
                acc.intersect(&set)
            }
        })
    }

    /// Union of every set.
    pub fn union_all<I: IntoIterator<Item = DocSet>>(sets: I) -> DocSet {
        sets.into_iter()
            .fold(DocSet::new(), |acc, set| acc.union(&set))
    }
}

impl FromIterator<u64> for DocSet {
    /// Collect ids in any order; duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut ids: Vec<u64> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        DocSet { ids }
    }
}
