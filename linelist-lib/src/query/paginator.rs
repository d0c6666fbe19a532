//! Pagination state.

/// Skip/limit pair for paging through list results.
///
/// An unset limit means "unbounded"; an unset skip means "from the start".
/// Empty state emits no `limit`/`skip` keys in the serialized query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paginator {
    skip: Option<u64>,
    limit: Option<u64>,
}

impl Paginator {
    /// Creates an empty paginator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of records to return.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of records to skip.
    pub fn skip(&mut self, skip: u64) -> &mut Self {
        self.skip = Some(skip);
        self
    }

    /// Takes `other`'s values for any bound `other` has set.
    pub fn merge(&mut self, other: &Paginator) -> &mut Self {
        if let Some(limit) = other.limit {
            self.limit = Some(limit);
        }
        if let Some(skip) = other.skip {
            self.skip = Some(skip);
        }
        self
    }

    /// Resets both counters to unset.
    pub fn clear(&mut self) -> &mut Self {
        self.skip = None;
        self.limit = None;
        self
    }

    /// Returns `true` if neither counter is set.
    pub fn is_empty(&self) -> bool {
        self.skip.is_none() && self.limit.is_none()
    }

    /// Returns the limit, if set.
    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the skip, if set.
    pub fn skip_value(&self) -> Option<u64> {
        self.skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut paginator = Paginator::new();
        paginator.limit(25).skip(50);
        assert_eq!(paginator.limit_value(), Some(25));
        assert_eq!(paginator.skip_value(), Some(50));

        paginator.clear();
        assert!(paginator.is_empty());
    }

    #[test]
    fn test_merge_overrides_only_set_bounds() {
        let mut current = Paginator::new();
        current.limit(10).skip(5);

        let mut other = Paginator::new();
        other.limit(99);

        current.merge(&other);
        assert_eq!(current.limit_value(), Some(99));
        assert_eq!(current.skip_value(), Some(5));
    }
}
