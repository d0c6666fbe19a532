//! Sort criteria for query results.

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the serialized direction name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Priority-ordered list of sort criteria.
///
/// The first entry sorts most significantly; later entries break ties.
/// Re-adding a field that is already present updates its direction in
/// place without changing its priority.
///
/// # Example
///
/// ```
/// use linelist_lib::query::Direction;
/// use linelist_lib::query::SortList;
///
/// let mut sort = SortList::new();
/// sort.by("dateOfReporting", Direction::Desc)
///     .by("lastName", Direction::Asc);
/// assert_eq!(sort.entries().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortList {
    entries: Vec<(String, Direction)>,
}

impl SortList {
    /// Creates an empty sort list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort criterion, or updates the direction of an existing
    /// one.
    ///
    /// If `field` is already present its entry keeps its position (priority)
    /// and only the direction changes.
    pub fn by(&mut self, field: impl Into<String>, direction: Direction) -> &mut Self {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = direction,
            None => self.entries.push((field, direction)),
        }
        self
    }

    /// Appends `other`'s criteria after the current ones.
    ///
    /// Fields already present keep their current direction and priority.
    pub fn merge(&mut self, other: &SortList) -> &mut Self {
        for (field, direction) in &other.entries {
            if !self.entries.iter().any(|(name, _)| name == field) {
                self.entries.push((field.clone(), *direction));
            }
        }
        self
    }

    /// Removes every sort criterion.
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    /// Returns `true` if no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of criteria.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the criteria in priority order.
    pub fn entries(&self) -> &[(String, Direction)] {
        &self.entries
    }
}
