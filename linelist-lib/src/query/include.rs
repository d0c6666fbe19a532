//! Relation includes with optional nested scopes.

use super::builder::RequestQuery;

/// A single relation include.
///
/// An include may carry its own nested [`RequestQuery`] scoping the related
/// collection independently of the root query (its own where, order, fields
/// and pagination).
///
/// # Example
///
/// ```
/// use linelist_lib::query::Include;
///
/// let mut include = Include::new("relationships");
/// include.scope_mut().limit(5);
/// assert!(include.has_scope());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    relation: String,
    scope: Option<Box<RequestQuery>>,
}

impl Include {
    /// Creates an include with no scope.
    pub fn new(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            scope: None,
        }
    }

    /// Creates an include scoped by a nested query.
    pub fn scoped(relation: impl Into<String>, scope: RequestQuery) -> Self {
        Self {
            relation: relation.into(),
            scope: Some(Box::new(scope)),
        }
    }

    /// Returns the relation name.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Returns the nested scope, if one is set.
    pub fn scope(&self) -> Option<&RequestQuery> {
        self.scope.as_deref()
    }

    /// Returns the nested scope, creating an empty one if absent.
    pub fn scope_mut(&mut self) -> &mut RequestQuery {
        self.scope.get_or_insert_with(|| Box::new(RequestQuery::new()))
    }

    /// Returns `true` if a nested scope is set.
    pub fn has_scope(&self) -> bool {
        self.scope.is_some()
    }
}

/// Owning, order-preserving set of includes, unique by relation.
///
/// The only insertion path is [`IncludeSet::add`], which enforces
/// uniqueness: re-including a relation replaces the whole existing entry
/// (scope included) while keeping its position in the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncludeSet {
    entries: Vec<Include>,
}

impl IncludeSet {
    /// Creates an empty include set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include, replacing any existing entry for the same relation.
    ///
    /// The new entry wins entirely, including its scope; unaffected entries
    /// keep their order.
    pub fn add(&mut self, include: Include) -> &mut Self {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.relation() == include.relation())
        {
            Some(existing) => *existing = include,
            None => self.entries.push(include),
        }
        self
    }

    /// Unions `other`'s entries into this set.
    ///
    /// `other` wins on relation conflicts; its new relations append after
    /// the current entries.
    pub fn merge(&mut self, other: &IncludeSet) -> &mut Self {
        for include in &other.entries {
            self.add(include.clone());
        }
        self
    }

    /// Returns the nested scope for `relation`, creating the entry and its
    /// scope if absent.
    pub fn scope_mut(&mut self, relation: &str) -> &mut RequestQuery {
        let index = match self
            .entries
            .iter()
            .position(|entry| entry.relation() == relation)
        {
            Some(index) => index,
            None => {
                self.entries.push(Include::new(relation));
                self.entries.len() - 1
            }
        };
        self.entries[index].scope_mut()
    }

    /// Returns the entry for `relation`, if present.
    pub fn get(&self, relation: &str) -> Option<&Include> {
        self.entries.iter().find(|entry| entry.relation() == relation)
    }

    /// Returns `true` if `relation` is included.
    pub fn contains(&self, relation: &str) -> bool {
        self.get(relation).is_some()
    }

    /// Removes the entry for `relation`, if present.
    pub fn remove(&mut self, relation: &str) -> &mut Self {
        self.entries.retain(|entry| entry.relation() != relation);
        self
    }

    /// Removes every entry.
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    /// Returns `true` if no relations are included.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of included relations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries in list order.
    pub fn entries(&self) -> &[Include] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dedupes_by_relation() {
        let mut includes = IncludeSet::new();
        includes.add(Include::new("team"));
        includes.add(Include::new("team"));
        assert_eq!(includes.len(), 1);
    }

    #[test]
    fn test_add_replaces_whole_entry_in_place() {
        let mut includes = IncludeSet::new();

        let mut scoped = Include::new("team");
        scoped.scope_mut().limit(5);
        includes.add(scoped);
        includes.add(Include::new("locations"));

        // Re-including "team" bare drops its old scope but keeps its slot.
        includes.add(Include::new("team"));
        assert_eq!(includes.len(), 2);
        assert_eq!(includes.entries()[0].relation(), "team");
        assert!(!includes.entries()[0].has_scope());
    }

    #[test]
    fn test_scope_mut_creates_entry() {
        let mut includes = IncludeSet::new();
        includes.scope_mut("followUps").limit(10);

        assert!(includes.contains("followUps"));
        let entry = includes.get("followUps").unwrap();
        assert_eq!(
            entry.scope().and_then(|s| s.paginator().limit_value()),
            Some(10)
        );
    }

    #[test]
    fn test_merge_other_wins_on_conflict() {
        let mut current = IncludeSet::new();
        current.add(Include::new("team"));
        current.add(Include::new("locations"));

        let mut other = IncludeSet::new();
        let mut scoped = Include::new("team");
        scoped.scope_mut().limit(1);
        other.add(scoped);
        other.add(Include::new("relationships"));

        current.merge(&other);
        assert_eq!(current.len(), 3);
        assert!(current.get("team").unwrap().has_scope());
        assert_eq!(current.entries()[2].relation(), "relationships");
    }
}
