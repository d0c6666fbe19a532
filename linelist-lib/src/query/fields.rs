//! Field projection set.

/// Deduplicated, order-preserving set of field names to retrieve.
///
/// An empty set means "retrieve all fields" and emits no `fields` clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    names: Vec<String>,
}

impl FieldSet {
    /// Creates an empty projection set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field name; duplicates are ignored.
    pub fn add(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        if !self.names.contains(&field) {
            self.names.push(field);
        }
        self
    }

    /// Adds several field names, ignoring duplicates.
    pub fn extend(&mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        for field in fields {
            self.add(field);
        }
        self
    }

    /// Unions `other`'s names into this set.
    pub fn merge(&mut self, other: &FieldSet) -> &mut Self {
        for name in &other.names {
            self.add(name.clone());
        }
        self
    }

    /// Removes every field name.
    pub fn clear(&mut self) -> &mut Self {
        self.names.clear();
        self
    }

    /// Returns `true` if no names are set.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if `field` is in the set.
    pub fn contains(&self, field: &str) -> bool {
        self.names.iter().any(|name| name == field)
    }

    /// Returns the names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
