//! Request query composition root.

use std::collections::BTreeMap;

use crate::model::Value;

use super::envelope;
use super::fields::FieldSet;
use super::filter::FilterBuilder;
use super::include::Include;
use super::include::IncludeSet;
use super::paginator::Paginator;
use super::sort::SortList;

/// Composable builder for one backend request.
///
/// A request query owns one of each sub-state: a where-clause
/// [`FilterBuilder`], a [`SortList`], a [`Paginator`], an [`IncludeSet`], a
/// [`FieldSet`] and an opaque flag map. Calling code constructs one builder
/// per logical request (a list view, a count query, a dashboard metric),
/// mutates it during setup and serializes it with [`RequestQuery::build`].
///
/// Cloning deep-copies every sub-state. Builders obtained from a shared or
/// default parameter must be cloned before mutation, otherwise state leaks
/// across unrelated calls.
///
/// # Example
///
/// ```
/// use linelist_lib::query::Direction;
/// use linelist_lib::query::RequestQuery;
///
/// let mut query = RequestQuery::new();
/// query.filter_mut().by_equality("classification", "CONFIRMED");
/// query.sort_mut().by("dateOfReporting", Direction::Desc);
/// query.include(["relationships"]).limit(50);
///
/// let filter = query.build();
/// assert_eq!(filter["where"]["classification"], "CONFIRMED");
/// assert_eq!(filter["limit"], 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestQuery {
    filter: FilterBuilder,
    sort: SortList,
    paginator: Paginator,
    includes: IncludeSet,
    fields: FieldSet,
    flags: BTreeMap<String, Value>,
}

/// Well-known soft-delete marker field.
const DELETED_FIELD: &str = "deleted";

impl RequestQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Sub-state access
    // =========================================================================

    /// Returns the where-clause builder.
    pub fn filter(&self) -> &FilterBuilder {
        &self.filter
    }

    /// Returns the where-clause builder for mutation.
    ///
    /// Use `filter().is_empty()` to check whether only the condition tree is
    /// empty, regardless of sort/include/fields state.
    pub fn filter_mut(&mut self) -> &mut FilterBuilder {
        &mut self.filter
    }

    /// Returns the sort list.
    pub fn sort(&self) -> &SortList {
        &self.sort
    }

    /// Returns the sort list for mutation.
    pub fn sort_mut(&mut self) -> &mut SortList {
        &mut self.sort
    }

    /// Returns the pagination state.
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Returns the pagination state for mutation.
    pub fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    /// Returns the include set.
    pub fn includes(&self) -> &IncludeSet {
        &self.includes
    }

    /// Returns the include set for mutation.
    pub fn includes_mut(&mut self) -> &mut IncludeSet {
        &mut self.includes
    }

    /// Returns the field projection set.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Returns the field projection set for mutation.
    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// Returns the opaque flags serialized alongside the filter.
    pub fn flags(&self) -> &BTreeMap<String, Value> {
        &self.flags
    }

    // =========================================================================
    // Conveniences
    // =========================================================================

    /// Includes one or more relations, without scopes.
    ///
    /// Re-including a relation replaces its existing entry, scope included.
    pub fn include(&mut self, relations: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        for relation in relations {
            self.includes.add(Include::new(relation));
        }
        self
    }

    /// Includes a relation and configures its nested scope.
    ///
    /// # Example
    ///
    /// ```
    /// use linelist_lib::query::RequestQuery;
    ///
    /// let mut query = RequestQuery::new();
    /// query.include_scoped("followUps", |scope| {
    ///     scope.filter_mut().by_equality("statusId", "PERFORMED");
    ///     scope.limit(10);
    /// });
    /// ```
    pub fn include_scoped(
        &mut self,
        relation: impl Into<String>,
        build: impl FnOnce(&mut RequestQuery),
    ) -> &mut Self {
        build(self.includes.scope_mut(&relation.into()));
        self
    }

    /// Returns the nested query scoped to an included relation, creating
    /// the include entry and its scope if absent.
    ///
    /// The child builder filters and sorts within the included collection
    /// independently of this builder's own state.
    pub fn scope_mut(&mut self, relation: &str) -> &mut RequestQuery {
        self.includes.scope_mut(relation)
    }

    /// Adds field names to the projection set.
    pub fn select(&mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.fields.extend(fields);
        self
    }

    /// Empties the field projection set.
    pub fn clear_fields(&mut self) -> &mut Self {
        self.fields.clear();
        self
    }

    /// Sets the maximum number of records to return.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.paginator.limit(limit);
        self
    }

    /// Sets the number of records to skip.
    pub fn skip(&mut self, skip: u64) -> &mut Self {
        self.paginator.skip(skip);
        self
    }

    /// Attaches an opaque flag passed through verbatim in the serialized
    /// output.
    ///
    /// Flags are backend-specific toggles; the builder never interprets
    /// them, and a flag can never override one of the structural keys
    /// (`where`, `include`, `order`, `limit`, `skip`, `fields`).
    pub fn flag(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    /// Restricts results to records not marked deleted.
    ///
    /// Matches records whose `deleted` field is explicitly false or absent.
    pub fn exclude_deleted(&mut self) -> &mut Self {
        self.filter.by_boolean(DELETED_FIELD, Some(false));
        self
    }

    /// Lifts the deleted-records restriction.
    pub fn include_deleted(&mut self) -> &mut Self {
        self.filter.by_boolean(DELETED_FIELD, None);
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Merges `other` into this query.
    ///
    /// Per component: where conditions shallow-merge with `other` winning on
    /// field-key conflicts; includes union with `other` winning on relation
    /// conflicts; fields union; `other`'s sort entries append after the
    /// current ones (current wins on field conflicts); `other`'s limit and
    /// skip override only where set; flags union with `other` winning.
    pub fn merge(&mut self, other: &RequestQuery) -> &mut Self {
        self.filter.merge(other.filter());
        self.includes.merge(other.includes());
        self.fields.merge(other.fields());
        self.sort.merge(other.sort());
        self.paginator.merge(other.paginator());
        for (name, value) in other.flags() {
            self.flags.insert(name.clone(), value.clone());
        }
        self
    }

    /// Empties only the filter condition tree.
    ///
    /// Include, sort, fields, pagination and flags are untouched, so a view
    /// can reset user filters while keeping its configuration.
    pub fn clear(&mut self) -> &mut Self {
        self.filter.clear();
        self
    }

    /// Returns `true` if every sub-state is empty.
    ///
    /// For the condition tree alone, use `filter().is_empty()`.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.sort.is_empty()
            && self.paginator.is_empty()
            && self.includes.is_empty()
            && self.fields.is_empty()
            && self.flags.is_empty()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serializes the query to its filter envelope.
    ///
    /// The envelope is `{where?, include?, order?, limit?, skip?, fields?}`
    /// with every key omitted while its sub-state is empty; flags ride along
    /// as extra keys. An empty query serializes to `{}`.
    pub fn build(&self) -> serde_json::Value {
        envelope::build(self)
    }

    /// Serializes only the where clause, as a bare condition object.
    ///
    /// For endpoints that take a plain condition rather than a full filter
    /// envelope, such as count endpoints.
    pub fn build_where(&self) -> serde_json::Value {
        envelope::build_where(self)
    }

    /// Serializes the query to a `filter=<url-encoded JSON>` query-string
    /// fragment for GET endpoints.
    pub fn to_query_string(&self) -> String {
        envelope::to_query_string(self)
    }
}
