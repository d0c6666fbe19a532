//! Where-clause builder with per-field last-write-wins semantics.

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Months;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;
use tracing::trace;

use crate::model::AgeRange;
use crate::model::DateRange;
use crate::model::Value;
use crate::model::ValueRange;

use super::condition;
use super::condition::Condition;
use super::condition::GroupKind;
use super::condition::escape_regex;

/// How [`FilterBuilder::by_text`] matches free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Case-insensitive anchored prefix match (`regexp: "/^text/i"`).
    Prefix,
    /// Case-insensitive substring match (`regexp: "/text/i"`).
    Contains,
    /// Case-insensitive `like` predicate (`like: text, options: "i"`).
    Like,
}

/// Builder for the where clause of a request query.
///
/// The builder owns the root AND group of a condition tree. Every operation
/// mutates in place, returns the builder for chaining and never fails:
/// malformed input degrades to a wrong-but-valid filter, with the backend as
/// the authority on semantic validity.
///
/// Re-applying a predicate for a field already filtered **replaces** the
/// prior condition for that field (last-write-wins), unless the caller asks
/// for an or-branch append via [`FilterBuilder::apply_or`].
///
/// # Example
///
/// ```
/// use linelist_lib::query::Condition;
/// use linelist_lib::query::FilterBuilder;
/// use linelist_lib::query::TextMatch;
///
/// let mut filter = FilterBuilder::new();
/// filter
///     .by_equality("classification", "CONFIRMED")
///     .by_text("firstName", "jo", TextMatch::Prefix)
///     .apply(Condition::gte("age.years", 18));
///
/// assert_eq!(filter.first_level_conditions().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBuilder {
    conditions: Vec<Condition>,
}

impl FilterBuilder {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a condition into the root AND group, replacing any existing
    /// condition with the same field key.
    ///
    /// A keyless AND group is shallow-merged: each of its children is
    /// inserted by its own key. Keyless OR groups are appended as opaque
    /// branches.
    pub fn apply(&mut self, condition: Condition) -> &mut Self {
        match condition {
            Condition::Group(group) if group.kind == GroupKind::And && group.key.is_none() => {
                for child in group.children {
                    self.apply(child);
                }
            }
            condition => self.insert(condition),
        }
        self
    }

    /// Inserts a condition, wrapping it into an OR group with any existing
    /// condition for the same field key.
    ///
    /// When the existing condition for the key is already an OR group the
    /// new condition joins it as one more branch. Without an existing
    /// condition this behaves like [`FilterBuilder::apply`].
    pub fn apply_or(&mut self, condition: Condition) -> &mut Self {
        match condition {
            Condition::Group(group) if group.kind == GroupKind::And && group.key.is_none() => {
                for child in group.children {
                    self.apply_or(child);
                }
            }
            condition => self.insert_or(condition),
        }
        self
    }

    /// Filters `field` by equality, replacing any prior predicate on it.
    pub fn by_equality(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.apply(Condition::eq(field, value))
    }

    /// Filters `field` by free text, case-insensitively.
    ///
    /// The text is escaped so the backend matches it literally. Empty text
    /// removes the condition on `field` instead.
    pub fn by_text(&mut self, field: impl Into<String>, text: &str, matching: TextMatch) -> &mut Self {
        let field = field.into();
        if text.is_empty() {
            return self.remove(&field);
        }
        let escaped = escape_regex(text);
        let condition = match matching {
            TextMatch::Prefix => Condition::regexp(field, format!("/^{escaped}/i")),
            TextMatch::Contains => Condition::regexp(field, format!("/{escaped}/i")),
            TextMatch::Like => Condition::like(field, escaped, true),
        };
        self.apply(condition)
    }

    /// Filters `field` by a value range.
    ///
    /// Both bounds produce a `between` predicate; a single bound produces
    /// `gte`/`lte`. A range with no bounds removes the condition.
    pub fn by_range(&mut self, field: impl Into<String>, range: &ValueRange) -> &mut Self {
        let field = field.into();
        let condition = match (&range.min, &range.max) {
            (Some(min), Some(max)) => Condition::between(field, min.clone(), max.clone()),
            (Some(min), None) => Condition::gte(field, min.clone()),
            (None, Some(max)) => Condition::lte(field, max.clone()),
            (None, None) => return self.remove(&field),
        };
        self.apply(condition)
    }

    /// Filters `field` by a calendar date range.
    ///
    /// Bounds widen to full days: the start bound becomes 00:00:00.000 UTC
    /// and the end bound 23:59:59.999 UTC of the given day.
    pub fn by_date_range(&mut self, field: impl Into<String>, range: &DateRange) -> &mut Self {
        let value_range = ValueRange {
            min: range.start.map(|date| Value::Date(start_of_day(date))),
            max: range.end.map(|date| Value::Date(end_of_day(date))),
        };
        self.by_range(field, &value_range)
    }

    /// Filters a date-of-birth `field` by an age range relative to today.
    ///
    /// Each age bound combines its years and months into a single offset
    /// subtracted from today: the minimum age becomes the upper
    /// date-of-birth bound and the maximum age the lower one.
    pub fn by_age_range(&mut self, field: impl Into<String>, range: &AgeRange) -> &mut Self {
        self.by_age_range_at(field, range, Utc::now().date_naive())
    }

    /// Same as [`FilterBuilder::by_age_range`] with an explicit reference
    /// date standing in for today.
    pub fn by_age_range_at(
        &mut self,
        field: impl Into<String>,
        range: &AgeRange,
        today: NaiveDate,
    ) -> &mut Self {
        let value_range = ValueRange {
            min: range
                .max
                .map(|age| Value::Date(start_of_day(subtract_age(today, age.total_months())))),
            max: range
                .min
                .map(|age| Value::Date(end_of_day(subtract_age(today, age.total_months())))),
        };
        self.by_range(field, &value_range)
    }

    /// Filters `field` by a multi-select of values.
    ///
    /// `none_value` is the placeholder option standing for "no value
    /// recorded". Three shapes result, each replacing any prior condition
    /// for the field:
    ///
    /// - only the placeholder selected: an OR of `{eq: null}` and
    ///   `{exists: false}`;
    /// - placeholder plus concrete values: the same OR with an extra
    ///   `inq` branch over the concrete values;
    /// - only concrete values: a plain `inq` predicate.
    ///
    /// `negate` flips the concrete-values branch to `nin`; the null/missing
    /// branch keeps its meaning. An empty selection removes the condition.
    pub fn by_select(
        &mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
        negate: bool,
        none_value: Option<&Value>,
    ) -> &mut Self {
        let field = field.into();
        let mut concrete: Vec<Value> = Vec::new();
        let mut none_selected = false;
        for value in values {
            let value = value.into();
            if none_value.is_some_and(|marker| *marker == value) {
                none_selected = true;
            } else {
                concrete.push(value);
            }
        }

        if !none_selected && concrete.is_empty() {
            return self.remove(&field);
        }

        let membership = |field: String| {
            if negate {
                Condition::nin(field, concrete.clone())
            } else {
                Condition::inq(field, concrete.clone())
            }
        };

        let condition = if none_selected {
            let mut branches = Vec::new();
            if !concrete.is_empty() {
                branches.push(membership(field.clone()));
            }
            branches.push(Condition::eq(field.clone(), Value::Null));
            branches.push(Condition::exists(field.clone(), false));
            Condition::or_for(field, branches)
        } else {
            membership(field)
        };
        self.apply(condition)
    }

    /// Filters `field` by a tri-state boolean.
    ///
    /// - `Some(true)`: the field is present and not explicitly false;
    /// - `Some(false)`: the field is explicitly false or absent;
    /// - `None`: no constraint, any prior condition on the field is removed.
    pub fn by_boolean(&mut self, field: impl Into<String>, value: Option<bool>) -> &mut Self {
        let field = field.into();
        let condition = match value {
            Some(true) => Condition::and_for(
                field.clone(),
                [
                    Condition::exists(field.clone(), true),
                    Condition::neq(field, false),
                ],
            ),
            Some(false) => Condition::or_for(
                field.clone(),
                [
                    Condition::eq(field.clone(), false),
                    Condition::exists(field, false),
                ],
            ),
            None => return self.remove(&field),
        };
        self.apply(condition)
    }

    /// Returns the root AND group's children.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the root AND group flattened into a key-to-condition map.
    ///
    /// Used to read back a previously set condition, e.g. to extract an
    /// identifier the view already filtered by. Keyless groups are not
    /// addressable and are skipped.
    pub fn first_level_conditions(&self) -> BTreeMap<&str, &Condition> {
        self.conditions
            .iter()
            .filter_map(|condition| condition.key().map(|key| (key, condition)))
            .collect()
    }

    /// Returns the condition keyed by `field`, if any.
    pub fn condition_for(&self, field: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|condition| condition.key() == Some(field))
    }

    /// Returns the whole tree as a single condition.
    ///
    /// A tree with exactly one root condition returns it unwrapped;
    /// otherwise the root children clone into one AND group.
    pub fn to_condition(&self) -> Condition {
        match self.conditions.as_slice() {
            [single] => single.clone(),
            _ => Condition::and(self.conditions.iter().cloned()),
        }
    }

    /// Removes any top-level condition keyed by `field`.
    pub fn remove(&mut self, field: &str) -> &mut Self {
        self.conditions.retain(|condition| condition.key() != Some(field));
        self
    }

    /// Structurally removes every condition addressed by a dotted path,
    /// including matches nested inside and/or groups.
    ///
    /// Groups emptied by the removal are pruned. An absent path is a no-op.
    pub fn remove_path(&mut self, path: &str) -> &mut Self {
        if !condition::remove_path(&mut self.conditions, path) {
            trace!(path, "no condition matched path");
        }
        self
    }

    /// Removes a condition only where it deep-equals `shape`, leaving
    /// siblings untouched.
    pub fn remove_exact(&mut self, shape: &Condition) -> &mut Self {
        if !condition::remove_exact(&mut self.conditions, shape) {
            trace!(?shape, "no condition matched shape");
        }
        self
    }

    /// Unions `other`'s top-level conditions into this filter.
    ///
    /// `other` wins on field-key conflicts; keyless branches append.
    pub fn merge(&mut self, other: &FilterBuilder) -> &mut Self {
        for condition in other.conditions() {
            self.apply(condition.clone());
        }
        self
    }

    /// Empties the condition tree in place.
    ///
    /// The builder keeps its identity, so references held elsewhere observe
    /// the cleared state.
    pub fn clear(&mut self) -> &mut Self {
        self.conditions.clear();
        self
    }

    /// Returns `true` if the tree has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn insert(&mut self, condition: Condition) {
        let Some(key) = condition.key().map(str::to_string) else {
            self.conditions.push(condition);
            return;
        };
        match self
            .conditions
            .iter_mut()
            .find(|existing| existing.key() == Some(key.as_str()))
        {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }

    fn insert_or(&mut self, condition: Condition) {
        let Some(key) = condition.key().map(str::to_string) else {
            self.conditions.push(condition);
            return;
        };
        let Some(index) = self
            .conditions
            .iter()
            .position(|existing| existing.key() == Some(key.as_str()))
        else {
            self.conditions.push(condition);
            return;
        };

        if let Condition::Group(group) = &mut self.conditions[index] {
            if group.kind == GroupKind::Or {
                group.children.push(condition);
                return;
            }
        }
        let existing = self.conditions.remove(index);
        self.conditions
            .insert(index, Condition::or_for(key, [existing, condition]));
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    // 23:59:59.999
    start_of_day(date) + Duration::milliseconds(86_399_999)
}

fn subtract_age(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Age;
    use crate::query::condition::Comparison;
    use crate::query::condition::Group;

    fn comparison_of<'a>(filter: &'a FilterBuilder, field: &str) -> &'a Comparison {
        match filter.condition_for(field) {
            Some(Condition::Predicate(predicate)) => &predicate.comparison,
            other => panic!("expected a predicate for {field}, got {other:?}"),
        }
    }

    fn group_of<'a>(filter: &'a FilterBuilder, field: &str) -> &'a Group {
        match filter.condition_for(field) {
            Some(Condition::Group(group)) => group,
            other => panic!("expected a group for {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_by_equality_replaces() {
        let mut filter = FilterBuilder::new();
        filter.by_equality("status", "open");
        filter.by_equality("status", "closed");

        assert_eq!(filter.conditions().len(), 1);
        assert_eq!(
            comparison_of(&filter, "status"),
            &Comparison::Eq(Value::from("closed"))
        );
    }

    #[test]
    fn test_apply_flattens_keyless_and_group() {
        let mut filter = FilterBuilder::new();
        filter.apply(Condition::and([
            Condition::eq("a", 1i64),
            Condition::eq("b", 2i64),
        ]));

        assert_eq!(filter.conditions().len(), 2);
        assert!(filter.condition_for("a").is_some());
        assert!(filter.condition_for("b").is_some());
    }

    #[test]
    fn test_apply_or_wraps_existing_condition() {
        let mut filter = FilterBuilder::new();
        filter.by_equality("personId", "abc");
        filter.apply_or(Condition::exists("personId", false));

        let group = group_of(&filter, "personId");
        assert_eq!(group.kind, GroupKind::Or);
        assert_eq!(group.children.len(), 2);

        // A third branch joins the same group.
        filter.apply_or(Condition::eq("personId", Value::Null));
        assert_eq!(group_of(&filter, "personId").children.len(), 3);
    }

    #[test]
    fn test_by_text_prefix_and_contains() {
        let mut filter = FilterBuilder::new();
        filter.by_text("firstName", "jo.", TextMatch::Prefix);
        assert_eq!(
            comparison_of(&filter, "firstName"),
            &Comparison::Regexp("/^jo\\./i".to_string())
        );

        filter.by_text("firstName", "jo.", TextMatch::Contains);
        assert_eq!(
            comparison_of(&filter, "firstName"),
            &Comparison::Regexp("/jo\\./i".to_string())
        );

        filter.by_text("firstName", "jo", TextMatch::Like);
        assert_eq!(
            comparison_of(&filter, "firstName"),
            &Comparison::Like {
                pattern: "jo".to_string(),
                case_insensitive: true,
            }
        );
    }

    #[test]
    fn test_by_text_empty_removes() {
        let mut filter = FilterBuilder::new();
        filter.by_text("firstName", "jo", TextMatch::Prefix);
        filter.by_text("firstName", "", TextMatch::Prefix);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_by_range_shapes() {
        let mut filter = FilterBuilder::new();

        filter.by_range("age", &ValueRange::new(18, 65));
        assert_eq!(
            comparison_of(&filter, "age"),
            &Comparison::Between(Value::from(18), Value::from(65))
        );

        filter.by_range("age", &ValueRange::at_least(18));
        assert_eq!(comparison_of(&filter, "age"), &Comparison::Gte(Value::from(18)));

        filter.by_range("age", &ValueRange::at_most(65));
        assert_eq!(comparison_of(&filter, "age"), &Comparison::Lte(Value::from(65)));

        filter.by_range("age", &ValueRange::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_by_date_range_widen_to_day_bounds() {
        let mut filter = FilterBuilder::new();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        filter.by_date_range("dateOfOnset", &range);

        match comparison_of(&filter, "dateOfOnset") {
            Comparison::Between(Value::Date(start), Value::Date(end)) => {
                assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
                assert_eq!(end.to_rfc3339(), "2024-01-31T23:59:59.999+00:00");
            }
            other => panic!("expected between, got {other:?}"),
        }
    }

    #[test]
    fn test_by_date_range_single_bound() {
        let mut filter = FilterBuilder::new();
        let range = DateRange::starting(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        filter.by_date_range("dateOfOnset", &range);

        match comparison_of(&filter, "dateOfOnset") {
            Comparison::Gte(Value::Date(start)) => {
                assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
            }
            other => panic!("expected gte, got {other:?}"),
        }
    }

    #[test]
    fn test_by_age_range_converts_to_birth_dates() {
        let mut filter = FilterBuilder::new();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let range = AgeRange::new(Age::years(5), Age::new(10, 6));
        filter.by_age_range_at("dob", &range, today);

        match comparison_of(&filter, "dob") {
            Comparison::Between(Value::Date(oldest), Value::Date(youngest)) => {
                // Max age 10y6m back from 2024-06-15.
                assert_eq!(oldest.to_rfc3339(), "2013-12-15T00:00:00+00:00");
                // Min age 5y back from 2024-06-15.
                assert_eq!(youngest.to_rfc3339(), "2019-06-15T23:59:59.999+00:00");
            }
            other => panic!("expected between, got {other:?}"),
        }
    }

    #[test]
    fn test_by_age_range_min_only() {
        let mut filter = FilterBuilder::new();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        filter.by_age_range_at("dob", &AgeRange::at_least(Age::years(18)), today);

        match comparison_of(&filter, "dob") {
            Comparison::Lte(Value::Date(youngest)) => {
                assert_eq!(youngest.to_rfc3339(), "2006-06-15T23:59:59.999+00:00");
            }
            other => panic!("expected lte, got {other:?}"),
        }
    }

    #[test]
    fn test_by_select_concrete_values() {
        let mut filter = FilterBuilder::new();
        filter.by_select("classification", ["A", "B"], false, None);
        assert_eq!(
            comparison_of(&filter, "classification"),
            &Comparison::Inq(vec![Value::from("A"), Value::from("B")])
        );

        filter.by_select("classification", ["A", "B"], true, None);
        assert_eq!(
            comparison_of(&filter, "classification"),
            &Comparison::Nin(vec![Value::from("A"), Value::from("B")])
        );
    }

    #[test]
    fn test_by_select_none_only() {
        let mut filter = FilterBuilder::new();
        let none = Value::from("NONE");
        filter.by_select("outcome", ["NONE"], false, Some(&none));

        let group = group_of(&filter, "outcome");
        assert_eq!(group.kind, GroupKind::Or);
        assert_eq!(
            group.children,
            vec![
                Condition::eq("outcome", Value::Null),
                Condition::exists("outcome", false),
            ]
        );
    }

    #[test]
    fn test_by_select_none_plus_values() {
        let mut filter = FilterBuilder::new();
        let none = Value::from("NONE");
        filter.by_select("outcome", ["DECEASED", "NONE"], false, Some(&none));

        let group = group_of(&filter, "outcome");
        assert_eq!(group.children.len(), 3);
        assert_eq!(group.children[0], Condition::inq("outcome", ["DECEASED"]));
    }

    #[test]
    fn test_by_select_negated_with_none_token() {
        let mut filter = FilterBuilder::new();
        let none = Value::from("NONE");
        filter.by_select("riskLevel", ["NONE", "HIGH"], true, Some(&none));

        // Negation flips only the membership branch; the null and missing
        // branches keep their meaning.
        let group = group_of(&filter, "riskLevel");
        assert_eq!(group.kind, GroupKind::Or);
        assert_eq!(
            group.children,
            vec![
                Condition::nin("riskLevel", ["HIGH"]),
                Condition::eq("riskLevel", Value::Null),
                Condition::exists("riskLevel", false),
            ]
        );
    }

    #[test]
    fn test_by_select_replaces_prior_branch() {
        let mut filter = FilterBuilder::new();
        let none = Value::from("NONE");
        filter.by_select("outcome", ["NONE"], false, Some(&none));
        filter.by_select("outcome", ["ALIVE"], false, Some(&none));

        assert_eq!(filter.conditions().len(), 1);
        assert_eq!(
            comparison_of(&filter, "outcome"),
            &Comparison::Inq(vec![Value::from("ALIVE")])
        );
    }

    #[test]
    fn test_by_select_empty_removes() {
        let mut filter = FilterBuilder::new();
        filter.by_select("outcome", ["ALIVE"], false, None);
        filter.by_select("outcome", Vec::<Value>::new(), false, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_by_boolean_tri_state() {
        let mut filter = FilterBuilder::new();

        filter.by_boolean("transferRefused", Some(true));
        let group = group_of(&filter, "transferRefused");
        assert_eq!(group.kind, GroupKind::And);
        assert_eq!(
            group.children,
            vec![
                Condition::exists("transferRefused", true),
                Condition::neq("transferRefused", false),
            ]
        );

        filter.by_boolean("transferRefused", Some(false));
        let group = group_of(&filter, "transferRefused");
        assert_eq!(group.kind, GroupKind::Or);
        assert_eq!(
            group.children,
            vec![
                Condition::eq("transferRefused", false),
                Condition::exists("transferRefused", false),
            ]
        );

        filter.by_boolean("transferRefused", None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_first_level_conditions() {
        let mut filter = FilterBuilder::new();
        filter.by_equality("personId", "abc");
        filter.by_boolean("deleted", Some(false));
        filter.apply(Condition::or([
            Condition::eq("a", 1i64),
            Condition::eq("b", 2i64),
        ]));

        let map = filter.first_level_conditions();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("personId"));
        assert!(map.contains_key("deleted"));
    }

    #[test]
    fn test_to_condition_unwraps_a_single_root() {
        let mut filter = FilterBuilder::new();
        filter.by_equality("classification", "CONFIRMED");
        assert_eq!(
            filter.to_condition(),
            Condition::eq("classification", "CONFIRMED")
        );

        filter.by_equality("occupation", "NURSE");
        match filter.to_condition() {
            Condition::Group(group) => {
                assert_eq!(group.kind, GroupKind::And);
                assert_eq!(group.children.len(), 2);
            }
            other => panic!("expected an and group, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_path_inside_groups() {
        let mut filter = FilterBuilder::new();
        filter.by_equality("age", 30i64);
        filter.apply(Condition::or([
            Condition::eq("addresses.city", "Berlin"),
            Condition::exists("addresses.city", false),
        ]));

        filter.remove_path("addresses.city");
        assert_eq!(filter.conditions().len(), 1);
        assert!(filter.condition_for("age").is_some());
    }

    #[test]
    fn test_remove_exact_round_trip() {
        let mut filter = FilterBuilder::new();
        let condition = Condition::eq("status", "open");
        filter.apply(condition.clone());
        filter.remove_exact(&condition);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_merge_other_wins() {
        let mut current = FilterBuilder::new();
        current.by_equality("x", 1i64);
        current.by_equality("keep", "me");

        let mut other = FilterBuilder::new();
        other.by_equality("x", 2i64);

        current.merge(&other);
        assert_eq!(current.conditions().len(), 2);
        assert_eq!(comparison_of(&current, "x"), &Comparison::Eq(Value::from(2)));
    }

    #[test]
    fn test_clear_preserves_identity() {
        let mut filter = FilterBuilder::new();
        filter.by_equality("status", "open");
        filter.clear();
        assert!(filter.is_empty());
        assert!(filter.conditions().is_empty());
    }
}
