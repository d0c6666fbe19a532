//! Condition tree for where-clause construction.

use crate::model::Value;

/// A comparison applied to a single field.
///
/// These are the operators of the backend's filtering convention. The
/// serialized form is `{operator: operand}` nested under the field name,
/// except for [`Comparison::Eq`] which serializes as the bare value.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Equality: `field: value`.
    Eq(Value),
    /// Inequality: `field: {neq: value}`.
    Neq(Value),
    /// Set membership: `field: {inq: [..]}`.
    Inq(Vec<Value>),
    /// Negated set membership: `field: {nin: [..]}`.
    Nin(Vec<Value>),
    /// Greater than: `field: {gt: value}`.
    Gt(Value),
    /// Greater than or equal: `field: {gte: value}`.
    Gte(Value),
    /// Less than: `field: {lt: value}`.
    Lt(Value),
    /// Less than or equal: `field: {lte: value}`.
    Lte(Value),
    /// Inclusive range: `field: {between: [low, high]}`.
    Between(Value, Value),
    /// Presence check: `field: {exists: true|false}`.
    Exists(bool),
    /// Pattern match: `field: {like: pattern}`, optionally case-insensitive.
    Like {
        /// The match pattern, already escaped by the caller.
        pattern: String,
        /// Adds `options: "i"` to the serialized predicate.
        case_insensitive: bool,
    },
    /// Regular expression match: `field: {regexp: pattern}`.
    Regexp(String),
}

/// Whether a group joins its children with `and` or `or`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// All children must match.
    And,
    /// At least one child must match.
    Or,
}

impl GroupKind {
    /// Returns the serialized operator name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::And => "and",
            GroupKind::Or => "or",
        }
    }
}

/// A single field predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Dotted field path, passed through uninterpreted.
    pub field: String,
    /// The comparison applied to the field.
    pub comparison: Comparison,
}

/// A boolean group of child conditions.
///
/// A group may carry a `key` when it was produced on behalf of a single
/// field (a "value is null or missing" branch, a tri-state boolean shape).
/// The key makes the whole group replaceable and removable by that field
/// name; it never appears in serialized output.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// How the children combine.
    pub kind: GroupKind,
    /// Field this group stands in for, if any.
    pub key: Option<String>,
    /// Ordered child conditions.
    pub children: Vec<Condition>,
}

/// A node in the condition tree.
///
/// Conditions combine into a recursive and/or structure over field
/// predicates. The tree is always exclusively owned; cloning a condition
/// deep-copies every node.
///
/// # Example
///
/// ```
/// use linelist_lib::query::Condition;
///
/// // Simple equality condition
/// let condition = Condition::eq("classification", "CONFIRMED");
///
/// // Combined condition
/// let condition = Condition::and([
///     Condition::eq("classification", "CONFIRMED"),
///     Condition::gte("age.years", 18),
/// ]);
///
/// // Using combinators
/// let condition = Condition::eq("classification", "CONFIRMED")
///     .and_also(Condition::gte("age.years", 18));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A single field predicate.
    Predicate(Predicate),
    /// A boolean group of child conditions.
    Group(Group),
}

impl Condition {
    /// Creates an equality condition: `field: value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::predicate(field, Comparison::Eq(value.into()))
    }

    /// Creates an inequality condition: `field: {neq: value}`.
    pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::predicate(field, Comparison::Neq(value.into()))
    }

    /// Creates a set-membership condition: `field: {inq: [..]}`.
    pub fn inq(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        Self::predicate(
            field,
            Comparison::Inq(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a negated set-membership condition: `field: {nin: [..]}`.
    pub fn nin(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        Self::predicate(
            field,
            Comparison::Nin(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Creates a greater-than condition: `field: {gt: value}`.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::predicate(field, Comparison::Gt(value.into()))
    }

    /// Creates a greater-than-or-equal condition: `field: {gte: value}`.
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::predicate(field, Comparison::Gte(value.into()))
    }

    /// Creates a less-than condition: `field: {lt: value}`.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::predicate(field, Comparison::Lt(value.into()))
    }

    /// Creates a less-than-or-equal condition: `field: {lte: value}`.
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::predicate(field, Comparison::Lte(value.into()))
    }

    /// Creates an inclusive range condition: `field: {between: [low, high]}`.
    pub fn between(
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::predicate(field, Comparison::Between(low.into(), high.into()))
    }

    /// Creates a presence condition: `field: {exists: present}`.
    pub fn exists(field: impl Into<String>, present: bool) -> Self {
        Self::predicate(field, Comparison::Exists(present))
    }

    /// Creates a pattern-match condition: `field: {like: pattern}`.
    ///
    /// The pattern is passed through as-is; use [`escape_regex`] on
    /// user-entered text first.
    pub fn like(field: impl Into<String>, pattern: impl Into<String>, case_insensitive: bool) -> Self {
        Self::predicate(
            field,
            Comparison::Like {
                pattern: pattern.into(),
                case_insensitive,
            },
        )
    }

    /// Creates a regular-expression condition: `field: {regexp: pattern}`.
    pub fn regexp(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::predicate(field, Comparison::Regexp(pattern.into()))
    }

    /// Creates a logical AND group of conditions.
    pub fn and(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group(Group {
            kind: GroupKind::And,
            key: None,
            children: children.into_iter().collect(),
        })
    }

    /// Creates a logical OR group of conditions.
    pub fn or(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group(Group {
            kind: GroupKind::Or,
            key: None,
            children: children.into_iter().collect(),
        })
    }

    /// Creates an AND group keyed by a field name.
    ///
    /// Keyed groups replace and remove like a predicate on that field.
    pub fn and_for(key: impl Into<String>, children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group(Group {
            kind: GroupKind::And,
            key: Some(key.into()),
            children: children.into_iter().collect(),
        })
    }

    /// Creates an OR group keyed by a field name.
    pub fn or_for(key: impl Into<String>, children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group(Group {
            kind: GroupKind::Or,
            key: Some(key.into()),
            children: children.into_iter().collect(),
        })
    }

    fn predicate(field: impl Into<String>, comparison: Comparison) -> Self {
        Condition::Predicate(Predicate {
            field: field.into(),
            comparison,
        })
    }

    /// Returns the field name this condition is addressable by.
    ///
    /// For a predicate this is its field; for a group it is the group's key,
    /// if any. Keyless groups are not addressable by field.
    pub fn key(&self) -> Option<&str> {
        match self {
            Condition::Predicate(predicate) => Some(&predicate.field),
            Condition::Group(group) => group.key.as_deref(),
        }
    }

    /// Combines this condition with another using logical AND.
    ///
    /// # Example
    ///
    /// ```
    /// use linelist_lib::query::Condition;
    ///
    /// let condition = Condition::eq("classification", "CONFIRMED")
    ///     .and_also(Condition::gte("age.years", 18));
    /// ```
    pub fn and_also(self, other: Condition) -> Self {
        match self {
            Condition::Group(mut group)
                if group.kind == GroupKind::And && group.key.is_none() =>
            {
                group.children.push(other);
                Condition::Group(group)
            }
            _ => Condition::and([self, other]),
        }
    }

    /// Combines this condition with another using logical OR.
    pub fn or_else(self, other: Condition) -> Self {
        match self {
            Condition::Group(mut group)
                if group.kind == GroupKind::Or && group.key.is_none() =>
            {
                group.children.push(other);
                Condition::Group(group)
            }
            _ => Condition::or([self, other]),
        }
    }
}

// =============================================================================
// Structural removal
// =============================================================================

/// Removes every condition addressed by `path` from the tree, recursing
/// into groups and pruning any group emptied by the removal.
///
/// Matches predicates whose field equals `path` and groups keyed by it.
/// Returns `true` if anything was removed; absent paths are a no-op.
pub(crate) fn remove_path(conditions: &mut Vec<Condition>, path: &str) -> bool {
    let before = conditions.len();
    conditions.retain(|condition| condition.key() != Some(path));
    let mut removed = conditions.len() != before;

    for condition in conditions.iter_mut() {
        if let Condition::Group(group) = condition {
            removed |= remove_path(&mut group.children, path);
        }
    }
    prune_empty_groups(conditions);
    removed
}

/// Removes every condition deep-equal to `shape`, recursing into groups and
/// pruning any group emptied by the removal. Siblings are untouched.
pub(crate) fn remove_exact(conditions: &mut Vec<Condition>, shape: &Condition) -> bool {
    let before = conditions.len();
    conditions.retain(|condition| condition != shape);
    let mut removed = conditions.len() != before;

    for condition in conditions.iter_mut() {
        if let Condition::Group(group) = condition {
            removed |= remove_exact(&mut group.children, shape);
        }
    }
    prune_empty_groups(conditions);
    removed
}

fn prune_empty_groups(conditions: &mut Vec<Condition>) {
    conditions.retain(|condition| match condition {
        Condition::Group(group) => !group.children.is_empty(),
        Condition::Predicate(_) => true,
    });
}

/// Escapes regular-expression metacharacters in user-entered text.
///
/// Used when embedding free text into a `regexp` or `like` predicate, so
/// the backend matches it literally.
///
/// # Example
///
/// ```
/// use linelist_lib::query::escape_regex;
///
/// assert_eq!(escape_regex("J. Doe (case 12)"), "J\\. Doe \\(case 12\\)");
/// ```
pub fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\' | '/'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
