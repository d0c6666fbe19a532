//! Filter envelope generation.
//!
//! Serializes a [`RequestQuery`] into the JSON filter structure the backend
//! consumes: `{where?, include?, order?, limit?, skip?, fields?}`, each key
//! omitted while its sub-state is empty.

use chrono::SecondsFormat;
use serde_json::Map;
use serde_json::Value as Json;
use tracing::trace;

use crate::model::Value;

use super::builder::RequestQuery;
use super::condition::Comparison;
use super::condition::Condition;
use super::condition::GroupKind;
use super::include::IncludeSet;
use super::sort::SortList;

/// Serializes a query to its filter envelope.
pub(crate) fn build(query: &RequestQuery) -> Json {
    let mut envelope = Map::new();

    let where_clause = where_object(query.filter().conditions());
    if !where_clause.is_empty() {
        envelope.insert("where".to_string(), Json::Object(where_clause));
    }
    if !query.includes().is_empty() {
        envelope.insert("include".to_string(), includes_to_json(query.includes()));
    }
    if !query.sort().is_empty() {
        envelope.insert("order".to_string(), order_to_json(query.sort()));
    }
    if let Some(limit) = query.paginator().limit_value() {
        envelope.insert("limit".to_string(), Json::from(limit));
    }
    if let Some(skip) = query.paginator().skip_value() {
        envelope.insert("skip".to_string(), Json::from(skip));
    }
    if !query.fields().is_empty() {
        let names: Vec<Json> = query
            .fields()
            .names()
            .iter()
            .map(|name| Json::String(name.clone()))
            .collect();
        envelope.insert("fields".to_string(), Json::Array(names));
    }

    // Flags ride along verbatim; structural keys always win.
    for (name, value) in query.flags() {
        envelope
            .entry(name.clone())
            .or_insert_with(|| value_to_json(value));
    }

    trace!(keys = envelope.len(), "built filter envelope");
    Json::Object(envelope)
}

/// Serializes only the where clause, as a bare condition object.
pub(crate) fn build_where(query: &RequestQuery) -> Json {
    Json::Object(where_object(query.filter().conditions()))
}

/// Serializes a query to a `filter=<url-encoded JSON>` fragment.
pub(crate) fn to_query_string(query: &RequestQuery) -> String {
    let envelope = build(query);
    format!("filter={}", urlencoding::encode(&envelope.to_string()))
}

/// Folds the root AND group's children into one condition object.
///
/// Predicates become direct `field: predicate` entries. A single boolean
/// group becomes a direct `and:`/`or:` key. Several groups have to share
/// the single top-level `and:` key: sibling AND groups flatten into it,
/// while OR groups keep their own nested object inside it.
pub(crate) fn where_object(conditions: &[Condition]) -> Map<String, Json> {
    let mut object = Map::new();
    let mut groups: Vec<(GroupKind, Vec<Json>)> = Vec::new();

    for condition in conditions {
        match condition {
            Condition::Predicate(predicate) => {
                object.insert(
                    predicate.field.clone(),
                    comparison_to_json(&predicate.comparison),
                );
            }
            Condition::Group(group) => {
                if group.children.is_empty() {
                    continue;
                }
                let children = group.children.iter().map(condition_to_json).collect();
                groups.push((group.kind, children));
            }
        }
    }

    if groups.len() == 1 {
        let (kind, children) = groups.remove(0);
        object.insert(kind.as_str().to_string(), Json::Array(children));
    } else if groups.len() > 1 {
        let mut branches: Vec<Json> = Vec::new();
        for (kind, children) in groups {
            match kind {
                GroupKind::And => branches.extend(children),
                GroupKind::Or => {
                    let mut nested = Map::new();
                    nested.insert("or".to_string(), Json::Array(children));
                    branches.push(Json::Object(nested));
                }
            }
        }
        object.insert("and".to_string(), Json::Array(branches));
    }

    object
}

/// Serializes one condition-tree node.
pub(crate) fn condition_to_json(condition: &Condition) -> Json {
    match condition {
        Condition::Predicate(predicate) => {
            let mut object = Map::new();
            object.insert(
                predicate.field.clone(),
                comparison_to_json(&predicate.comparison),
            );
            Json::Object(object)
        }
        Condition::Group(group) => {
            let children: Vec<Json> = group.children.iter().map(condition_to_json).collect();
            let mut object = Map::new();
            object.insert(group.kind.as_str().to_string(), Json::Array(children));
            Json::Object(object)
        }
    }
}

/// Serializes a comparison to its predicate form.
///
/// Equality serializes bare; every other operator nests under its name.
pub(crate) fn comparison_to_json(comparison: &Comparison) -> Json {
    match comparison {
        Comparison::Eq(value) => value_to_json(value),
        Comparison::Neq(value) => operator("neq", value_to_json(value)),
        Comparison::Inq(values) => operator("inq", list_to_json(values)),
        Comparison::Nin(values) => operator("nin", list_to_json(values)),
        Comparison::Gt(value) => operator("gt", value_to_json(value)),
        Comparison::Gte(value) => operator("gte", value_to_json(value)),
        Comparison::Lt(value) => operator("lt", value_to_json(value)),
        Comparison::Lte(value) => operator("lte", value_to_json(value)),
        Comparison::Between(low, high) => operator(
            "between",
            Json::Array(vec![value_to_json(low), value_to_json(high)]),
        ),
        Comparison::Exists(present) => operator("exists", Json::Bool(*present)),
        Comparison::Like {
            pattern,
            case_insensitive,
        } => {
            let mut object = Map::new();
            object.insert("like".to_string(), Json::String(pattern.clone()));
            if *case_insensitive {
                object.insert("options".to_string(), Json::String("i".to_string()));
            }
            Json::Object(object)
        }
        Comparison::Regexp(pattern) => operator("regexp", Json::String(pattern.clone())),
    }
}

/// Serializes a value to its JSON representation.
pub(crate) fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(n) => Json::from(*n),
        Value::Float(n) => serde_json::Number::from_f64(*n)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Guid(guid) => Json::String(guid.to_string()),
        Value::Date(date) => Json::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::String(s) => Json::String(s.clone()),
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Json(json) => json.clone(),
    }
}

fn list_to_json(values: &[Value]) -> Json {
    Json::Array(values.iter().map(value_to_json).collect())
}

fn operator(name: &str, operand: Json) -> Json {
    let mut object = Map::new();
    object.insert(name.to_string(), operand);
    Json::Object(object)
}

fn includes_to_json(includes: &IncludeSet) -> Json {
    let entries = includes
        .entries()
        .iter()
        .map(|include| {
            let mut object = Map::new();
            object.insert(
                "relation".to_string(),
                Json::String(include.relation().to_string()),
            );
            if let Some(scope) = include.scope() {
                let nested = build(scope);
                let empty = nested.as_object().is_some_and(Map::is_empty);
                if !empty {
                    object.insert("scope".to_string(), nested);
                }
            }
            Json::Object(object)
        })
        .collect();
    Json::Array(entries)
}

fn order_to_json(sort: &SortList) -> Json {
    let entries = sort
        .entries()
        .iter()
        .map(|(field, direction)| Json::String(format!("{} {}", field, direction.as_str())))
        .collect();
    Json::Array(entries)
}
