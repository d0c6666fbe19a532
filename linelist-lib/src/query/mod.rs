//! Request query composition.
//!
//! This module provides the builders for composing one backend request:
//! a where-clause condition tree, sorting, pagination, relation includes
//! and field projection, serialized together into the filter envelope the
//! REST convention consumes.
//!
//! # Composition Root
//!
//! - [`RequestQuery`] - One builder per logical request, owning every sub-state
//!
//! # Sub-states
//!
//! - [`FilterBuilder`] - Where-clause conditions keyed by field
//! - [`SortList`] - Sort entries in priority order
//! - [`Paginator`] - Skip/limit counters
//! - [`IncludeSet`] - Relation includes with optional nested scopes
//! - [`FieldSet`] - Field projection
//!
//! # Example
//!
//! ```
//! use linelist_lib::query::Direction;
//! use linelist_lib::query::RequestQuery;
//! use linelist_lib::query::TextMatch;
//!
//! let mut query = RequestQuery::new();
//! query.filter_mut().by_text("firstName", "jo", TextMatch::Prefix);
//! query.sort_mut().by("dateOfReporting", Direction::Desc);
//! query.limit(50);
//!
//! let filter = query.build();
//! assert_eq!(filter["where"]["firstName"]["regexp"], "/^jo/i");
//! assert_eq!(filter["order"][0], "dateOfReporting DESC");
//! ```

mod builder;
mod condition;
mod envelope;
mod fields;
mod filter;
mod include;
mod page;
mod paginator;
mod sort;

pub use builder::RequestQuery;
pub use condition::Comparison;
pub use condition::Condition;
pub use condition::Group;
pub use condition::GroupKind;
pub use condition::Predicate;
pub use condition::escape_regex;
pub use fields::FieldSet;
pub use filter::FilterBuilder;
pub use filter::TextMatch;
pub use include::Include;
pub use include::IncludeSet;
pub use page::Page;
pub use paginator::Paginator;
pub use sort::Direction;
pub use sort::SortList;
