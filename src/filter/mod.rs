//! Filter value parsing and matching
//!
//! Each filterable field takes one raw string. Text fields (`title`,
//! `cuisine`) match case-insensitively as substrings. Numeric fields
//! (`rating`, `total_time`, `calories`) accept a comparison.
//!
//! # Syntax
//!
//! ```text
//! op:value     Explicit operator: eq, gt, gte, ge, lt, lte, le
//! >=value      Same as gte:value
//! <=value      Same as lte:value
//! >value       Same as gt:value
//! <value       Same as lt:value
//! value        Same as eq:value
//! ```
//!
//! `gt` and `gte` both mean "at least", `lt` and `lte` both mean "at most".
//! Any other operator token means equality.
//!
//! # Examples
//!
//! ```text
//! rating=gte:4.5          Rated 4.5 or better
//! total_time=<=30         Ready in half an hour
//! calories=lt:400         "389 kcal" matches, "520 kcal" does not
//! ```
//!
//! A value that cannot be read as a number makes that filter inactive rather
//! than failing the query.

pub mod error;
pub mod extract;
pub mod matcher;
pub mod parser;

pub use error::FilterParseError;
pub use extract::extract_number;
pub use matcher::{
    FieldFilter, FilterField, FilterSet, FilterState, InactiveReason, SearchParams, build_filter,
};
pub use parser::{Bound, Comparison};
