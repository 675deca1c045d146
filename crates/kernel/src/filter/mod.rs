//! Listing filters.
//!
//! This module provides:
//! - LivestockFilter / CropsFilter: per-request filter criteria
//! - Tristate: three-valued flag filter
//! - FilterCriteria: lowering of a filter into a WHERE clause
//! - WhereClause: literal fragment and bound SeaQuery renderings

mod query_builder;
pub mod types;

pub use query_builder::{Clause, FilterColumn, FilterCriteria, FilterTable, WhereClause};
pub use types::{
    CropsFilter, LivestockFilter, RangeFilter, Tristate, WILDCARD, deserialize_wildcard,
    parse_wildcard,
};
