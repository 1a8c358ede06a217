use crate::catalog::schema::{CLAIMS, FOOD_LISTINGS, PROVIDERS};
use model::core::data_type::DataType;

/// A user-facing filter bound to the table column it narrows.
///
/// `qualifier` is the alias the reports give `table`; a report may only
/// declare a filter whose qualifier it actually joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterColumn {
    pub key: &'static str,
    pub qualifier: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub data_type: DataType,
}

pub const CITY: FilterColumn = FilterColumn {
    key: "city",
    qualifier: "p",
    table: PROVIDERS,
    column: "city",
    data_type: DataType::String,
};

pub const FOOD_TYPE: FilterColumn = FilterColumn {
    key: "food_type",
    qualifier: "f",
    table: FOOD_LISTINGS,
    column: "food_type",
    data_type: DataType::String,
};

pub const MEAL_TYPE: FilterColumn = FilterColumn {
    key: "meal_type",
    qualifier: "f",
    table: FOOD_LISTINGS,
    column: "meal_type",
    data_type: DataType::String,
};

pub const CLAIM_STATUS: FilterColumn = FilterColumn {
    key: "claim_status",
    qualifier: "c",
    table: CLAIMS,
    column: "status",
    data_type: DataType::String,
};

pub const ALL_FILTERS: [FilterColumn; 4] = [CITY, FOOD_TYPE, MEAL_TYPE, CLAIM_STATUS];

pub fn lookup(key: &str) -> Option<FilterColumn> {
    ALL_FILTERS.iter().find(|f| f.key == key).copied()
}

pub fn keys() -> Vec<&'static str> {
    ALL_FILTERS.iter().map(|f| f.key).collect()
}
