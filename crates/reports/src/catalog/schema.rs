//! The read-only donation schema the reports run against.

use lazy_static::lazy_static;
use std::collections::HashMap;

pub const PROVIDERS: &str = "providers";
pub const RECEIVERS: &str = "receivers";
pub const FOOD_LISTINGS: &str = "food_listings";
pub const CLAIMS: &str = "claims";

lazy_static! {
    static ref TABLES: HashMap<&'static str, &'static [&'static str]> = HashMap::from([
        (
            PROVIDERS,
            &["provider_id", "name", "type", "address", "city", "contact"][..],
        ),
        (
            RECEIVERS,
            &["receiver_id", "name", "type", "city", "contact"][..],
        ),
        (
            FOOD_LISTINGS,
            &[
                "food_id",
                "food_name",
                "quantity",
                "expiry_date",
                "provider_id",
                "provider_type",
                "location",
                "food_type",
                "meal_type",
            ][..],
        ),
        (
            CLAIMS,
            &["claim_id", "food_id", "receiver_id", "status", "timestamp"][..],
        ),
    ]);
}

pub fn columns(table: &str) -> Option<&'static [&'static str]> {
    TABLES.get(table).copied()
}

pub fn has_column(table: &str, column: &str) -> bool {
    columns(table).is_some_and(|cols| cols.contains(&column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_column() {
        assert!(has_column(CLAIMS, "status"));
        assert!(has_column(FOOD_LISTINGS, "meal_type"));
        assert!(!has_column(PROVIDERS, "meal_type"));
        assert!(!has_column("donors", "name"));
    }
}
