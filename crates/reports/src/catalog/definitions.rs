//! The canned donation reports.
//!
//! Aliases are fixed across reports (`p` providers, `r` receivers,
//! `f` food_listings, `c` claims) so the shared filter columns line up.

use crate::{
    catalog::{
        query::ReportQuery,
        schema::{CLAIMS, FOOD_LISTINGS, PROVIDERS, RECEIVERS},
    },
    filter::keys::{CITY, CLAIM_STATUS, FOOD_TYPE, MEAL_TYPE},
};
use model::core::value::Value;
use planner::query::{
    alias,
    ast::{
        common::{JoinKind, OrderDir, TableRef},
        expr::{BinaryOperator, Expr},
    },
    builder::select::SelectBuilder,
    count_all, func, ident, qualified, value,
};

pub const TOTAL_CLAIMS_PER_PROVIDER: &str = "Total Claims per Provider";
pub const TOP_PROVIDERS_BY_QUANTITY: &str = "Top 10 Providers by Food Quantity";
pub const CLAIMS_BY_STATUS: &str = "Claims by Status";
pub const LISTINGS_BY_TYPE: &str = "Food Listings by Type";
pub const MEAL_TYPE_DISTRIBUTION: &str = "Meal Type Distribution";
pub const EXPIRED_LISTINGS: &str = "Expired Food Listings";
pub const ACTIVE_LISTINGS: &str = "Active Food Listings";
pub const TOP_CITIES_BY_PROVIDERS: &str = "Top Cities by Providers";
pub const TOP_CITIES_BY_RECEIVERS: &str = "Top Cities by Receivers";
pub const RECEIVERS_WITH_MOST_CLAIMS: &str = "Receivers with Most Claims";
pub const LISTINGS_PER_PROVIDER_TYPE: &str = "Food Listings Per Provider Type";
pub const AVG_QUANTITY_PER_FOOD_TYPE: &str = "Average Quantity per Food Type";
pub const CLAIMS_PER_FOOD_TYPE: &str = "Claims per Food Type";
pub const PROVIDERS_WITHOUT_LISTINGS: &str = "Providers Without Listings";
pub const RECEIVERS_WITHOUT_CLAIMS: &str = "Receivers Without Claims";

fn table(name: &str) -> TableRef {
    TableRef::new(name)
}

fn on(left: (&str, &str), right: (&str, &str)) -> Expr {
    Expr::eq(qualified(left.0, left.1), qualified(right.0, right.1))
}

fn listing_provider_join() -> Expr {
    on(("f", "provider_id"), ("p", "provider_id"))
}

pub fn default_reports() -> Vec<ReportQuery> {
    vec![
        total_claims_per_provider(),
        top_providers_by_quantity(),
        claims_by_status(),
        listings_by_type(),
        meal_type_distribution(),
        listings_by_expiry(EXPIRED_LISTINGS, BinaryOperator::Lt),
        listings_by_expiry(ACTIVE_LISTINGS, BinaryOperator::GtEq),
        top_cities(TOP_CITIES_BY_PROVIDERS, PROVIDERS, "provider_count"),
        top_cities(TOP_CITIES_BY_RECEIVERS, RECEIVERS, "receiver_count"),
        receivers_with_most_claims(),
        listings_per_provider_type(),
        avg_quantity_per_food_type(),
        claims_per_food_type(),
        providers_without_listings(),
        receivers_without_claims(),
    ]
}

fn total_claims_per_provider() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![
            alias(qualified("p", "name"), "provider_name"),
            alias(func("COUNT", qualified("c", "claim_id")), "total_claims"),
        ])
        .from(table(CLAIMS), Some("c"))
        .join(
            JoinKind::Inner,
            table(FOOD_LISTINGS),
            Some("f"),
            on(("c", "food_id"), ("f", "food_id")),
        )
        .join(JoinKind::Inner, table(PROVIDERS), Some("p"), listing_provider_join())
        .group_by(qualified("p", "name"))
        .order_by(ident("total_claims"), Some(OrderDir::Desc))
        .order_by(qualified("p", "name"), Some(OrderDir::Asc))
        .build();

    ReportQuery::new(
        TOTAL_CLAIMS_PER_PROVIDER,
        select,
        &[CITY, FOOD_TYPE, MEAL_TYPE, CLAIM_STATUS],
    )
}

fn top_providers_by_quantity() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![
            alias(qualified("p", "name"), "provider_name"),
            alias(func("SUM", qualified("f", "quantity")), "total_quantity"),
        ])
        .from(table(FOOD_LISTINGS), Some("f"))
        .join(JoinKind::Inner, table(PROVIDERS), Some("p"), listing_provider_join())
        .group_by(qualified("p", "name"))
        .order_by(ident("total_quantity"), Some(OrderDir::Desc))
        .order_by(qualified("p", "name"), Some(OrderDir::Asc))
        .limit(value(Value::Int(10)))
        .build();

    ReportQuery::new(
        TOP_PROVIDERS_BY_QUANTITY,
        select,
        &[CITY, FOOD_TYPE, MEAL_TYPE],
    )
}

fn claims_by_status() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![qualified("c", "status"), alias(count_all(), "total")])
        .from(table(CLAIMS), Some("c"))
        .group_by(qualified("c", "status"))
        .build();

    ReportQuery::new(CLAIMS_BY_STATUS, select, &[CLAIM_STATUS])
}

/// `COUNT(*)` of food listings grouped by one of its own columns.
fn listings_grouped_by(name: &str, column: &str, total_alias: &str) -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![qualified("f", column), alias(count_all(), total_alias)])
        .from(table(FOOD_LISTINGS), Some("f"))
        .group_by(qualified("f", column))
        .build();

    ReportQuery::new(name, select, &[FOOD_TYPE, MEAL_TYPE])
}

fn listings_by_type() -> ReportQuery {
    listings_grouped_by(LISTINGS_BY_TYPE, "food_type", "total")
}

fn meal_type_distribution() -> ReportQuery {
    listings_grouped_by(MEAL_TYPE_DISTRIBUTION, "meal_type", "total")
}

fn listings_per_provider_type() -> ReportQuery {
    listings_grouped_by(LISTINGS_PER_PROVIDER_TYPE, "provider_type", "total_listings")
}

fn listings_by_expiry(name: &str, op: BinaryOperator) -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![
            qualified("f", "food_name"),
            qualified("f", "expiry_date"),
            alias(qualified("p", "name"), "provider_name"),
        ])
        .from(table(FOOD_LISTINGS), Some("f"))
        .join(JoinKind::Inner, table(PROVIDERS), Some("p"), listing_provider_join())
        .where_clause(Expr::binary(
            qualified("f", "expiry_date"),
            op,
            Expr::CurrentDate,
        ))
        .build();

    ReportQuery::new(name, select, &[CITY, FOOD_TYPE, MEAL_TYPE])
}

fn top_cities(name: &str, source: &str, count_alias: &str) -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![ident("city"), alias(count_all(), count_alias)])
        .from(table(source), None)
        .group_by(ident("city"))
        .order_by(ident(count_alias), Some(OrderDir::Desc))
        .order_by(ident("city"), Some(OrderDir::Asc))
        .build();

    ReportQuery::new(name, select, &[])
}

fn receivers_with_most_claims() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![
            alias(qualified("r", "name"), "receiver_name"),
            alias(func("COUNT", qualified("c", "claim_id")), "total_claims"),
        ])
        .from(table(CLAIMS), Some("c"))
        .join(
            JoinKind::Inner,
            table(RECEIVERS),
            Some("r"),
            on(("c", "receiver_id"), ("r", "receiver_id")),
        )
        .group_by(qualified("r", "name"))
        .order_by(ident("total_claims"), Some(OrderDir::Desc))
        .order_by(qualified("r", "name"), Some(OrderDir::Asc))
        .build();

    ReportQuery::new(RECEIVERS_WITH_MOST_CLAIMS, select, &[CLAIM_STATUS])
}

fn avg_quantity_per_food_type() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![
            qualified("f", "food_type"),
            alias(func("AVG", qualified("f", "quantity")), "avg_quantity"),
        ])
        .from(table(FOOD_LISTINGS), Some("f"))
        .group_by(qualified("f", "food_type"))
        .build();

    ReportQuery::new(AVG_QUANTITY_PER_FOOD_TYPE, select, &[FOOD_TYPE, MEAL_TYPE])
}

fn claims_per_food_type() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![
            qualified("f", "food_type"),
            alias(func("COUNT", qualified("c", "claim_id")), "total_claims"),
        ])
        .from(table(CLAIMS), Some("c"))
        .join(
            JoinKind::Inner,
            table(FOOD_LISTINGS),
            Some("f"),
            on(("c", "food_id"), ("f", "food_id")),
        )
        .group_by(qualified("f", "food_type"))
        .build();

    ReportQuery::new(
        CLAIMS_PER_FOOD_TYPE,
        select,
        &[FOOD_TYPE, MEAL_TYPE, CLAIM_STATUS],
    )
}

fn providers_without_listings() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![qualified("p", "name"), qualified("p", "city")])
        .from(table(PROVIDERS), Some("p"))
        .join(
            JoinKind::Left,
            table(FOOD_LISTINGS),
            Some("f"),
            on(("p", "provider_id"), ("f", "provider_id")),
        )
        .where_clause(Expr::is_null(qualified("f", "food_id")))
        .build();

    ReportQuery::new(PROVIDERS_WITHOUT_LISTINGS, select, &[CITY])
}

fn receivers_without_claims() -> ReportQuery {
    let select = SelectBuilder::new()
        .select(vec![qualified("r", "name"), qualified("r", "city")])
        .from(table(RECEIVERS), Some("r"))
        .join(
            JoinKind::Left,
            table(CLAIMS),
            Some("c"),
            on(("r", "receiver_id"), ("c", "receiver_id")),
        )
        .where_clause(Expr::is_null(qualified("c", "claim_id")))
        .build();

    ReportQuery::new(RECEIVERS_WITHOUT_CLAIMS, select, &[])
}
