use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One line item joined with its order, customer and product.
///
/// Field order matches the select list in `DbClient::load_sales_rows`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Queryable)]
pub struct SalesRow {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub registration_date: String,
    pub order_id: i32,
    pub order_date: String,
    pub total_amount: f64,
    pub product_name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub unit_price: f64,
}
