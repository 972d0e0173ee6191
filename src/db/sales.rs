use diesel::prelude::*;
use tracing::{error, info};

use super::DbClient;
use crate::db::models::SalesRow;
use crate::Result;

/// DbClient helper functions for the joined sales view
impl DbClient {
    /// Loads every line item joined with its order, customer and product.
    ///
    /// Rows come back ordered by order then product so previews are stable.
    pub async fn load_sales_rows(&self) -> Result<Vec<SalesRow>> {
        use crate::schema::{customers, order_items, orders, products};

        info!("Loading sales records");
        let rows = self
            .with_conn(|conn| {
                customers::table
                    .inner_join(orders::table.inner_join(order_items::table.inner_join(products::table)))
                    .select((
                        customers::customer_id,
                        customers::first_name,
                        customers::last_name,
                        customers::registration_date,
                        orders::order_id,
                        orders::order_date,
                        orders::total_amount,
                        products::product_name,
                        products::category,
                        products::price,
                        order_items::quantity,
                        order_items::unit_price,
                    ))
                    .order((orders::order_id.asc(), order_items::product_id.asc()))
                    .load::<SalesRow>(conn)
                    .map_err(Into::into)
            })
            .await
            .map_err(|e| {
                error!("Failed to load sales records: {}", e);
                e
            })?;

        info!("Loaded {} sales records", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::connection::tests::seeded_database;
    use crate::db::DbClient;

    #[tokio::test]
    async fn test_load_sales_rows_joins_all_tables() {
        let (_dir, path) = seeded_database();
        let client = DbClient::new(&path, None).unwrap();

        let rows = client.load_sales_rows().await.unwrap();

        assert_eq!(rows.len(), 4);
        let first = &rows[0];
        assert_eq!(first.order_id, 100);
        assert_eq!(first.first_name, "Ada");
        assert_eq!(first.product_name, "NDA Agreement");
        assert_eq!(first.category, "Business");
        assert_eq!(first.quantity, 2);
        assert_eq!(first.unit_price, 150.0);
        assert_eq!(rows[3].order_id, 102);
        assert_eq!(rows[3].last_name, "Lovelace");
    }
}
