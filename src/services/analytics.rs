//! Aggregations behind the dashboard charts.
//!
//! Counts of orders are always counts of *distinct* orders: an order with
//! several line items counts once.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::dataset::{SalesDataset, SalesRecord};
use super::misc::ratio;

/// Headline numbers of the overview page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub total_customers: usize,
    pub total_orders: usize,
    pub total_revenue: f64,
    pub avg_order_value: f64,
    pub orders_per_customer: f64,
    pub avg_items_per_order: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodVolume {
    pub period_start: NaiveDate,
    pub orders: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSummary {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFrequency {
    pub product_name: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerValue {
    pub customer_id: i32,
    pub customer_name: String,
    pub revenue: f64,
    pub orders: usize,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPerformance {
    pub category: String,
    pub revenue: f64,
    pub quantity: i64,
    pub orders: usize,
    /// Fraction of total revenue, 0..=1
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
    pub product_name: String,
    pub category: String,
    pub revenue: f64,
    pub quantity: i64,
}

pub fn kpis(dataset: &SalesDataset) -> Kpis {
    let records = dataset.records();
    let customers: HashSet<i32> = records.iter().map(|r| r.customer_id).collect();

    let mut order_revenue: HashMap<i32, f64> = HashMap::new();
    let mut order_lines: HashMap<i32, usize> = HashMap::new();
    for record in records {
        *order_revenue.entry(record.order_id).or_default() += record.item_revenue;
        *order_lines.entry(record.order_id).or_default() += 1;
    }

    let total_orders = order_revenue.len();
    let total_revenue: f64 = records.iter().map(|r| r.item_revenue).sum();
    let order_count = total_orders as f64;

    Kpis {
        total_customers: customers.len(),
        total_orders,
        total_revenue,
        avg_order_value: ratio(order_revenue.values().sum(), order_count),
        orders_per_customer: ratio(order_count, customers.len() as f64),
        avg_items_per_order: ratio(order_lines.values().sum::<usize>() as f64, order_count),
    }
}

/// Distinct orders per week, weeks starting on Monday, ascending
pub fn weekly_orders(dataset: &SalesDataset) -> Vec<PeriodVolume> {
    orders_per_period(dataset, |r| r.week_start)
}

/// Distinct orders per calendar month, ascending
pub fn monthly_orders(dataset: &SalesDataset) -> Vec<PeriodVolume> {
    orders_per_period(dataset, |r| r.month_start)
}

fn orders_per_period<F>(dataset: &SalesDataset, period: F) -> Vec<PeriodVolume>
where
    F: Fn(&SalesRecord) -> NaiveDate,
{
    let mut buckets: BTreeMap<NaiveDate, BTreeSet<i32>> = BTreeMap::new();
    for record in dataset.records() {
        buckets
            .entry(period(record))
            .or_default()
            .insert(record.order_id);
    }
    buckets
        .into_iter()
        .map(|(period_start, orders)| PeriodVolume {
            period_start,
            orders: orders.len(),
        })
        .collect()
}

pub fn summarize(volumes: &[PeriodVolume]) -> Option<VolumeSummary> {
    let min = volumes.iter().map(|v| v.orders).min()?;
    let max = volumes.iter().map(|v| v.orders).max()?;
    let total: usize = volumes.iter().map(|v| v.orders).sum();
    Some(VolumeSummary {
        min,
        max,
        mean: ratio(total as f64, volumes.len() as f64),
    })
}

/// Distinct orders per product, most ordered first (ties by name)
pub fn product_frequency(dataset: &SalesDataset) -> Vec<ProductFrequency> {
    let mut orders: HashMap<&str, HashSet<i32>> = HashMap::new();
    for record in dataset.records() {
        orders
            .entry(record.product_name.as_str())
            .or_default()
            .insert(record.order_id);
    }

    let mut frequency: Vec<ProductFrequency> = orders
        .into_iter()
        .map(|(name, ids)| ProductFrequency {
            product_name: name.to_string(),
            orders: ids.len(),
        })
        .collect();
    frequency.sort_by(|a, b| {
        b.orders
            .cmp(&a.orders)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    frequency
}

/// Fraction of all orders that contain at least one of `products`
pub fn order_share(dataset: &SalesDataset, products: &[&str]) -> f64 {
    let mut all_orders = HashSet::new();
    let mut matching = HashSet::new();
    for record in dataset.records() {
        all_orders.insert(record.order_id);
        if products.contains(&record.product_name.as_str()) {
            matching.insert(record.order_id);
        }
    }
    ratio(matching.len() as f64, all_orders.len() as f64)
}

/// Revenue, orders and units per customer, highest revenue first
pub fn customer_value(dataset: &SalesDataset) -> Vec<CustomerValue> {
    let mut by_customer: HashMap<i32, (CustomerValue, HashSet<i32>)> = HashMap::new();
    for record in dataset.records() {
        let (value, orders) = by_customer.entry(record.customer_id).or_insert_with(|| {
            (
                CustomerValue {
                    customer_id: record.customer_id,
                    customer_name: record.customer_name(),
                    revenue: 0.0,
                    orders: 0,
                    quantity: 0,
                },
                HashSet::new(),
            )
        });
        value.revenue += record.item_revenue;
        value.quantity += i64::from(record.quantity);
        orders.insert(record.order_id);
    }

    let mut customers: Vec<CustomerValue> = by_customer
        .into_values()
        .map(|(mut value, orders)| {
            value.orders = orders.len();
            value
        })
        .collect();
    customers.sort_by(|a, b| {
        desc(a.revenue, b.revenue).then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    customers
}

/// Revenue, units, orders and revenue share per category, highest revenue first
pub fn category_performance(dataset: &SalesDataset) -> Vec<CategoryPerformance> {
    let mut by_category: HashMap<&str, (f64, i64, HashSet<i32>)> = HashMap::new();
    for record in dataset.records() {
        let (revenue, quantity, orders) =
            by_category.entry(record.category.as_str()).or_default();
        *revenue += record.item_revenue;
        *quantity += i64::from(record.quantity);
        orders.insert(record.order_id);
    }

    let total: f64 = by_category.values().map(|(revenue, _, _)| revenue).sum();
    let mut categories: Vec<CategoryPerformance> = by_category
        .into_iter()
        .map(|(category, (revenue, quantity, orders))| CategoryPerformance {
            category: category.to_string(),
            revenue,
            quantity,
            orders: orders.len(),
            share: ratio(revenue, total),
        })
        .collect();
    categories.sort_by(|a, b| desc(a.revenue, b.revenue).then_with(|| a.category.cmp(&b.category)));
    categories
}

/// Revenue and units per (product, category), highest revenue first
pub fn product_revenue(dataset: &SalesDataset) -> Vec<ProductRevenue> {
    let mut by_product: HashMap<(&str, &str), (f64, i64)> = HashMap::new();
    for record in dataset.records() {
        let (revenue, quantity) = by_product
            .entry((record.product_name.as_str(), record.category.as_str()))
            .or_default();
        *revenue += record.item_revenue;
        *quantity += i64::from(record.quantity);
    }

    let mut products: Vec<ProductRevenue> = by_product
        .into_iter()
        .map(|((product_name, category), (revenue, quantity))| ProductRevenue {
            product_name: product_name.to_string(),
            category: category.to_string(),
            revenue,
            quantity,
        })
        .collect();
    products.sort_by(|a, b| {
        desc(a.revenue, b.revenue)
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then_with(|| a.category.cmp(&b.category))
    });
    products
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::dataset::tests::row;

    /// Four orders from three customers across two months
    pub(crate) fn fixture() -> SalesDataset {
        SalesDataset::from_rows(vec![
            row((1, "Ada", "Lovelace"), 100, "2024-04-01", ("NDA Agreement", "Business"), 2, 150.0),
            row((1, "Ada", "Lovelace"), 100, "2024-04-01", ("Deed of Trust", "Real Estate"), 1, 200.0),
            row((2, "Alan", "Turing"), 101, "2024-04-03", ("Deed of Trust", "Real Estate"), 1, 200.0),
            row((3, "Grace", "Hopper"), 102, "2024-04-10", ("NDA Agreement", "Business"), 1, 150.0),
            row((1, "Ada", "Lovelace"), 103, "2024-05-13", ("Last Will", "Personal"), 1, 90.0),
        ])
        .unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_kpis() {
        let kpis = kpis(&fixture());

        assert_eq!(kpis.total_customers, 3);
        assert_eq!(kpis.total_orders, 4);
        assert_eq!(kpis.total_revenue, 940.0);
        assert_eq!(kpis.avg_order_value, 235.0);
        assert!((kpis.orders_per_customer - 4.0 / 3.0).abs() < 1e-9);
        assert_eq!(kpis.avg_items_per_order, 1.25);
    }

    #[test]
    fn test_kpis_on_empty_dataset() {
        let kpis = kpis(&SalesDataset::default());

        assert_eq!(kpis.total_orders, 0);
        assert_eq!(kpis.total_revenue, 0.0);
        assert_eq!(kpis.avg_order_value, 0.0);
        assert_eq!(kpis.orders_per_customer, 0.0);
        assert_eq!(kpis.avg_items_per_order, 0.0);
    }

    #[test]
    fn test_weekly_orders_count_distinct_orders() {
        let weekly = weekly_orders(&fixture());

        assert_eq!(
            weekly,
            vec![
                PeriodVolume { period_start: day("2024-04-01"), orders: 2 },
                PeriodVolume { period_start: day("2024-04-08"), orders: 1 },
                PeriodVolume { period_start: day("2024-05-13"), orders: 1 },
            ]
        );
        let summary = summarize(&weekly).unwrap();
        assert_eq!(summary.min, 1);
        assert_eq!(summary.max, 2);
        assert!((summary.mean - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_orders() {
        let monthly = monthly_orders(&fixture());

        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].period_start, day("2024-04-01"));
        assert_eq!(monthly[0].orders, 3);
        assert_eq!(monthly[1].orders, 1);
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_product_frequency_sorted_descending() {
        let frequency = product_frequency(&fixture());

        let names: Vec<_> = frequency.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["Deed of Trust", "NDA Agreement", "Last Will"]);
        assert_eq!(frequency[0].orders, 2);
        assert_eq!(frequency[1].orders, 2);
        assert_eq!(frequency[2].orders, 1);
    }

    #[test]
    fn test_order_share() {
        let dataset = fixture();

        assert_eq!(order_share(&dataset, &["Deed of Trust", "NDA Agreement"]), 0.75);
        assert_eq!(order_share(&dataset, &["Unknown"]), 0.0);
        assert_eq!(order_share(&SalesDataset::default(), &["NDA Agreement"]), 0.0);
    }

    #[test]
    fn test_customer_value() {
        let customers = customer_value(&fixture());

        assert_eq!(customers[0].customer_name, "Ada Lovelace");
        assert_eq!(customers[0].revenue, 590.0);
        assert_eq!(customers[0].orders, 2);
        assert_eq!(customers[0].quantity, 4);
        assert_eq!(customers[1].customer_name, "Alan Turing");
        assert_eq!(customers[2].customer_name, "Grace Hopper");
    }

    #[test]
    fn test_category_shares_sum_to_one() {
        let categories = category_performance(&fixture());

        assert_eq!(categories[0].category, "Business");
        assert_eq!(categories[0].revenue, 450.0);
        assert_eq!(categories[0].orders, 2);
        assert_eq!(categories[1].category, "Real Estate");
        let total: f64 = categories.iter().map(|c| c.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_product_revenue() {
        let products = product_revenue(&fixture());

        assert_eq!(products[0].product_name, "NDA Agreement");
        assert_eq!(products[0].revenue, 450.0);
        assert_eq!(products[0].quantity, 3);
        assert_eq!(products[1].product_name, "Deed of Trust");
        assert_eq!(products[1].category, "Real Estate");
    }
}
