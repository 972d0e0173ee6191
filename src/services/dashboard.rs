use tracing::info;

use super::analytics::{self, Kpis};
use super::commentary;
use super::dataset::SalesDataset;
use super::misc::{format_count, format_currency, order_count};
use crate::db::models::{
    AnalysisPage, ChartKind, ChartPoint, ChartSpec, DatasetInfo, InsightsPage, Metric,
    OverviewPage, Panel, DEFAULT_TOP_N,
};
use crate::db::DbClient;
use crate::errors::ApiError;
use crate::Result;

pub const DASHBOARD_TITLE: &str = "Legal Desk Analytics Dashboard";
const SAMPLE_ROWS: usize = 5;
const TOP_CUSTOMERS: usize = 10;
const TOP_PRODUCTS_BY_REVENUE: usize = 10;
const TICK_ANGLE: i32 = 45;
/// Head room above the tallest bar so value labels stay visible
const LABEL_HEADROOM: f64 = 5.0;

const OTHER_CATEGORY_COLOR: &str = "#A9A9A9";

/// Fixed colours so a category looks the same on every chart
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Real Estate" => "#87CEEB",
        "Business" => "#4682B4",
        "Personal" => "#FFB6C1",
        "Intellectual Property" => "#FF6B6B",
        _ => OTHER_CATEGORY_COLOR,
    }
}

/// Builds dashboard pages from the database, going through the page cache
#[derive(Clone)]
pub struct Dashboard {
    db: DbClient,
}

impl Dashboard {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }

    pub fn overview_cache_key() -> String {
        "page:overview".to_string()
    }

    pub fn analysis_cache_key(top_n: u32) -> String {
        format!("page:analysis:{top_n}")
    }

    pub fn insights_cache_key() -> String {
        "page:insights".to_string()
    }

    pub async fn load_dataset(&self) -> Result<SalesDataset> {
        let rows = self.db.load_sales_rows().await?;
        SalesDataset::from_rows(rows)
    }

    pub async fn overview(&self) -> Result<OverviewPage> {
        let key = Self::overview_cache_key();
        if let Some(page) = self.db.get_cached_json(&key).await {
            return Ok(page);
        }
        let page = build_overview(&self.load_dataset().await?);
        self.db.put_cached_json(&key, &page).await;
        Ok(page)
    }

    /// `top_n` must already be validated
    pub async fn analysis(&self, top_n: u32) -> Result<AnalysisPage> {
        let key = Self::analysis_cache_key(top_n);
        if let Some(page) = self.db.get_cached_json(&key).await {
            return Ok(page);
        }
        let page = build_analysis(&self.load_dataset().await?, top_n);
        self.db.put_cached_json(&key, &page).await;
        Ok(page)
    }

    pub async fn insights(&self) -> Result<InsightsPage> {
        let key = Self::insights_cache_key();
        if let Some(page) = self.db.get_cached_json(&key).await {
            return Ok(page);
        }
        let page = build_insights(&self.load_dataset().await?);
        self.db.put_cached_json(&key, &page).await;
        Ok(page)
    }

    /// Rebuilds every page with default parameters and stores them in the cache.
    /// Returns the number of pages written, failing when none could be written.
    pub async fn refresh_cache(&self) -> Result<usize> {
        let dataset = self.load_dataset().await?;

        let written = [
            self.db
                .put_cached_json(&Self::overview_cache_key(), &build_overview(&dataset))
                .await,
            self.db
                .put_cached_json(
                    &Self::analysis_cache_key(DEFAULT_TOP_N),
                    &build_analysis(&dataset, DEFAULT_TOP_N),
                )
                .await,
            self.db
                .put_cached_json(&Self::insights_cache_key(), &build_insights(&dataset))
                .await,
        ]
        .into_iter()
        .filter(|written| *written)
        .count();

        if written == 0 {
            return Err(ApiError::Custom(
                "No dashboard pages could be written to the cache".to_string(),
            ));
        }

        info!(
            "Refreshed {} dashboard pages from {} records",
            written,
            dataset.len()
        );
        Ok(written)
    }
}

pub fn kpi_metrics(kpis: &Kpis) -> Vec<Metric> {
    vec![
        Metric::new(
            "Total Customers",
            kpis.total_customers as f64,
            format_count(kpis.total_customers as u64),
        ),
        Metric::new(
            "Total Orders",
            kpis.total_orders as f64,
            format_count(kpis.total_orders as u64),
        ),
        Metric::new(
            "Total Revenue",
            kpis.total_revenue,
            format_currency(kpis.total_revenue),
        ),
        Metric::new(
            "Avg Order Value",
            kpis.avg_order_value,
            format_currency(kpis.avg_order_value),
        ),
        Metric::new(
            "Orders per Customer",
            kpis.orders_per_customer,
            format!("{:.2}", kpis.orders_per_customer),
        ),
        Metric::new(
            "Avg Items per Order",
            kpis.avg_items_per_order,
            format!("{:.2}", kpis.avg_items_per_order),
        ),
    ]
}

pub fn build_overview(dataset: &SalesDataset) -> OverviewPage {
    let range = dataset.date_range();

    OverviewPage {
        title: DASHBOARD_TITLE.to_string(),
        header: "Business/data Overview".to_string(),
        kpis: kpi_metrics(&analytics::kpis(dataset)),
        dataset: DatasetInfo {
            first_order_date: range.map(|(first, _)| first),
            last_order_date: range.map(|(_, last)| last),
            total_records: dataset.len(),
        },
        sample: dataset.sample(SAMPLE_ROWS),
    }
}

fn volume_points(volumes: &[analytics::PeriodVolume]) -> Vec<ChartPoint> {
    volumes
        .iter()
        .map(|v| ChartPoint::new(v.period_start.format("%Y-%m-%d").to_string(), v.orders as f64))
        .collect()
}

pub fn build_analysis(dataset: &SalesDataset, top_n: u32) -> AnalysisPage {
    let weekly = analytics::weekly_orders(dataset);
    let monthly = analytics::monthly_orders(dataset);
    let frequency = analytics::product_frequency(dataset);

    let weekly_orders = Panel {
        heading: "1. Orders Development Over Time".to_string(),
        chart: Some(
            ChartSpec::builder(ChartKind::Line, "Weekly Order Volume")
                .with_axes("Week (Mon–Sun)", "Number of Orders")
                .with_points(volume_points(&weekly))
                .with_fill_to_zero(true)
                .build(),
        ),
        metrics: Vec::new(),
        observation: commentary::weekly_observation(&weekly),
    };

    let monthly_orders = Panel {
        heading: "Monthly Order Volume".to_string(),
        chart: Some(
            ChartSpec::builder(ChartKind::Line, "Monthly Order Volume")
                .with_axes("Month", "Number of Orders")
                .with_points(volume_points(&monthly))
                .with_fill_to_zero(true)
                .build(),
        ),
        metrics: Vec::new(),
        observation: commentary::monthly_observation(&monthly),
    };

    let top_two: Vec<&str> = frequency
        .iter()
        .take(2)
        .map(|p| p.product_name.as_str())
        .collect();
    let share = analytics::order_share(dataset, &top_two);
    let max_orders = frequency.first().map(|p| p.orders as f64);

    let top_products = Panel {
        heading: "2. Most Frequently Ordered Products".to_string(),
        chart: Some(
            ChartSpec::builder(
                ChartKind::Bar,
                format!("Top {top_n} Products by Order Count"),
            )
            .with_axes("Product", "Orders")
            .with_points(
                frequency
                    .iter()
                    .take(top_n as usize)
                    .map(|p| ChartPoint::new(p.product_name.clone(), p.orders as f64))
                    .collect(),
            )
            .with_show_values(true)
            .with_y_max(max_orders.map(|max| max + LABEL_HEADROOM))
            .with_x_tick_angle(TICK_ANGLE)
            .build(),
        ),
        metrics: Vec::new(),
        observation: commentary::product_observation(&frequency, share),
    };

    AnalysisPage {
        title: DASHBOARD_TITLE.to_string(),
        header: "Required Task Analysis".to_string(),
        top_n,
        weekly_orders,
        monthly_orders,
        top_products,
    }
}

pub fn build_insights(dataset: &SalesDataset) -> InsightsPage {
    let total_revenue = analytics::kpis(dataset).total_revenue;
    let customers = analytics::customer_value(dataset);
    let categories = analytics::category_performance(dataset);
    let products = analytics::product_revenue(dataset);
    let frequency = analytics::product_frequency(dataset);

    let customer_value = Panel {
        heading: "Customer Value Analysis".to_string(),
        chart: Some(
            ChartSpec::builder(ChartKind::Bar, "Top 10 Customers by Total Revenue")
                .with_axes("Customer", "Total Revenue ($)")
                .with_points(
                    customers
                        .iter()
                        .take(TOP_CUSTOMERS)
                        .map(|c| ChartPoint::new(c.customer_name.clone(), c.revenue))
                        .collect(),
                )
                .with_x_tick_angle(TICK_ANGLE)
                .build(),
        ),
        metrics: Vec::new(),
        observation: commentary::customer_observation(&customers, total_revenue, TOP_CUSTOMERS),
    };

    let category_panel = Panel {
        heading: "Product Category Analysis".to_string(),
        chart: Some(
            ChartSpec::builder(ChartKind::Pie, "Revenue Distribution by Category")
                .with_points(
                    categories
                        .iter()
                        .map(|c| {
                            ChartPoint::new(c.category.clone(), c.revenue)
                                .with_color(category_color(&c.category))
                        })
                        .collect(),
                )
                .build(),
        ),
        metrics: categories
            .iter()
            .map(|c| {
                Metric::new(c.category.clone(), c.revenue, format_currency(c.revenue))
                    .with_delta(order_count(c.orders))
            })
            .collect(),
        observation: commentary::category_observation(&categories),
    };

    let product_revenue = Panel {
        heading: "Top Products by Revenue".to_string(),
        chart: Some(
            ChartSpec::builder(ChartKind::Bar, "Top 10 Products by Revenue")
                .with_axes("Product", "Revenue ($)")
                .with_points(
                    products
                        .iter()
                        .take(TOP_PRODUCTS_BY_REVENUE)
                        .map(|p| {
                            ChartPoint::new(p.product_name.clone(), p.revenue)
                                .with_group(p.category.clone())
                                .with_color(category_color(&p.category))
                        })
                        .collect(),
                )
                .with_x_tick_angle(TICK_ANGLE)
                .build(),
        ),
        metrics: Vec::new(),
        observation: commentary::product_revenue_observation(&products, &frequency),
    };

    InsightsPage {
        title: DASHBOARD_TITLE.to_string(),
        header: "Additional BI".to_string(),
        customer_value,
        categories: category_panel,
        product_revenue,
    }
}
