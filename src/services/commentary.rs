//! Short interpretive observations printed under each chart.

use chrono::NaiveDate;

use super::analytics::{
    summarize, CategoryPerformance, CustomerValue, PeriodVolume, ProductFrequency, ProductRevenue,
};
use super::misc::{format_currency, format_currency_short, format_percent, order_count, ratio};

const MAX_LISTED_PEAKS: usize = 3;

pub const NO_ORDERS: &str = "No orders recorded yet.";

fn month_label(day: NaiveDate) -> String {
    day.format("%B %Y").to_string()
}

pub fn weekly_observation(weekly: &[PeriodVolume]) -> String {
    let Some(summary) = summarize(weekly) else {
        return NO_ORDERS.to_string();
    };

    let peaks: Vec<String> = weekly
        .iter()
        .filter(|w| w.orders == summary.max)
        .map(|w| w.period_start.format("%Y-%m-%d").to_string())
        .collect();
    let peak_text = match peaks.len() {
        1 => format!("the week of {}", peaks[0]),
        n if n <= MAX_LISTED_PEAKS => format!("the weeks of {}", peaks.join(", ")),
        n => format!(
            "{} weeks, including {}",
            n,
            peaks[..MAX_LISTED_PEAKS].join(", ")
        ),
    };

    format!(
        "Weekly orders range from {} to {} per week, averaging {:.1} per week. \
         Peak volume came in {}; quieter weeks are candidates for marketing pushes.",
        summary.min,
        order_count(summary.max),
        summary.mean,
        peak_text
    )
}

pub fn monthly_observation(monthly: &[PeriodVolume]) -> String {
    let (Some(best), Some(worst), Some(latest)) = (
        // earliest month wins ties for the peak
        monthly.iter().rev().max_by_key(|m| m.orders),
        monthly.iter().rev().min_by_key(|m| m.orders),
        monthly.last(),
    ) else {
        return NO_ORDERS.to_string();
    };

    if monthly.len() == 1 {
        let volume = if best.orders == 1 {
            "The only order falls".to_string()
        } else {
            format!("All {} fall", order_count(best.orders))
        };
        return format!(
            "{} in {}; more history is needed to read a trend.",
            volume,
            month_label(best.period_start)
        );
    }

    let mut text = format!(
        "{} tops the period at {}, against a trough of {} in {}.",
        month_label(best.period_start),
        order_count(best.orders),
        order_count(worst.orders),
        month_label(worst.period_start)
    );
    if latest.period_start != best.period_start {
        text.push_str(&format!(
            " The latest month, {}, reached {} of the best month's volume; \
             replicating whatever drove {} could prevent future dips.",
            month_label(latest.period_start),
            format_percent(ratio(latest.orders as f64, best.orders as f64)),
            month_label(best.period_start)
        ));
    }
    text
}

/// `share` is the fraction of all orders containing one of the top two products
pub fn product_observation(frequency: &[ProductFrequency], share: f64) -> String {
    match frequency {
        [] => NO_ORDERS.to_string(),
        [only] => format!(
            "'{}' is the only product ordered, appearing in {}.",
            only.product_name,
            order_count(only.orders)
        ),
        [first, second, ..] => format!(
            "Top products '{}' and '{}' record {} and {} and together appear in about {:.0}% of all orders.",
            first.product_name,
            second.product_name,
            order_count(first.orders),
            order_count(second.orders),
            share * 100.0
        ),
    }
}

/// Commentary on the `top` customers by revenue out of all `customers`
pub fn customer_observation(customers: &[CustomerValue], total_revenue: f64, top: usize) -> String {
    let leaders = &customers[..top.min(customers.len())];
    let (Some(first), Some(last)) = (leaders.first(), leaders.last()) else {
        return NO_ORDERS.to_string();
    };

    let leaders_revenue: f64 = leaders.iter().map(|c| c.revenue).sum();
    format!(
        "The top {} customers contribute {} ({} of total revenue) while representing {} of the customer base. \
         Individual spend among them ranges from {} to {}.",
        leaders.len(),
        format_currency(leaders_revenue),
        format_percent(ratio(leaders_revenue, total_revenue)),
        format_percent(ratio(leaders.len() as f64, customers.len() as f64)),
        format_currency(last.revenue),
        format_currency(first.revenue)
    )
}

pub fn category_observation(categories: &[CategoryPerformance]) -> String {
    if categories.is_empty() {
        return NO_ORDERS.to_string();
    }

    let split = categories
        .iter()
        .map(|c| format!("{} {}", c.category, format_percent(c.share)))
        .collect::<Vec<_>>()
        .join(", ");
    let spread = categories[0].share - categories[categories.len() - 1].share;
    let balance = if spread <= 0.2 {
        "Revenue is fairly evenly balanced across categories"
    } else {
        "Revenue is concentrated in a few categories"
    };
    format!("{balance}: {split}.")
}

pub fn product_revenue_observation(
    products: &[ProductRevenue],
    frequency: &[ProductFrequency],
) -> String {
    let Some(top) = products.first() else {
        return NO_ORDERS.to_string();
    };

    let mut text = format!(
        "'{}' ({}) generates the highest revenue at {}",
        top.product_name,
        top.category,
        format_currency_short(top.revenue)
    );
    match frequency.first() {
        Some(most_ordered) if most_ordered.product_name == top.product_name => {
            text.push_str(", and it is also the most frequently ordered product.")
        }
        Some(most_ordered) => text.push_str(&format!(
            ", while '{}' is ordered most often.",
            most_ordered.product_name
        )),
        None => text.push('.'),
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analytics::{self, tests::fixture};
    use crate::services::dataset::SalesDataset;

    #[test]
    fn test_empty_inputs_yield_neutral_text() {
        let empty = SalesDataset::default();

        assert_eq!(weekly_observation(&analytics::weekly_orders(&empty)), NO_ORDERS);
        assert_eq!(monthly_observation(&analytics::monthly_orders(&empty)), NO_ORDERS);
        assert_eq!(product_observation(&[], 0.0), NO_ORDERS);
        assert_eq!(customer_observation(&[], 0.0, 10), NO_ORDERS);
        assert_eq!(category_observation(&[]), NO_ORDERS);
        assert_eq!(product_revenue_observation(&[], &[]), NO_ORDERS);
    }

    #[test]
    fn test_weekly_observation() {
        let text = weekly_observation(&analytics::weekly_orders(&fixture()));

        assert!(text.contains("from 1 to 2 orders per week"));
        assert!(text.contains("in the week of 2024-04-01;"));
        assert!(text.contains("averaging 1.3 per week"));
        assert!(text.contains("week of 2024-04-01"));
    }

    #[test]
    fn test_monthly_observation() {
        let text = monthly_observation(&analytics::monthly_orders(&fixture()));

        assert!(text.starts_with("April 2024 tops the period at 3 orders"));
        assert!(text.contains("trough of 1 order in May 2024"));
        assert!(text.contains("33.3%"));
    }

    fn week(start: &str, orders: usize) -> PeriodVolume {
        PeriodVolume {
            period_start: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            orders,
        }
    }

    #[test]
    fn test_weekly_observation_names_how_many_peaks_were_cut() {
        let weekly = vec![
            week("2024-04-01", 4),
            week("2024-04-08", 4),
            week("2024-04-15", 1),
            week("2024-04-22", 4),
            week("2024-04-29", 4),
        ];
        let text = weekly_observation(&weekly);

        assert!(text.contains("4 weeks, including 2024-04-01, 2024-04-08, 2024-04-22;"));
        assert!(!text.contains("2024-04-29"));

        let text = weekly_observation(&weekly[..2]);
        assert!(text.contains("the weeks of 2024-04-01, 2024-04-08;"));
    }

    #[test]
    fn test_single_month_and_single_order_wording() {
        let text = monthly_observation(&[week("2024-04-01", 1)]);
        assert!(text.starts_with("The only order falls in April 2024"));

        let text = monthly_observation(&[week("2024-04-01", 3)]);
        assert!(text.starts_with("All 3 orders fall in April 2024"));

        let only = ProductFrequency {
            product_name: "Last Will".to_string(),
            orders: 1,
        };
        assert!(product_observation(&[only], 1.0).ends_with("appearing in 1 order."));
    }

    #[test]
    fn test_product_observation() {
        let dataset = fixture();
        let frequency = analytics::product_frequency(&dataset);
        let text = product_observation(&frequency, 0.75);

        assert!(text.contains("'Deed of Trust' and 'NDA Agreement'"));
        assert!(text.contains("about 75% of all orders"));
    }

    #[test]
    fn test_customer_observation() {
        let dataset = fixture();
        let customers = analytics::customer_value(&dataset);
        let text = customer_observation(&customers, 940.0, 2);

        assert!(text.starts_with("The top 2 customers contribute $790 (84.0% of total revenue)"));
        assert!(text.contains("66.7% of the customer base"));
        assert!(text.contains("from $200 to $590"));
    }

    #[test]
    fn test_category_observation() {
        let text = category_observation(&analytics::category_performance(&fixture()));

        assert!(text.starts_with("Revenue is concentrated in a few categories"));
        assert!(text.contains("Business 47.9%"));
        assert!(text.contains("Personal 9.6%"));
    }

    #[test]
    fn test_product_revenue_observation() {
        let dataset = fixture();
        let products = analytics::product_revenue(&dataset);
        let frequency = analytics::product_frequency(&dataset);

        let text = product_revenue_observation(&products, &frequency);
        assert!(text.starts_with("'NDA Agreement' (Business) generates the highest revenue at $450"));
        assert!(text.contains("while 'Deed of Trust' is ordered most often"));
    }
}
