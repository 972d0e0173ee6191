use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::db::models::{SalesRow, SampleRow};
use crate::errors::ApiError;
use crate::Result;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A line item with parsed dates and derived reporting columns
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub registration_date: NaiveDateTime,
    pub order_id: i32,
    pub order_date: NaiveDateTime,
    pub total_amount: f64,
    pub product_name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub unit_price: f64,
    pub item_revenue: f64,
    pub week_start: NaiveDate,
    pub month_start: NaiveDate,
}

impl SalesRecord {
    pub fn from_row(row: SalesRow) -> Result<Self> {
        let order_date = parse_timestamp("Orders.order_date", &row.order_date)?;
        let registration_date =
            parse_timestamp("Customers.registration_date", &row.registration_date)?;
        let day = order_date.date();

        Ok(Self {
            customer_id: row.customer_id,
            first_name: row.first_name,
            last_name: row.last_name,
            registration_date,
            order_id: row.order_id,
            order_date,
            total_amount: row.total_amount,
            product_name: row.product_name,
            category: row.category,
            price: row.price,
            quantity: row.quantity,
            unit_price: row.unit_price,
            item_revenue: f64::from(row.quantity) * row.unit_price,
            week_start: week_start(day),
            month_start: month_start(day),
        })
    }

    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&SalesRecord> for SampleRow {
    fn from(record: &SalesRecord) -> Self {
        SampleRow {
            customer_id: record.customer_id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            registration_date: record.registration_date,
            order_id: record.order_id,
            order_date: record.order_date,
            total_amount: record.total_amount,
            product_name: record.product_name.clone(),
            category: record.category.clone(),
            price: record.price,
            quantity: record.quantity,
            unit_price: record.unit_price,
            item_revenue: record.item_revenue,
            week_start: record.week_start,
            month_start: record.month_start,
        }
    }
}

/// All line items of the shop, in query order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    pub fn from_rows(rows: Vec<SalesRow>) -> Result<Self> {
        let records = rows
            .into_iter()
            .map(SalesRecord::from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest order date
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.order_date.date()).min()?;
        let last = self.records.iter().map(|r| r.order_date.date()).max()?;
        Some((first, last))
    }

    pub fn sample(&self, n: usize) -> Vec<SampleRow> {
        self.records.iter().take(n).map(SampleRow::from).collect()
    }
}

/// Parses the date and timestamp spellings SQLite databases commonly hold
pub fn parse_timestamp(column: &'static str, value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(NaiveDateTime::new(date, NaiveTime::default()));
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.naive_utc());
    }

    Err(ApiError::InvalidDate {
        column,
        value: value.to_string(),
    })
}

/// Monday of the week containing `day`
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// First day of the month containing `day`
pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Weekday;

    pub(crate) fn row(
        customer: (i32, &str, &str),
        order_id: i32,
        order_date: &str,
        product: (&str, &str),
        quantity: i32,
        unit_price: f64,
    ) -> SalesRow {
        SalesRow {
            customer_id: customer.0,
            first_name: customer.1.to_string(),
            last_name: customer.2.to_string(),
            registration_date: "2023-01-01".to_string(),
            order_id,
            order_date: order_date.to_string(),
            total_amount: 0.0,
            product_name: product.0.to_string(),
            category: product.1.to_string(),
            price: unit_price,
            quantity,
            unit_price,
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = day("2024-04-01").and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("c", "2024-04-01").unwrap(), midnight);
        assert_eq!(
            parse_timestamp("c", "2024-04-01 10:15:00").unwrap(),
            day("2024-04-01").and_hms_opt(10, 15, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("c", "2024-04-01T10:15:00.250").unwrap(),
            day("2024-04-01").and_hms_milli_opt(10, 15, 0, 250).unwrap()
        );
        assert_eq!(
            parse_timestamp("c", "2024-04-01T12:00:00+02:00").unwrap(),
            day("2024-04-01").and_hms_opt(10, 0, 0).unwrap()
        );
        assert_eq!(parse_timestamp("c", " 2024-04-01 ").unwrap(), midnight);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("Orders.order_date", "01/04/2024").unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidDate { column: "Orders.order_date", .. }
        ));
    }

    #[test]
    fn test_week_start_is_monday_on_or_before() {
        for offset in 0..14 {
            let d = day("2024-09-01") + Duration::days(offset);
            let start = week_start(d);
            assert_eq!(start.weekday(), Weekday::Mon);
            assert!(start <= d);
            assert!(d - start < Duration::days(7));
        }
        assert_eq!(week_start(day("2024-04-07")), day("2024-04-01"));
        assert_eq!(week_start(day("2024-04-01")), day("2024-04-01"));
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(day("2024-02-29")), day("2024-02-01"));
        assert_eq!(month_start(day("2024-12-01")), day("2024-12-01"));
    }

    #[test]
    fn test_from_rows_derives_columns() {
        let dataset = SalesDataset::from_rows(vec![
            row((1, "Ada", "Lovelace"), 7, "2024-04-03 10:15:00", ("NDA", "Business"), 3, 12.5),
            row((2, "Alan", "Turing"), 8, "2024-05-20", ("Will", "Personal"), 1, 90.0),
        ])
        .unwrap();

        let first = &dataset.records()[0];
        assert_eq!(first.item_revenue, 37.5);
        assert_eq!(first.week_start, day("2024-04-01"));
        assert_eq!(first.month_start, day("2024-04-01"));
        assert_eq!(first.customer_name(), "Ada Lovelace");
        assert_eq!(
            dataset.date_range(),
            Some((day("2024-04-03"), day("2024-05-20")))
        );
        assert_eq!(dataset.sample(1).len(), 1);
        assert_eq!(dataset.sample(10).len(), 2);
    }

    #[test]
    fn test_from_rows_reports_bad_dates() {
        let result = SalesDataset::from_rows(vec![row(
            (1, "Ada", "Lovelace"),
            7,
            "not a date",
            ("NDA", "Business"),
            1,
            1.0,
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = SalesDataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.date_range(), None);
        assert!(dataset.sample(5).is_empty());
    }
}
