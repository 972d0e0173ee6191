use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// General API response status
/// Used to indicate success or failure of operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Operation completed successfully
    Success,
    /// Operation encountered an error
    Error,
}

/// Standard error response structure
/// Used when an operation fails
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status will always be Error for this type
    pub status: Status,
    /// Detailed error message explaining what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: error.into(),
        }
    }
}

/// A single headline number on a dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    /// Raw value, for clients that format on their own
    pub value: f64,
    /// Value formatted for display, e.g. `$12,345`
    pub display: String,
    /// Secondary line shown under the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: f64, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            display: display.into(),
            delta: None,
        }
    }

    pub fn with_delta(mut self, delta: impl Into<String>) -> Self {
        self.delta = Some(delta.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// One data point of a chart. Pie slices use `label` as the slice name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    /// Series or colour group the point belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            group: None,
            color: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Declarative description of a chart, drawn by whichever front-end consumes the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
    /// Shade the area under a line chart
    pub fill_to_zero: bool,
    /// Print each value next to its bar
    pub show_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_tick_angle: Option<i32>,
}

impl ChartSpec {
    /// Creates a new builder for ChartSpec
    pub fn builder(kind: ChartKind, title: impl Into<String>) -> ChartSpecBuilder {
        ChartSpecBuilder {
            kind,
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            points: Vec::new(),
            fill_to_zero: false,
            show_values: false,
            y_max: None,
            x_tick_angle: None,
        }
    }
}

/// Builder for ChartSpec to reduce repetitive struct initialization
pub struct ChartSpecBuilder {
    kind: ChartKind,
    title: String,
    x_label: String,
    y_label: String,
    points: Vec<ChartPoint>,
    fill_to_zero: bool,
    show_values: bool,
    y_max: Option<f64>,
    x_tick_angle: Option<i32>,
}

impl ChartSpecBuilder {
    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_points(mut self, points: Vec<ChartPoint>) -> Self {
        self.points = points;
        self
    }

    pub fn with_fill_to_zero(mut self, value: bool) -> Self {
        self.fill_to_zero = value;
        self
    }

    pub fn with_show_values(mut self, value: bool) -> Self {
        self.show_values = value;
        self
    }

    pub fn with_y_max(mut self, value: Option<f64>) -> Self {
        self.y_max = value;
        self
    }

    pub fn with_x_tick_angle(mut self, value: i32) -> Self {
        self.x_tick_angle = Some(value);
        self
    }

    pub fn build(self) -> ChartSpec {
        ChartSpec {
            kind: self.kind,
            title: self.title,
            x_label: self.x_label,
            y_label: self.y_label,
            points: self.points,
            fill_to_zero: self.fill_to_zero,
            show_values: self.show_values,
            y_max: self.y_max,
            x_tick_angle: self.x_tick_angle,
        }
    }
}

/// A titled block of a page: a chart, supporting metrics and commentary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub metrics: Vec<Metric>,
    pub observation: String,
}

/// Date coverage of the loaded data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
    pub total_records: usize,
}

/// Preview row shown on the overview page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
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

/// `GET /overview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPage {
    pub title: String,
    pub header: String,
    pub kpis: Vec<Metric>,
    pub dataset: DatasetInfo,
    pub sample: Vec<SampleRow>,
}

/// `GET /analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPage {
    pub title: String,
    pub header: String,
    pub top_n: u32,
    pub weekly_orders: Panel,
    pub monthly_orders: Panel,
    pub top_products: Panel,
}

/// `GET /insights`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsPage {
    pub title: String,
    pub header: String,
    pub customer_value: Panel,
    pub categories: Panel,
    pub product_revenue: Panel,
}

/// Health of the page refresh job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshJobHealth {
    pub status: String,
    pub last_refresh: Option<NaiveDateTime>,
    pub message: String,
}
