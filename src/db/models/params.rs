use serde::{Deserialize, Serialize};

/// Default number of products on the order frequency chart
pub const DEFAULT_TOP_N: u32 = 10;
/// Smallest accepted `top_n`
pub const MIN_TOP_N: u32 = 5;
/// Largest accepted `top_n`
pub const MAX_TOP_N: u32 = 30;

/// Query parameters for `GET /analysis`
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub top_n: Option<u32>,
}
