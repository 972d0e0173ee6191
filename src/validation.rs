use crate::db::models::{AnalysisParams, DEFAULT_TOP_N, MAX_TOP_N, MIN_TOP_N};

/// Resolves the `top_n` query parameter, defaulting when absent
pub fn validate_top_n(params: &AnalysisParams) -> Result<u32, String> {
    match params.top_n {
        None => Ok(DEFAULT_TOP_N),
        Some(n) if (MIN_TOP_N..=MAX_TOP_N).contains(&n) => Ok(n),
        Some(n) => Err(format!(
            "top_n must be between {MIN_TOP_N} and {MAX_TOP_N}, got {n}"
        )),
    }
}
