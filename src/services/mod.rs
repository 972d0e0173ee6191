pub mod analytics;
pub mod background_jobs;
pub mod commentary;
pub mod dashboard;
pub mod dataset;
pub mod misc;

pub use dashboard::Dashboard;
