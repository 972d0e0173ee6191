//! Database models and types module.
//! This module contains the rows read from the analytics database and the
//! documents served by the API.

mod db_models; // Rows read from the analytics database
mod params; // Query string parameters
mod responses; // API response models

// Re-export all models for easier access
pub use db_models::*;
pub use params::*;
pub use responses::*;
