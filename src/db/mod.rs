pub mod connection;
pub mod models;
pub mod redis;
pub mod sales;

pub use connection::DbClient;
