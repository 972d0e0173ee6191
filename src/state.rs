use std::time::Duration;

use crate::db::DbClient;
use crate::services::Dashboard;

#[derive(Clone)]
pub struct AppState {
    pub db: DbClient,
    pub dashboard: Dashboard,
    pub refresh_interval: Duration,
}

impl AppState {
    pub fn new(db: DbClient, refresh_interval: Duration) -> Self {
        Self {
            dashboard: Dashboard::new(db.clone()),
            db,
            refresh_interval,
        }
    }
}
