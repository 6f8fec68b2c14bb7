use serde::Serialize;

use crate::domain::settings::DashboardStats;

/// Data required to render the dashboard.
#[derive(Debug, Default, Serialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    /// Highlights the pending-review tile.
    pub has_pending_posts: bool,
}
