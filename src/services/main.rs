//! Dashboard statistics.

use crate::api::{LibraryApi, decode_field};
use crate::domain::settings::DashboardStats;
use crate::dto::main::DashboardData;

pub const STATS_ENDPOINT: &str = "/api/admin/stats";

/// Loads the dashboard tiles.
///
/// The dashboard is informational, so a failed load only leaves every tile
/// empty.
pub async fn load_dashboard<A: LibraryApi>(api: &A) -> DashboardData {
    let stats = match api
        .get(STATS_ENDPOINT, &[])
        .await
        .and_then(|value| decode_field::<DashboardStats>(value, "stats"))
    {
        Ok(stats) => stats,
        Err(err) => {
            log::error!("Failed to load dashboard stats: {err}");
            DashboardStats::default()
        }
    };

    DashboardData {
        has_pending_posts: stats.pending_review_posts.is_some_and(|count| count > 0),
        stats,
    }
}
