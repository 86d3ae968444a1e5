//! Paginated review of assistant feedback.
//!
//! The vote filter is applied in SQL so the page and its total agree. The
//! page fetch and the count run concurrently.

use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;

use crate::common::{Page, PageArgs};
use crate::domains::assistant::{FeedbackFilter, FeedbackRecord};
use crate::kernel::ServerDeps;

pub async fn review_feedback(
    filter: FeedbackFilter,
    args: PageArgs,
    deps: &ServerDeps,
) -> Result<Page<FeedbackRecord>> {
    let args = args.validate();

    let (records, total) = tokio::try_join!(
        FeedbackRecord::find_page(filter, &args, &deps.db_pool),
        FeedbackRecord::count(filter, &deps.db_pool),
    )?;

    debug!(
        filter = ?filter,
        page = args.page,
        size = args.size,
        returned = records.len(),
        total,
        "Loaded feedback page"
    );

    Ok(Page::new(records, total, &args))
}

/// Vote tallies across all records
#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct FeedbackStats {
    pub total: i64,
    pub useful: i64,
    pub not_useful: i64,
    pub pending: i64,
    pub unanswered: i64,
}

impl FeedbackStats {
    pub async fn load(pool: &PgPool) -> Result<Self> {
        let stats = sqlx::query_as::<_, Self>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE useful = true) AS useful,
                COUNT(*) FILTER (WHERE useful = false) AS not_useful,
                COUNT(*) FILTER (WHERE useful IS NULL) AS pending,
                COUNT(*) FILTER (WHERE answered = false) AS unanswered
            FROM ai_usage_tracking
            "#,
        )
        .fetch_one(pool)
        .await?;
        Ok(stats)
    }
}

pub async fn feedback_stats(deps: &ServerDeps) -> Result<FeedbackStats> {
    FeedbackStats::load(&deps.db_pool).await
}
