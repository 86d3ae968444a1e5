use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::{FeedbackId, ValidatedPageArgs};

/// Logged assistant interaction (`ai_usage_tracking`)
///
/// `useful` is tri-state: NULL until the visitor votes, then true or false.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub session_id: Option<String>,
    pub question: String,
    /// Ids of the providers handed to the model as context
    pub sources_used: Json<Vec<String>>,
    pub answered: bool,
    pub useful: Option<bool>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub voted_at: Option<DateTime<Utc>>,
}

/// Review filter on the vote column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackFilter {
    #[default]
    All,
    Useful,
    NotUseful,
}

impl FeedbackFilter {
    /// Value the vote must equal, None for no condition
    pub fn vote(self) -> Option<bool> {
        match self {
            FeedbackFilter::All => None,
            FeedbackFilter::Useful => Some(true),
            FeedbackFilter::NotUseful => Some(false),
        }
    }
}

/// Condition shared by the page, count and export queries; `$1` is
/// `FeedbackFilter::vote`
const FILTER_CONDITION: &str = "WHERE ($1::boolean IS NULL OR useful = $1)";

/// Outcome of a conditional vote update
#[derive(Debug, Clone)]
pub enum VoteOutcome {
    Recorded(FeedbackRecord),
    AlreadyVoted(FeedbackRecord),
    NotFound,
}

impl FeedbackRecord {
    pub async fn log(
        session_id: Option<&str>,
        question: &str,
        sources_used: Vec<String>,
        answered: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let record = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO ai_usage_tracking (id, session_id, question, sources_used, answered)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(FeedbackId::new())
        .bind(session_id)
        .bind(question)
        .bind(Json(sources_used))
        .bind(answered)
        .fetch_one(pool)
        .await?;
        Ok(record)
    }

    pub async fn find_by_id(id: FeedbackId, pool: &PgPool) -> Result<Option<Self>> {
        let record = sqlx::query_as::<_, Self>("SELECT * FROM ai_usage_tracking WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(record)
    }

    /// First vote wins: the update only applies while `useful` is NULL
    pub async fn record_vote(
        id: FeedbackId,
        useful: bool,
        comment: Option<&str>,
        pool: &PgPool,
    ) -> Result<VoteOutcome> {
        let updated = sqlx::query_as::<_, Self>(
            r#"
            UPDATE ai_usage_tracking
            SET useful = $2, comment = $3, voted_at = NOW()
            WHERE id = $1 AND useful IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(useful)
        .bind(comment)
        .fetch_optional(pool)
        .await?;

        if let Some(record) = updated {
            return Ok(VoteOutcome::Recorded(record));
        }

        Ok(match Self::find_by_id(id, pool).await? {
            Some(existing) => VoteOutcome::AlreadyVoted(existing),
            None => VoteOutcome::NotFound,
        })
    }

    /// One page under `filter`, newest first
    pub async fn find_page(
        filter: FeedbackFilter,
        args: &ValidatedPageArgs,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, Self>(&format!(
            "SELECT * FROM ai_usage_tracking {FILTER_CONDITION} \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        ))
        .bind(filter.vote())
        .bind(args.limit())
        .bind(args.offset())
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    /// Row count under the same condition as `find_page`
    pub async fn count(filter: FeedbackFilter, pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM ai_usage_tracking {FILTER_CONDITION}"
        ))
        .bind(filter.vote())
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Every row under `filter`, newest first (export)
    pub async fn find_all(filter: FeedbackFilter, pool: &PgPool) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, Self>(&format!(
            "SELECT * FROM ai_usage_tracking {FILTER_CONDITION} ORDER BY created_at DESC, id DESC"
        ))
        .bind(filter.vote())
        .fetch_all(pool)
        .await?;
        Ok(records)
    }
}
