use anyhow::Result;
use serde::Deserialize;
use tracing::{info, warn};

use crate::common::{ApiError, FeedbackId};
use crate::domains::assistant::models::{FeedbackRecord, VoteOutcome};
use crate::kernel::ServerDeps;

const MAX_COMMENT_LEN: usize = 2000;

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackInput {
    pub useful: bool,
    pub comment: Option<String>,
}

/// Record the visitor's vote on an answer. Only the first vote counts.
pub async fn submit_feedback(
    record_id: FeedbackId,
    input: FeedbackInput,
    deps: &ServerDeps,
) -> Result<FeedbackRecord> {
    let comment = input
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    if comment.is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN) {
        return Err(ApiError::bad_request("comment is too long").into());
    }

    match FeedbackRecord::record_vote(record_id, input.useful, comment, &deps.db_pool).await? {
        VoteOutcome::Recorded(record) => {
            info!(record_id = %record_id, useful = input.useful, "Assistant feedback recorded");
            Ok(record)
        }
        VoteOutcome::AlreadyVoted(existing) => {
            warn!(
                record_id = %record_id,
                existing = ?existing.useful,
                "Ignoring repeated assistant vote"
            );
            Err(ApiError::Conflict("feedback already submitted".into()).into())
        }
        VoteOutcome::NotFound => Err(ApiError::not_found("record not found").into()),
    }
}
