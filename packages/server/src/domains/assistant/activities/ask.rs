//! Answer a visitor question.
//!
//! The answer is best effort: an unreachable model or a failing context
//! lookup yields the fallback message, never an error, so the visitor can
//! simply ask again. The interaction is logged whether or not it was
//! answered, and a failed log write only costs the vote button.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::common::{ApiError, FeedbackId, ProviderId};
use crate::domains::assistant::context::load_context;
use crate::domains::assistant::models::FeedbackRecord;
use crate::domains::assistant::prompt::{build_user_prompt, FALLBACK_ANSWER, SYSTEM_PROMPT};
use crate::kernel::ServerDeps;

pub const MAX_QUESTION_LEN: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct AskInput {
    pub question: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// Id to vote on; None when logging failed
    pub record_id: Option<FeedbackId>,
    pub fallback: bool,
    pub sources: Vec<ProviderId>,
}

pub async fn ask_question(input: AskInput, deps: &ServerDeps) -> Result<AskResponse> {
    let question = input.question.trim();
    if question.is_empty() {
        return Err(ApiError::bad_request("question is required").into());
    }
    if question.chars().count() > MAX_QUESTION_LEN {
        return Err(ApiError::bad_request("question is too long").into());
    }
    let session_id = input
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let context = match load_context(question, deps).await {
        Ok(context) => context,
        Err(e) => {
            warn!(error = %e, "Failed to load assistant context");
            Vec::new()
        }
    };
    let sources: Vec<ProviderId> = context.iter().map(|p| p.id).collect();

    let answer = match &deps.ai {
        Some(ai) => match ai
            .complete(SYSTEM_PROMPT, &build_user_prompt(question, &context))
            .await
        {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(_) => {
                warn!("Assistant returned an empty answer");
                None
            }
            Err(e) => {
                error!(error = %e, "Assistant completion failed");
                None
            }
        },
        None => None,
    };
    let answered = answer.is_some();

    let record_id = match FeedbackRecord::log(
        session_id,
        question,
        sources.iter().map(ToString::to_string).collect(),
        answered,
        &deps.db_pool,
    )
    .await
    {
        Ok(record) => Some(record.id),
        Err(e) => {
            warn!(error = %e, "Failed to log assistant usage");
            None
        }
    };

    info!(
        answered,
        sources = sources.len(),
        record_id = ?record_id,
        "Assistant question handled"
    );

    Ok(AskResponse {
        answer: answer.unwrap_or_else(|| FALLBACK_ANSWER.to_string()),
        record_id,
        fallback: !answered,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;
    use crate::kernel::TestDependencies;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    /// Pool pointing at nothing: every query fails fast
    fn unreachable_pool() -> sqlx::PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap()
    }

    fn input(question: &str) -> AskInput {
        AskInput {
            question: question.into(),
            session_id: Some("sesion-1".into()),
        }
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let deps = TestDependencies::new().into_server_deps(unreachable_pool());
        let err = ask_question(input("   "), &deps).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_answers_even_when_database_is_down() {
        let test_deps = TestDependencies::new()
            .mock_ai(MockAI::new().with_response("Prueba con Snacks Charlitron."));
        let ai = test_deps.ai.clone().unwrap();
        let deps = test_deps.into_server_deps(unreachable_pool());

        let response = ask_question(input("¿Quién vende elotes?"), &deps)
            .await
            .unwrap();

        assert_eq!(response.answer, "Prueba con Snacks Charlitron.");
        assert!(!response.fallback);
        assert!(response.record_id.is_none());
        assert!(ai.was_called_with("¿Quién vende elotes?"));
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_fallback() {
        let deps = TestDependencies::new()
            .mock_ai(MockAI::failing())
            .into_server_deps(unreachable_pool());

        let response = ask_question(input("¿Hay DJ?"), &deps).await.unwrap();
        assert!(response.fallback);
        assert_eq!(response.answer, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_unconfigured_model_returns_fallback() {
        let deps = TestDependencies::new()
            .without_ai()
            .into_server_deps(unreachable_pool());

        let response = ask_question(input("¿Hay DJ?"), &deps).await.unwrap();
        assert!(response.fallback);
    }
}
