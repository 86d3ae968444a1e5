use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{ApiResult, FeedbackId};
use crate::domains::assistant::activities::{
    ask_question, assistant_status, submit_feedback, AskInput, AskResponse, AssistantStatus,
    FeedbackInput,
};
use crate::domains::assistant::FeedbackRecord;
use crate::server::app::AxumAppState;

pub async fn ask_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<AskInput>,
) -> ApiResult<Json<AskResponse>> {
    Ok(Json(ask_question(input, &state.server_deps).await?))
}

pub async fn feedback_handler(
    Extension(state): Extension<AxumAppState>,
    Path(record_id): Path<FeedbackId>,
    Json(input): Json<FeedbackInput>,
) -> ApiResult<Json<FeedbackRecord>> {
    Ok(Json(
        submit_feedback(record_id, input, &state.server_deps).await?,
    ))
}

pub async fn status_handler(Extension(state): Extension<AxumAppState>) -> Json<AssistantStatus> {
    Json(assistant_status(&state.server_deps))
}
