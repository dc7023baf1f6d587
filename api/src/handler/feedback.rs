use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use garde::Validate;
use kernel::model::feedback::event::SubmitFeedback;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::feedback::{FeedbacksResponse, SubmitFeedbackRequest},
};

pub async fn submit_feedback(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<SubmitFeedbackRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .feedback_repository()
        .submit(SubmitFeedback::new(user.id(), req.content, Utc::now()))
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_feedback_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FeedbacksResponse>> {
    user.require_admin()?;

    registry
        .feedback_repository()
        .find_all()
        .await
        .map(FeedbacksResponse::from)
        .map(Json)
}
