use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{feedback::Feedback, id::FeedbackId};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    #[garde(length(min = 1))]
    pub content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: FeedbackId,
    pub user_name: String,
    pub content: String,
    pub date_submitted: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(value: Feedback) -> Self {
        Self {
            id: value.id,
            user_name: value.user_name,
            content: value.content,
            date_submitted: value.submitted_at,
        }
    }
}

#[derive(Serialize)]
pub struct FeedbacksResponse {
    pub items: Vec<FeedbackResponse>,
}

impl From<Vec<Feedback>> for FeedbacksResponse {
    fn from(value: Vec<Feedback>) -> Self {
        Self {
            items: value.into_iter().map(FeedbackResponse::from).collect(),
        }
    }
}
