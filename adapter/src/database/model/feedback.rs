use chrono::{DateTime, Utc};
use kernel::model::{
    feedback::Feedback,
    id::{FeedbackId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct FeedbackRow {
    pub feedback_id: FeedbackId,
    pub user_id: UserId,
    pub user_name: String,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(value: FeedbackRow) -> Self {
        Feedback {
            id: value.feedback_id,
            user_id: value.user_id,
            user_name: value.user_name,
            content: value.content,
            submitted_at: value.submitted_at,
        }
    }
}
