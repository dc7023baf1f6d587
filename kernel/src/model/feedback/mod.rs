use chrono::{DateTime, Utc};

use super::id::{FeedbackId, UserId};

pub mod event;

#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: FeedbackId,
    pub user_id: UserId,
    pub user_name: String,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
}
