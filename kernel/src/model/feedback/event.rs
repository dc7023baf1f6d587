use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::UserId;

#[derive(new, Debug)]
pub struct SubmitFeedback {
    pub user_id: UserId,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
}
