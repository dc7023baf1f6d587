use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::feedback::{event::SubmitFeedback, Feedback};

#[mockall::automock]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn submit(&self, event: SubmitFeedback) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<Feedback>>;
}
