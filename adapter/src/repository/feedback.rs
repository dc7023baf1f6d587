use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        feedback::{event::SubmitFeedback, Feedback},
        id::FeedbackId,
    },
    repository::feedback::FeedbackRepository,
};
use shared::error::{AppError, AppResult};

use super::map_reference_error;
use crate::database::{model::feedback::FeedbackRow, ConnectionPool};

#[derive(new)]
pub struct FeedbackRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl FeedbackRepository for FeedbackRepositoryImpl {
    async fn submit(&self, event: SubmitFeedback) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO feedback (feedback_id, user_id, content, submitted_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(FeedbackId::new())
        .bind(event.user_id)
        .bind(&event.content)
        .bind(event.submitted_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| map_reference_error(e, "ユーザー"))?;

        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r#"
                SELECT
                    f.feedback_id,
                    f.user_id,
                    u.name AS user_name,
                    f.content,
                    f.submitted_at
                FROM feedback AS f
                INNER JOIN users AS u ON u.user_id = f.user_id
                ORDER BY f.submitted_at DESC, f.rowid DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Feedback::from).collect())
    }
}
