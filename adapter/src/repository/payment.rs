use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{PaymentId, UserId},
        payment::{event::ChargePayment, Payment, PAYMENT_STATUS_COMPLETED},
    },
    repository::payment::PaymentRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::SqliteConnection;

use crate::database::{model::payment::PaymentRow, ConnectionPool};

use super::map_reference_error;

#[derive(new)]
pub struct PaymentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryImpl {
    async fn charge(&self, event: ChargePayment) -> AppResult<Payment> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        record_payment(&mut conn, event).await
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
                SELECT payment_id, user_id, amount_cents, method, status, paid_at
                FROM payments
                WHERE user_id = ?
                ORDER BY paid_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }
}

// 貸出処理からも同じトランザクション上で呼ばれる
pub(crate) async fn record_payment(
    conn: &mut SqliteConnection,
    event: ChargePayment,
) -> AppResult<Payment> {
    let payment = Payment {
        id: PaymentId::new(),
        user_id: event.user_id,
        amount: event.amount,
        method: event.method,
        status: PAYMENT_STATUS_COMPLETED.to_string(),
        paid_at: event.paid_at,
    };

    sqlx::query(
        r#"
            INSERT INTO payments (payment_id, user_id, amount_cents, method, status, paid_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payment.id)
    .bind(payment.user_id)
    .bind(payment.amount.cents())
    .bind(&payment.method)
    .bind(&payment.status)
    .bind(payment.paid_at)
    .execute(conn)
    .await
    .map_err(|e| map_reference_error(e, "ユーザー"))?;

    tracing::debug!(
        payment_id = %payment.id,
        user_id = %payment.user_id,
        amount = %payment.amount,
        "payment recorded"
    );
    Ok(payment)
}
