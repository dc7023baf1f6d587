use chrono::{DateTime, Utc};
use kernel::model::{
    id::{PaymentId, UserId},
    money::Money,
    payment::Payment,
};

#[derive(sqlx::FromRow)]
pub struct PaymentRow {
    pub payment_id: PaymentId,
    pub user_id: UserId,
    pub amount_cents: i64,
    pub method: String,
    pub status: String,
    pub paid_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(value: PaymentRow) -> Self {
        Payment {
            id: value.payment_id,
            user_id: value.user_id,
            amount: Money::from_cents(value.amount_cents),
            method: value.method,
            status: value.status,
            paid_at: value.paid_at,
        }
    }
}
