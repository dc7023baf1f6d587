use chrono::{DateTime, Utc};
use kernel::model::{id::PaymentId, payment::Payment};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub amount: String,
    pub method: String,
    pub status: String,
    pub date: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(value: Payment) -> Self {
        Self {
            id: value.id,
            amount: value.amount.to_string(),
            method: value.method,
            status: value.status,
            date: value.paid_at,
        }
    }
}

#[derive(Serialize)]
pub struct PaymentsResponse {
    pub items: Vec<PaymentResponse>,
}

impl From<Vec<Payment>> for PaymentsResponse {
    fn from(value: Vec<Payment>) -> Self {
        Self {
            items: value.into_iter().map(PaymentResponse::from).collect(),
        }
    }
}
