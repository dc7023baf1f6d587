use chrono::{DateTime, Utc};

use super::{
    id::{PaymentId, UserId},
    money::Money,
};

pub mod event;

/// 決済ゲートウェイとは連携しないため、記録される状態は常に Completed。
pub const PAYMENT_STATUS_COMPLETED: &str = "Completed";

#[derive(Debug, Clone)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub amount: Money,
    pub method: String,
    pub status: String,
    pub paid_at: DateTime<Utc>,
}
