use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::{id::UserId, money::Money};

#[derive(new, Debug)]
pub struct ChargePayment {
    pub user_id: UserId,
    pub amount: Money,
    pub method: String,
    pub paid_at: DateTime<Utc>,
}
