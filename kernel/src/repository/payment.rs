use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    payment::{event::ChargePayment, Payment},
};

#[mockall::automock]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn charge(&self, event: ChargePayment) -> AppResult<Payment>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Payment>>;
}
