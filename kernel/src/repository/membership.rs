use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    membership::{event::EnrollMembership, Membership},
};

#[mockall::automock]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn has_active_plan(&self, user_id: UserId, as_of: DateTime<Utc>) -> AppResult<bool>;
    // 有効なプランがある間は加入できない
    async fn enroll(&self, event: EnrollMembership) -> AppResult<Membership>;
    // 期限切れのものも含めた加入履歴
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Membership>>;
}
