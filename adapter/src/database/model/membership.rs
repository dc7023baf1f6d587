use chrono::{DateTime, Utc};
use kernel::model::{
    id::{MembershipId, UserId},
    membership::{Membership, MembershipPlan},
    money::Money,
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct MembershipRow {
    pub membership_id: MembershipId,
    pub user_id: UserId,
    pub plan_name: String,
    pub started_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub price_cents: i64,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = AppError;

    fn try_from(value: MembershipRow) -> Result<Self, Self::Error> {
        let MembershipRow {
            membership_id,
            user_id,
            plan_name,
            started_at,
            ends_at,
            price_cents,
        } = value;
        let plan = plan_name
            .parse::<MembershipPlan>()
            .map_err(|e| AppError::ConversionEntityError(format!("plan name: {e}")))?;
        Ok(Membership {
            id: membership_id,
            user_id,
            plan,
            started_at,
            ends_at,
            price: Money::from_cents(price_cents),
        })
    }
}
