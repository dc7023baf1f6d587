use chrono::{DateTime, Duration, Utc};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::{
    id::{MembershipId, UserId},
    money::Money,
};
use shared::error::AppError;

pub mod event;

/// 会員プランの有効期間
pub const MEMBERSHIP_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Clone)]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub plan: MembershipPlan,
    pub started_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    // 加入時点の料金
    pub price: Money,
}

impl Membership {
    pub fn is_active_at(&self, as_of: DateTime<Utc>) -> bool {
        as_of < self.ends_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
pub enum MembershipPlan {
    Basic,
    Premium,
    #[strum(serialize = "VIP")]
    Vip,
}

impl MembershipPlan {
    pub fn choice(self) -> i64 {
        match self {
            Self::Basic => 1,
            Self::Premium => 2,
            Self::Vip => 3,
        }
    }

    pub fn price(self) -> Money {
        match self {
            Self::Basic => Money::from_units(10),
            Self::Premium => Money::from_units(25),
            Self::Vip => Money::from_units(50),
        }
    }

    pub fn all() -> Vec<MembershipPlan> {
        Self::iter().collect()
    }
}

impl TryFrom<i64> for MembershipPlan {
    type Error = AppError;

    fn try_from(choice: i64) -> Result<Self, Self::Error> {
        Self::iter()
            .find(|plan| plan.choice() == choice)
            .ok_or(AppError::InvalidPlan(choice))
    }
}

pub fn membership_end_for(started_at: DateTime<Utc>) -> DateTime<Utc> {
    started_at + Duration::days(MEMBERSHIP_PERIOD_DAYS)
}
