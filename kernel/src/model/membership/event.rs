use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::UserId;

// plan_choice は 1: Basic, 2: Premium, 3: VIP
#[derive(new, Debug)]
pub struct EnrollMembership {
    pub user_id: UserId,
    pub plan_choice: i64,
    pub enrolled_at: DateTime<Utc>,
}
