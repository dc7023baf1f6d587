use chrono::{DateTime, Utc};
use kernel::model::{
    id::MembershipId,
    membership::{Membership, MembershipPlan},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollMembershipRequest {
    // 1: Basic, 2: Premium, 3: VIP
    pub plan_choice: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledResponse {
    pub id: MembershipId,
    pub plan_name: String,
    pub price: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<Membership> for EnrolledResponse {
    fn from(value: Membership) -> Self {
        Self {
            id: value.id,
            plan_name: value.plan.to_string(),
            price: value.price.to_string(),
            start_date: value.started_at,
            end_date: value.ends_at,
        }
    }
}

#[derive(Serialize)]
pub struct MembershipsResponse {
    pub items: Vec<EnrolledResponse>,
}

impl From<Vec<Membership>> for MembershipsResponse {
    fn from(value: Vec<Membership>) -> Self {
        Self {
            items: value.into_iter().map(EnrolledResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan_choice: i64,
    pub plan_name: String,
    pub price: String,
}

impl From<MembershipPlan> for PlanResponse {
    fn from(value: MembershipPlan) -> Self {
        Self {
            plan_choice: value.choice(),
            plan_name: value.to_string(),
            price: value.price().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct PlansResponse {
    pub items: Vec<PlanResponse>,
}

#[derive(Serialize)]
pub struct ActivePlanResponse {
    pub active: bool,
}
