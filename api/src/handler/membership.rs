use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use kernel::model::membership::{event::EnrollMembership, MembershipPlan};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::membership::{
        ActivePlanResponse, EnrollMembershipRequest, EnrolledResponse, MembershipsResponse,
        PlanResponse, PlansResponse,
    },
};

pub async fn show_plan_list(_user: AuthorizedUser) -> Json<PlansResponse> {
    Json(PlansResponse {
        items: MembershipPlan::all()
            .into_iter()
            .map(PlanResponse::from)
            .collect(),
    })
}

pub async fn enroll_membership(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<EnrollMembershipRequest>,
) -> AppResult<(StatusCode, Json<EnrolledResponse>)> {
    let event = EnrollMembership::new(user.id(), req.plan_choice, Utc::now());
    registry
        .membership_repository()
        .enroll(event)
        .await
        .map(|membership| (StatusCode::CREATED, Json(membership.into())))
}

pub async fn show_active_plan(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ActivePlanResponse>> {
    registry
        .membership_repository()
        .has_active_plan(user.id(), Utc::now())
        .await
        .map(|active| Json(ActivePlanResponse { active }))
}

pub async fn show_membership_history(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MembershipsResponse>> {
    registry
        .membership_repository()
        .find_by_user_id(user.id())
        .await
        .map(MembershipsResponse::from)
        .map(Json)
}
