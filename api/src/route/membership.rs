use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::membership::{
    enroll_membership, show_active_plan, show_membership_history, show_plan_list,
};

pub fn build_membership_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(show_membership_history).post(enroll_membership))
        .route("/plans", get(show_plan_list))
        .route("/active", get(show_active_plan));

    Router::new().nest("/memberships", routers)
}
