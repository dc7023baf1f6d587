use axum::Router;
use registry::AppRegistry;

use super::{
    author::build_author_routers, book::build_book_routers,
    circulation::build_circulation_routers, feedback::build_feedback_routers,
    health::build_health_check_routers, membership::build_membership_routers,
    payment::build_payment_routers, user::build_user_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_user_routers())
        .merge(build_author_routers())
        .merge(build_book_routers())
        .merge(build_circulation_routers())
        .merge(build_membership_routers())
        .merge(build_payment_routers())
        .merge(build_feedback_routers());

    Router::new().nest("/api/v1", router)
}
