use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::feedback::{show_feedback_list, submit_feedback};

pub fn build_feedback_routers() -> Router<AppRegistry> {
    Router::new().route("/feedback", get(show_feedback_list).post(submit_feedback))
}
