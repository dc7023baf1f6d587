use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::payment::show_payment_list;

pub fn build_payment_routers() -> Router<AppRegistry> {
    Router::new().route("/payments", get(show_payment_list))
}
