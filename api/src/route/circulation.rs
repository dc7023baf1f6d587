use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::circulation::{
    borrow_book, return_book, show_open_transactions, show_transaction_history,
};

pub fn build_circulation_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/borrow", post(borrow_book))
        .route("/return", post(return_book))
        .route("/open", get(show_open_transactions))
        .route("/history", get(show_transaction_history));

    Router::new().nest("/circulation", routers)
}
