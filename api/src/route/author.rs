use axum::{
    routing::{delete, get},
    Router,
};
use registry::AppRegistry;

use crate::handler::author::{delete_author, register_author, show_author_list};

pub fn build_author_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(show_author_list).post(register_author))
        .route("/:author_id", delete(delete_author));

    Router::new().nest("/authors", routers)
}
