use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::user::register_user;

// 利用者登録は X-User-Id を要求せず、リクエストの role をそのまま採用する。
// 管理者の払い出しを防ぐため、このルートは信頼できるゲートウェイの内側にだけ公開すること
pub fn build_user_routers() -> Router<AppRegistry> {
    Router::new().route("/users", post(register_user))
}
