#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use chrono::Utc;
use kernel::{
    model::{id::UserId, role::Role, user::User},
    repository::user::{MockUserRepository, UserRepository},
};
use registry::{AppRegistry, MockAppRegistryExt};
use serde_json::Value;

pub fn fixture_user(role: Role) -> User {
    User {
        id: UserId::new(),
        name: "reader".into(),
        email: "reader@example.com".into(),
        role,
        created_at: Utc::now(),
    }
}

// 指定したユーザーでリクエストを認可するモックを登録する
pub fn registry_for(user: User, mut registry: MockAppRegistryExt) -> AppRegistry {
    registry.expect_user_repository().returning(move || {
        let found = user.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_current_user()
            .returning(move |_| Ok(Some(found.clone())));
        let repo: Arc<dyn UserRepository> = Arc::new(repo);
        repo
    });
    Arc::new(registry)
}

pub fn make_router(registry: AppRegistry) -> Router {
    api::route::v1::routes().with_state(registry)
}

pub fn json_request(method: &str, uri: &str, user_id: UserId, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user_id.to_string())
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, user_id: UserId) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", user_id.to_string())
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
