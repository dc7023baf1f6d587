use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{author::event::DeleteAuthor, id::AuthorId};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::author::{AuthorsResponse, CreateAuthorRequest, CreatedAuthorResponse},
};

pub async fn register_author(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateAuthorRequest>,
) -> AppResult<(StatusCode, Json<CreatedAuthorResponse>)> {
    user.require_admin()?;
    req.validate(&())?;

    registry
        .author_repository()
        .create(req.into())
        .await
        .map(|id| (StatusCode::CREATED, Json(CreatedAuthorResponse { id })))
}

pub async fn show_author_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AuthorsResponse>> {
    registry
        .author_repository()
        .find_all()
        .await
        .map(AuthorsResponse::from)
        .map(Json)
}

pub async fn delete_author(
    user: AuthorizedUser,
    Path(author_id): Path<AuthorId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.require_admin()?;

    registry
        .author_repository()
        .delete(DeleteAuthor::new(author_id))
        .await
        .map(|_| StatusCode::OK)
}
