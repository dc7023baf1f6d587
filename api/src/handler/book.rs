use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::BookId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::book::{BookResponse, BooksResponse, CreateBookRequest, CreatedBookResponse, GenresResponse},
};

pub async fn register_book(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<CreatedBookResponse>)> {
    user.require_admin()?;
    req.validate(&())?;

    registry
        .book_repository()
        .create(req.into())
        .await
        .map(|id| (StatusCode::CREATED, Json(CreatedBookResponse { id })))
}

pub async fn show_book_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BooksResponse>> {
    registry
        .book_repository()
        .find_all()
        .await
        .map(BooksResponse::from)
        .map(Json)
}

pub async fn show_book(
    _user: AuthorizedUser,
    Path(book_id): Path<BookId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookResponse>> {
    registry
        .book_repository()
        .find_by_id(book_id)
        .await
        .and_then(|bc| match bc {
            Some(bc) => Ok(Json(bc.into())),
            None => Err(AppError::EntityNotFound("The specific book was not found".into())),
        })
}

pub async fn show_genre_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<GenresResponse>> {
    registry
        .book_repository()
        .find_genres()
        .await
        .map(|items| Json(GenresResponse { items }))
}
