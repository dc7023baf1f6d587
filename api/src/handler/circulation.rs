use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use garde::Validate;
use kernel::model::circulation::event::{BorrowBook, ReturnBook};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::circulation::{
        BorrowBookRequest, BorrowedResponse, ReturnBookRequest, ReturnedResponse,
        TransactionsResponse,
    },
};

pub async fn borrow_book(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<BorrowBookRequest>,
) -> AppResult<(StatusCode, Json<BorrowedResponse>)> {
    req.validate(&())?;

    // 現在時刻はここで一度だけ読み、以降の計算にはこの値を使う
    let event = BorrowBook::new(user.id(), req.book_title, req.payment_method, Utc::now());
    registry
        .circulation_repository()
        .borrow(event)
        .await
        .map(|transaction| (StatusCode::CREATED, Json(transaction.into())))
}

pub async fn return_book(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<ReturnBookRequest>,
) -> AppResult<Json<ReturnedResponse>> {
    req.validate(&())?;

    let event = ReturnBook::new(user.id(), req.book_title, Utc::now());
    registry
        .circulation_repository()
        .return_book(event)
        .await
        .map(ReturnedResponse::from)
        .map(Json)
}

pub async fn show_open_transactions(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TransactionsResponse>> {
    registry
        .circulation_repository()
        .find_open_by_user_id(user.id())
        .await
        .map(TransactionsResponse::from)
        .map(Json)
}

pub async fn show_transaction_history(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TransactionsResponse>> {
    registry
        .circulation_repository()
        .find_history_by_user_id(user.id())
        .await
        .map(TransactionsResponse::from)
        .map(Json)
}
