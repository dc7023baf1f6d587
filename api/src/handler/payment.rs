use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{extractor::AuthorizedUser, model::payment::PaymentsResponse};

pub async fn show_payment_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaymentsResponse>> {
    registry
        .payment_repository()
        .find_by_user_id(user.id())
        .await
        .map(PaymentsResponse::from)
        .map(Json)
}
