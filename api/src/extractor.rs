use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use kernel::model::{id::UserId, user::User};
use registry::AppRegistry;
use shared::error::AppError;

// 認証は上流のゲートウェイが済ませ、このヘッダーにユーザー ID を載せてくる
pub const USER_ID_HEADER: &str = "x-user-id";

// リクエストの前処理を実行後、handler に渡す構造体を定義
pub struct AuthorizedUser {
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    // 管理者以外の操作を拒否する
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    // handler メソッドの引数に AuthorizedUser を追加したときはこのメソッドが呼ばれる
    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // HTTP ヘッダからユーザ ID を取り出す
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::UnauthenticatedError)?
            .parse::<UserId>()
            .map_err(|_| AppError::UnauthenticatedError)?;

        // ユーザ ID でデータベースからユーザのレコードを引く
        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(%user_id, "request from unknown user");
                AppError::UnauthenticatedError
            })?;

        Ok(Self { user })
    }
}
