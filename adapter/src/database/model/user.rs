use chrono::{DateTime, Utc};
use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            name,
            email,
            role,
            created_at,
        } = value;
        let role = role
            .parse::<Role>()
            .map_err(|e| AppError::ConversionEntityError(format!("role: {e}")))?;
        Ok(User {
            id: user_id,
            name,
            email,
            role,
            created_at,
        })
    }
}
