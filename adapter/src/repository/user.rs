use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        user::{event::CreateUser, User},
    },
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        sqlx::query(
            r#"
                INSERT INTO users (user_id, name, email, role)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(event.role.to_string())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        tracing::debug!(%user_id, role = %event.role, "user created");

        self.find_current_user(user_id)
            .await?
            .ok_or_else(|| AppError::NoRowAffectedError("No user has been created".into()))
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, role, created_at
                FROM users
                WHERE user_id = ?
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use kernel::model::role::Role;

    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn test_create_and_find_user() -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(memory_pool().await);

        let created = repo
            .create(CreateUser::new(
                "admin01".into(),
                "admin01@example.com".into(),
                Role::Admin,
            ))
            .await?;
        assert!(created.is_admin());

        let found = repo.find_current_user(created.id).await?.unwrap();
        assert_eq!(found.name, "admin01");
        assert_eq!(found.email, "admin01@example.com");
        assert_eq!(found.role, Role::Admin);

        assert!(repo.find_current_user(UserId::new()).await?.is_none());
        Ok(())
    }
}
