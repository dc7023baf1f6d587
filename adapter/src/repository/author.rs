use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        author::{
            event::{CreateAuthor, DeleteAuthor},
            Author,
        },
        id::AuthorId,
    },
    repository::author::AuthorRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::SqliteConnection;

use crate::database::{model::author::AuthorRow, ConnectionPool};

#[derive(new)]
pub struct AuthorRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AuthorRepository for AuthorRepositoryImpl {
    async fn create(&self, event: CreateAuthor) -> AppResult<AuthorId> {
        let author_id = AuthorId::new();
        sqlx::query(
            r#"
                INSERT INTO authors (author_id, name, bio)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(author_id)
        .bind(&event.name)
        .bind(&event.bio)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(author_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
                SELECT author_id, name, bio, created_at
                FROM authors
                ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(&self, author_id: AuthorId) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
                SELECT author_id, name, bio, created_at
                FROM authors
                WHERE author_id = ?
            "#,
        )
        .bind(author_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Author::from))
    }

    async fn exists(&self, author_id: AuthorId) -> AppResult<bool> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        author_exists(&mut conn, author_id).await
    }

    async fn delete(&self, event: DeleteAuthor) -> AppResult<()> {
        // 蔵書側の author_id は外部キーの ON DELETE SET NULL で消える
        let res = sqlx::query("DELETE FROM authors WHERE author_id = ?")
            .bind(event.author_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "指定された著者が見つかりません。".into(),
            ));
        }

        tracing::info!(author_id = %event.author_id, "author deleted");
        Ok(())
    }
}

// 蔵書登録のトランザクションからも使う
pub(crate) async fn author_exists(
    conn: &mut SqliteConnection,
    author_id: AuthorId,
) -> AppResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM authors WHERE author_id = ?)")
        .bind(author_id)
        .fetch_one(conn)
        .await
        .map_err(AppError::SpecificOperationError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    #[tokio::test]
    async fn test_authors_are_listed_by_name() -> anyhow::Result<()> {
        let repo = AuthorRepositoryImpl::new(memory_pool().await);

        let tolkien = repo
            .create(CreateAuthor::new("Tolkien".into(), "Philologist".into()))
            .await?;
        repo.create(CreateAuthor::new("Austen".into(), String::new()))
            .await?;

        let names: Vec<String> = repo.find_all().await?.into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Austen".to_string(), "Tolkien".to_string()]);

        let found = repo.find_by_id(tolkien).await?.unwrap();
        assert_eq!(found.bio, "Philologist");
        assert!(repo.exists(tolkien).await?);
        assert!(!repo.exists(AuthorId::new()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_author_is_not_found() -> anyhow::Result<()> {
        let repo = AuthorRepositoryImpl::new(memory_pool().await);

        let res = repo.delete(DeleteAuthor::new(AuthorId::new())).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
