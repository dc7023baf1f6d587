use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    author::{
        event::{CreateAuthor, DeleteAuthor},
        Author,
    },
    id::AuthorId,
};

#[mockall::automock]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn create(&self, event: CreateAuthor) -> AppResult<AuthorId>;
    // 名前の昇順
    async fn find_all(&self) -> AppResult<Vec<Author>>;
    async fn find_by_id(&self, author_id: AuthorId) -> AppResult<Option<Author>>;
    async fn exists(&self, author_id: AuthorId) -> AppResult<bool>;
    // 著者を参照している蔵書の author は NULL になる
    async fn delete(&self, event: DeleteAuthor) -> AppResult<()>;
}
